use axum::routing::{delete, get, post, put};
use axum::Router;

use super::assets;
use super::handlers::{auth, completion, core, repairs, subs, trips};
use super::types::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(core::health))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/session", get(auth::session))
        .route("/api/bus-subs", get(subs::list).post(subs::create))
        .route("/api/bus-subs/:id", put(subs::update))
        .route("/api/bus-repairs", get(repairs::list).post(repairs::create))
        .route("/api/bus-repairs/:id", put(repairs::update))
        .route("/api/field-trips", get(trips::list).post(trips::create))
        .route("/api/field-trips/:id", put(trips::update))
        .route("/api/mark-complete", post(completion::mark_complete))
        .route("/api/log/:table", get(completion::log_list))
        // Delete keys on the internal table name, not the URL alias.
        .route("/api/:table/:id", delete(completion::delete_record))
        .fallback(assets::spa_fallback)
        .with_state(state)
}
