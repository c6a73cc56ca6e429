#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use busboardd::{build_router, AdminCredential, AppState, SessionStore};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const ADMIN_PASSWORD: &str = "route-42-secret";

pub struct TestApp {
    pub addr: SocketAddr,
    pub public_dir: PathBuf,
    _data_dir: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(AdminCredential::Plain(ADMIN_PASSWORD.to_string())).await
}

pub async fn spawn_app_with(admin: AdminCredential) -> TestApp {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let public_dir = data_dir.path().join("public");
    std::fs::create_dir_all(&public_dir).expect("public dir");

    let conn = busboardd::db::open_db(data_dir.path()).expect("open db");
    let state = AppState::new(
        conn,
        SessionStore::new(Duration::from_secs(24 * 60 * 60)),
        admin,
        public_dir.clone(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("serve app")
    });

    TestApp {
        addr,
        public_dir,
        _data_dir: data_dir,
    }
}

pub struct ApiResponse {
    pub status: u16,
    pub set_cookie: Option<String>,
    pub body: Value,
    pub raw_body: String,
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        body: Option<&Value>,
    ) -> ApiResponse {
        let mut stream = tokio::net::TcpStream::connect(self.addr)
            .await
            .expect("connect server");

        let payload = body.map(|v| v.to_string()).unwrap_or_default();
        let mut req = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
            method, path, self.addr
        );
        if let Some(c) = cookie {
            req.push_str(&format!("Cookie: {}\r\n", c));
        }
        if body.is_some() {
            req.push_str("Content-Type: application/json\r\n");
            req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
        }
        req.push_str("\r\n");
        req.push_str(&payload);

        stream
            .write_all(req.as_bytes())
            .await
            .expect("write request");
        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .await
            .expect("read response");

        let (head, raw_body) = response
            .split_once("\r\n\r\n")
            .expect("http response separator");
        let status = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|s| s.parse::<u16>().ok())
            .expect("status line");
        let set_cookie = head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("set-cookie") {
                Some(value.trim().to_string())
            } else {
                None
            }
        });
        let body = serde_json::from_str(raw_body).unwrap_or(Value::Null);

        ApiResponse {
            status,
            set_cookie,
            body,
            raw_body: raw_body.to_string(),
        }
    }

    pub async fn get(&self, path: &str) -> ApiResponse {
        self.request("GET", path, None, None).await
    }

    pub async fn get_as(&self, path: &str, cookie: &str) -> ApiResponse {
        self.request("GET", path, Some(cookie), None).await
    }

    /// Logs in with the test password and returns the `name=value` cookie
    /// pair to send on subsequent requests.
    pub async fn login(&self) -> String {
        let resp = self
            .request(
                "POST",
                "/api/login",
                None,
                Some(&json!({ "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(resp.status, 200, "login failed: {}", resp.raw_body);
        let set_cookie = resp.set_cookie.expect("login must set the session cookie");
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }
}
