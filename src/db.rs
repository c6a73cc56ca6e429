use rusqlite::Connection;
use std::path::Path;

pub fn open_db(data_dir: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("busboard.sqlite3");
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS bus_subs(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bus_number TEXT NOT NULL DEFAULT '',
            morning_sub TEXT NOT NULL DEFAULT '',
            afternoon_sub TEXT NOT NULL DEFAULT '',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            completed_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS bus_repairs(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            down_bus_number TEXT NOT NULL DEFAULT '',
            reason TEXT NOT NULL DEFAULT '',
            sub_bus_number TEXT NOT NULL DEFAULT '',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            completed_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS field_trips(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL DEFAULT '',
            from_location TEXT NOT NULL DEFAULT '',
            to_location TEXT NOT NULL DEFAULT '',
            start_time TEXT NOT NULL DEFAULT '',
            end_time TEXT NOT NULL DEFAULT '',
            driver TEXT NOT NULL DEFAULT '',
            bus_number TEXT NOT NULL DEFAULT '',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            completed_at TEXT
        )",
        [],
    )?;

    // Deployments that predate the log view have tables without completed_at.
    ensure_completed_at(&conn, "bus_subs")?;
    ensure_completed_at(&conn, "bus_repairs")?;
    ensure_completed_at(&conn, "field_trips")?;

    Ok(conn)
}

fn ensure_completed_at(conn: &Connection, table: &str) -> anyhow::Result<()> {
    if table_has_column(conn, table, "completed_at")? {
        return Ok(());
    }
    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN completed_at TEXT", table),
        [],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
