//! Single-statement operations over the three record collections. Every
//! function here executes exactly one parameterized statement; table names
//! come from `RecordKind`, never from the caller.

use chrono::Utc;
use rusqlite::{Connection, Row};

use crate::records::{
    BusRepair, BusRepairFields, BusSub, BusSubFields, FieldTrip, FieldTripFields, RecordKind,
};

const SUB_COLUMNS: &str =
    "id, bus_number, morning_sub, afternoon_sub, completed, created_at, completed_at";
const REPAIR_COLUMNS: &str =
    "id, down_bus_number, reason, sub_bus_number, completed, created_at, completed_at";
const TRIP_COLUMNS: &str = "id, date, from_location, to_location, start_time, end_time, \
     driver, bus_number, completed, created_at, completed_at";

fn sub_from_row(r: &Row<'_>) -> rusqlite::Result<BusSub> {
    Ok(BusSub {
        id: r.get(0)?,
        bus_number: r.get(1)?,
        morning_sub: r.get(2)?,
        afternoon_sub: r.get(3)?,
        completed: r.get::<_, i64>(4)? != 0,
        created_at: r.get(5)?,
        completed_at: r.get(6)?,
    })
}

fn repair_from_row(r: &Row<'_>) -> rusqlite::Result<BusRepair> {
    Ok(BusRepair {
        id: r.get(0)?,
        down_bus_number: r.get(1)?,
        reason: r.get(2)?,
        sub_bus_number: r.get(3)?,
        completed: r.get::<_, i64>(4)? != 0,
        created_at: r.get(5)?,
        completed_at: r.get(6)?,
    })
}

fn trip_from_row(r: &Row<'_>) -> rusqlite::Result<FieldTrip> {
    Ok(FieldTrip {
        id: r.get(0)?,
        date: r.get(1)?,
        from_location: r.get(2)?,
        to_location: r.get(3)?,
        start_time: r.get(4)?,
        end_time: r.get(5)?,
        driver: r.get(6)?,
        bus_number: r.get(7)?,
        completed: r.get::<_, i64>(8)? != 0,
        created_at: r.get(9)?,
        completed_at: r.get(10)?,
    })
}

// Bus numbers are free-text numeric strings; the dashboard orders them
// numerically, so the cast happens in SQL. Ties break by id to keep the
// listings deterministic.
pub fn list_active_subs(conn: &Connection) -> rusqlite::Result<Vec<BusSub>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUB_COLUMNS} FROM bus_subs
         WHERE completed = 0
         ORDER BY CAST(bus_number AS INTEGER), id"
    ))?;
    let rows = stmt.query_map([], sub_from_row)?;
    rows.collect()
}

pub fn list_active_repairs(conn: &Connection) -> rusqlite::Result<Vec<BusRepair>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPAIR_COLUMNS} FROM bus_repairs
         WHERE completed = 0
         ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], repair_from_row)?;
    rows.collect()
}

pub fn list_active_trips(conn: &Connection) -> rusqlite::Result<Vec<FieldTrip>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRIP_COLUMNS} FROM field_trips
         WHERE completed = 0
         ORDER BY date, start_time, id"
    ))?;
    let rows = stmt.query_map([], trip_from_row)?;
    rows.collect()
}

pub fn list_completed_subs(conn: &Connection) -> rusqlite::Result<Vec<BusSub>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUB_COLUMNS} FROM bus_subs WHERE completed = 1 ORDER BY id DESC"
    ))?;
    let rows = stmt.query_map([], sub_from_row)?;
    rows.collect()
}

pub fn list_completed_repairs(conn: &Connection) -> rusqlite::Result<Vec<BusRepair>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPAIR_COLUMNS} FROM bus_repairs WHERE completed = 1 ORDER BY id DESC"
    ))?;
    let rows = stmt.query_map([], repair_from_row)?;
    rows.collect()
}

pub fn list_completed_trips(conn: &Connection) -> rusqlite::Result<Vec<FieldTrip>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRIP_COLUMNS} FROM field_trips WHERE completed = 1 ORDER BY id DESC"
    ))?;
    let rows = stmt.query_map([], trip_from_row)?;
    rows.collect()
}

pub fn create_sub(conn: &Connection, fields: &BusSubFields) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bus_subs (bus_number, morning_sub, afternoon_sub) VALUES (?, ?, ?)",
        (
            &fields.bus_number,
            &fields.morning_sub,
            &fields.afternoon_sub,
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_repair(conn: &Connection, fields: &BusRepairFields) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bus_repairs (down_bus_number, reason, sub_bus_number) VALUES (?, ?, ?)",
        (
            &fields.down_bus_number,
            &fields.reason,
            &fields.sub_bus_number,
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_trip(conn: &Connection, fields: &FieldTripFields) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO field_trips
         (date, from_location, to_location, start_time, end_time, driver, bus_number)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        (
            &fields.date,
            &fields.from_location,
            &fields.to_location,
            &fields.start_time,
            &fields.end_time,
            &fields.driver,
            &fields.bus_number,
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

// Updates report whether a row was touched; an absent id is the caller's
// not-found case, not a silent success.

pub fn update_sub(conn: &Connection, id: i64, fields: &BusSubFields) -> rusqlite::Result<bool> {
    let n = conn.execute(
        "UPDATE bus_subs SET bus_number = ?, morning_sub = ?, afternoon_sub = ? WHERE id = ?",
        (
            &fields.bus_number,
            &fields.morning_sub,
            &fields.afternoon_sub,
            id,
        ),
    )?;
    Ok(n > 0)
}

pub fn update_repair(
    conn: &Connection,
    id: i64,
    fields: &BusRepairFields,
) -> rusqlite::Result<bool> {
    let n = conn.execute(
        "UPDATE bus_repairs SET down_bus_number = ?, reason = ?, sub_bus_number = ? WHERE id = ?",
        (
            &fields.down_bus_number,
            &fields.reason,
            &fields.sub_bus_number,
            id,
        ),
    )?;
    Ok(n > 0)
}

pub fn update_trip(conn: &Connection, id: i64, fields: &FieldTripFields) -> rusqlite::Result<bool> {
    let n = conn.execute(
        "UPDATE field_trips
         SET date = ?, from_location = ?, to_location = ?, start_time = ?,
             end_time = ?, driver = ?, bus_number = ?
         WHERE id = ?",
        (
            &fields.date,
            &fields.from_location,
            &fields.to_location,
            &fields.start_time,
            &fields.end_time,
            &fields.driver,
            &fields.bus_number,
            id,
        ),
    )?;
    Ok(n > 0)
}

pub fn delete(conn: &Connection, kind: RecordKind, id: i64) -> rusqlite::Result<bool> {
    let sql = match kind {
        RecordKind::BusSubs => "DELETE FROM bus_subs WHERE id = ?",
        RecordKind::BusRepairs => "DELETE FROM bus_repairs WHERE id = ?",
        RecordKind::FieldTrips => "DELETE FROM field_trips WHERE id = ?",
    };
    let n = conn.execute(sql, [id])?;
    Ok(n > 0)
}

/// The only state transition in the system: Active -> Completed -> Active.
/// Completing stamps `completed_at` with the transition time; un-completing
/// clears it.
pub fn set_completed(
    conn: &Connection,
    kind: RecordKind,
    id: i64,
    completed: bool,
) -> rusqlite::Result<bool> {
    let sql = match kind {
        RecordKind::BusSubs => "UPDATE bus_subs SET completed = ?, completed_at = ? WHERE id = ?",
        RecordKind::BusRepairs => {
            "UPDATE bus_repairs SET completed = ?, completed_at = ? WHERE id = ?"
        }
        RecordKind::FieldTrips => {
            "UPDATE field_trips SET completed = ?, completed_at = ? WHERE id = ?"
        }
    };
    let completed_at = completed.then(|| Utc::now().to_rfc3339());
    let n = conn.execute(sql, (i64::from(completed), &completed_at, id))?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db;

    fn test_conn() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().expect("tempdir");
        let conn = open_db(dir.path()).expect("open db");
        (dir, conn)
    }

    #[test]
    fn create_then_list_active_includes_record() {
        let (_dir, conn) = test_conn();
        let id = create_sub(
            &conn,
            &BusSubFields {
                bus_number: "12".into(),
                morning_sub: "J. Doe".into(),
                afternoon_sub: "A. White".into(),
            },
        )
        .expect("create");

        let active = list_active_subs(&conn).expect("list");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert!(!active[0].completed);
        assert!(active[0].completed_at.is_none());
    }

    #[test]
    fn completion_moves_record_between_views() {
        let (_dir, conn) = test_conn();
        let id = create_repair(
            &conn,
            &BusRepairFields {
                down_bus_number: "15".into(),
                reason: "Engine trouble".into(),
                sub_bus_number: "22".into(),
            },
        )
        .expect("create");

        assert!(set_completed(&conn, RecordKind::BusRepairs, id, true).expect("complete"));
        assert!(list_active_repairs(&conn).expect("active").is_empty());

        let done = list_completed_repairs(&conn).expect("completed");
        assert_eq!(done.len(), 1);
        assert!(done[0].completed);
        assert!(done[0].completed_at.is_some());

        // Reversible: un-complete clears the stamp and restores the record.
        assert!(set_completed(&conn, RecordKind::BusRepairs, id, false).expect("uncomplete"));
        let active = list_active_repairs(&conn).expect("active again");
        assert_eq!(active.len(), 1);
        assert!(active[0].completed_at.is_none());
    }

    #[test]
    fn subs_order_by_numeric_bus_number() {
        let (_dir, conn) = test_conn();
        for bus in ["101", "9", "23"] {
            create_sub(
                &conn,
                &BusSubFields {
                    bus_number: bus.into(),
                    ..Default::default()
                },
            )
            .expect("create");
        }
        let order: Vec<String> = list_active_subs(&conn)
            .expect("list")
            .into_iter()
            .map(|s| s.bus_number)
            .collect();
        assert_eq!(order, ["9", "23", "101"]);
    }

    #[test]
    fn trips_order_by_date_then_start_time() {
        let (_dir, conn) = test_conn();
        let trips = [
            ("2025-10-02", "09:00"),
            ("2025-10-01", "12:00"),
            ("2025-10-01", "08:30"),
        ];
        for (date, start) in trips {
            create_trip(
                &conn,
                &FieldTripFields {
                    date: date.into(),
                    start_time: start.into(),
                    ..Default::default()
                },
            )
            .expect("create");
        }
        let order: Vec<(String, String)> = list_active_trips(&conn)
            .expect("list")
            .into_iter()
            .map(|t| (t.date, t.start_time))
            .collect();
        assert_eq!(
            order,
            [
                ("2025-10-01".to_string(), "08:30".to_string()),
                ("2025-10-01".to_string(), "12:00".to_string()),
                ("2025-10-02".to_string(), "09:00".to_string()),
            ]
        );
    }

    #[test]
    fn log_orders_newest_id_first() {
        let (_dir, conn) = test_conn();
        let mut ids = Vec::new();
        for bus in ["1", "2", "3"] {
            let id = create_sub(
                &conn,
                &BusSubFields {
                    bus_number: bus.into(),
                    ..Default::default()
                },
            )
            .expect("create");
            set_completed(&conn, RecordKind::BusSubs, id, true).expect("complete");
            ids.push(id);
        }
        ids.reverse();
        let listed: Vec<i64> = list_completed_subs(&conn)
            .expect("log")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn update_and_delete_report_absent_ids() {
        let (_dir, conn) = test_conn();
        assert!(!update_sub(&conn, 42, &BusSubFields::default()).expect("update"));
        assert!(!delete(&conn, RecordKind::BusSubs, 42).expect("delete"));
        assert!(!set_completed(&conn, RecordKind::FieldTrips, 42, true).expect("toggle"));

        let id = create_sub(
            &conn,
            &BusSubFields {
                bus_number: "5".into(),
                ..Default::default()
            },
        )
        .expect("create");
        assert!(update_sub(
            &conn,
            id,
            &BusSubFields {
                bus_number: "6".into(),
                ..Default::default()
            }
        )
        .expect("update hit"));
        assert!(delete(&conn, RecordKind::BusSubs, id).expect("delete hit"));
        assert!(list_active_subs(&conn).expect("list").is_empty());
    }
}
