use serde::{Deserialize, Serialize};

/// The three record collections the dashboard tracks. Closed set: every
/// table-name-driven operation goes through this enum, never through a
/// caller-supplied string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    BusSubs,
    BusRepairs,
    FieldTrips,
}

impl RecordKind {
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::BusSubs => "bus_subs",
            RecordKind::BusRepairs => "bus_repairs",
            RecordKind::FieldTrips => "field_trips",
        }
    }

    /// Parse the internal collection name used by mark-complete, delete and
    /// the log view.
    pub fn from_table(name: &str) -> Option<Self> {
        match name {
            "bus_subs" => Some(RecordKind::BusSubs),
            "bus_repairs" => Some(RecordKind::BusRepairs),
            "field_trips" => Some(RecordKind::FieldTrips),
            _ => None,
        }
    }

    /// Parse the URL alias used by the list/create/update routes.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "bus-subs" => Some(RecordKind::BusSubs),
            "bus-repairs" => Some(RecordKind::BusRepairs),
            "field-trips" => Some(RecordKind::FieldTrips),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BusSub {
    pub id: i64,
    pub bus_number: String,
    pub morning_sub: String,
    pub afternoon_sub: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BusRepair {
    pub id: i64,
    pub down_bus_number: String,
    pub reason: String,
    pub sub_bus_number: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldTrip {
    pub id: i64,
    pub date: String,
    pub from_location: String,
    pub to_location: String,
    pub start_time: String,
    pub end_time: String,
    pub driver: String,
    pub bus_number: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

// Write payloads. Missing fields coerce to the empty string; values are
// stored as-is, without server-side validation.

#[derive(Debug, Default, Deserialize)]
pub struct BusSubFields {
    #[serde(default)]
    pub bus_number: String,
    #[serde(default)]
    pub morning_sub: String,
    #[serde(default)]
    pub afternoon_sub: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BusRepairFields {
    #[serde(default)]
    pub down_bus_number: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub sub_bus_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FieldTripFields {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub from_location: String,
    #[serde(default)]
    pub to_location: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub bus_number: String,
}
