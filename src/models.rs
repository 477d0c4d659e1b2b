// =============================================================================
// models.rs — THE SHAPES THE TRIP DATA TAKES
// =============================================================================
//
// Two worlds meet here. On one side, RawRecord: whatever the spreadsheet
// web app decided to send, keyed by Portuguese column headers, with every
// cell possibly a string, a number, or nothing at all. On the other side,
// TripRecord: the typed row every aggregation and view works with.
//
// The only road between them is normalize.rs. Raw values never travel past
// that boundary.
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A single spreadsheet cell as it arrives over the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    /// `null`, a missing key, or a JSON shape a cell can't meaningfully have
    /// (arrays, objects).
    Absent,
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => RawValue::Number(f),
                None => RawValue::Absent,
            },
            serde_json::Value::Bool(b) => RawValue::Text(b.to_string()),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => RawValue::Absent,
        }
    }
}

/// One row of the raw dataset, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    cells: HashMap<String, RawValue>,
}

impl RawRecord {
    /// Look a cell up by its header. Missing headers read as `Absent`.
    pub fn get(&self, label: &str) -> &RawValue {
        self.cells.get(label).unwrap_or(&RawValue::Absent)
    }
}

#[cfg(test)]
impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: RawValue) {
        self.cells.insert(label.into(), value);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<serde_json::Value> for RawRecord {
    /// Objects become records cell by cell. Anything else in the array
    /// (a stray `null`, a bare string) becomes an empty record, so it still
    /// produces one all-defaults trip instead of vanishing.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => RawRecord {
                cells: map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect(),
            },
            _ => RawRecord::default(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        RawRecord {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Status written when the sheet leaves STATUS FINAL empty.
pub const UNKNOWN_STATUS: &str = "DESCONHECIDO";

/// Sector written when neither sector column has a value.
pub const NO_SECTOR: &str = "N/A";

pub const STOP_SLOTS: usize = 6;

/// One trip request, normalized.
///
/// Numbers are always finite (0 when the sheet had garbage), strings are
/// never missing (empty or a placeholder), and a `None` date is the
/// explicit "no date" marker, never a made-up calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripRecord {
    // Identity
    pub order_number: String,
    pub sei_number: String,
    pub request_id: String,

    // Classification
    /// Always uppercase.
    pub status: String,
    pub sector: String,
    pub sector_other: String,

    // Dates and times
    pub departure_date: Option<NaiveDate>,
    pub departure_time: String,
    pub return_date: Option<NaiveDate>,
    pub return_time: String,

    // Event
    pub program: String,
    pub event_name: String,
    pub event_period: String,
    pub event_time: String,

    // Route
    pub origin_city: String,
    pub origin_location: String,
    pub origin_address: String,
    pub destination_city: String,
    pub destination_location: String,
    pub destination_address: String,
    /// Always six slots; an empty string is an unused slot.
    pub stops: [String; STOP_SLOTS],

    // People
    pub requester_name: String,
    pub requester_phone: String,
    pub requester_email: String,
    pub responsible_name: String,
    pub responsible_phone: String,
    pub executive: String,
    pub company: String,

    // Fleet
    pub vehicle_type: String,
    pub vehicle_count: f64,
    pub passenger_count: f64,
    pub modality: String,
    pub vehicle_availability: String,
    pub capacity_percentage: f64,
    pub capacity_status: String,

    // Kilometers
    pub km_planned: f64,
    pub km_actual: f64,
    pub km_unit_price: f64,
    pub km_cost_planned: f64,
    pub km_cost_actual: f64,

    // Daily rates
    pub daily_qty_planned: f64,
    pub daily_qty_actual: f64,
    pub daily_unit_price: f64,
    pub daily_cost_planned: f64,
    pub daily_cost_actual: f64,

    // Additional driver
    pub additional_driver_planned: f64,
    pub additional_driver_actual: f64,
    pub additional_driver_unit_price: f64,
    pub additional_driver_cost_planned: f64,
    pub additional_driver_cost_actual: f64,

    // Grand totals
    pub total_planned: f64,
    pub total_actual: f64,

    // Deadlines
    pub email_sent_date: Option<NaiveDate>,
    pub received_date: Option<NaiveDate>,
    pub lead_days_email_to_receipt: f64,
    pub lead_days_departure_to_receipt: f64,

    // Free text
    pub supplementary_info: String,
    pub general_observation: String,
    pub reason: String,
    pub change_or_cancellation: String,
}

impl TripRecord {
    /// `YYYY-MM` of the departure date, the key the month filter works on.
    pub fn departure_month(&self) -> Option<String> {
        self.departure_date.map(|d| d.format("%Y-%m").to_string())
    }

    /// The stops that were actually filled in, in order.
    pub fn filled_stops(&self) -> impl Iterator<Item = &str> {
        self.stops
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] SEI {} — {} → {} ({})",
            self.request_id,
            if self.sei_number.is_empty() { "-" } else { &self.sei_number },
            self.origin_city,
            self.destination_city,
            self.status
        )
    }
}

/// The four dashboard filters. Empty means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the SEI number.
    pub search_text: String,
    /// Exact sector.
    pub sector: String,
    /// Exact `YYYY-MM` of the departure date.
    pub month: String,
    /// Exact (uppercase) status.
    pub status: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.sector.is_empty()
            && self.month.is_empty()
            && self.status.is_empty()
    }

    /// Whether a single record passes all four filters.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        let sei_ok = self.search_text.is_empty()
            || trip
                .sei_number
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        let sector_ok = self.sector.is_empty() || trip.sector == self.sector;
        let status_ok = self.status.is_empty() || trip.status == self.status;
        let month_ok = self.month.is_empty()
            || trip.departure_month().as_deref() == Some(self.month.as_str());

        sei_ok && sector_ok && status_ok && month_ok
    }
}
