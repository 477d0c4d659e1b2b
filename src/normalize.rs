// =============================================================================
// normalize.rs — FROM SPREADSHEET CELLS TO TRIP RECORDS
// =============================================================================
//
// The trip sheet is maintained by hand. Currency shows up as "R$ 1.234,56",
// as 1234.56, or as nothing. Dates arrive as ISO timestamps, except when the
// cell only ever held a time of day, in which case the spreadsheet engine
// proudly reports it as happening on 30 December 1899.
//
// This module is the single boundary where all of that gets coerced. The
// rules are simple and never fail:
//   - numbers that can't be read become 0
//   - text that's missing becomes "" (or a named placeholder)
//   - dates from 1899 become "no date", not a real day
//   - unparseable dates become whatever fallback the caller asked for
//
// N rows in, N records out, same order. Always.
// =============================================================================

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::columns as col;
use crate::metrics::IngestMetrics;
use crate::models::{RawRecord, RawValue, TripRecord, NO_SECTOR, STOP_SLOTS, UNKNOWN_STATUS};

/// Year the spreadsheet engine stamps on cells that only hold a time.
const SENTINEL_YEAR_PREFIX: &str = "1899";

/// The sheet lives in Brasília time (UTC−03:00, no DST since 2019). Offset
/// timestamps are shifted here before the calendar day is taken.
const SOURCE_UTC_OFFSET_SECS: i32 = -3 * 3600;

/// Offset-bearing forms RFC 3339 is too strict for: no seconds, or an
/// offset without the colon.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Read a currency or plain numeric cell.
///
/// Numbers pass through unchanged. Text has `R$` stripped, every `.`
/// (thousands separator) removed and the decimal comma turned into a point,
/// then the longest leading number is read, so `"80%"` is 80. Everything
/// else reads as 0, never NaN.
pub fn parse_currency(value: &RawValue) -> f64 {
    read_number(value).0
}

/// Read a date cell.
///
/// Returns `None` (the "no date" marker) for the 1899 placeholder. Otherwise
/// parses ISO-8601-ish text; anything missing, non-text or unparseable
/// yields `fallback`.
pub fn parse_date(value: &RawValue, fallback: Option<NaiveDate>) -> Option<NaiveDate> {
    match read_date(value) {
        DateCell::Sentinel => None,
        DateCell::Date(d) => Some(d),
        DateCell::Empty | DateCell::Unparseable => fallback,
    }
}

/// Read a time-of-day cell as `HH:MM`.
///
/// Time-only cells come through as full timestamps on the 1899 placeholder
/// date; the clock part after `T` is what the sheet actually shows. Plain
/// text is kept as typed.
pub fn parse_time_of_day(value: &RawValue) -> String {
    match value {
        RawValue::Text(s) => match s.split_once('T') {
            Some((_, clock)) => clock.chars().take(5).collect(),
            None => s.trim().to_string(),
        },
        other => coalesce(other).unwrap_or_default(),
    }
}

/// Maps raw rows to trip records.
///
/// `today` is the departure date used when the sheet has none (or has one
/// that can't be read), matching what the dashboard has always shown for
/// such rows. Pinning it makes mapping a pure function of the row.
#[derive(Debug, Clone)]
pub struct Normalizer {
    today: NaiveDate,
    metrics: Option<Arc<IngestMetrics>>,
}

impl Normalizer {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            metrics: None,
        }
    }

    /// A normalizer anchored on the local calendar day.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_metrics(mut self, metrics: Arc<IngestMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Map a whole batch, preserving length and order.
    pub fn map_rows(&self, rows: Vec<RawRecord>) -> Vec<TripRecord> {
        if let Some(m) = &self.metrics {
            m.add_rows_received(rows.len());
        }

        let trips: Vec<TripRecord> = rows.iter().map(|row| self.map_row(row)).collect();

        info!(
            rows = trips.len(),
            departure_fallback = %self.today,
            "Normalized trip rows"
        );
        trips
    }

    /// Translate one raw row, field by field.
    pub fn map_row(&self, raw: &RawRecord) -> TripRecord {
        let text = |label: &str| coalesce(raw.get(label)).unwrap_or_default();
        let number = |label: &str| self.number(raw, label);
        let date = |label: &str, fallback: Option<NaiveDate>| self.date(raw, label, fallback);

        let status = stringify(raw.get(col::STATUS))
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string());

        let sector = coalesce(raw.get(col::REQUESTER_SECTOR))
            .or_else(|| coalesce(raw.get(col::SECTOR)))
            .unwrap_or_else(|| NO_SECTOR.to_string());

        let stops: [String; STOP_SLOTS] = std::array::from_fn(|i| text(col::STOPS[i]));

        let trip = TripRecord {
            order_number: text(col::ORDER),
            sei_number: stringify(raw.get(col::SEI_NUMBER)).unwrap_or_default(),
            request_id: stringify(raw.get(col::REQUEST_ID)).unwrap_or_default(),

            status,
            sector,
            sector_other: text(col::SECTOR_OTHER),

            departure_date: date(col::DEPARTURE_DATE, Some(self.today)),
            departure_time: parse_time_of_day(raw.get(col::DEPARTURE_TIME)),
            return_date: date(col::RETURN_DATE, None),
            return_time: parse_time_of_day(raw.get(col::RETURN_TIME)),

            program: text(col::PROGRAM),
            event_name: text(col::EVENT_NAME),
            event_period: text(col::EVENT_PERIOD),
            event_time: text(col::EVENT_TIME),

            origin_city: text(col::ORIGIN_CITY),
            origin_location: text(col::ORIGIN_LOCATION),
            origin_address: text(col::ORIGIN_ADDRESS),
            destination_city: text(col::DESTINATION_CITY),
            destination_location: text(col::DESTINATION_LOCATION),
            destination_address: text(col::DESTINATION_ADDRESS),
            stops,

            requester_name: text(col::REQUESTER_NAME),
            requester_phone: text(col::REQUESTER_PHONE),
            requester_email: text(col::REQUESTER_EMAIL),
            responsible_name: text(col::RESPONSIBLE_NAME),
            responsible_phone: text(col::RESPONSIBLE_PHONE),
            executive: text(col::EXECUTIVE),
            company: text(col::COMPANY),

            vehicle_type: text(col::VEHICLE_TYPE),
            vehicle_count: number(col::VEHICLE_COUNT),
            passenger_count: number(col::PASSENGER_COUNT),
            modality: text(col::MODALITY),
            vehicle_availability: text(col::VEHICLE_AVAILABILITY),
            capacity_percentage: number(col::CAPACITY_PERCENTAGE),
            capacity_status: text(col::CAPACITY_STATUS),

            km_planned: number(col::KM_PLANNED),
            km_actual: number(col::KM_ACTUAL),
            km_unit_price: number(col::KM_UNIT_PRICE),
            km_cost_planned: number(col::KM_COST_PLANNED),
            km_cost_actual: number(col::KM_COST_ACTUAL),

            daily_qty_planned: number(col::DAILY_QTY_PLANNED),
            daily_qty_actual: number(col::DAILY_QTY_ACTUAL),
            daily_unit_price: number(col::DAILY_UNIT_PRICE),
            daily_cost_planned: number(col::DAILY_COST_PLANNED),
            daily_cost_actual: number(col::DAILY_COST_ACTUAL),

            additional_driver_planned: number(col::ADDITIONAL_DRIVER_PLANNED),
            additional_driver_actual: number(col::ADDITIONAL_DRIVER_ACTUAL),
            additional_driver_unit_price: number(col::ADDITIONAL_DRIVER_UNIT_PRICE),
            additional_driver_cost_planned: number(col::ADDITIONAL_DRIVER_COST_PLANNED),
            additional_driver_cost_actual: number(col::ADDITIONAL_DRIVER_COST_ACTUAL),

            total_planned: number(col::TOTAL_PLANNED),
            total_actual: number(col::TOTAL_ACTUAL),

            email_sent_date: date(col::EMAIL_SENT_DATE, None),
            received_date: date(col::RECEIVED_DATE, None),
            lead_days_email_to_receipt: number(col::LEAD_DAYS_EMAIL_TO_RECEIPT),
            lead_days_departure_to_receipt: number(col::LEAD_DAYS_DEPARTURE_TO_RECEIPT),

            supplementary_info: text(col::SUPPLEMENTARY_INFO),
            general_observation: text(col::GENERAL_OBSERVATION),
            reason: text(col::REASON),
            change_or_cancellation: text(col::CHANGE_OR_CANCELLATION),
        };

        if let Some(m) = &self.metrics {
            m.increment_rows_mapped();
        }
        trip
    }

    fn number(&self, raw: &RawRecord, label: &str) -> f64 {
        let cell = raw.get(label);
        let value = parse_currency(cell);
        // Only a zero can hide an unreadable cell.
        if value == 0.0 && read_number(cell).1 {
            debug!(column = label, cell = ?cell, "Unreadable number, using 0");
            if let Some(m) = &self.metrics {
                m.increment_numeric_zeroed();
            }
        }
        value
    }

    fn date(&self, raw: &RawRecord, label: &str, fallback: Option<NaiveDate>) -> Option<NaiveDate> {
        let cell = raw.get(label);
        let value = parse_date(cell, fallback);
        // Anything other than a parsed date comes back as the fallback or None.
        if value == fallback || value.is_none() {
            match read_date(cell) {
                DateCell::Sentinel => {
                    if let Some(m) = &self.metrics {
                        m.increment_sentinel_dates();
                    }
                }
                DateCell::Unparseable => {
                    debug!(column = label, cell = ?cell, "Unreadable date, using fallback");
                    if let Some(m) = &self.metrics {
                        m.increment_date_fallbacks();
                    }
                }
                DateCell::Date(_) | DateCell::Empty => {}
            }
        }
        value
    }
}

/// Plain `value || ""` coalescing: non-empty text as-is, non-zero numbers
/// rendered without a trailing `.0`, everything else missing.
fn coalesce(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Text(s) if !s.is_empty() => Some(s.clone()),
        RawValue::Number(n) if *n != 0.0 && n.is_finite() => Some(render_number(*n)),
        _ => None,
    }
}

/// `?.toString() || ""` for identifier cells: like `coalesce`, except a
/// numeric 0 is kept as "0".
fn stringify(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Number(n) if n.is_finite() => Some(render_number(*n)),
        other => coalesce(other),
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Returns the value and whether a non-empty cell had to be zeroed.
fn read_number(value: &RawValue) -> (f64, bool) {
    match value {
        RawValue::Number(n) if n.is_finite() => (*n, false),
        RawValue::Number(_) => (0.0, true),
        RawValue::Text(s) => {
            let cleaned = s.replace("R$", "").replace('.', "").replace(',', ".");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return (0.0, false);
            }
            match leading_float(cleaned) {
                Some(v) => (v, false),
                None => (0.0, true),
            }
        }
        RawValue::Absent => (0.0, false),
    }
}

/// Longest prefix of `s` that reads as `[+-]digits[.digits]`.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    s[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Calendar day of an offset timestamp as seen in the source's timezone.
fn source_day(dt: DateTime<FixedOffset>) -> NaiveDate {
    match FixedOffset::east_opt(SOURCE_UTC_OFFSET_SECS) {
        Some(tz) => dt.with_timezone(&tz).date_naive(),
        None => dt.date_naive(),
    }
}

enum DateCell {
    Date(NaiveDate),
    Sentinel,
    Empty,
    Unparseable,
}

fn read_date(value: &RawValue) -> DateCell {
    let s = match value {
        RawValue::Text(s) => s.trim(),
        RawValue::Number(_) => return DateCell::Unparseable,
        RawValue::Absent => return DateCell::Empty,
    };
    if s.is_empty() {
        return DateCell::Empty;
    }
    if s.starts_with(SENTINEL_YEAR_PREFIX) {
        return DateCell::Sentinel;
    }
    match parse_iso_date(s) {
        Some(d) => DateCell::Date(d),
        None => DateCell::Unparseable,
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(source_day(dt));
    }
    // Spell a trailing Zulu out so the `%#z` forms see a numeric offset.
    let with_offset = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(source_day(dt));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn full_row() -> RawRecord {
        RawRecord::from(json!({
            "ORDEM": 7,
            "CÓDIGO DA SOLICITAÇÃO": "REQ-0042",
            "NÚMERO DO SEI": 6012345,
            "STATUS FINAL": "realizada",
            "SETOR DO SOLICITANTE": "TI",
            "DATA DE SAÍDA": "2026-03-14T03:00:00.000Z",
            "HORÁRIO DE SAÍDA": "1899-12-30T08:30:00.000Z",
            "DATA DO RETORNO": "1899-12-30T03:00:00.000Z",
            "CIDADE DE ORIGEM": "São Paulo",
            "CIDADE DE DESTINO": "Santos",
            "PARADA 2": "Cubatão",
            "NOME DO SOLICITANTE": "Maria Souza",
            "TOTAL DE PASSAGEIROS": "12",
            "QUANTIDADE DE VEÍCULOS": 1,
            "% CAPACIDADE DO VEÍCULO": "80%",
            "KM PREVISTO": 160,
            "KM REALIZADO": "172",
            "VALOR TOTAL DO KM PREVISTO": "R$ 1.234,56",
            "VALOR TOTAL DO KM REALIZADO": 1300.5,
            "MOTORISTA ADICIONAL PREVISTO": "1",
            "TOTAL GERAL PREVISTO": "R$ 2.000,00",
            "TOTAL GERAL REALIZADO": "",
            "DATA RECEBIDO NA GETRA": "2026-03-01",
            "PRAZO ENTRE DATA DE SAÍDA E DO RECEBIMENTO NA GETRA": "13"
        }))
    }

    #[test]
    fn test_parse_currency_known_inputs() {
        assert!((parse_currency(&text("R$ 1.234,56")) - 1234.56).abs() < 1e-9);
        assert_eq!(parse_currency(&RawValue::Number(500.0)), 500.0);
        assert_eq!(parse_currency(&text("")), 0.0);
        assert_eq!(parse_currency(&RawValue::Absent), 0.0);
    }

    #[test]
    fn test_parse_currency_strips_every_thousands_separator() {
        assert_eq!(parse_currency(&text("R$ 1.234.567,89")), 1_234_567.89);
    }

    #[test]
    fn test_parse_currency_garbage_is_zero_not_nan() {
        for junk in ["abc", "R$", "-", ",", "SIM", "   "] {
            let v = parse_currency(&text(junk));
            assert_eq!(v, 0.0, "input {junk:?}");
        }
        assert_eq!(parse_currency(&RawValue::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn test_parse_currency_reads_leading_number() {
        assert_eq!(parse_currency(&text("80%")), 80.0);
        assert_eq!(parse_currency(&text("12 dias")), 12.0);
        assert_eq!(parse_currency(&text("R$ -50,5")), -50.5);
    }

    #[test]
    fn test_parse_date_sentinel_is_absent() {
        let v = text("1899-12-30T03:00:00.000Z");
        assert_eq!(parse_date(&v, Some(today())), None);
    }

    #[test]
    fn test_parse_date_shifts_to_source_offset() {
        let d = parse_date(&text("2026-03-14T03:00:00.000Z"), None);
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 14));
        let d = parse_date(&text("2026-03-14T00:00:00.000Z"), None);
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 13));
    }

    #[test]
    fn test_parse_date_plain_and_naive_forms() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 5);
        assert_eq!(parse_date(&text("2026-01-05"), None), expected);
        assert_eq!(parse_date(&text("2026-01-05T10:00:00"), None), expected);
        assert_eq!(parse_date(&text("2026-01-05T10:00:00.250"), None), expected);
    }

    #[test]
    fn test_parse_date_without_seconds() {
        let d = parse_date(&text("2026-03-14T03:00Z"), Some(today()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 14));
        let d = parse_date(&text("2026-03-14T02:59Z"), Some(today()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 13));
        let d = parse_date(&text("2026-03-14T10:00-03:00"), Some(today()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 14));
    }

    #[test]
    fn test_parse_date_offset_without_colon() {
        let d = parse_date(&text("2026-03-14T03:00:00.000+0000"), Some(today()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 14));
        let d = parse_date(&text("2026-03-14T01:00:00+0000"), Some(today()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 13));
    }

    #[test]
    fn test_parse_date_failure_uses_fallback() {
        assert_eq!(parse_date(&text("amanhã"), Some(today())), Some(today()));
        assert_eq!(parse_date(&RawValue::Absent, Some(today())), Some(today()));
        assert_eq!(parse_date(&RawValue::Number(45000.0), None), None);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day(&text("1899-12-30T08:30:00.000Z")), "08:30");
        assert_eq!(parse_time_of_day(&text("14h")), "14h");
        assert_eq!(parse_time_of_day(&RawValue::Absent), "");
    }

    #[test]
    fn test_map_row_full() {
        let trip = Normalizer::new(today()).map_row(&full_row());

        assert_eq!(trip.order_number, "7");
        assert_eq!(trip.request_id, "REQ-0042");
        assert_eq!(trip.sei_number, "6012345");
        assert_eq!(trip.status, "REALIZADA");
        assert_eq!(trip.sector, "TI");
        assert_eq!(trip.departure_date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(trip.departure_time, "08:30");
        assert_eq!(trip.return_date, None);
        assert_eq!(trip.stops[1], "Cubatão");
        assert_eq!(trip.stops[0], "");
        assert_eq!(trip.passenger_count, 12.0);
        assert_eq!(trip.vehicle_count, 1.0);
        assert_eq!(trip.capacity_percentage, 80.0);
        assert_eq!(trip.km_actual, 172.0);
        assert!((trip.km_cost_planned - 1234.56).abs() < 1e-9);
        assert_eq!(trip.km_cost_actual, 1300.5);
        assert_eq!(trip.additional_driver_planned, 1.0);
        assert_eq!(trip.total_planned, 2000.0);
        assert_eq!(trip.total_actual, 0.0);
        assert_eq!(trip.received_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(trip.email_sent_date, None);
        assert_eq!(trip.lead_days_departure_to_receipt, 13.0);
    }

    #[test]
    fn test_map_row_empty_uses_defaults() {
        let trip = Normalizer::new(today()).map_row(&RawRecord::new());
        assert_eq!(trip.status, UNKNOWN_STATUS);
        assert_eq!(trip.sector, NO_SECTOR);
        assert_eq!(trip.sei_number, "");
        assert_eq!(trip.departure_date, Some(today()));
        assert_eq!(trip.stops.len(), STOP_SLOTS);
        assert!(trip.stops.iter().all(String::is_empty));
        assert_eq!(trip.total_planned, 0.0);
    }

    #[test]
    fn test_numeric_zero_identifiers_are_kept() {
        let row = RawRecord::from(json!({
            "NÚMERO DO SEI": 0,
            "CÓDIGO DA SOLICITAÇÃO": 0,
            "STATUS FINAL": 0,
            "ORDEM": 0
        }));
        let trip = Normalizer::new(today()).map_row(&row);
        assert_eq!(trip.sei_number, "0");
        assert_eq!(trip.request_id, "0");
        assert_eq!(trip.status, "0");
        assert_eq!(trip.order_number, "");
    }

    #[test]
    fn test_map_row_agrees_with_cell_parsers() {
        let row = full_row();
        let trip = Normalizer::new(today()).map_row(&row);
        assert_eq!(trip.km_cost_planned, parse_currency(row.get("VALOR TOTAL DO KM PREVISTO")));
        assert_eq!(trip.total_actual, parse_currency(row.get("TOTAL GERAL REALIZADO")));
        assert_eq!(
            trip.departure_date,
            parse_date(row.get("DATA DE SAÍDA"), Some(today()))
        );
        assert_eq!(trip.return_date, parse_date(row.get("DATA DO RETORNO"), None));
    }

    #[test]
    fn test_sector_falls_back_to_short_header() {
        let row: RawRecord = [("SETOR", text("Financeiro"))].into_iter().collect();
        let trip = Normalizer::new(today()).map_row(&row);
        assert_eq!(trip.sector, "Financeiro");
    }

    #[test]
    fn test_map_row_is_idempotent() {
        let normalizer = Normalizer::new(today());
        let row = full_row();
        assert_eq!(normalizer.map_row(&row), normalizer.map_row(&row));
    }

    #[test]
    fn test_map_rows_keeps_every_row() {
        let normalizer = Normalizer::new(today()).with_metrics(Arc::new(IngestMetrics::new()));
        let mut rows: Vec<RawRecord> = (0..80).map(|_| full_row()).collect();
        for idx in [3, 40, 79] {
            let mut broken = full_row();
            broken.insert("TOTAL GERAL PREVISTO", RawValue::Absent);
            broken.insert("VALOR TOTAL DO KM PREVISTO", text("não informado"));
            rows[idx] = broken;
        }

        let trips = normalizer.map_rows(rows);
        assert_eq!(trips.len(), 80);
        for idx in [3, 40, 79] {
            assert_eq!(trips[idx].total_planned, 0.0);
            assert_eq!(trips[idx].km_cost_planned, 0.0);
        }
        assert_eq!(trips[0].total_planned, 2000.0);
    }

    #[test]
    fn test_map_rows_feeds_metrics() {
        let metrics = Arc::new(IngestMetrics::new());
        let normalizer = Normalizer::new(today()).with_metrics(Arc::clone(&metrics));
        let mut odd = RawRecord::new();
        odd.insert("KM PREVISTO", text("muito"));
        odd.insert("DATA DE SAÍDA", text("ontem"));

        let trips = normalizer.map_rows(vec![full_row(), odd]);
        assert_eq!(trips[1].departure_date, Some(today()));

        let snap = metrics.snapshot();
        assert_eq!(snap.rows_received, 2);
        assert_eq!(snap.rows_mapped, 2);
        assert_eq!(snap.numeric_cells_zeroed, 1);
        assert_eq!(snap.date_fallbacks, 1);
        // Time columns aren't dates; only the full row's return date is 1899.
        assert_eq!(snap.sentinel_dates, 1);
    }
}
