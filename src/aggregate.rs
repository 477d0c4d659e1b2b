// =============================================================================
// aggregate.rs — EVERY NUMBER ON THE DASHBOARD
// =============================================================================
//
// Pure functions over a slice of trips. No caching, no hidden state: give
// them the same input and they give the same answer, which is what lets the
// state container memoize on input identity and nothing else.
//
// Sums run in the iteration order of the slice so the totals are
// reproducible down to the last bit of the float.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::models::{FilterCriteria, TripRecord, NO_SECTOR};
use crate::status::{self, StatusBucket};

/// Trips that pass every filter, in their original order, each with its
/// position in `trips`.
pub fn filtered_view<'a>(
    trips: &'a [TripRecord],
    filter: &'a FilterCriteria,
) -> impl Iterator<Item = (usize, &'a TripRecord)> + 'a {
    trips.iter().enumerate().filter(move |(_, t)| filter.matches(t))
}

/// Sector filter options: distinct, non-empty, not the "N/A" placeholder,
/// ascending.
pub fn unique_sectors(trips: &[TripRecord]) -> Vec<String> {
    trips
        .iter()
        .map(|t| t.sector.as_str())
        .filter(|s| !s.is_empty() && *s != NO_SECTOR)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Month filter options as `YYYY-MM`, most recent first. Trips without a
/// departure date don't contribute.
pub fn unique_months(trips: &[TripRecord]) -> Vec<String> {
    trips
        .iter()
        .filter_map(TripRecord::departure_month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    /// Distinct non-empty SEI numbers ("Total de Viagens").
    pub unique_sei: usize,
    /// Every row ("Total de Processos").
    pub total_requests: usize,
    /// Distinct non-empty destination cities.
    pub unique_destinations: usize,
}

pub fn kpis<'a, I>(view: I) -> Kpis
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut seis = HashSet::new();
    let mut destinations = HashSet::new();
    let mut total_requests = 0;

    for trip in view {
        total_requests += 1;
        if !trip.sei_number.is_empty() {
            seis.insert(trip.sei_number.as_str());
        }
        if !trip.destination_city.is_empty() {
            destinations.insert(trip.destination_city.as_str());
        }
    }

    Kpis {
        unique_sei: seis.len(),
        total_requests,
        unique_destinations: destinations.len(),
    }
}

/// Per-bucket counts. Every bucket is present, zero or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts(BTreeMap<StatusBucket, usize>);

impl Default for StatusCounts {
    fn default() -> Self {
        StatusCounts(StatusBucket::ALL.iter().map(|b| (*b, 0)).collect())
    }
}

impl StatusCounts {
    pub fn get(&self, bucket: StatusBucket) -> usize {
        self.0.get(&bucket).copied().unwrap_or(0)
    }
}

/// Count trips per status bucket. A trip lands in at most one bucket;
/// statuses that match none are left out.
pub fn status_counts<'a, I>(view: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut counts = StatusCounts::default();
    for trip in view {
        if let Some(bucket) = status::classify(&trip.status) {
            *counts.0.entry(bucket).or_insert(0) += 1;
        }
    }
    counts
}

/// A planned/actual pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlannedActual {
    pub planned: f64,
    pub actual: f64,
}

impl PlannedActual {
    fn accumulate(&mut self, planned: f64, actual: f64) {
        self.planned += planned;
        self.actual += actual;
    }

    /// Planned minus actual.
    pub fn balance(&self) -> f64 {
        self.planned - self.actual
    }
}

impl std::ops::Add for PlannedActual {
    type Output = PlannedActual;

    fn add(self, rhs: PlannedActual) -> PlannedActual {
        PlannedActual {
            planned: self.planned + rhs.planned,
            actual: self.actual + rhs.actual,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialRollup {
    pub total: PlannedActual,
    pub km: PlannedActual,
    pub km_cost: PlannedActual,
    pub daily_qty: PlannedActual,
    pub daily_cost: PlannedActual,
    pub additional_driver_qty: PlannedActual,
    pub additional_driver_cost: PlannedActual,
}

/// One bar pair of the planned-vs-actual chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: &'static str,
    pub planned: f64,
    pub actual: f64,
}

impl FinancialRollup {
    /// Planned grand total minus actual grand total ("Saldo").
    pub fn balance(&self) -> f64 {
        self.total.balance()
    }

    /// The three cost comparisons the chart plots.
    pub fn comparison_series(&self) -> Vec<ComparisonRow> {
        [
            ("Geral", self.total),
            ("KM (R$)", self.km_cost),
            ("Diárias (R$)", self.daily_cost),
        ]
        .into_iter()
        .map(|(name, pair)| ComparisonRow {
            name,
            planned: pair.planned,
            actual: pair.actual,
        })
        .collect()
    }
}

impl std::ops::Add for FinancialRollup {
    type Output = FinancialRollup;

    fn add(self, rhs: FinancialRollup) -> FinancialRollup {
        FinancialRollup {
            total: self.total + rhs.total,
            km: self.km + rhs.km,
            km_cost: self.km_cost + rhs.km_cost,
            daily_qty: self.daily_qty + rhs.daily_qty,
            daily_cost: self.daily_cost + rhs.daily_cost,
            additional_driver_qty: self.additional_driver_qty + rhs.additional_driver_qty,
            additional_driver_cost: self.additional_driver_cost + rhs.additional_driver_cost,
        }
    }
}

/// Field-wise sums over the view, in iteration order.
pub fn financial_rollup<'a, I>(view: I) -> FinancialRollup
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut acc = FinancialRollup::default();
    for t in view {
        acc.total.accumulate(t.total_planned, t.total_actual);
        acc.km.accumulate(t.km_planned, t.km_actual);
        acc.km_cost.accumulate(t.km_cost_planned, t.km_cost_actual);
        acc.daily_qty.accumulate(t.daily_qty_planned, t.daily_qty_actual);
        acc.daily_cost.accumulate(t.daily_cost_planned, t.daily_cost_actual);
        acc.additional_driver_qty
            .accumulate(t.additional_driver_planned, t.additional_driver_actual);
        acc.additional_driver_cost
            .accumulate(t.additional_driver_cost_planned, t.additional_driver_cost_actual);
    }
    acc
}

/// Rows for the trip table: only trips with a SEI number, a requester and a
/// status make it in.
pub fn recent_trips<'a, I>(view: I) -> Vec<&'a TripRecord>
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    view.into_iter()
        .filter(|t| !t.sei_number.is_empty() && !t.requester_name.is_empty() && !t.status.is_empty())
        .collect()
}

pub fn find_trip<'a>(trips: &'a [TripRecord], request_id: &str) -> Option<&'a TripRecord> {
    trips.iter().find(|t| t.request_id == request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(sei: &str, sector: &str, status: &str, date: Option<(i32, u32, u32)>) -> TripRecord {
        TripRecord {
            sei_number: sei.to_string(),
            sector: sector.to_string(),
            status: status.to_string(),
            departure_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    fn ten_trips() -> Vec<TripRecord> {
        vec![
            trip("1", "TI", "REALIZADA", Some((2026, 1, 10))),
            trip("2", "TI", "REALIZADA", Some((2026, 1, 12))),
            trip("3", "TI", "REALIZADA", Some((2026, 3, 2))),
            trip("4", "TI", "CONFIRMADA", Some((2026, 3, 4))),
            trip("5", "RH", "REALIZADA", Some((2026, 3, 5))),
            trip("6", "RH", "CANCELADA", Some((2025, 12, 1))),
            trip("7", "N/A", "SOLICITADA", None),
            trip("8", "Financeiro", "REALIZADA", Some((2026, 2, 20))),
            trip("9", "RH", "NÃO ATENDIDA", Some((2026, 2, 21))),
            trip("10", "Financeiro", "DESCONHECIDO", Some((2026, 1, 30))),
        ]
    }

    fn selected<'a>(trips: &'a [TripRecord], filter: &'a FilterCriteria) -> Vec<&'a TripRecord> {
        filtered_view(trips, filter).map(|(_, t)| t).collect()
    }

    fn bucketed(counts: &StatusCounts) -> usize {
        StatusBucket::ALL.iter().map(|b| counts.get(*b)).sum()
    }

    fn money(planned: f64, actual: f64) -> TripRecord {
        TripRecord {
            total_planned: planned,
            total_actual: actual,
            km_planned: planned / 10.0,
            km_actual: actual / 10.0,
            km_cost_planned: planned / 2.0,
            km_cost_actual: actual / 2.0,
            daily_qty_planned: 1.0,
            daily_qty_actual: 2.0,
            daily_cost_planned: planned / 4.0,
            daily_cost_actual: actual / 4.0,
            additional_driver_planned: 1.0,
            additional_driver_actual: 0.0,
            additional_driver_cost_planned: 100.0,
            additional_driver_cost_actual: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_filters_are_anded() {
        let trips = ten_trips();
        let filter = FilterCriteria {
            sector: "TI".into(),
            status: "REALIZADA".into(),
            ..Default::default()
        };
        let view = selected(&trips, &filter);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|t| t.sector == "TI" && t.status == "REALIZADA"));

        let filter = FilterCriteria {
            sector: "TI".into(),
            status: "CANCELADA".into(),
            ..Default::default()
        };
        assert!(selected(&trips, &filter).is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let trips = ten_trips();
        let filter = FilterCriteria::default();
        let positions: Vec<usize> = filtered_view(&trips, &filter).map(|(i, _)| i).collect();
        assert_eq!(positions, (0..10).collect::<Vec<_>>());
        let seis: Vec<&str> = selected(&trips, &filter)
            .iter()
            .map(|t| t.sei_number.as_str())
            .collect();
        assert_eq!(seis, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    }

    #[test]
    fn test_month_filter() {
        let trips = ten_trips();
        let filter = FilterCriteria {
            month: "2026-03".into(),
            ..Default::default()
        };
        let seis: Vec<&str> = selected(&trips, &filter)
            .iter()
            .map(|t| t.sei_number.as_str())
            .collect();
        assert_eq!(seis, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_unique_sectors_sorted_without_placeholder() {
        assert_eq!(unique_sectors(&ten_trips()), vec!["Financeiro", "RH", "TI"]);
    }

    #[test]
    fn test_unique_months_descending() {
        assert_eq!(
            unique_months(&ten_trips()),
            vec!["2026-03", "2026-02", "2026-01", "2025-12"]
        );
    }

    #[test]
    fn test_kpis_count_distinct_values() {
        let mut trips = ten_trips();
        trips[1].sei_number = "1".into();
        trips[2].sei_number = String::new();
        trips[0].destination_city = "Santos".into();
        trips[1].destination_city = "Santos".into();
        trips[2].destination_city = "Campinas".into();

        let k = kpis(&trips);
        assert_eq!(k.total_requests, 10);
        assert_eq!(k.unique_sei, 8);
        assert_eq!(k.unique_destinations, 2);
    }

    #[test]
    fn test_status_counts_buckets() {
        let counts = status_counts(&ten_trips());
        assert_eq!(counts.get(StatusBucket::Completed), 5);
        assert_eq!(counts.get(StatusBucket::Confirmed), 1);
        assert_eq!(counts.get(StatusBucket::Cancelled), 1);
        assert_eq!(counts.get(StatusBucket::Requested), 1);
        assert_eq!(counts.get(StatusBucket::NotServed), 1);
        assert_eq!(counts.get(StatusBucket::DailyOnly), 0);
        // DESCONHECIDO is in no bucket.
        assert_eq!(bucketed(&counts), 9);
    }

    #[test]
    fn test_status_counts_one_bucket_per_trip() {
        let trips = vec![trip("1", "TI", "CONFIRMADA E REALIZADA", None)];
        let counts = status_counts(&trips);
        assert_eq!(counts.get(StatusBucket::Confirmed), 1);
        assert_eq!(counts.get(StatusBucket::Completed), 0);
        assert_eq!(bucketed(&counts), 1);
    }

    #[test]
    fn test_rollup_sums_pairs() {
        let trips = vec![money(1000.0, 800.0), money(200.0, 300.0)];
        let r = financial_rollup(&trips);
        assert_eq!(r.total, PlannedActual { planned: 1200.0, actual: 1100.0 });
        assert_eq!(r.km_cost, PlannedActual { planned: 600.0, actual: 550.0 });
        assert_eq!(r.daily_qty, PlannedActual { planned: 2.0, actual: 4.0 });
        assert_eq!(r.additional_driver_qty.planned, 2.0);
        assert_eq!(r.additional_driver_cost.planned, 200.0);
        assert_eq!(r.balance(), 100.0);
    }

    #[test]
    fn test_rollup_is_additive_over_disjoint_views() {
        let trips = vec![
            money(1000.0, 800.0),
            money(250.0, 300.0),
            money(40.0, 0.0),
            money(80.0, 120.0),
        ];
        let (left, right) = trips.split_at(2);
        let whole = financial_rollup(&trips);
        let parts = financial_rollup(left) + financial_rollup(right);
        assert_eq!(whole, parts);
    }

    #[test]
    fn test_rollup_of_empty_view_is_zero() {
        assert_eq!(financial_rollup(&Vec::<TripRecord>::new()), FinancialRollup::default());
    }

    #[test]
    fn test_comparison_series() {
        let r = financial_rollup(&[money(1000.0, 800.0)]);
        let series = r.comparison_series();
        let names: Vec<&str> = series.iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Geral", "KM (R$)", "Diárias (R$)"]);
        assert_eq!(series[0].planned, 1000.0);
        assert_eq!(series[1].actual, 400.0);
    }

    #[test]
    fn test_recent_trips_needs_sei_requester_and_status() {
        let mut trips = ten_trips();
        trips[0].requester_name = "Ana".into();
        trips[1].requester_name = "Bruno".into();
        trips[1].sei_number = String::new();
        let rows = recent_trips(&trips);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].requester_name, "Ana");
    }

    #[test]
    fn test_find_trip() {
        let mut trips = ten_trips();
        trips[4].request_id = "REQ-5".into();
        assert_eq!(find_trip(&trips, "REQ-5").map(|t| t.sei_number.as_str()), Some("5"));
        assert!(find_trip(&trips, "REQ-404").is_none());
    }
}
