// =============================================================================
// state.rs — THE DASHBOARD'S ONE PIECE OF STATE
// =============================================================================
//
// Everything a view needs lives in one DashboardState value that the caller
// owns and passes around by reference: whether the load is still running,
// succeeded, or failed; the trips themselves; and the active filter.
//
// The trips are an Arc<[TripRecord]>. Once the fetch resolves they are never
// touched again; a reload would replace the whole slice. Only the filter
// moves. The filtered selection is memoized on (filter value, slice
// identity), so asking for it twice between filter changes is free.
// =============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::aggregate;
use crate::models::{FilterCriteria, TripRecord};
use crate::source::{LoadError, LOAD_FAILED_MESSAGE};

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<[TripRecord]>),
    /// User-facing message; the underlying cause goes to the log.
    Failed(String),
}

/// The trips that pass the current filter. Cheap to clone; shares the
/// underlying records.
#[derive(Debug, Clone)]
pub struct FilteredView {
    records: Arc<[TripRecord]>,
    indices: Arc<[usize]>,
}

impl FilteredView {
    fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            indices: Arc::from(Vec::new()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TripRecord> + '_ {
        self.indices.iter().map(move |&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether both views came from the same memoized computation.
    pub fn same_selection(&self, other: &FilteredView) -> bool {
        Arc::ptr_eq(&self.indices, &other.indices) && Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<'a> IntoIterator for &'a FilteredView {
    type Item = &'a TripRecord;
    type IntoIter = Box<dyn Iterator<Item = &'a TripRecord> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

struct FilterMemo {
    filter: FilterCriteria,
    records: Arc<[TripRecord]>,
    view: FilteredView,
}

pub struct DashboardState {
    load: LoadState,
    filters: FilterCriteria,
    memo: Mutex<Option<FilterMemo>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// A fresh session: loading, no filters.
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            filters: FilterCriteria::default(),
            memo: Mutex::new(None),
        }
    }

    /// Resolve the load. Success installs the trips wholesale; failure
    /// leaves the collection empty.
    pub fn finish_load(&mut self, result: Result<Vec<TripRecord>, LoadError>) {
        self.load = match result {
            Ok(trips) => {
                debug!(trips = trips.len(), "Dashboard data ready");
                LoadState::Ready(Arc::from(trips))
            }
            Err(e) => {
                debug!(error = %e, "Dashboard load failed");
                LoadState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };
        *self.memo.lock() = None;
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// All trips; empty while loading or after a failure.
    pub fn records(&self) -> &[TripRecord] {
        match &self.load {
            LoadState::Ready(trips) => trips,
            _ => &[],
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
    }

    /// Trips passing the current filter, recomputed only when the filter or
    /// the collection changed since the last call.
    pub fn filtered_view(&self) -> FilteredView {
        let records = match &self.load {
            LoadState::Ready(trips) => Arc::clone(trips),
            _ => return FilteredView::empty(),
        };

        let mut memo = self.memo.lock();
        if let Some(m) = memo.as_ref() {
            if m.filter == self.filters && Arc::ptr_eq(&m.records, &records) {
                return m.view.clone();
            }
        }

        let indices: Vec<usize> = aggregate::filtered_view(&records, &self.filters)
            .map(|(i, _)| i)
            .collect();
        debug!(
            matched = indices.len(),
            total = records.len(),
            filter = ?self.filters,
            "Recomputed filtered view"
        );

        let view = FilteredView {
            records: Arc::clone(&records),
            indices: Arc::from(indices),
        };
        *memo = Some(FilterMemo {
            filter: self.filters.clone(),
            records,
            view: view.clone(),
        });
        view
    }

    pub fn unique_sectors(&self) -> Vec<String> {
        aggregate::unique_sectors(self.records())
    }

    pub fn unique_months(&self) -> Vec<String> {
        aggregate::unique_months(self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(sei: &str, sector: &str) -> TripRecord {
        TripRecord {
            sei_number: sei.to_string(),
            sector: sector.to_string(),
            status: "REALIZADA".to_string(),
            ..Default::default()
        }
    }

    fn ready_state() -> DashboardState {
        let mut state = DashboardState::new();
        state.finish_load(Ok(vec![
            trip("100", "TI"),
            trip("200", "RH"),
            trip("300", "TI"),
        ]));
        state
    }

    #[test]
    fn test_starts_loading_with_empty_filters() {
        let state = DashboardState::new();
        assert!(matches!(state.load, LoadState::Loading));
        assert!(state.filters().is_empty());
        assert!(state.records().is_empty());
        assert!(state.filtered_view().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_collection_empty() {
        let mut state = DashboardState::new();
        state.finish_load(Err(LoadError::UnexpectedShape("null")));
        assert!(matches!(state.load, LoadState::Failed(_)));
        assert_eq!(state.error(), Some(LOAD_FAILED_MESSAGE));
        assert!(state.records().is_empty());
        assert!(state.unique_sectors().is_empty());
    }

    #[test]
    fn test_filtered_view_follows_filter() {
        let mut state = ready_state();
        assert_eq!(state.filtered_view().len(), 3);

        state.set_filters(FilterCriteria {
            sector: "TI".into(),
            ..Default::default()
        });
        let view = state.filtered_view();
        let got: Vec<&str> = view.iter().map(|t| t.sei_number.as_str()).collect();
        assert_eq!(got, vec!["100", "300"]);
    }

    #[test]
    fn test_filtered_view_is_memoized_until_filter_changes() {
        let mut state = ready_state();
        let first = state.filtered_view();
        let second = state.filtered_view();
        assert!(first.same_selection(&second));

        state.set_filters(FilterCriteria {
            search_text: "2".into(),
            ..Default::default()
        });
        let third = state.filtered_view();
        assert!(!first.same_selection(&third));
        assert_eq!(third.len(), 1);

        // Setting an equal filter keeps the memo.
        state.set_filters(state.filters().clone());
        assert!(third.same_selection(&state.filtered_view()));
    }

    #[test]
    fn test_reload_invalidates_memo() {
        let mut state = ready_state();
        let before = state.filtered_view();
        state.finish_load(Ok(vec![trip("900", "TI")]));
        let after = state.filtered_view();
        assert!(!before.same_selection(&after));
        assert_eq!(after.len(), 1);
        // The old view still owns its records.
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn test_option_lists() {
        let state = ready_state();
        assert_eq!(state.unique_sectors(), vec!["RH", "TI"]);
        assert!(state.unique_months().is_empty());
    }
}
