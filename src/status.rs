// =============================================================================
// status.rs — SORTING FREE-TEXT STATUSES INTO SIX BUCKETS
// =============================================================================
//
// STATUS FINAL is typed by people. "CONFIRMADA", "VIAGEM REALIZADA",
// "CANCELADA PELO SOLICITANTE", "COBRANÇA APENAS DE DIÁRIA" and every
// creative combination of them. The dashboard shows six cards, so every
// status either lands in exactly one of them or in none.
//
// Matching is by keyword containment, and the keyword list is ordered: when a
// status contains more than one keyword ("CONFIRMADA E REALIZADA"), the
// earliest bucket in the list wins. One Aho-Corasick pass finds every
// keyword occurrence (overlapping included); the smallest pattern index is
// the winner.
// =============================================================================

use std::fmt;
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatusBucket {
    Confirmed,
    Completed,
    Cancelled,
    NotServed,
    DailyOnly,
    Requested,
}

impl StatusBucket {
    /// Priority order. The keyword automaton is built from this list, so a
    /// pattern index is also a priority.
    pub const ALL: [StatusBucket; 6] = [
        StatusBucket::Confirmed,
        StatusBucket::Completed,
        StatusBucket::Cancelled,
        StatusBucket::NotServed,
        StatusBucket::DailyOnly,
        StatusBucket::Requested,
    ];

    /// Substring that puts a status in this bucket.
    pub const fn keyword(self) -> &'static str {
        match self {
            StatusBucket::Confirmed => "CONFIRMADA",
            StatusBucket::Completed => "REALIZADA",
            StatusBucket::Cancelled => "CANCELADA",
            StatusBucket::NotServed => "NÃO ATENDIDA",
            StatusBucket::DailyOnly => "DIÁRIA",
            StatusBucket::Requested => "SOLICITADA",
        }
    }

    /// Card label on the operational view.
    pub const fn label(self) -> &'static str {
        match self {
            StatusBucket::Confirmed => "Confirmada",
            StatusBucket::Completed => "Realizada",
            StatusBucket::Cancelled => "Cancelada",
            StatusBucket::NotServed => "Não Atendida",
            StatusBucket::DailyOnly => "Cobrança/Diária",
            StatusBucket::Requested => "Solicitada",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static STATUS_AUTOMATON: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::Standard)
        .build(StatusBucket::ALL.iter().map(|b| b.keyword()))
        .expect("status keywords form a valid automaton")
});

/// Which bucket a status belongs to, if any.
///
/// The status is uppercased first (Unicode-aware, so "não atendida" still
/// finds "NÃO ATENDIDA").
pub fn classify(status: &str) -> Option<StatusBucket> {
    let upper = status.to_uppercase();
    STATUS_AUTOMATON
        .find_overlapping_iter(&upper)
        .map(|m| m.pattern().as_usize())
        .min()
        .map(|idx| StatusBucket::ALL[idx])
}
