use crate::domain::entities::movie::Movie;
use crate::domain::values::taste_filter::TasteFilter;
use std::collections::HashSet;

/// All per-login mutable state, created at session start and torn down on
/// logout. Mutated only through the use cases that hold a handle to it.
#[derive(Debug, Default)]
pub struct Session {
    /// Candidate cards awaiting a decision. Head = last element; cards are
    /// popped from the back, so presentation order is last-in-first-out and
    /// batches are spliced in at the front in reverse fetch order.
    pub queue: Vec<Movie>,
    /// Titles already presented this session. Grows monotonically; drives
    /// provider-side exclusion, local dedup, and the widening threshold.
    pub shown_titles: HashSet<String>,
    /// One-way flag: the expanded-search notice card has been queued.
    pub expansion_notified: bool,
    /// Movie ids the active user has liked.
    pub liked: HashSet<i64>,
    /// Movies saved to "my list" via the save disposition.
    pub saved: Vec<Movie>,
    /// Preferences chosen at onboarding; immutable until the next start.
    pub taste: TasteFilter,
    /// Bumped on every start/logout. A provider response issued under an
    /// older generation is discarded instead of repopulating fresh state.
    pub generation: u64,
}

impl Session {
    /// Clear everything and invalidate any in-flight provider request.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.shown_titles.clear();
        self.expansion_notified = false;
        self.liked.clear();
        self.saved.clear();
        self.taste = TasteFilter::default();
        self.generation += 1;
    }

    pub fn head(&self) -> Option<&Movie> {
        self.queue.last()
    }
}
