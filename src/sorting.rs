use std::cell::RefCell;
use std::cmp::Ordering;

use clap::ValueEnum;
use feruca::Collator;
use tracing::trace;

use crate::dataset::{SortKey, University};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Descending,
        }
    }
}

/// What repeated activation of the sorted column does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortCycle {
    /// Ascending, then descending, then stays descending.
    #[default]
    Toggle,
    /// Ascending, then descending, then back to natural order.
    ThreeState,
}

/// Owns the current sort state. `activate` is the only way to change it.
#[derive(Debug, Clone, Default)]
pub struct SortController {
    state: Option<SortState>,
    cycle: SortCycle,
}

impl SortController {
    pub fn new(state: Option<SortState>, cycle: SortCycle) -> Self {
        Self { state, cycle }
    }

    pub fn state(&self) -> Option<SortState> {
        self.state
    }

    pub fn activate(&mut self, key: SortKey) -> Option<SortState> {
        let next = match (self.state, self.cycle) {
            (Some(current), _) if current.key != key => Some(SortState::ascending(key)),
            (None, _) => Some(SortState::ascending(key)),
            (Some(current), _) if current.order == SortOrder::Ascending => {
                Some(SortState::descending(key))
            }
            (Some(current), SortCycle::Toggle) => Some(current),
            (Some(_), SortCycle::ThreeState) => None,
        };
        trace!("Sort state {:?} => {:?}", self.state, next);
        self.state = next;
        next
    }
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode collation with the CLDR root order: accents and case only break
/// ties, lowercase sorts before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with_borrow_mut(|collator| collator.collate(a, b))
}

/// Mapping of display position to record index. Natural order without a state.
pub fn sorted_order(records: &[University], state: Option<SortState>) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..records.len()).collect();
    if let Some(SortState { key, order }) = state {
        // `sort_by` is stable, ties keep their input order in both directions.
        rows.sort_by(|&a, &b| {
            let ordering = records[a].value(key).compare(&records[b].value(key));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
    rows
}

pub fn sorted_view(records: &[University], state: Option<SortState>) -> Vec<&University> {
    sorted_order(records, state)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}
