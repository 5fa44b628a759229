//! Dependent selection: pick an upstream option, then explicitly fetch the
//! records that belong to it.
//!
//! ```text
//! NothingSelected --select(k)--> Selected{k} --loaded(ticket)--> Loaded{k, items}
//!        ^                          ^   |                           |
//!        |                          |   +--select(k2)--> Selected{k2}
//!        +-------- clear() ---------+---------- select(k2) ---------+ (items discarded)
//! ```
//!
//! Fetches are tracked with [`FetchTicket`]s. Only the most recently issued
//! ticket for the current key can deliver items, so a slow response for an
//! earlier request (or an earlier selection) is dropped instead of
//! overwriting newer state.

use crate::attendance::AttendanceMark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    key: i64,
    seq: u64,
}

impl FetchTicket {
    pub fn key(&self) -> i64 {
        self.key
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CascadeState<T> {
    NothingSelected,
    Selected { key: i64 },
    Loaded { key: i64, items: Vec<T> },
}

/// What a selection change did to the downstream records
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange<T> {
    /// A key is now selected and nothing was loaded before.
    Selected,
    /// Same key as before; loaded records were kept.
    Unchanged,
    /// Loaded records belonged to the previous key and were dropped.
    Reset { discarded: Vec<T> },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CascadeError {
    #[error("Select an option before loading its records")]
    NothingSelected,
    #[error("Ignored a response for an outdated request")]
    StaleResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependentSelection<T> {
    state: CascadeState<T>,
    pending: Option<FetchTicket>,
    next_seq: u64,
}

/// Class → roster selection used by attendance marking.
pub type RosterCascade = DependentSelection<AttendanceMark>;

/// Category (or class) → records selection used by the bookkeeping pages.
pub type CategoryCascade<T> = DependentSelection<T>;

impl<T> Default for DependentSelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DependentSelection<T> {
    pub fn new() -> Self {
        Self {
            state: CascadeState::NothingSelected,
            pending: None,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &CascadeState<T> {
        &self.state
    }

    pub fn selected_key(&self) -> Option<i64> {
        match &self.state {
            CascadeState::NothingSelected => None,
            CascadeState::Selected { key } | CascadeState::Loaded { key, .. } => Some(*key),
        }
    }

    pub fn items(&self) -> Option<&[T]> {
        match &self.state {
            CascadeState::Loaded { items, .. } => Some(items),
            _ => None,
        }
    }

    pub(crate) fn items_mut(&mut self) -> Option<&mut Vec<T>> {
        match &mut self.state {
            CascadeState::Loaded { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, CascadeState::Loaded { .. })
    }

    /// A fetch has been requested and not yet answered.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn select(&mut self, key: i64) -> SelectionChange<T> {
        if self.selected_key() == Some(key) {
            return SelectionChange::Unchanged;
        }

        self.pending = None;
        let previous = std::mem::replace(&mut self.state, CascadeState::Selected { key });
        match previous {
            CascadeState::Loaded { items, .. } => SelectionChange::Reset { discarded: items },
            _ => SelectionChange::Selected,
        }
    }

    pub fn clear(&mut self) -> SelectionChange<T> {
        self.pending = None;
        match std::mem::replace(&mut self.state, CascadeState::NothingSelected) {
            CascadeState::Loaded { items, .. } => SelectionChange::Reset { discarded: items },
            CascadeState::Selected { .. } => SelectionChange::Selected,
            CascadeState::NothingSelected => SelectionChange::Unchanged,
        }
    }

    /// Start a fetch for the current selection. Supersedes any earlier ticket.
    pub fn request(&mut self) -> Result<FetchTicket, CascadeError> {
        let key = self.selected_key().ok_or(CascadeError::NothingSelected)?;
        self.next_seq += 1;
        let ticket = FetchTicket {
            key,
            seq: self.next_seq,
        };
        self.pending = Some(ticket);
        Ok(ticket)
    }

    /// Deliver the records for `ticket`. Replaces whatever was loaded.
    pub fn loaded(&mut self, ticket: FetchTicket, items: Vec<T>) -> Result<(), CascadeError> {
        if self.pending != Some(ticket) {
            return Err(CascadeError::StaleResponse);
        }
        self.pending = None;
        self.state = CascadeState::Loaded {
            key: ticket.key,
            items,
        };
        Ok(())
    }

    /// The fetch for `ticket` failed; the previous state is kept.
    pub fn failed(&mut self, ticket: FetchTicket) {
        if self.pending == Some(ticket) {
            self.pending = None;
        }
    }
}

impl RosterCascade {
    pub fn marked_count(&self) -> usize {
        self.items()
            .map(|rows| rows.iter().filter(|row| row.status().is_some()).count())
            .unwrap_or(0)
    }

    /// Changing the class now would throw away marks the user entered.
    pub fn has_unsaved_marks(&self) -> bool {
        self.marked_count() > 0
    }
}
