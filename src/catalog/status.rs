use std::{
    fmt,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

/// Identifies one invocation of a catalog operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    AddToFavorites,
    RemoveFromFavorites,
    AddCustomMovie,
    UpdateCustomMovie,
    DeleteCustomMovie,
    CreateList,
    UpdateList,
    DeleteList,
    AddMovieToList,
    RemoveMovieFromList,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Initialize => "initialize",
            Operation::AddToFavorites => "add_to_favorites",
            Operation::RemoveFromFavorites => "remove_from_favorites",
            Operation::AddCustomMovie => "add_custom_movie",
            Operation::UpdateCustomMovie => "update_custom_movie",
            Operation::DeleteCustomMovie => "delete_custom_movie",
            Operation::CreateList => "create_list",
            Operation::UpdateList => "update_list",
            Operation::DeleteList => "delete_list",
            Operation::AddMovieToList => "add_movie_to_list",
            Operation::RemoveMovieFromList => "remove_movie_from_list",
        }
    }

    /// User-facing message stored in the error slot when the operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Initialize => "Failed to load your movie data. Please try again later.",
            Operation::AddToFavorites => "Failed to add movie to favorites. Please try again.",
            Operation::RemoveFromFavorites => {
                "Failed to remove movie from favorites. Please try again."
            }
            Operation::AddCustomMovie => "Failed to add custom movie. Please try again.",
            Operation::UpdateCustomMovie => "Failed to update movie. Please try again.",
            Operation::DeleteCustomMovie => "Failed to delete movie. Please try again.",
            Operation::CreateList => "Failed to create list. Please try again.",
            Operation::UpdateList => "Failed to update list. Please try again.",
            Operation::DeleteList => "Failed to delete list. Please try again.",
            Operation::AddMovieToList => "Failed to add movie to list. Please try again.",
            Operation::RemoveMovieFromList => {
                "Failed to remove movie from list. Please try again."
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of the favorites operations, which report failures without erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    Applied(RequestId),
    /// No favorites list is loaded, so nothing was attempted.
    Skipped,
    Failed { request: RequestId, message: String },
}

impl OpStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, OpStatus::Applied(_))
    }
}

/// Content of the error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub request: RequestId,
    pub operation: Operation,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Loaded,
    /// Loading failed; favorites were restored from the local snapshot.
    Degraded { recovered_favorites: usize },
}

#[derive(Debug, Default)]
pub(crate) struct Tracker {
    in_flight: AtomicUsize,
    next_request: AtomicU64,
}

impl Tracker {
    pub(crate) fn begin(&self, operation: Operation) -> InFlight<'_> {
        let request = RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1);
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight {
            tracker: self,
            request,
            operation,
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Counts as in flight until dropped.
pub(crate) struct InFlight<'a> {
    tracker: &'a Tracker,
    pub(crate) request: RequestId,
    pub(crate) operation: Operation,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
