pub mod collector;
pub mod coordinator;
pub mod error;
pub mod friends;
pub mod markup;
pub mod names;
pub mod rating;
pub mod row;
pub mod session;
pub mod standings;
pub mod status;
pub mod table;

#[cfg(test)]
mod testing;

pub use collector::{FriendCollector, FriendRecord, MergeOutcome, RowSource};
pub use coordinator::{Coordinator, CoordinatorState, CycleDecision, Transition};
pub use error::{FetchError, FetchRejected, StaleFetch, StoreError};
pub use friends::{FriendSet, StarToggle, parse_friend_list, toggle_friend};
pub use names::normalize;
pub use rating::RatingTier;
pub use row::{RowFacts, RowKind, classify};
pub use session::{
    CompletionSummary, FetchTicket, FilterOutcome, Mode, RenderKey, RenderOutcome, Session,
};
pub use standings::{StandingsEntry, StandingsResponse, UNRANKED};
pub use status::{FetchResult, FetchStatus, settled_status};
pub use table::StandingsTable;
