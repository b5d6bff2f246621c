//! Services Layer
//!
//! Orchestration over the pure policy core: snapshot refresh, the two-step
//! quick-borrow flow, returns, penalty overrides and derived statistics.
//! Everything here is advisory towards the backend; the server applies its
//! own rules to every mutation.

pub mod circulation;
pub mod overview;
pub mod stats;

pub use circulation::{BorrowPlan, BorrowReport, PlanOutcome, commit_borrow, plan_borrow};
pub use overview::{Overview, Snapshot};
