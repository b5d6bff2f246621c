//! Loan policy core
//!
//! Pure, synchronous evaluation over data already fetched into memory. None
//! of this is authoritative: every check here is a front-run of the same
//! rule on the server, kept only to save a round trip and give staff an
//! immediate answer. The server's verdict always wins.

pub mod borrow;
pub mod buckets;
pub mod condition;
pub mod counters;
pub mod due;
pub mod names;
pub mod penalty;
pub mod search;

pub use borrow::{BorrowEvaluation, evaluate_borrow};
pub use buckets::{BucketedLoans, ClassifiedLoan, DueBucket};
pub use due::{days_remaining, local_today, parse_due_date};
pub use penalty::{PenaltyLevel, is_banned, penalty_level};
