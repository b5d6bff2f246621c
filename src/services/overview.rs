//! Snapshot refresh and the due-soon overview.
//!
//! The original data flow recomputed every derived view whenever fetched
//! state changed. Here that is explicit: `Snapshot::fetch` pulls all four
//! resources concurrently, and `Overview::compute` rebuilds the derived
//! views from scratch. Callers refetch after each successful mutation batch
//! instead of patching state locally.

use chrono::{DateTime, Local, NaiveDate};

use crate::api::LibraryClient;
use crate::domain::ClientError;
use crate::models::{Book, LoanInfo, StudentStat, SystemSettings};
use crate::policy::{BucketedLoans, penalty};
use crate::policy::names::normalize_person_name;

/// Everything the console works from, fetched in one round.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub loans: Vec<LoanInfo>,
    pub students: Vec<StudentStat>,
    pub settings: SystemSettings,
    pub fetched_at: DateTime<Local>,
}

impl Snapshot {
    pub async fn fetch(client: &LibraryClient) -> Result<Self, ClientError> {
        let (books, loans, students, settings) = tokio::join!(
            client.list_books(),
            client.list_loans(),
            client.list_student_stats(),
            client.system_settings(),
        );

        let snapshot = Self {
            books: books?,
            loans: loans?,
            students: students?,
            settings: settings?,
            fetched_at: Local::now(),
        };
        tracing::info!(
            "snapshot refreshed: {} books, {} loans, {} students",
            snapshot.books.len(),
            snapshot.loans.len(),
            snapshot.students.len()
        );
        Ok(snapshot)
    }

    /// Look a student up by full name (normalized) or student number.
    pub fn find_student(&self, query: &str) -> Option<&StudentStat> {
        let normalized = normalize_person_name(query);
        if normalized.is_empty() {
            return None;
        }

        if let Ok(number) = query.trim().parse::<i64>() {
            if let Some(student) = self
                .students
                .iter()
                .find(|s| s.student_number == Some(number))
            {
                return Some(student);
            }
        }

        self.students
            .iter()
            .find(|s| normalize_person_name(&s.full_name()) == normalized)
    }

    /// Look a book up by id or catalog number.
    pub fn find_book(&self, query: &str) -> Option<&Book> {
        let trimmed = query.trim();
        if let Some(book) = self.books.iter().find(|b| b.id == trimmed) {
            return Some(book);
        }
        trimmed
            .parse::<i64>()
            .ok()
            .and_then(|number| self.books.iter().find(|b| b.book_number == Some(number)))
    }
}

/// Derived dashboard view over a snapshot. Pure; rebuild after every
/// refresh.
#[derive(Debug, Clone)]
pub struct Overview {
    pub buckets: BucketedLoans,
    pub total_books: usize,
    pub available_copies: i64,
    pub active_loans: usize,
    pub banned_students: Vec<StudentStat>,
}

impl Overview {
    pub fn compute(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let buckets = BucketedLoans::build(&snapshot.loans, today);
        let banned_students = snapshot
            .students
            .iter()
            .filter(|s| penalty::student_is_banned(s, snapshot.settings.max_penalty_points))
            .cloned()
            .collect();

        Self {
            buckets,
            total_books: snapshot.books.len(),
            available_copies: snapshot.books.iter().map(|b| b.quantity.max(0)).sum(),
            active_loans: snapshot.loans.len(),
            banned_students,
        }
    }
}
