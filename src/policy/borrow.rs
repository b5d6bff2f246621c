//! Borrow-limit evaluation for the quick-borrow flow.
//!
//! The evaluator answers one question before any request goes out: if this
//! student takes this batch, where do they land against the configured
//! limit? Exceeding the limit is a confirmation gate, not a hard stop; the
//! result carries enough detail for the caller to render the prompt.

use std::collections::HashSet;

use super::names;
use crate::models::{Book, LoanInfo, StudentStat};

#[derive(Debug, Clone)]
pub struct BorrowEvaluation {
    /// Requested books the student can actually take.
    pub eligible_books: Vec<Book>,
    /// Requested books this student already holds on active loan.
    pub already_borrowed_books: Vec<Book>,
    /// Requested books with no available or no healthy copy.
    pub unavailable_books: Vec<Book>,
    /// Live loans currently held by the student. Lifetime borrowed/returned
    /// counters are history and never feed the limit check.
    pub active_loan_count: usize,
    pub total_after_borrow: usize,
    pub exceeds_limit: bool,
    pub excess_count: usize,
}

impl BorrowEvaluation {
    /// Nothing survived filtering; the whole operation is a no-op and must
    /// be reported as such rather than silently succeed.
    pub fn nothing_to_borrow(&self) -> bool {
        self.eligible_books.is_empty()
    }
}

/// Evaluate a requested batch against the per-student borrow limit.
///
/// Duplicate ids in the request collapse before anything is counted, so a
/// double-clicked book never counts twice toward the limit.
pub fn evaluate_borrow(
    requested_books: &[Book],
    student_display_name: &str,
    student: Option<&StudentStat>,
    loans: &[LoanInfo],
    max_borrow_limit: i64,
) -> BorrowEvaluation {
    let candidates = names::candidate_names(student_display_name, student);
    let active_loans = names::loans_for_student(loans, &candidates);

    let held_book_ids: HashSet<&str> = active_loans
        .iter()
        .map(|loan| loan.book_id.as_str())
        .collect();

    let mut eligible_books = Vec::new();
    let mut already_borrowed_books = Vec::new();
    let mut unavailable_books = Vec::new();
    let mut seen = HashSet::new();

    for book in requested_books {
        if !seen.insert(book.id.as_str()) {
            continue;
        }
        if held_book_ids.contains(book.id.as_str()) {
            already_borrowed_books.push(book.clone());
        } else if !book.is_borrowable() {
            unavailable_books.push(book.clone());
        } else {
            eligible_books.push(book.clone());
        }
    }

    let limit = max_borrow_limit.max(0) as usize;
    let active_loan_count = active_loans.len();
    let total_after_borrow = active_loan_count + eligible_books.len();
    let exceeds_limit = total_after_borrow > limit;
    let excess_count = if exceeds_limit {
        total_after_borrow - limit
    } else {
        0
    };

    BorrowEvaluation {
        eligible_books,
        already_borrowed_books,
        unavailable_books,
        active_loan_count,
        total_after_borrow,
        exceeds_limit,
        excess_count,
    }
}
