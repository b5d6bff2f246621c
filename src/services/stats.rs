//! Headline numbers and rankings for the reports view.
//!
//! All pure aggregation over a snapshot, recomputed on demand. Days
//! remaining are always rederived locally so the numbers agree with the
//! due-soon buckets on screen.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::LoanInfo;
use crate::policy::due;
use crate::policy::names::normalize_person_name;
use crate::policy::penalty;
use crate::services::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    TotalBooks,
    AvailableCopies,
    LowStockBooks,
    OutOfStockBooks,
    ActiveLoans,
    OverdueLoans,
    DueSoon0To3,
    DueSoon4To7,
    DueSoon8To14,
    DueSoon15Plus,
    ActiveBorrowers,
    BannedStudents,
    HealthyRatioPct,
    BorrowedRatioPct,
}

impl StatKind {
    pub const ALL: [StatKind; 14] = [
        StatKind::TotalBooks,
        StatKind::AvailableCopies,
        StatKind::LowStockBooks,
        StatKind::OutOfStockBooks,
        StatKind::ActiveLoans,
        StatKind::OverdueLoans,
        StatKind::DueSoon0To3,
        StatKind::DueSoon4To7,
        StatKind::DueSoon8To14,
        StatKind::DueSoon15Plus,
        StatKind::ActiveBorrowers,
        StatKind::BannedStudents,
        StatKind::HealthyRatioPct,
        StatKind::BorrowedRatioPct,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::TotalBooks => "Titles in catalog",
            StatKind::AvailableCopies => "Copies on shelf",
            StatKind::LowStockBooks => "Low stock (1-2 left)",
            StatKind::OutOfStockBooks => "Out of stock",
            StatKind::ActiveLoans => "Active loans",
            StatKind::OverdueLoans => "Overdue loans",
            StatKind::DueSoon0To3 => "Due in 0-3 days",
            StatKind::DueSoon4To7 => "Due in 4-7 days",
            StatKind::DueSoon8To14 => "Due in 8-14 days",
            StatKind::DueSoon15Plus => "Due in 15+ days",
            StatKind::ActiveBorrowers => "Students with loans",
            StatKind::BannedStudents => "Banned students",
            StatKind::HealthyRatioPct => "Healthy copies %",
            StatKind::BorrowedRatioPct => "Stock on loan %",
        }
    }
}

fn days_of(loan: &LoanInfo, today: NaiveDate) -> Option<i64> {
    due::days_remaining_str(&loan.due_date, today)
}

fn count_in_range(loans: &[LoanInfo], today: NaiveDate, low: i64, high: i64) -> i64 {
    loans
        .iter()
        .filter_map(|l| days_of(l, today))
        .filter(|d| (low..=high).contains(d))
        .count() as i64
}

pub fn compute(kind: StatKind, snapshot: &Snapshot, today: NaiveDate) -> i64 {
    let books = &snapshot.books;
    let loans = &snapshot.loans;

    match kind {
        StatKind::TotalBooks => books.len() as i64,
        StatKind::AvailableCopies => books.iter().map(|b| b.quantity.max(0)).sum(),
        StatKind::LowStockBooks => books
            .iter()
            .filter(|b| b.quantity > 0 && b.quantity <= 2)
            .count() as i64,
        StatKind::OutOfStockBooks => books.iter().filter(|b| b.quantity == 0).count() as i64,
        StatKind::ActiveLoans => loans.len() as i64,
        StatKind::OverdueLoans => loans
            .iter()
            .filter_map(|l| days_of(l, today))
            .filter(|d| *d < 0)
            .count() as i64,
        StatKind::DueSoon0To3 => count_in_range(loans, today, 0, 3),
        StatKind::DueSoon4To7 => count_in_range(loans, today, 4, 7),
        StatKind::DueSoon8To14 => count_in_range(loans, today, 8, 14),
        StatKind::DueSoon15Plus => loans
            .iter()
            .filter_map(|l| days_of(l, today))
            .filter(|d| *d > 14)
            .count() as i64,
        StatKind::ActiveBorrowers => loans
            .iter()
            .map(|l| normalize_person_name(&l.borrower))
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>()
            .len() as i64,
        StatKind::BannedStudents => snapshot
            .students
            .iter()
            .filter(|s| penalty::student_is_banned(s, snapshot.settings.max_penalty_points))
            .count() as i64,
        StatKind::HealthyRatioPct => {
            let total: i64 = books.iter().map(|b| b.total_quantity.max(0)).sum();
            let healthy: i64 = books.iter().map(|b| b.available_healthy().max(0)).sum();
            ratio_pct(healthy, total)
        }
        StatKind::BorrowedRatioPct => {
            let total: i64 = books.iter().map(|b| b.total_quantity.max(0)).sum();
            ratio_pct(loans.len() as i64, total)
        }
    }
}

fn ratio_pct(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as i64
}

/// Most-borrowed titles by active loan count, ties broken by title so the
/// ranking is stable across refreshes.
pub fn top_borrowed(loans: &[LoanInfo], limit: usize) -> Vec<(String, String, usize)> {
    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    for loan in loans {
        *counts
            .entry((loan.title.clone(), loan.author.clone()))
            .or_default() += 1;
    }

    let mut ranked: Vec<(String, String, usize)> = counts
        .into_iter()
        .map(|((title, author), count)| (title, author, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Active loans per category, descending.
pub fn category_counts(loans: &[LoanInfo]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for loan in loans {
        let category = loan.category.trim();
        if category.is_empty() {
            continue;
        }
        *counts.entry(category.to_string()).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}
