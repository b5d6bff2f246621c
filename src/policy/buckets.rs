//! Due-date classification for the due-soon dashboard.
//!
//! Active loans partition into five disjoint, exhaustive groups by whole
//! days remaining. The partition is rebuilt from scratch whenever the loan
//! list changes; at hundreds to low thousands of loans a full O(n log n)
//! recompute is cheaper than being clever.

use chrono::NaiveDate;

use super::due;
use crate::models::LoanInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueBucket {
    /// Past due, most-overdue first
    Overdue,
    /// 0-3 days left (today counts)
    DueSoon,
    /// 4-7 days left
    ThisWeek,
    /// 8-14 days left
    NextTwoWeeks,
    /// 15 days or more
    Later,
}

impl DueBucket {
    pub fn classify(days: i64) -> Self {
        if days < 0 {
            DueBucket::Overdue
        } else if days <= 3 {
            DueBucket::DueSoon
        } else if days <= 7 {
            DueBucket::ThisWeek
        } else if days <= 14 {
            DueBucket::NextTwoWeeks
        } else {
            DueBucket::Later
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueBucket::Overdue => "Overdue",
            DueBucket::DueSoon => "0-3 days",
            DueBucket::ThisWeek => "4-7 days",
            DueBucket::NextTwoWeeks => "8-14 days",
            DueBucket::Later => "15+ days",
        }
    }

    pub const ALL: [DueBucket; 5] = [
        DueBucket::Overdue,
        DueBucket::DueSoon,
        DueBucket::ThisWeek,
        DueBucket::NextTwoWeeks,
        DueBucket::Later,
    ];
}

/// A loan together with its locally recomputed days-remaining.
#[derive(Debug, Clone)]
pub struct ClassifiedLoan {
    pub loan: LoanInfo,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Default)]
pub struct BucketedLoans {
    pub overdue: Vec<ClassifiedLoan>,
    pub due_soon: Vec<ClassifiedLoan>,
    pub this_week: Vec<ClassifiedLoan>,
    pub next_two_weeks: Vec<ClassifiedLoan>,
    pub later: Vec<ClassifiedLoan>,
    /// Loans dropped because their due date would not parse.
    pub invalid_due_dates: usize,
}

impl BucketedLoans {
    /// Full recompute over the current loan list. Every bucket comes out
    /// sorted ascending by days remaining, which for the overdue bucket
    /// means most-overdue first.
    pub fn build(loans: &[LoanInfo], today: NaiveDate) -> Self {
        let mut buckets = BucketedLoans::default();

        for loan in loans {
            let days = match due::days_remaining_str(&loan.due_date, today) {
                Some(days) => days,
                None => {
                    tracing::debug!(
                        "skipping loan of '{}' to {}: unparseable due date '{}'",
                        loan.title,
                        loan.borrower,
                        loan.due_date
                    );
                    buckets.invalid_due_dates += 1;
                    continue;
                }
            };

            let classified = ClassifiedLoan {
                loan: loan.clone(),
                days_remaining: days,
            };
            match DueBucket::classify(days) {
                DueBucket::Overdue => buckets.overdue.push(classified),
                DueBucket::DueSoon => buckets.due_soon.push(classified),
                DueBucket::ThisWeek => buckets.this_week.push(classified),
                DueBucket::NextTwoWeeks => buckets.next_two_weeks.push(classified),
                DueBucket::Later => buckets.later.push(classified),
            }
        }

        buckets.overdue.sort_by_key(|c| c.days_remaining);
        buckets.due_soon.sort_by_key(|c| c.days_remaining);
        buckets.this_week.sort_by_key(|c| c.days_remaining);
        buckets.next_two_weeks.sort_by_key(|c| c.days_remaining);
        buckets.later.sort_by_key(|c| c.days_remaining);

        buckets
    }

    pub fn bucket(&self, bucket: DueBucket) -> &[ClassifiedLoan] {
        match bucket {
            DueBucket::Overdue => &self.overdue,
            DueBucket::DueSoon => &self.due_soon,
            DueBucket::ThisWeek => &self.this_week,
            DueBucket::NextTwoWeeks => &self.next_two_weeks,
            DueBucket::Later => &self.later,
        }
    }

    /// Total classified loans, excluding the invalid ones.
    pub fn len(&self) -> usize {
        DueBucket::ALL
            .iter()
            .map(|b| self.bucket(*b).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(book_id: &str, due_date: &str) -> LoanInfo {
        LoanInfo {
            book_id: book_id.to_string(),
            title: format!("Book {}", book_id),
            author: "Author".to_string(),
            category: "Roman".to_string(),
            borrower: "Ali Kaya".to_string(),
            due_date: due_date.to_string(),
            remaining_days: None,
            personel: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(DueBucket::classify(-1), DueBucket::Overdue);
        assert_eq!(DueBucket::classify(0), DueBucket::DueSoon);
        assert_eq!(DueBucket::classify(3), DueBucket::DueSoon);
        assert_eq!(DueBucket::classify(4), DueBucket::ThisWeek);
        assert_eq!(DueBucket::classify(7), DueBucket::ThisWeek);
        assert_eq!(DueBucket::classify(8), DueBucket::NextTwoWeeks);
        assert_eq!(DueBucket::classify(14), DueBucket::NextTwoWeeks);
        assert_eq!(DueBucket::classify(15), DueBucket::Later);
    }

    #[test]
    fn every_parseable_loan_lands_in_exactly_one_bucket() {
        let loans = vec![
            loan("a", "2026-03-08"), // -2
            loan("b", "2026-03-10"), // 0
            loan("c", "2026-03-13"), // 3
            loan("d", "2026-03-14"), // 4
            loan("e", "2026-03-17"), // 7
            loan("f", "2026-03-24"), // 14
            loan("g", "2026-04-01"), // 22
            loan("h", "not-a-date"),
        ];

        let buckets = BucketedLoans::build(&loans, today());
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets.invalid_due_dates, 1);
        assert_eq!(buckets.overdue.len(), 1);
        assert_eq!(buckets.due_soon.len(), 2);
        assert_eq!(buckets.this_week.len(), 2);
        assert_eq!(buckets.next_two_weeks.len(), 1);
        assert_eq!(buckets.later.len(), 1);

        // Disjointness: no book id shows up twice across buckets.
        let mut seen = std::collections::HashSet::new();
        for bucket in DueBucket::ALL {
            for entry in buckets.bucket(bucket) {
                assert!(seen.insert(entry.loan.book_id.clone()));
            }
        }
    }

    #[test]
    fn overdue_sorts_most_overdue_first() {
        let loans = vec![
            loan("two-late", "2026-03-08"), // -2
            loan("ten-late", "2026-02-28"), // -10
        ];

        let buckets = BucketedLoans::build(&loans, today());
        assert_eq!(buckets.overdue.len(), 2);
        assert_eq!(buckets.overdue[0].loan.book_id, "ten-late");
        assert_eq!(buckets.overdue[0].days_remaining, -10);
        assert_eq!(buckets.overdue[1].loan.book_id, "two-late");
    }

    #[test]
    fn buckets_sort_soonest_due_first_and_stably() {
        let loans = vec![
            loan("c", "2026-03-13"), // 3
            loan("a1", "2026-03-11"), // 1
            loan("a2", "2026-03-11"), // 1, same day: input order preserved
            loan("b", "2026-03-12"), // 2
        ];

        let buckets = BucketedLoans::build(&loans, today());
        let ids: Vec<&str> = buckets
            .due_soon
            .iter()
            .map(|c| c.loan.book_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "b", "c"]);
    }
}
