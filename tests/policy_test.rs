//! Loan policy properties: bucketing, borrow limits, penalty thresholds.

use chrono::NaiveDate;

use circdesk::models::{Book, LoanInfo, StudentStat};
use circdesk::policy::{
    BucketedLoans, DueBucket, days_remaining, evaluate_borrow, is_banned, parse_due_date,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn book(id: &str, quantity: i64, healthy: i64) -> Book {
    Book {
        id: id.to_string(),
        title: format!("Title {}", id),
        author: "Author".to_string(),
        category: "Roman".to_string(),
        quantity,
        total_quantity: quantity,
        healthy_count: Some(healthy),
        damaged_count: Some(0),
        lost_count: Some(0),
        loans: Vec::new(),
        shelf: None,
        publisher: None,
        summary: None,
        book_number: None,
        year: None,
        page_count: None,
    }
}

fn loan(book_id: &str, borrower: &str, due_date: &str) -> LoanInfo {
    LoanInfo {
        book_id: book_id.to_string(),
        title: format!("Title {}", book_id),
        author: "Author".to_string(),
        category: "Roman".to_string(),
        borrower: borrower.to_string(),
        due_date: due_date.to_string(),
        remaining_days: None,
        personel: Some("Admin".to_string()),
    }
}

fn student(name: &str, surname: &str) -> StudentStat {
    StudentStat {
        name: name.to_string(),
        surname: surname.to_string(),
        borrowed: 0,
        returned: 0,
        late: 0,
        class: Some(7),
        branch: Some("A".to_string()),
        student_number: Some(42),
        penalty_points: Some(0),
        is_banned: None,
    }
}

#[test]
fn days_remaining_only_depends_on_calendar_dates() {
    let today = date(2026, 3, 10);
    // Same calendar day regardless of how the timestamp looks.
    for raw in [
        "2026-03-13",
        "2026-03-13T00:00:01",
        "2026-03-13T23:59:59",
        "2026-03-13 12:00:00",
    ] {
        let due = parse_due_date(raw).unwrap();
        assert_eq!(days_remaining(due, today), 3, "for {}", raw);
    }
}

#[test]
fn buckets_partition_the_parseable_subset() {
    let today = date(2026, 3, 10);
    // One loan per offset from -12 to +20 days, plus two broken rows.
    let mut loans: Vec<LoanInfo> = (-12..=20)
        .map(|offset| {
            let due = today + chrono::Duration::days(offset);
            loan(&format!("b{}", offset), "Ali Kaya", &due.to_string())
        })
        .collect();
    loans.push(loan("bad1", "Ali Kaya", "no date"));
    loans.push(loan("bad2", "Ali Kaya", ""));

    let buckets = BucketedLoans::build(&loans, today);

    assert_eq!(buckets.invalid_due_dates, 2);
    assert_eq!(buckets.len(), 33);
    assert_eq!(buckets.overdue.len(), 12);
    assert_eq!(buckets.due_soon.len(), 4); // 0..=3
    assert_eq!(buckets.this_week.len(), 4); // 4..=7
    assert_eq!(buckets.next_two_weeks.len(), 7); // 8..=14
    assert_eq!(buckets.later.len(), 6); // 15..=20

    // Boundary semantics: the 0-3 bucket never holds a 4-day loan.
    assert!(buckets.due_soon.iter().all(|c| (0..=3).contains(&c.days_remaining)));
    assert!(buckets.this_week.iter().all(|c| (4..=7).contains(&c.days_remaining)));

    // Each loan appears exactly once.
    let mut ids: Vec<&str> = DueBucket::ALL
        .iter()
        .flat_map(|b| buckets.bucket(*b).iter().map(|c| c.loan.book_id.as_str()))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 33);
}

#[test]
fn ten_days_overdue_sorts_ahead_of_two_days_overdue() {
    let today = date(2026, 3, 10);
    let loans = vec![
        loan("two", "Ali Kaya", "2026-03-08"),
        loan("ten", "Veli Demir", "2026-02-28"),
    ];

    let buckets = BucketedLoans::build(&loans, today);
    assert_eq!(buckets.overdue.len(), 2);
    assert!(buckets.due_soon.is_empty());
    assert_eq!(buckets.overdue[0].loan.book_id, "ten");
    assert_eq!(buckets.overdue[1].loan.book_id, "two");
}

#[test]
fn limit_exceeded_by_one_reports_excess_one() {
    // Student holds 4, limit is 5, requests 2 distinct eligible books.
    let s = student("Ali", "Kaya");
    let loans: Vec<LoanInfo> = (0..4)
        .map(|i| loan(&format!("held{}", i), "Ali Kaya", "2026-03-20"))
        .collect();
    let requested = vec![book("new1", 3, 3), book("new2", 1, 1)];

    let evaluation = evaluate_borrow(&requested, "Ali Kaya", Some(&s), &loans, 5);

    assert_eq!(evaluation.active_loan_count, 4);
    assert_eq!(evaluation.eligible_books.len(), 2);
    assert_eq!(evaluation.total_after_borrow, 6);
    assert!(evaluation.exceeds_limit);
    assert_eq!(evaluation.excess_count, 1);
}

#[test]
fn already_borrowed_books_are_filtered_out() {
    let s = student("Ali", "Kaya");
    let loans = vec![loan("dup", "ali kaya", "2026-03-20")];
    let requested = vec![book("dup", 2, 2), book("a", 1, 1), book("b", 1, 1)];

    let evaluation = evaluate_borrow(&requested, "Ali Kaya", Some(&s), &loans, 5);

    assert_eq!(evaluation.eligible_books.len(), 2);
    assert_eq!(evaluation.already_borrowed_books.len(), 1);
    assert_eq!(evaluation.already_borrowed_books[0].id, "dup");
    assert!(!evaluation.exceeds_limit);
}

#[test]
fn duplicate_request_ids_never_double_count() {
    let s = student("Ali", "Kaya");
    let requested_clean = vec![book("a", 1, 1), book("b", 1, 1)];
    let requested_dup = vec![
        book("a", 1, 1),
        book("a", 1, 1),
        book("b", 1, 1),
        book("b", 1, 1),
        book("b", 1, 1),
    ];

    let clean = evaluate_borrow(&requested_clean, "Ali Kaya", Some(&s), &[], 5);
    let deduped = evaluate_borrow(&requested_dup, "Ali Kaya", Some(&s), &[], 5);

    let ids = |e: &circdesk::policy::BorrowEvaluation| {
        e.eligible_books.iter().map(|b| b.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&clean), ids(&deduped));
    assert_eq!(deduped.total_after_borrow, 2);
}

#[test]
fn unhealthy_or_exhausted_stock_is_not_eligible() {
    let s = student("Ali", "Kaya");
    let requested = vec![
        book("fine", 2, 2),
        book("gone", 0, 0),
        book("damaged-only", 1, 0),
    ];

    let evaluation = evaluate_borrow(&requested, "Ali Kaya", Some(&s), &[], 5);

    assert_eq!(evaluation.eligible_books.len(), 1);
    assert_eq!(evaluation.eligible_books[0].id, "fine");
    assert_eq!(evaluation.unavailable_books.len(), 2);
}

#[test]
fn empty_request_reports_nothing_to_borrow() {
    let s = student("Ali", "Kaya");
    let evaluation = evaluate_borrow(&[], "Ali Kaya", Some(&s), &[], 5);
    assert!(evaluation.nothing_to_borrow());
    assert!(!evaluation.exceeds_limit);
}

#[test]
fn penalty_threshold_is_inclusive_at_max() {
    assert!(is_banned(100, 100));
    assert!(!is_banned(99, 100));
}
