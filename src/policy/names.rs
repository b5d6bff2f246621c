//! Person-name matching between loan rows and student records.
//!
//! Loans store the borrower as a free-form display name typed by staff, so a
//! student can appear as "Ali Kaya", "ali  kaya" or just "Ali". Matching
//! goes through a normalized candidate set instead of string equality.

use std::collections::HashSet;

use crate::models::{LoanInfo, StudentStat};

/// Trim, collapse runs of whitespace, lowercase.
pub fn normalize_person_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Every spelling under which this student's loans may be recorded: the
/// display name, first name, surname and "first surname".
pub fn candidate_names(display_name: &str, student: Option<&StudentStat>) -> HashSet<String> {
    let mut candidates = HashSet::new();

    let normalized = normalize_person_name(display_name);
    if !normalized.is_empty() {
        candidates.insert(normalized);
    }

    if let Some(student) = student {
        for raw in [
            student.name.as_str(),
            student.surname.as_str(),
            &format!("{} {}", student.name, student.surname),
        ] {
            let normalized = normalize_person_name(raw);
            if !normalized.is_empty() {
                candidates.insert(normalized);
            }
        }
    }

    candidates
}

/// Active loans held by the student identified by `candidates`.
pub fn loans_for_student<'a>(
    loans: &'a [LoanInfo],
    candidates: &HashSet<String>,
) -> Vec<&'a LoanInfo> {
    if candidates.is_empty() {
        return Vec::new();
    }
    loans
        .iter()
        .filter(|loan| {
            let borrower = normalize_person_name(&loan.borrower);
            !borrower.is_empty() && candidates.contains(&borrower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, surname: &str) -> StudentStat {
        StudentStat {
            name: name.to_string(),
            surname: surname.to_string(),
            borrowed: 0,
            returned: 0,
            late: 0,
            class: None,
            branch: None,
            student_number: None,
            penalty_points: None,
            is_banned: None,
        }
    }

    fn loan_by(borrower: &str) -> LoanInfo {
        LoanInfo {
            book_id: "b1".to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            category: "Roman".to_string(),
            borrower: borrower.to_string(),
            due_date: "2026-03-17".to_string(),
            remaining_days: None,
            personel: None,
        }
    }

    #[test]
    fn normalization_collapses_whitespace_and_case() {
        assert_eq!(normalize_person_name("  Ali   Kaya "), "ali kaya");
        assert_eq!(normalize_person_name(""), "");
    }

    #[test]
    fn candidate_set_covers_partial_spellings() {
        let s = student("Ali", "Kaya");
        let candidates = candidate_names("Ali Kaya", Some(&s));
        assert!(candidates.contains("ali kaya"));
        assert!(candidates.contains("ali"));
        assert!(candidates.contains("kaya"));
    }

    #[test]
    fn matches_loans_recorded_under_any_spelling() {
        let s = student("Ali", "Kaya");
        let candidates = candidate_names("Ali Kaya", Some(&s));
        let loans = vec![loan_by("ali  KAYA"), loan_by("Ali"), loan_by("Veli Demir")];
        let matched = loans_for_student(&loans, &candidates);
        assert_eq!(matched.len(), 2);
    }
}
