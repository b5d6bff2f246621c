//! Repair of per-student lifetime counters.
//!
//! The counters come from the backend's persistent statistics. Records
//! touched by imports can be incomplete, so the reported "borrowed" total is
//! floored at returned + currently-active loans before display. The live
//! active-loan count always comes from the loan list, never from here.

use crate::models::StudentStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentCounters {
    pub borrowed: i64,
    pub returned: i64,
}

pub fn normalize_student_counters(
    student: Option<&StudentStat>,
    active_loans: usize,
) -> StudentCounters {
    let active = active_loans as i64;
    let returned = student.map(|s| s.returned.max(0)).unwrap_or(0);
    let reported = student.map(|s| s.borrowed.max(0)).unwrap_or(0);

    StudentCounters {
        borrowed: reported.max(returned + active),
        returned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(borrowed: i64, returned: i64) -> StudentStat {
        StudentStat {
            name: "Ali".to_string(),
            surname: "Kaya".to_string(),
            borrowed,
            returned,
            late: 0,
            class: None,
            branch: None,
            student_number: None,
            penalty_points: None,
            is_banned: None,
        }
    }

    #[test]
    fn floors_borrowed_at_returned_plus_active() {
        let s = student(2, 4);
        let counters = normalize_student_counters(Some(&s), 3);
        assert_eq!(counters.borrowed, 7);
        assert_eq!(counters.returned, 4);
    }

    #[test]
    fn keeps_reported_counters_when_consistent() {
        let s = student(10, 6);
        let counters = normalize_student_counters(Some(&s), 2);
        assert_eq!(counters.borrowed, 10);
        assert_eq!(counters.returned, 6);
    }

    #[test]
    fn missing_record_and_negatives_clamp_to_zero() {
        let counters = normalize_student_counters(None, 2);
        assert_eq!(counters.borrowed, 2);
        assert_eq!(counters.returned, 0);

        let s = student(-3, -1);
        let counters = normalize_student_counters(Some(&s), 0);
        assert_eq!(counters.borrowed, 0);
        assert_eq!(counters.returned, 0);
    }
}
