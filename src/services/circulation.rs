//! Quick-borrow, return and penalty flows.
//!
//! Borrowing is two-step: `plan_borrow` evaluates the batch against local
//! policy and classifies the outcome, `commit_borrow` executes the plan.
//! An over-limit plan commits only with explicit confirmation; a penalty
//! ban blocks locally. Both checks are a front-run of the server's own
//! rules — the commit still surfaces whatever the server decides, book by
//! book, so one rejection does not mask the rest of the batch.

use crate::api::LibraryClient;
use crate::domain::ClientError;
use crate::models::{BorrowRequest, PenaltyUpdate, ReturnRequest};
use crate::policy::{BorrowEvaluation, evaluate_borrow, penalty};
use crate::services::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Penalty ban: do not send the borrow at all.
    Blocked {
        penalty_points: i64,
        max_penalty_points: i64,
    },
    /// Validation rejection: nothing survived filtering, the operation is a
    /// no-op and must be reported, never silently "succeed".
    NothingToBorrow,
    /// Limit exceeded: advisory, commit requires explicit confirmation.
    NeedsConfirmation { excess_count: usize },
    Ready,
}

#[derive(Debug, Clone)]
pub struct BorrowPlan {
    /// Display name sent as the borrower on each request.
    pub borrower: String,
    pub days: i64,
    pub evaluation: BorrowEvaluation,
    pub outcome: PlanOutcome,
}

/// Evaluate a borrow batch for a student against the current snapshot.
///
/// Unknown book ids are a validation error: they signal a stale screen, and
/// silently skipping them would lend a different batch than the one staff
/// confirmed.
pub fn plan_borrow(
    snapshot: &Snapshot,
    student_query: &str,
    book_ids: &[String],
    days: i64,
) -> Result<BorrowPlan, ClientError> {
    if days <= 0 {
        return Err(ClientError::Validation(format!(
            "loan length must be positive, got {}",
            days
        )));
    }

    let student = snapshot.find_student(student_query);
    let borrower = student
        .map(|s| s.full_name())
        .unwrap_or_else(|| student_query.trim().to_string());
    if borrower.is_empty() {
        return Err(ClientError::Validation("empty student name".to_string()));
    }

    let mut requested = Vec::new();
    let mut unknown = Vec::new();
    for id in book_ids {
        match snapshot.find_book(id) {
            Some(book) => requested.push(book.clone()),
            None => unknown.push(id.as_str()),
        }
    }
    if !unknown.is_empty() {
        return Err(ClientError::Validation(format!(
            "unknown book id(s): {}",
            unknown.join(", ")
        )));
    }

    let evaluation = evaluate_borrow(
        &requested,
        &borrower,
        student,
        &snapshot.loans,
        snapshot.settings.max_borrow_limit,
    );

    let outcome = if let Some(student) = student {
        if penalty::student_is_banned(student, snapshot.settings.max_penalty_points) {
            PlanOutcome::Blocked {
                penalty_points: student.penalty_points(),
                max_penalty_points: snapshot.settings.max_penalty_points,
            }
        } else {
            outcome_from_evaluation(&evaluation)
        }
    } else {
        outcome_from_evaluation(&evaluation)
    };

    Ok(BorrowPlan {
        borrower,
        days,
        evaluation,
        outcome,
    })
}

fn outcome_from_evaluation(evaluation: &BorrowEvaluation) -> PlanOutcome {
    if evaluation.nothing_to_borrow() {
        PlanOutcome::NothingToBorrow
    } else if evaluation.exceeds_limit {
        PlanOutcome::NeedsConfirmation {
            excess_count: evaluation.excess_count,
        }
    } else {
        PlanOutcome::Ready
    }
}

/// Per-book results of an executed plan.
#[derive(Debug, Default)]
pub struct BorrowReport {
    pub borrowed: Vec<String>,
    /// Title and server message for each rejected book.
    pub rejected: Vec<(String, String)>,
}

/// Execute a borrow plan. `confirmed` is the explicit override for an
/// over-limit plan; everything else about the outcome was already decided
/// at planning time.
pub async fn commit_borrow(
    client: &LibraryClient,
    plan: &BorrowPlan,
    personel_name: &str,
    confirmed: bool,
) -> Result<BorrowReport, ClientError> {
    match &plan.outcome {
        PlanOutcome::Blocked {
            penalty_points,
            max_penalty_points,
        } => {
            return Err(ClientError::Validation(format!(
                "{} is banned from borrowing ({} / {} penalty points)",
                plan.borrower, penalty_points, max_penalty_points
            )));
        }
        PlanOutcome::NothingToBorrow => {
            return Err(ClientError::Validation(
                "nothing to borrow: no eligible books in the request".to_string(),
            ));
        }
        PlanOutcome::NeedsConfirmation { excess_count } if !confirmed => {
            return Err(ClientError::Validation(format!(
                "borrow limit exceeded by {}; confirmation required",
                excess_count
            )));
        }
        _ => {}
    }

    let request = BorrowRequest {
        borrower: plan.borrower.clone(),
        days: plan.days,
        personel_name: personel_name.to_string(),
    };

    let mut report = BorrowReport::default();
    for book in &plan.evaluation.eligible_books {
        match client.borrow_book(&book.id, &request).await {
            Ok(_) => {
                tracing::info!("lent '{}' to {}", book.title, plan.borrower);
                report.borrowed.push(book.title.clone());
            }
            Err(ClientError::Rejected { message, status }) => {
                // Another desk may have taken the last copy, or the ban
                // landed between plan and commit. Keep going so staff see
                // the full batch result.
                tracing::warn!(
                    "server rejected '{}' for {} ({}): {}",
                    book.title,
                    plan.borrower,
                    status,
                    message
                );
                report.rejected.push((book.title.clone(), message));
            }
            Err(other) => return Err(other),
        }
    }

    Ok(report)
}

/// Take a copy back. The borrower spelling comes from the live loan row so
/// the server matches the record it created.
pub async fn return_book(
    client: &LibraryClient,
    snapshot: &Snapshot,
    book_id: &str,
    student_query: &str,
    personel_name: &str,
) -> Result<(), ClientError> {
    let book = snapshot
        .find_book(book_id)
        .ok_or_else(|| ClientError::Validation(format!("unknown book id '{}'", book_id)))?;

    let candidates = crate::policy::names::candidate_names(
        student_query,
        snapshot.find_student(student_query),
    );
    let loan = snapshot
        .loans
        .iter()
        .filter(|l| l.book_id == book.id)
        .find(|l| candidates.contains(&crate::policy::names::normalize_person_name(&l.borrower)))
        .ok_or_else(|| {
            ClientError::Validation(format!(
                "no active loan of '{}' to '{}'",
                book.title, student_query
            ))
        })?;

    let request = ReturnRequest {
        borrower: loan.borrower.clone(),
        personel_name: personel_name.to_string(),
    };
    client.return_book(&book.id, &request).await?;
    tracing::info!("took back '{}' from {}", book.title, loan.borrower);
    Ok(())
}

/// Admin override of a student's penalty points. Pure passthrough: the
/// automatic accumulation on late returns happens server-side.
pub async fn set_penalty(
    client: &LibraryClient,
    snapshot: &Snapshot,
    student_query: &str,
    penalty_points: i64,
    personel_name: &str,
) -> Result<(), ClientError> {
    if penalty_points < 0 {
        return Err(ClientError::Validation(
            "penalty points cannot be negative".to_string(),
        ));
    }

    let student = snapshot.find_student(student_query).ok_or_else(|| {
        ClientError::Validation(format!("unknown student '{}'", student_query))
    })?;

    let update = PenaltyUpdate {
        penalty_points,
        personel_name: Some(personel_name.to_string()),
    };
    client.update_penalty(&student.name, &update).await
}
