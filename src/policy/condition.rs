//! Healthy/damaged/lost copy bookkeeping.
//!
//! The three condition counters must always sum to the total quantity.
//! Records arriving from imports or older backends do not always satisfy
//! that, so the counts are repaired before display and every manual
//! adjustment goes through a single-step move that cannot break the sum.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionCounts {
    pub healthy: i64,
    pub damaged: i64,
    pub lost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Healthy,
    Damaged,
    Lost,
}

fn clamp(value: i64) -> i64 {
    value.max(0)
}

/// Force the counts to be non-negative and sum exactly to `total_quantity`.
/// Healthy absorbs any shortfall; an overflow is shed healthy first, then
/// damaged, then lost.
pub fn normalize_condition_counts(total_quantity: i64, counts: ConditionCounts) -> ConditionCounts {
    let total = clamp(total_quantity);
    let mut healthy = clamp(counts.healthy);
    let mut damaged = clamp(counts.damaged);
    let mut lost = clamp(counts.lost);

    if damaged > total {
        damaged = total;
    }
    if lost > total - damaged {
        lost = total - damaged;
    }
    if healthy > total - damaged - lost {
        healthy = total - damaged - lost;
    }

    let sum = healthy + damaged + lost;
    if sum < total {
        healthy += total - sum;
    } else if sum > total {
        let mut diff = sum - total;
        let take = diff.min(healthy);
        healthy -= take;
        diff -= take;
        if diff > 0 {
            let take = diff.min(damaged);
            damaged -= take;
            diff -= take;
        }
        if diff > 0 {
            lost -= diff.min(lost);
        }
    }

    ConditionCounts {
        healthy: clamp(healthy),
        damaged: clamp(damaged),
        lost: clamp(lost),
    }
}

/// Move one copy into or out of a condition. Increasing healthy at full
/// capacity reclassifies a damaged copy first, then a lost one; decreasing
/// healthy marks a copy damaged. Returns `None` when there is nothing to
/// move.
pub fn adjust_condition_counts(
    total_quantity: i64,
    counts: ConditionCounts,
    kind: ConditionKind,
    delta: i64,
) -> Option<ConditionCounts> {
    let total = clamp(total_quantity);
    let mut next = counts;
    let current_total = counts.healthy + counts.damaged + counts.lost;

    match kind {
        ConditionKind::Healthy => {
            if delta > 0 {
                if current_total >= total {
                    if next.damaged > 0 {
                        next.damaged -= 1;
                        next.healthy += 1;
                    } else if next.lost > 0 {
                        next.lost -= 1;
                        next.healthy += 1;
                    } else {
                        return None;
                    }
                } else {
                    next.healthy += 1;
                }
            } else {
                if next.healthy <= 0 {
                    return None;
                }
                next.healthy -= 1;
                next.damaged += 1;
            }
        }
        ConditionKind::Damaged => {
            if delta > 0 {
                if next.healthy <= 0 {
                    return None;
                }
                next.healthy -= 1;
                next.damaged += 1;
            } else {
                if next.damaged <= 0 {
                    return None;
                }
                next.damaged -= 1;
                next.healthy += 1;
            }
        }
        ConditionKind::Lost => {
            if delta > 0 {
                if next.healthy <= 0 {
                    return None;
                }
                next.healthy -= 1;
                next.lost += 1;
            } else {
                if next.lost <= 0 {
                    return None;
                }
                next.lost -= 1;
                next.healthy += 1;
            }
        }
    }

    Some(normalize_condition_counts(total, next))
}
