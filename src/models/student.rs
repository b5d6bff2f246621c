use serde::{Deserialize, Serialize};

/// Per-student counters from `GET /statistics/all-students`.
///
/// `borrowed`/`returned`/`late` are lifetime totals. The number of loans a
/// student currently holds is never read from these counters; it is derived
/// from the live loan list filtered by borrower name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStat {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub borrowed: i64,
    #[serde(default)]
    pub returned: i64,
    #[serde(default)]
    pub late: i64,
    #[serde(default)]
    pub class: Option<i64>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub student_number: Option<i64>,
    #[serde(default)]
    pub penalty_points: Option<i64>,
    #[serde(default)]
    pub is_banned: Option<bool>,
}

impl StudentStat {
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.name.trim(), self.surname.trim());
        full.trim().to_string()
    }

    pub fn penalty_points(&self) -> i64 {
        self.penalty_points.unwrap_or(0).max(0)
    }
}

/// Payload for `PUT /admin/students/{name}/penalty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyUpdate {
    pub penalty_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personel_name: Option<String>,
}
