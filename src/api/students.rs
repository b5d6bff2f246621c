use super::LibraryClient;
use crate::domain::ClientError;
use crate::models::{PenaltyUpdate, StudentStat};

impl LibraryClient {
    /// Lifetime counters and penalty points for every student.
    pub async fn list_student_stats(&self) -> Result<Vec<StudentStat>, ClientError> {
        self.get_json("/statistics/all-students").await
    }

    /// Admin override of a student's penalty points. The student is
    /// addressed by name, URL-encoded; the server owns the automatic
    /// accumulation, this only sets the stored value.
    pub async fn update_penalty(
        &self,
        student_name: &str,
        update: &PenaltyUpdate,
    ) -> Result<(), ClientError> {
        self.put_json_unit(
            &format!(
                "/admin/students/{}/penalty",
                urlencoding::encode(student_name)
            ),
            update,
        )
        .await
    }
}
