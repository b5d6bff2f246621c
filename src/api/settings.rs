use super::LibraryClient;
use crate::domain::ClientError;
use crate::models::SystemSettings;

impl LibraryClient {
    /// Policy knobs (borrow limit, penalty ceiling). Missing fields fall
    /// back to the serde defaults so an older backend still answers.
    pub async fn system_settings(&self) -> Result<SystemSettings, ClientError> {
        self.get_json("/system-settings").await
    }
}
