use super::LibraryClient;
use crate::domain::ClientError;
use crate::models::LoanInfo;

impl LibraryClient {
    /// All active loans as flat rows, one per outstanding copy.
    pub async fn list_loans(&self) -> Result<Vec<LoanInfo>, ClientError> {
        self.get_json("/books/loans").await
    }
}
