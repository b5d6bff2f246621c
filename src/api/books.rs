use super::LibraryClient;
use crate::domain::ClientError;
use crate::models::{Book, BorrowRequest, ReturnRequest};

impl LibraryClient {
    /// Full catalog with embedded active loans.
    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.get_json("/books").await
    }

    /// Lend one copy. The server decrements stock, appends the loan and
    /// returns the updated book; a penalty ban or a concurrently exhausted
    /// stock comes back as a rejection.
    pub async fn borrow_book(
        &self,
        book_id: &str,
        request: &BorrowRequest,
    ) -> Result<Book, ClientError> {
        self.post_json(
            &format!("/books/{}/borrow", urlencoding::encode(book_id)),
            request,
        )
        .await
    }

    /// Take a copy back from a borrower.
    pub async fn return_book(
        &self,
        book_id: &str,
        request: &ReturnRequest,
    ) -> Result<Book, ClientError> {
        self.post_json(
            &format!("/books/{}/return", urlencoding::encode(book_id)),
            request,
        )
        .await
    }
}
