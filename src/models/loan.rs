use serde::{Deserialize, Serialize};

/// Loan record embedded in a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEntry {
    pub borrower: String,
    pub due_date: String,
    #[serde(default)]
    pub personel: Option<String>,
}

/// Flat active-loan row from `GET /books/loans`.
///
/// `remaining_days` is a server-computed hint. Classification always
/// recomputes it locally from `due_date` against the local calendar, so a
/// snapshot that sat in memory overnight cannot keep a loan in yesterday's
/// bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInfo {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub borrower: String,
    pub due_date: String,
    #[serde(default)]
    pub remaining_days: Option<i64>,
    #[serde(default)]
    pub personel: Option<String>,
}

/// Payload for `POST /books/{id}/borrow`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub borrower: String,
    pub days: i64,
    pub personel_name: String,
}

/// Payload for `POST /books/{id}/return`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub borrower: String,
    pub personel_name: String,
}
