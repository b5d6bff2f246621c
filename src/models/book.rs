use serde::{Deserialize, Serialize};

use super::loan::LoanEntry;

/// Catalog entry as served by `GET /books`. `quantity` is the number of
/// copies currently on the shelf; the server keeps it equal to
/// `total_quantity` minus active loans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub healthy_count: Option<i64>,
    #[serde(default)]
    pub damaged_count: Option<i64>,
    #[serde(default)]
    pub lost_count: Option<i64>,
    #[serde(default)]
    pub loans: Vec<LoanEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
}

impl Book {
    /// Healthy copies on the shelf. Older backends omit the condition
    /// breakdown, in which case every available copy counts as healthy.
    pub fn available_healthy(&self) -> i64 {
        self.healthy_count.unwrap_or(self.quantity)
    }

    /// A copy can go out only if one is on the shelf and in lendable shape.
    pub fn is_borrowable(&self) -> bool {
        self.quantity > 0 && self.available_healthy() > 0
    }
}

/// Lifetime per-title counters from the statistics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStat {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub borrowed: i64,
    #[serde(default)]
    pub returned: i64,
    #[serde(default)]
    pub late: i64,
}
