//! Operation names accepted by the books endpoint

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

/// Logical operation selected through the `method` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    ListBooks,
    SearchBooks,
    GetBookDetails,
    AddBook,
    BorrowBook,
    ReturnBook,
    RateBook,
    GetLibraryStats,
}

impl Method {
    /// Every method, in the order reported to clients
    pub const ALL: [Method; 8] = [
        Method::ListBooks,
        Method::SearchBooks,
        Method::GetBookDetails,
        Method::AddBook,
        Method::BorrowBook,
        Method::ReturnBook,
        Method::RateBook,
        Method::GetLibraryStats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::ListBooks => "list_books",
            Method::SearchBooks => "search_books",
            Method::GetBookDetails => "get_book_details",
            Method::AddBook => "add_book",
            Method::BorrowBook => "borrow_book",
            Method::ReturnBook => "return_book",
            Method::RateBook => "rate_book",
            Method::GetLibraryStats => "get_library_stats",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}
