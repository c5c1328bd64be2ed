//! Handlers for the book catalog methods

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookFilter, NewBook},
    AppState,
};

use super::params::{ParamValue, RequestParams};

/// Fields `add_book` requires, in validation order
const REQUIRED_FIELDS: [&str; 6] = ["title", "author", "genre", "year", "pages", "description"];

/// Success envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct MethodBody {
    /// Always true
    pub success: bool,
    /// Book, list of books or statistics, depending on the method
    #[schema(value_type = Object)]
    pub data: Value,
    /// Number of books in `data` (list and search)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Search query as received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Human-readable outcome of a mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A successful method outcome with its HTTP status
#[derive(Debug)]
pub struct MethodResponse {
    pub status: StatusCode,
    pub body: MethodBody,
}

impl MethodResponse {
    pub fn ok(data: impl Serialize) -> AppResult<Self> {
        Ok(Self {
            status: StatusCode::OK,
            body: MethodBody {
                success: true,
                data: serde_json::to_value(data)?,
                count: None,
                query: None,
                message: None,
            },
        })
    }

    pub fn created(data: impl Serialize) -> AppResult<Self> {
        let mut response = Self::ok(data)?;
        response.status = StatusCode::CREATED;
        Ok(response)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.body.count = Some(count);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.body.query = Some(query.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }
}

impl IntoResponse for MethodResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn book_id(params: &RequestParams) -> AppResult<i64> {
    let value = params
        .get("book_id")
        .ok_or_else(|| AppError::MissingParam("book_id parameter is required".to_string()))?;
    value
        .as_int()
        .map_err(|_| AppError::InvalidFormat("book_id must be a number".to_string()))
}

fn optional_text(params: &RequestParams, name: &str) -> AppResult<Option<String>> {
    params
        .get(name)
        .map(|value| value.as_nonempty_string())
        .transpose()
        .map_err(|e| AppError::InvalidFormat(format!("{} must be text: {}", name, e)))
}

fn required_field(params: &RequestParams, name: &'static str) -> AppResult<ParamValue> {
    params.body_field(name).ok_or(AppError::MissingField(name))
}

fn invalid_data(e: impl std::fmt::Display) -> AppError {
    AppError::InvalidFormat(format!("Invalid data format: {}", e))
}

/// `list_books`: optional `genre`, optional `available_only`
pub async fn list_books(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    let filter = BookFilter {
        genre: optional_text(params, "genre")?,
        available_only: params
            .get("available_only")
            .is_some_and(|value| value.as_flag()),
    };

    let books = state.services.catalog.list_books(&filter).await;
    let count = books.len();
    Ok(MethodResponse::ok(books)?.with_count(count))
}

/// `search_books`: required `query`
pub async fn search_books(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    let query = optional_text(params, "query")?
        .ok_or_else(|| AppError::MissingParam("Query parameter is required".to_string()))?;

    let books = state.services.catalog.search_books(&query).await?;
    let count = books.len();
    Ok(MethodResponse::ok(books)?.with_count(count).with_query(query))
}

/// `get_book_details`: required `book_id`
pub async fn get_book_details(
    state: &AppState,
    params: &RequestParams,
) -> AppResult<MethodResponse> {
    let id = book_id(params)?;
    let book = state.services.catalog.get_book(id).await?;
    MethodResponse::ok(book)
}

/// `add_book`: every field of [`REQUIRED_FIELDS`] in the JSON body
pub async fn add_book(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    if !params.has_body() {
        return Err(AppError::MissingBody);
    }
    for field in REQUIRED_FIELDS {
        required_field(params, field)?;
    }

    let text = |name: &'static str| -> AppResult<String> {
        required_field(params, name)?
            .as_nonempty_string()
            .map_err(invalid_data)
    };
    let number = |name: &'static str| -> AppResult<i64> {
        required_field(params, name)?.as_int().map_err(invalid_data)
    };

    let new_book = NewBook {
        title: text("title")?,
        author: text("author")?,
        genre: text("genre")?,
        year: number("year")?,
        pages: number("pages")?,
        description: text("description")?,
    };

    let book = state.services.catalog.add_book(new_book).await;
    Ok(MethodResponse::created(book)?.with_message("Book added successfully"))
}

/// `borrow_book`: required `book_id`
pub async fn borrow_book(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    let id = book_id(params)?;
    let book = state.services.catalog.borrow_book(id).await?;
    let message = format!("Book '{}' borrowed successfully", book.title);
    Ok(MethodResponse::ok(book)?.with_message(message))
}

/// `return_book`: required `book_id`
pub async fn return_book(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    let id = book_id(params)?;
    let book = state.services.catalog.return_book(id).await?;
    let message = format!("Book '{}' returned successfully", book.title);
    Ok(MethodResponse::ok(book)?.with_message(message))
}

/// `rate_book`: required `book_id` and `rating`
pub async fn rate_book(state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    let (Some(id), Some(rating)) = (params.get("book_id"), params.get("rating")) else {
        return Err(AppError::MissingParam(
            "book_id and rating parameters are required".to_string(),
        ));
    };
    let (id, rating) = id
        .as_int()
        .and_then(|id| rating.as_float().map(|rating| (id, rating)))
        .map_err(|_| {
            AppError::InvalidFormat(
                "book_id must be a number and rating must be a float".to_string(),
            )
        })?;

    let book = state.services.catalog.rate_book(id, rating).await?;
    let message = format!("Rating updated for '{}': {:?}/5.0", book.title, rating);
    Ok(MethodResponse::ok(book)?.with_message(message))
}

/// `get_library_stats`: no parameters
pub async fn get_library_stats(
    state: &AppState,
    _params: &RequestParams,
) -> AppResult<MethodResponse> {
    let stats = state.services.stats.get_library_stats().await;
    MethodResponse::ok(stats)
}
