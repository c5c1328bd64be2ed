//! Single entry point routing requests by their `method` parameter

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, rejection::QueryRejection, Query, State},
};

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::method::{Method, UnknownMethod},
    AppState,
};

use super::{
    books::{self, MethodBody, MethodResponse},
    params::RequestParams,
};

/// Request body extraction result (aliased so `utoipa::path` does not inspect it)
type BodyResult = Result<Bytes, BytesRejection>;

/// Run a catalog method
///
/// `method` and the method arguments may be sent as query parameters or as
/// fields of a JSON object body (`POST`). A non-empty query value takes
/// precedence over the body.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("method" = Option<Method>, Query, description = "Operation to run"),
        ("book_id" = Option<i64>, Query, description = "Book ID (get_book_details, borrow_book, return_book, rate_book)"),
        ("rating" = Option<f64>, Query, description = "Rating from 1.0 to 5.0 (rate_book)"),
        ("query" = Option<String>, Query, description = "Search text (search_books)"),
        ("genre" = Option<String>, Query, description = "Genre filter (list_books)"),
        ("available_only" = Option<bool>, Query, description = "Only available books (list_books)")
    ),
    responses(
        (status = 200, description = "Method succeeded", body = MethodBody),
        (status = 201, description = "Book created", body = MethodBody),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn dispatch(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: BodyResult,
) -> AppResult<MethodResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let body = body.unwrap_or_default();
    let params = RequestParams::new(query, &body);

    let method = resolve_method(&params)?;
    tracing::debug!(%method, "Dispatching books request");
    run(method, &state, &params).await
}

/// Resolve `method` from the query string or the body
pub fn resolve_method(params: &RequestParams) -> AppResult<Method> {
    let value = params.get("method").ok_or(AppError::MissingMethod)?;
    let name = value
        .as_nonempty_string()
        .map_err(|_| AppError::UnknownMethod(value.to_string()))?;
    name.parse::<Method>()
        .map_err(|UnknownMethod(name)| AppError::UnknownMethod(name))
}

async fn run(method: Method, state: &AppState, params: &RequestParams) -> AppResult<MethodResponse> {
    match method {
        Method::ListBooks => books::list_books(state, params).await,
        Method::SearchBooks => books::search_books(state, params).await,
        Method::GetBookDetails => books::get_book_details(state, params).await,
        Method::AddBook => books::add_book(state, params).await,
        Method::BorrowBook => books::borrow_book(state, params).await,
        Method::ReturnBook => books::return_book(state, params).await,
        Method::RateBook => books::rate_book(state, params).await,
        Method::GetLibraryStats => books::get_library_stats(state, params).await,
    }
}
