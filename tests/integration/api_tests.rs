//! API integration tests

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use bookshelf_server::{
    api,
    config::AppConfig,
    repository::{BookStore, Repository},
    services::{FixedClock, Services},
    AppState,
};

/// Start a server on an ephemeral port and return its API base URL
async fn spawn_app(store: BookStore) -> String {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let services = Services::new(Repository::new(store), Arc::new(FixedClock(today)));
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}/api/v1", addr)
}

fn client() -> Client {
    Client::builder().no_proxy().build().expect("Failed to build client")
}

async fn call(client: &Client, base: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}/books", base))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

async fn call_query(client: &Client, base: &str, query: &[(&str, &str)]) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}/books", base))
        .query(query)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");

    let response = client
        .get(format!("{}/ready", base))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"], 5);
    assert_eq!(body["seeded"], true);
}

#[tokio::test]
async fn test_missing_method_lists_methods() {
    let base = spawn_app(BookStore::seeded()).await;
    let (status, body) = call_query(&client(), &base, &[]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Method parameter is required");
    let methods = body["available_methods"].as_array().expect("methods listed");
    assert_eq!(methods.len(), 8);
    assert_eq!(methods[0], "list_books");
    assert_eq!(methods[7], "get_library_stats");
}

#[tokio::test]
async fn test_unknown_method() {
    let base = spawn_app(BookStore::seeded()).await;
    let (status, body) = call_query(&client(), &base, &[("method", "frobnicate")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown method: frobnicate");
}

#[tokio::test]
async fn test_list_books_filters() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call_query(&client, &base, &[("method", "list_books")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 5);
    assert_eq!(body["data"][0]["id"], 1);

    let (_, body) = call_query(
        &client,
        &base,
        &[("method", "list_books"), ("genre", "FANTASÍA")],
    )
    .await;
    assert_eq!(body["count"], 2);

    let (_, body) = call(
        &client,
        &base,
        json!({"method": "list_books", "available_only": true}),
    )
    .await;
    assert_eq!(body["count"], 4);

    let (_, body) = call_query(
        &client,
        &base,
        &[("method", "list_books"), ("genre", "Novela"), ("available_only", "true")],
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Don Quijote de la Mancha");
}

#[tokio::test]
async fn test_search_books() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "search_books", "query": "TOLKIEN"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["query"], "TOLKIEN");
    assert_eq!(body["data"][0]["title"], "El Señor de los Anillos");

    let (status, body) = call(&client, &base, json!({"method": "search_books"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter is required");
}

#[tokio::test]
async fn test_get_book_details() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call_query(
        &client,
        &base,
        &[("method", "get_book_details"), ("book_id", "3")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["data"]["added_date"], "2024-01-10");

    let (status, body) = call(&client, &base, json!({"method": "get_book_details"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "book_id parameter is required");

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "get_book_details", "book_id": "abc"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "book_id must be a number");

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "get_book_details", "book_id": 99}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book with ID 99 not found");

    // Zero is a value, not an absent parameter
    let (status, body) = call(
        &client,
        &base,
        json!({"method": "get_book_details", "book_id": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book with ID 0 not found");
}

#[tokio::test]
async fn test_query_parameter_wins_over_body() {
    let base = spawn_app(BookStore::seeded()).await;
    let response = client()
        .post(format!("{}/books?method=get_book_details&book_id=2", base))
        .json(&json!({"method": "get_library_stats", "book_id": 3}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], 2);
}

#[tokio::test]
async fn test_malformed_body_is_ignored() {
    let base = spawn_app(BookStore::seeded()).await;
    let response = client()
        .post(format!("{}/books?method=list_books", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["count"], 5);
}

#[tokio::test]
async fn test_add_book_then_fetch() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call(
        &client,
        &base,
        json!({
            "method": "add_book",
            "title": "Rayuela",
            "author": "Julio Cortázar",
            "genre": "Novela",
            "year": "1963",
            "pages": 600,
            "description": "Una antinovela que puede leerse en varios órdenes."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book added successfully");
    let added = body["data"].clone();
    assert_eq!(added["id"], 6);
    assert_eq!(added["year"], 1963);
    assert_eq!(added["rating"], 0.0);
    assert_eq!(added["available"], true);
    assert_eq!(added["added_date"], "2024-06-01");

    let (_, body) = call(
        &client,
        &base,
        json!({"method": "get_book_details", "book_id": 6}),
    )
    .await;
    assert_eq!(body["data"], added);

    let (_, body) = call(&client, &base, json!({"method": "get_library_stats"})).await;
    assert_eq!(body["data"]["total_books"], 6);
    assert_eq!(body["data"]["genres"]["Novela"], 2);
}

#[tokio::test]
async fn test_add_book_validation() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call_query(&client, &base, &[("method", "add_book")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body is required");

    let (status, body) = call(
        &client,
        &base,
        json!({
            "method": "add_book",
            "title": "Ficciones",
            "author": "Jorge Luis Borges",
            "genre": "Cuento",
            "year": 1944,
            "description": "Cuentos sobre laberintos y bibliotecas."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: pages");

    // Presence is checked before any coercion
    let (_, body) = call(
        &client,
        &base,
        json!({
            "method": "add_book",
            "title": "Ficciones",
            "author": "Jorge Luis Borges",
            "genre": "Cuento",
            "year": "mil",
            "pages": 200
        }),
    )
    .await;
    assert_eq!(body["error"], "Missing required field: description");

    let (status, body) = call(
        &client,
        &base,
        json!({
            "method": "add_book",
            "title": "Ficciones",
            "author": "Jorge Luis Borges",
            "genre": "Cuento",
            "year": "mil",
            "pages": 200,
            "description": "Cuentos sobre laberintos y bibliotecas."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid data format"));

    let (_, body) = call(&client, &base, json!({"method": "get_library_stats"})).await;
    assert_eq!(body["data"]["total_books"], 5);
}

#[tokio::test]
async fn test_borrow_and_return_cycle() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call(&client, &base, json!({"method": "borrow_book", "book_id": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["message"], "Book 'El Señor de los Anillos' borrowed successfully");

    let (status, body) = call(&client, &base, json!({"method": "borrow_book", "book_id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 'El Señor de los Anillos' is already borrowed");

    let (status, body) = call(&client, &base, json!({"method": "return_book", "book_id": "1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], true);
    assert_eq!(body["message"], "Book 'El Señor de los Anillos' returned successfully");

    let (status, body) = call(&client, &base, json!({"method": "return_book", "book_id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book 'El Señor de los Anillos' is already available");

    let (status, _) = call(&client, &base, json!({"method": "borrow_book", "book_id": 42})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_book() {
    let base = spawn_app(BookStore::seeded()).await;
    let client = client();

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "rate_book", "book_id": 2, "rating": 0.5}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Rating must be between 1.0 and 5.0");

    let (_, body) = call(
        &client,
        &base,
        json!({"method": "rate_book", "book_id": 2, "rating": 0}),
    )
    .await;
    assert_eq!(body["error"], "Rating must be between 1.0 and 5.0");

    let (status, body) = call_query(
        &client,
        &base,
        &[("method", "rate_book"), ("book_id", "2"), ("rating", "5")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 5.0);
    assert_eq!(body["message"], "Rating updated for '1984': 5.0/5.0");

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "rate_book", "book_id": 2, "rating": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 1.0);

    let (status, body) = call(&client, &base, json!({"method": "rate_book", "book_id": 2})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "book_id and rating parameters are required");

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "rate_book", "book_id": 2, "rating": "great"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "book_id must be a number and rating must be a float");

    let (status, body) = call(
        &client,
        &base,
        json!({"method": "rate_book", "book_id": 99, "rating": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book with ID 99 not found");
}

#[tokio::test]
async fn test_library_stats() {
    let base = spawn_app(BookStore::seeded()).await;
    let (status, body) = call(&client(), &base, json!({"method": "get_library_stats"})).await;

    assert_eq!(status, StatusCode::OK);
    let stats = &body["data"];
    assert_eq!(stats["total_books"], 5);
    assert_eq!(stats["available_books"], 4);
    assert_eq!(stats["borrowed_books"], 1);
    assert_eq!(stats["average_rating"], 4.6);
    let genre_total: u64 = stats["genres"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(genre_total, 5);
}

#[tokio::test]
async fn test_empty_catalog_stats() {
    let base = spawn_app(BookStore::empty()).await;
    let (_, body) = call(&client(), &base, json!({"method": "get_library_stats"})).await;

    assert_eq!(body["data"]["total_books"], 0);
    assert_eq!(body["data"]["average_rating"], 0.0);
}
