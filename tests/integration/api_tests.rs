//! API integration tests
//!
//! These run against a live server: start one locally, then
//! `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api";

/// Create a book and return the response body's `data`
async fn create_book(client: &Client, title: &str, copies: i64) -> Value {
    let isbn = Uuid::new_v4().to_string();
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "genre": "FICTION",
            "isbn": isbn,
            "copies": copies
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    body["data"].clone()
}

async fn get_book(client: &Client, id: &str) -> Value {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send get request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}

async fn borrow(client: &Client, book_id: &str, quantity: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({
            "book": book_id,
            "quantity": quantity,
            "dueDate": "2026-12-31T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send borrow request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_book_sets_availability() {
    let client = Client::new();

    let with_stock = create_book(&client, "Availability Probe A", 4).await;
    assert_eq!(with_stock["copies"], 4);
    assert_eq!(with_stock["available"], true);

    let out_of_stock = create_book(&client, "Availability Probe B", 0).await;
    assert_eq!(out_of_stock["copies"], 0);
    assert_eq!(out_of_stock["available"], false);
}

#[tokio::test]
#[ignore]
async fn test_create_book_validation_errors() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "ab",
            "author": "x",
            "genre": "FICTION",
            "isbn": Uuid::new_v4().to_string(),
            "copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"]["errors"]["title"].is_object());
    assert!(body["error"]["errors"]["author"].is_object());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let client = Client::new();
    let isbn = Uuid::new_v4().to_string();

    let payload = json!({
        "title": "Duplicate Probe",
        "author": "Test Author",
        "genre": "HISTORY",
        "isbn": isbn,
        "copies": 1
    });

    let first = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 400);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["error"]["errors"]["isbn"].is_object());
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_returns_null_data() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/{}", BASE_URL, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_update_recomputes_availability() {
    let client = Client::new();
    let book = create_book(&client, "Update Probe", 3).await;
    let id = book["id"].as_str().unwrap();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "copies": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["copies"], 0);
    assert_eq!(body["data"]["available"], false);

    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "copies": 2 }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_delete_is_idempotent() {
    let client = Client::new();
    let book = create_book(&client, "Delete Probe", 1).await;
    let id = book["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = client
            .delete(format!("{}/books/{}", BASE_URL, id))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], true);
        assert!(body["data"].is_null());
    }
}

#[tokio::test]
#[ignore]
async fn test_list_books_pagination() {
    let client = Client::new();

    // Scope this test's books with a unique title marker so totals are
    // unaffected by whatever else is in the database.
    let marker = format!("pagination-{}", Uuid::new_v4());
    for i in 0..25 {
        create_book(&client, &format!("{} #{}", marker, i), 1).await;
    }

    let response = client
        .get(format!(
            "{}/books?search={}&page=3&limit=10",
            BASE_URL, marker
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["page"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
#[ignore]
async fn test_borrow_decrements_copies() {
    let client = Client::new();
    let book = create_book(&client, "Borrow Probe", 5).await;
    let id = book["id"].as_str().unwrap();

    let response = borrow(&client, id, 2).await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["quantity"], 2);
    assert_eq!(body["data"]["book"], *id);

    let after = get_book(&client, id).await;
    assert_eq!(after["copies"], 3);
    assert_eq!(after["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_borrow_insufficient_copies() {
    let client = Client::new();
    let book = create_book(&client, "Insufficient Probe", 1).await;
    let id = book["id"].as_str().unwrap();

    let response = borrow(&client, id, 2).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not enough copies available");

    // Inventory untouched
    let after = get_book(&client, id).await;
    assert_eq!(after["copies"], 1);
}

#[tokio::test]
#[ignore]
async fn test_borrow_missing_book() {
    let client = Client::new();

    let response = borrow(&client, &Uuid::new_v4().to_string(), 1).await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrow_of_last_copy() {
    let client = Client::new();
    let book = create_book(&client, "Race Probe", 1).await;
    let id = book["id"].as_str().unwrap();

    let (first, second) = tokio::join!(borrow(&client, id, 1), borrow(&client, id, 1));

    let successes = [first.status(), second.status()]
        .iter()
        .filter(|s| s.as_u16() == 201)
        .count();
    assert_eq!(successes, 1, "exactly one of two concurrent borrows may win");

    let after = get_book(&client, id).await;
    assert_eq!(after["copies"], 0);
    assert_eq!(after["available"], false);
}

#[tokio::test]
#[ignore]
async fn test_borrow_summary_aggregates_per_book() {
    let client = Client::new();
    let book = create_book(&client, "Summary Probe", 10).await;
    let id = book["id"].as_str().unwrap();
    let isbn = book["isbn"].as_str().unwrap();

    assert_eq!(borrow(&client, id, 2).await.status(), 201);
    assert_eq!(borrow(&client, id, 3).await.status(), 201);

    let response = client
        .get(format!("{}/borrow", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let entry = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["book"]["isbn"] == *isbn)
        .expect("Summary entry for borrowed book");
    assert_eq!(entry["totalQuantity"], 5);
}

#[tokio::test]
#[ignore]
async fn test_borrow_list_joins_book_details() {
    let client = Client::new();
    let book = create_book(&client, "List Probe", 4).await;
    let id = book["id"].as_str().unwrap();
    assert_eq!(borrow(&client, id, 1).await.status(), 201);

    let response = client
        .get(format!("{}/borrow/list?page=1&limit=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["data"].is_array());
    assert!(body["pagination"]["total"].is_number());

    for record in body["data"].as_array().unwrap() {
        assert!(record["quantity"].is_number());
        // book is an object with title/isbn/copies, or null if the
        // catalog entry was deleted since
        if record["book"].is_object() {
            assert!(record["book"]["title"].is_string());
            assert!(record["book"]["isbn"].is_string());
            assert!(record["book"]["copies"].is_number());
        }
    }
}
