mod support;

use axum::http::StatusCode;
use serde_json::json;

use configs::LoginFailureStatus;

use support::*;

fn dune(author_id: i64) -> serde_json::Value {
    json!({"title": "Dune", "year": 1965, "isbn": "978-0441013593", "price": 9.99, "author_id": author_id})
}

#[tokio::test]
async fn home_values_need_a_token() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    assert_eq!(send(&app, get("/api/home", None)).await.0, StatusCode::UNAUTHORIZED);

    let token = login(&app, "alice", "correct").await;
    let (status, body) = send(&app, get("/api/home", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["value1", "value2"]));
    let (status, body) = send(&app, get("/api/home/7", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("value"));
}

#[tokio::test]
async fn administrator_manages_catalog() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;

    let (status, author) = send(&app, json_request("POST", "/api/authors", &json!({"firstname": "Frank", "lastname": "Herbert"}), Some(&admin))).await;
    assert_eq!(status, StatusCode::CREATED);
    let author_id = author["id"].as_i64().unwrap();

    let (status, book) = send(&app, json_request("POST", "/api/books", &dune(author_id), Some(&admin))).await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_i64().unwrap();

    let (status, books) = send(&app, get(&format!("/api/authors/{}/books", author_id), Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books.as_array().unwrap().len(), 1);

    let renamed = json!({"firstname": "Franklin", "lastname": "Herbert", "bio": "Dune"});
    let (status, body) = send(&app, json_request("PUT", &format!("/api/authors/{}", author_id), &renamed, Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstname"], "Franklin");

    let (status, _) = send(&app, json_request("DELETE", &format!("/api/authors/{}", author_id), &json!(null), Some(&admin))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, get(&format!("/api/authors/{}", author_id), Some(&admin))).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get(&format!("/api/books/{}", book_id), Some(&admin))).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customers_read_but_cannot_write() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;
    let alice = login(&app, "alice", "correct").await;

    let (_, author) = send(&app, json_request("POST", "/api/authors", &json!({"firstname": "Frank", "lastname": "Herbert"}), Some(&admin))).await;
    let author_id = author["id"].as_i64().unwrap();

    let (status, list) = send(&app, get("/api/authors", Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, json_request("POST", "/api/authors", &json!({"firstname": "Ursula", "lastname": "Le Guin"}), Some(&alice))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
    assert_eq!(send(&app, json_request("POST", "/api/books", &dune(author_id), Some(&alice))).await.0, StatusCode::FORBIDDEN);
    assert_eq!(
        send(&app, json_request("DELETE", &format!("/api/authors/{}", author_id), &json!(null), Some(&alice))).await.0,
        StatusCode::FORBIDDEN
    );
    assert_eq!(send(&app, get(&format!("/api/authors/{}", author_id), Some(&alice))).await.0, StatusCode::OK);
}

#[tokio::test]
async fn book_for_missing_author_is_400() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;
    let (status, body) = send(&app, json_request("POST", "/api/books", &dune(404), Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn missing_resources_are_404() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;
    assert_eq!(send(&app, get("/api/authors/99", Some(&admin))).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/api/authors/99/books", Some(&admin))).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/api/books/99", Some(&admin))).await.0, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, json_request("DELETE", "/api/books/99", &json!(null), Some(&admin))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_honours_pagination() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;
    for i in 0..3 {
        let body = json!({"firstname": format!("Author{}", i), "lastname": "X"});
        send(&app, json_request("POST", "/api/authors", &body, Some(&admin))).await;
    }
    let (status, page) = send(&app, get("/api/authors?page=2&per_page=2", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["firstname"], "Author2");
}

#[tokio::test]
async fn malformed_input_gets_json_400() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;

    let (status, body) = send(&app, json_request("POST", "/api/authors", &json!({"firstname": "Frank"}), Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request");
    assert!(body["detail"].as_str().unwrap().contains("lastname"));

    let (status, body) = send(&app, get("/api/books/abc", Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request");

    let (status, body) = send(&app, get("/api/authors?page=first", Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request");

    let (status, body) = send(&app, json_request("PUT", "/api/books/xyz", &dune(1), Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad request");
}

#[tokio::test]
async fn over_long_fields_are_400() {
    let (app, _) = app(LoginFailureStatus::Unauthorized).await;
    let admin = login(&app, "admin", "P@ssword1").await;
    let (_, author) = send(&app, json_request("POST", "/api/authors", &json!({"firstname": "Frank", "lastname": "Herbert"}), Some(&admin))).await;

    let mut book = dune(author["id"].as_i64().unwrap());
    book["title"] = json!("t".repeat(300));
    let (status, body) = send(&app, json_request("POST", "/api/books", &book, Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("title"));

    let long_name = json!({"firstname": "f".repeat(129), "lastname": "Herbert"});
    assert_eq!(send(&app, json_request("POST", "/api/authors", &long_name, Some(&admin))).await.0, StatusCode::BAD_REQUEST);
}
