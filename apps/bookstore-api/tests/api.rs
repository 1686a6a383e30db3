use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bookstore_api::{build_router, ApiConfig, AppState};
use bookstore_core::{DiscountSchedule, DiscountTier};
use serde_json::{json, Value};
use tower::ServiceExt;

const DUNE: &str = "9780306406157";
const GRUFFALO: &str = "9781234567897";

fn app() -> Router {
    build_router(AppState::new(&ApiConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn dune() -> Value {
    json!({
        "isbn": "978-0-306-40615-7",
        "title": "Dune",
        "first_name": "Frank",
        "last_name": "Herbert",
        "price_cents": 1299,
        "currency": "EUR",
        "genre": "fiction",
        "published_at": "1965-08-01T00:00:00Z"
    })
}

fn gruffalo() -> Value {
    json!({
        "isbn": GRUFFALO,
        "title": "The Gruffalo",
        "first_name": "Julia",
        "last_name": "Donaldson",
        "price_cents": 650,
        "currency": "EUR",
        "genre": "children"
    })
}

#[tokio::test]
async fn create_then_get_book() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "isbn": DUNE,
            "title": "Dune",
            "author": "Frank Herbert",
            "price": "12.99 EUR",
            "genre": "fiction",
            "is_classic": true
        })
    );

    let (status, body) = send(&app, Method::GET, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Dune");
}

#[tokio::test]
async fn create_reports_first_validation_failure() {
    let app = app();

    let mut bad_isbn = dune();
    bad_isbn["isbn"] = json!("9780306406158");
    bad_isbn["title"] = json!("");
    let (status, body) = send(&app, Method::POST, "/books", Some(bad_isbn)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid ISBN-13 checksum");
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let mut bad_genre = dune();
    bad_genre["genre"] = json!("poetry");
    bad_genre["price_cents"] = json!(-1);
    let (status, body) = send(&app, Method::POST, "/books", Some(bad_genre)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown genre: poetry");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid request body");
}

#[tokio::test]
async fn missing_book_is_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "book not found");

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book() {
    let app = app();
    send(&app, Method::POST, "/books", Some(dune())).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_books_with_filters() {
    let app = app();
    send(&app, Method::POST, "/books", Some(dune())).await;
    send(&app, Method::POST, "/books", Some(gruffalo())).await;

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["books"][0]["isbn"], DUNE);

    let (_, body) = send(&app, Method::GET, "/books?genre=children", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["title"], "The Gruffalo");

    let (_, body) = send(&app, Method::GET, "/books?author=herbert&title=DUNE", None).await;
    assert_eq!(body["count"], 1);

    let (_, body) = send(&app, Method::GET, "/books?min_price=700", None).await;
    assert_eq!(body["books"][0]["title"], "Dune");

    let (status, body) = send(&app, Method::GET, "/books?genre=poetry", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown genre: poetry");
}

#[tokio::test]
async fn stats_and_top() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["average_price"], 0);

    send(&app, Method::POST, "/books", Some(dune())).await;
    send(&app, Method::POST, "/books", Some(gruffalo())).await;

    let (_, body) = send(&app, Method::GET, "/books/stats", None).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["average_price"], 974);
    assert_eq!(body["median_price"], 974);
    assert_eq!(body["min_price"], 650);
    assert_eq!(body["max_price"], 1299);
    assert_eq!(body["genre_breakdown"], json!({"fiction": 1, "children": 1}));

    let (_, body) = send(&app, Method::GET, "/books/top?limit=1", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn quote_uses_configured_tiers() {
    let config = ApiConfig {
        discount_schedule: DiscountSchedule::new(vec![DiscountTier::new(2, 50)]),
        ..ApiConfig::default()
    };
    let app = build_router(AppState::new(&config));
    send(&app, Method::POST, "/books", Some(gruffalo())).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/books/{GRUFFALO}/quote?quantity=3"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount_percent"], 50);
    assert_eq!(body["order_total"], "9.75 EUR");
    assert_eq!(body["unit_price"], "6.50 EUR");
    // published now: recent, not classic
    assert_eq!(body["classic_price"], "6.50 EUR");
    assert_eq!(body["new_release_price"], "7.15 EUR");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/books/{GRUFFALO}/quote?quantity=0"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "quantity must be positive");
}

#[tokio::test]
async fn inventory_lifecycle() {
    let app = app();
    send(&app, Method::POST, "/books", Some(dune())).await;
    let base = format!("/inventory/{DUNE}");

    let (status, body) = send(&app, Method::PUT, &base, Some(json!({"total": 10}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], 10);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{base}/reserve"),
        Some(json!({"quantity": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reserved"], 7);
    assert_eq!(body["available"], 3);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{base}/reserve"),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "insufficient stock: 3 available, 5 requested");
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("{base}/release"),
        Some(json!({"quantity": 8})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{base}/reserve"),
        Some(json!({"quantity": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "reservation quantity must be positive");

    let (_, body) = send(&app, Method::GET, "/inventory/low-stock", None).await;
    assert_eq!(body["threshold"], 5);
    assert_eq!(body["count"], 1);
    assert_eq!(body["total_value"], 12_990);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{base}/restock"),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["available"], 8);

    let (_, body) = send(&app, Method::GET, "/inventory/low-stock", None).await;
    assert_eq!(body["count"], 0);

    let (_, body) = send(&app, Method::GET, &base, None).await;
    assert_eq!(body["reserved"], 7);
}

#[tokio::test]
async fn inventory_requires_catalog_book_and_entry() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/inventory/{DUNE}"),
        Some(json!({"total": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "book not found");

    let (status, body) = send(&app, Method::GET, &format!("/inventory/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("book {DUNE} not found in inventory"));

    send(&app, Method::POST, "/books", Some(dune())).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/inventory/{DUNE}"),
        Some(json!({"total": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "total stock must not be negative");
}

#[tokio::test]
async fn book_routes_accept_hyphenated_isbn() {
    let app = app();
    send(&app, Method::POST, "/books", Some(dune())).await;
    let hyphenated = "978-0-306-40615-7";

    let (status, body) = send(&app, Method::GET, &format!("/books/{hyphenated}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isbn"], DUNE);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/books/{hyphenated}/quote?quantity=1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isbn"], DUNE);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/inventory/{hyphenated}"),
        Some(json!({"total": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/books/not-an-isbn", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "book not found");

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{hyphenated}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/books/{DUNE}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restock_overflow_leaves_entry_usable() {
    let app = app();
    send(&app, Method::POST, "/books", Some(dune())).await;
    let base = format!("/inventory/{DUNE}");

    let (status, _) = send(&app, Method::PUT, &base, Some(json!({"total": i64::MAX}))).await;
    assert_eq!(status, StatusCode::OK);
    send(&app, Method::POST, &format!("{base}/reserve"), Some(json!({"quantity": 2}))).await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("{base}/restock"),
            Some(json!({"quantity": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            format!("cannot restock 1: total stock {} would overflow", i64::MAX)
        );
    }

    let (status, body) = send(&app, Method::GET, &base, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], i64::MAX);
    assert_eq!(body["reserved"], 2);

    let (status, body) = send(&app, Method::GET, "/inventory/low-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    // 1299 * i64::MAX saturates
    assert_eq!(body["total_value"], i64::MAX);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{base}/release"),
        Some(json!({"quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], i64::MAX);
}

#[tokio::test]
async fn stats_at_maximum_price() {
    let app = app();
    let mut first = dune();
    first["price_cents"] = json!(i64::MAX);
    let mut second = gruffalo();
    second["price_cents"] = json!(i64::MAX);
    send(&app, Method::POST, "/books", Some(first)).await;
    send(&app, Method::POST, "/books", Some(second)).await;

    let (status, body) = send(&app, Method::GET, "/books/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["median_price"], i64::MAX);
    assert_eq!(body["average_price"], i64::MAX);
    assert_eq!(body["max_price"], i64::MAX);
}

#[tokio::test]
async fn quote_rejects_total_beyond_i64() {
    let app = app();
    let mut expensive = dune();
    expensive["price_cents"] = json!(1_000_000_000_000_000_i64);
    send(&app, Method::POST, "/books", Some(expensive)).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/books/{DUNE}/quote?quantity=100000"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "order total is out of range");

    // 10^15 * 200 * 80 / 100
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/books/{DUNE}/quote?quantity=200"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_total"], "1600000000000000.00 EUR");
}
