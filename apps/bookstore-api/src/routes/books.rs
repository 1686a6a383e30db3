//! # Book Routes
//!
//! Catalog CRUD plus the read-only pricing and statistics views.
//!
//! ## Creation Chain
//! ```text
//! POST /books
//!      │
//!      ▼
//! Isbn::parse ──► Author::new ──► Money::new ──► Book::with_genre_tag
//!      │               │               │                │
//!      └───────────────┴───────────────┴────────────────┴──► first failure → 400
//!                                                       │
//!                                                       ▼
//!                                            repo.save ──► 201 BookResponse
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookstore_core::pricing::{classic_surcharge_at, new_release_premium_at};
use bookstore_core::validation::validate_positive_quantity;
use bookstore_core::{stats, Author, Book, Genre, Isbn, Money, ValidationError};
use bookstore_store::query::{self, BookFilter};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::dto::{
    BookResponse, CreateBookRequest, ListQuery, ListResponse, QuoteQuery, QuoteResponse,
    StatsResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Lists books, optionally filtered. Sorted by ISBN.
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<ListResponse>> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let filters = filters_for(&query)?;

    let mut books = query::apply(state.repo.find_all()?, &filters);
    books.sort_by(|a, b| a.isbn().cmp(b.isbn()));

    Ok(Json(ListResponse::new(&books)))
}

fn filters_for(query: &ListQuery) -> ApiResult<Vec<BookFilter>> {
    let mut filters = Vec::new();

    if let Some(genre) = &query.genre {
        filters.push(query::by_genre(genre.parse::<Genre>()?));
    }
    if let Some(last_name) = &query.author {
        filters.push(query::by_author_last_name(last_name));
    }
    if let Some(fragment) = &query.title {
        filters.push(query::by_title_contains(fragment));
    }
    if query.min_price.is_some() || query.max_price.is_some() {
        filters.push(query::by_price_range(
            query.min_price.unwrap_or(i64::MIN),
            query.max_price.unwrap_or(i64::MAX),
        ));
    }

    Ok(filters)
}

/// Looks a book up by ISBN, hyphenated or not.
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookResponse>> {
    let isbn = catalog_isbn(&isbn)?;
    let book = state.repo.find_by_isbn(isbn.as_str())?;
    Ok(Json(BookResponse::from(&book)))
}

/// Canonical form of a path ISBN. Anything unparseable cannot be in the
/// catalog, so it is reported as a missing book.
fn catalog_isbn(raw: &str) -> ApiResult<Isbn> {
    Isbn::parse(raw).map_err(|_| ApiError::not_found("book not found"))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let Json(request) = payload.map_err(|_| ApiError::invalid_body())?;
    let book = build_book(request)?;

    state.repo.save(book.clone())?;
    info!(isbn = %book.isbn(), title = %book.title(), "Book created");

    Ok((StatusCode::CREATED, Json(BookResponse::from(&book))))
}

fn build_book(request: CreateBookRequest) -> Result<Book, ValidationError> {
    let isbn = Isbn::parse(&request.isbn)?;
    let author = Author::new(&request.first_name, &request.last_name)?;
    let price = Money::new(request.price_cents, request.currency)?;
    let published_at = request.published_at.unwrap_or_else(Utc::now);

    Book::with_genre_tag(isbn, request.title, author, price, published_at, &request.genre)
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<StatusCode> {
    let isbn = catalog_isbn(&isbn)?;
    state.repo.delete(isbn.as_str())?;
    info!(isbn = %isbn, "Book deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Price statistics over the whole catalog.
pub async fn book_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let books = state.repo.find_all()?;
    let (min_price, max_price) = stats::price_range(&books);

    Ok(Json(StatsResponse {
        count: books.len(),
        average_price: stats::average_price(&books),
        median_price: stats::median_price(&books),
        min_price,
        max_price,
        genre_breakdown: stats::genre_breakdown(&books),
    }))
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

fn default_top_limit() -> i64 {
    5
}

/// The most expensive books, highest price first.
pub async fn top_books(
    State(state): State<AppState>,
    query: Result<Query<TopQuery>, QueryRejection>,
) -> ApiResult<Json<ListResponse>> {
    let Query(TopQuery { limit }) = query.map_err(|e| ApiError::validation(e.body_text()))?;

    let mut books = state.repo.find_all()?;
    // ties keep ISBN order
    books.sort_by(|a, b| a.isbn().cmp(b.isbn()));

    Ok(Json(ListResponse::new(stats::most_expensive(&books, limit))))
}

/// Order quote for `quantity` copies under the configured discount tiers.
pub async fn quote(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> ApiResult<Json<QuoteResponse>> {
    let Query(QuoteQuery { quantity }) =
        query.map_err(|e| ApiError::validation(e.body_text()))?;
    validate_positive_quantity("quantity", quantity)?;

    let isbn = catalog_isbn(&isbn)?;
    let book = state.repo.find_by_isbn(isbn.as_str())?;
    let now = Utc::now();

    // saturated totals would be wrong prices, so refuse them
    let order_total = state
        .pricing
        .checked_order_total(&book, quantity)
        .ok_or_else(|| out_of_range("order total"))?;

    Ok(Json(QuoteResponse {
        isbn: book.isbn().to_string(),
        quantity,
        unit_price: book.price().display(),
        discount_percent: state.pricing.bulk_discount(quantity),
        order_total: order_total.display(),
        classic_price: classic_surcharge_at(&book, now).display(),
        new_release_price: new_release_premium_at(&book, now).display(),
    }))
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
    }
}
