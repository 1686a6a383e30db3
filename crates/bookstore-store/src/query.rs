//! # Book Query Filters
//!
//! Small predicates composed with AND semantics. The API builds a list of
//! filters from query-string parameters and applies them to `find_all`.
//!
//! ```rust,ignore
//! let filters = vec![by_genre(Genre::Fiction), by_price_range(500, 2000)];
//! let matches = apply(repo.find_all()?, &filters);
//! ```

use bookstore_core::{Book, Genre};

/// A boxed book predicate.
pub type BookFilter = Box<dyn Fn(&Book) -> bool + Send + Sync>;

pub fn by_genre(genre: Genre) -> BookFilter {
    Box::new(move |book| book.genre() == genre)
}

/// Case-insensitive match on the author's last name.
pub fn by_author_last_name(last_name: &str) -> BookFilter {
    let wanted = last_name.trim().to_lowercase();
    Box::new(move |book| book.author().last_name().to_lowercase() == wanted)
}

/// Inclusive price bounds in minor units.
pub fn by_price_range(min: i64, max: i64) -> BookFilter {
    Box::new(move |book| (min..=max).contains(&book.price().amount()))
}

/// Case-insensitive substring match on the title.
pub fn by_title_contains(fragment: &str) -> BookFilter {
    let wanted = fragment.to_lowercase();
    Box::new(move |book| book.title().to_lowercase().contains(&wanted))
}

/// Keeps the books matching every filter. No filters keeps everything.
pub fn apply(books: Vec<Book>, filters: &[BookFilter]) -> Vec<Book> {
    books
        .into_iter()
        .filter(|book| filters.iter().all(|f| f(book)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
