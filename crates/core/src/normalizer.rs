//! Raw record normalization
//!
//! Coerces whatever a backend hands back into the canonical [`Book`] shape.
//! Normalization never fails: missing or unreadable fields take defaults.

use crate::types::{Book, BookId, BookStatus, RawBook, Timestamp};

/// Normalizes a raw record, using the current time for missing timestamps
pub fn normalize(raw: RawBook) -> Book {
    normalize_at(raw, Timestamp::now())
}

/// Normalizes a raw record, using `now` for missing timestamps and ids
pub fn normalize_at(raw: RawBook, now: Timestamp) -> Book {
    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .map(BookId::new)
        .unwrap_or_else(|| BookId::new(now.as_millis().to_string()));

    let status = match raw.status.as_deref() {
        None | Some("") => BookStatus::default(),
        Some(s) => s.parse().unwrap_or_else(|e| {
            log::warn!("Record {}: {}, defaulting to watchlist", id, e);
            BookStatus::default()
        }),
    };

    let created_at = parse_or(raw.created_at.as_deref(), now);
    let updated_at = parse_or(raw.updated_at.as_deref(), now);

    Book {
        id,
        title: raw.title.unwrap_or_default(),
        author: raw.author.unwrap_or_default(),
        genre: raw.genre.unwrap_or_default(),
        status,
        summary: raw.summary.unwrap_or_default(),
        image: raw.image.unwrap_or_default(),
        user_id: raw.user_id,
        created_at,
        updated_at,
    }
}

/// Normalizes a batch of records with a single shared `now`
pub fn normalize_all(raws: Vec<RawBook>) -> Vec<Book> {
    let now = Timestamp::now();
    raws.into_iter().map(|raw| normalize_at(raw, now)).collect()
}

fn parse_or(value: Option<&str>, fallback: Timestamp) -> Timestamp {
    value.and_then(Timestamp::parse).unwrap_or(fallback)
}
