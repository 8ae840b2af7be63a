use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// BookEntity abstracts a catalog title together with its fungible copies; availability only
// moves by one copy at a time and always stays within 0..=total_copies.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: String,
    pub version: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub total_copies: i64,
    pub available_copies: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, total_copies: i64) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            total_copies,
            available_copies: total_copies,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // the availability a delta would produce, if it keeps 0 <= available <= total
    pub fn adjusted(&self, delta: i64) -> Option<i64> {
        let next = self.available_copies + delta;
        if next >= 0 && next <= self.total_copies {
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 3);
        assert_eq!("9780441172719", book.isbn.as_str());
        assert_eq!("Dune", book.title.as_str());
        assert_eq!(3, book.available_copies);
    }

    #[tokio::test]
    async fn test_should_bound_adjustments() {
        let mut book = BookEntity::new("9780441172719", "Dune", "Frank Herbert", 1);
        assert_eq!(None, book.adjusted(1));
        assert_eq!(Some(0), book.adjusted(-1));
        book.available_copies = 0;
        assert_eq!(None, book.adjusted(-1));
    }
}
