use crate::core::library::{LibraryError, LibraryResult};

pub const PATRON_ID_LEN: usize = 6;
pub const ISBN_LEN: usize = 13;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 100;

pub fn validate_patron_id(patron_id: &str) -> LibraryResult<()> {
    if patron_id.len() == PATRON_ID_LEN && patron_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LibraryError::invalid_patron_id())
    }
}

// returns the trimmed title
pub fn validate_title(title: &str) -> LibraryResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LibraryError::validation("Title is required.", Some("title".to_string())));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(LibraryError::validation(
            format!("Title must be at most {} characters.", MAX_TITLE_LEN).as_str(), Some("title".to_string())));
    }
    Ok(title.to_string())
}

// returns the trimmed author
pub fn validate_author(author: &str) -> LibraryResult<String> {
    let author = author.trim();
    if author.is_empty() {
        return Err(LibraryError::validation("Author is required.", Some("author".to_string())));
    }
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(LibraryError::validation(
            format!("Author must be at most {} characters.", MAX_AUTHOR_LEN).as_str(), Some("author".to_string())));
    }
    Ok(author.to_string())
}

pub fn validate_isbn(isbn: &str) -> LibraryResult<()> {
    if isbn.len() == ISBN_LEN && isbn.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LibraryError::validation("ISBN must be exactly 13 digits.", Some("isbn".to_string())))
    }
}

pub fn validate_total_copies(total_copies: i64) -> LibraryResult<()> {
    if total_copies > 0 {
        Ok(())
    } else {
        Err(LibraryError::validation("Total copies must be a positive integer.", Some("total_copies".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;
    use crate::utils::validation::{validate_author, validate_isbn, validate_patron_id, validate_title, validate_total_copies};

    #[tokio::test]
    async fn test_should_validate_patron_id() {
        assert!(validate_patron_id("123456").is_ok());
        for bad in ["", "12345", "1234567", "12a456", " 23456", "１２３４５６"] {
            assert!(matches!(validate_patron_id(bad), Err(LibraryError::InvalidPatronId { .. })), "{}", bad);
        }
    }

    #[tokio::test]
    async fn test_should_validate_title_and_author() {
        assert_eq!("Dune", validate_title("  Dune ").expect("valid title"));
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(200)).is_ok());
        let err = validate_title(&"A".repeat(201)).expect_err("title too long");
        assert!(err.to_string().to_lowercase().contains("title"));
        assert!(validate_author("").is_err());
        assert!(validate_author(&"B".repeat(101)).is_err());
        assert_eq!("Frank Herbert", validate_author("Frank Herbert").expect("valid author"));
    }

    #[tokio::test]
    async fn test_should_validate_isbn_and_copies() {
        assert!(validate_isbn("9780441172719").is_ok());
        assert!(validate_isbn("12345").is_err());
        assert!(validate_isbn("978044117271X").is_err());
        assert!(validate_total_copies(1).is_ok());
        assert!(validate_total_copies(0).is_err());
        assert!(validate_total_copies(-1).expect_err("negative").to_string().contains("positive"));
    }
}
