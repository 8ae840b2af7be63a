use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CatalogReceipt {
    pub book: BookDto,
}

impl Display for CatalogReceipt {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Book \"{}\" has been successfully added to the catalog.", self.book.title)
    }
}
