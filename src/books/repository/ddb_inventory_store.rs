use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ConditionCheck, Put, ReturnValue, TransactWriteItem, Update};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::{check_delta, duplicate_isbn, out_of_bounds, InventoryStore};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::ddb::{get_item_consistent, is_conditional_update_failure, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, transact_write};

const ADJUST_EXPR: &str = "SET available_copies = available_copies + :delta, version = version + :one, updated_at = :updated_at";

// Besides book rows the table holds one `isbn#<isbn>` marker per book, written in the same
// transaction as the book, so an ISBN is claimed once across every writer.
#[derive(Debug)]
pub struct DDBInventoryStore {
    client: Client,
    table_name: String,
}

impl DDBInventoryStore {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    fn isbn_key(isbn: &str) -> String {
        format!("isbn#{}", isbn)
    }

    // the store enforces 0 <= available <= total itself
    fn availability_condition(delta: i64) -> &'static str {
        if delta < 0 {
            "attribute_exists(book_id) AND available_copies > :zero"
        } else {
            "attribute_exists(book_id) AND available_copies < total_copies"
        }
    }

    // the availability move as a transaction item, for callers that commit it with ledger writes
    pub(crate) fn availability_item(&self, book_id: &str, delta: i64) -> TransactWriteItem {
        let update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::S(book_id.to_string()))
            .update_expression(ADJUST_EXPR)
            .condition_expression(Self::availability_condition(delta))
            .expression_attribute_values(":delta", AttributeValue::N(delta.to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()));
        let update = if delta < 0 {
            update.expression_attribute_values(":zero", AttributeValue::N("0".to_string()))
        } else {
            update
        };
        TransactWriteItem::builder().update(update.build()).build()
    }

    // asserts every copy is on the shelf without writing the book
    pub(crate) fn full_shelf_item(&self, book_id: &str) -> TransactWriteItem {
        let check = ConditionCheck::builder()
            .table_name(self.table_name.as_str())
            .key("book_id", AttributeValue::S(book_id.to_string()))
            .condition_expression("attribute_exists(book_id) AND available_copies >= total_copies")
            .build();
        TransactWriteItem::builder().condition_check(check).build()
    }
}

#[async_trait]
impl InventoryStore for DDBInventoryStore {
    async fn create_book(&self, book: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(book)?;
        let marker = Put::builder()
            .table_name(table_name)
            .item("book_id", AttributeValue::S(Self::isbn_key(book.isbn.as_str())))
            .item("owner_id", AttributeValue::S(book.book_id.to_string()))
            .condition_expression("attribute_not_exists(book_id)")
            .build();
        let row = Put::builder()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .condition_expression("attribute_not_exists(book_id)")
            .build();
        let items = vec![
            TransactWriteItem::builder().put(marker).build(),
            TransactWriteItem::builder().put(row).build(),
        ];
        match transact_write(&self.client, items).await? {
            None => Ok(1),
            Some(0) => Err(duplicate_isbn()),
            Some(_) => Err(LibraryError::duplicate_key(format!("book {} already exists", book.book_id).as_str())),
        }
    }

    async fn get_book(&self, book_id: &str) -> LibraryResult<Option<BookEntity>> {
        let item = get_item_consistent(&self.client, self.table_name.as_str(), "book_id", book_id).await?;
        // isbn markers share the key space but carry no isbn attribute
        Ok(item.filter(|item| item.contains_key("isbn")).as_ref().map(BookEntity::from))
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let marker = get_item_consistent(
            &self.client, self.table_name.as_str(), "book_id", Self::isbn_key(isbn).as_str()).await?;
        match marker.and_then(|m| parse_string_attribute("owner_id", &m)) {
            Some(book_id) => self.get_book(book_id.as_str()).await,
            None => Ok(None),
        }
    }

    async fn adjust_availability(&self, book_id: &str, delta: i64) -> LibraryResult<BookEntity> {
        check_delta(delta)?;
        let table_name: &str = self.table_name.as_ref();
        let mut request = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(book_id.to_string()))
            .update_expression(ADJUST_EXPR)
            .condition_expression(Self::availability_condition(delta))
            .expression_attribute_values(":delta", AttributeValue::N(delta.to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .return_values(ReturnValue::AllNew);
        if delta < 0 {
            request = request.expression_attribute_values(":zero", AttributeValue::N("0".to_string()));
        }
        match request.send().await {
            Ok(out) => {
                out.attributes().map(BookEntity::from).ok_or_else(|| {
                    LibraryError::database(format!("no attributes returned for book {}", book_id).as_str(), None, false)
                })
            }
            Err(err) if is_conditional_update_failure(&err) => {
                match self.get_book(book_id).await? {
                    Some(book) => Err(out_of_bounds(&book, delta)),
                    None => Err(LibraryError::book_not_found(book_id)),
                }
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }
}

impl From<&HashMap<String, AttributeValue>> for BookEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        BookEntity {
            book_id: parse_string_attribute("book_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            isbn: parse_string_attribute("isbn", map).unwrap_or_else(|| String::from("")),
            title: parse_string_attribute("title", map).unwrap_or_else(|| String::from("")),
            author: parse_string_attribute("author", map).unwrap_or_else(|| String::from("")),
            total_copies: parse_number_attribute("total_copies", map),
            available_copies: parse_number_attribute("available_copies", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
