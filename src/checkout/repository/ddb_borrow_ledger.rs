use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem, Update};
use chrono::{NaiveDateTime, Utc};

use crate::checkout::domain::model::BorrowRecordEntity;
use crate::checkout::repository::BorrowLedger;
use crate::core::library::{BorrowStatus, LibraryError, LibraryResult};
use crate::utils::ddb::{get_item_consistent, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, transact_write};

// Borrow records live in one table keyed by borrow_id with a (patron_id, borrow_at) index, so a
// patron's history comes back in borrow order. Two kinds of bookkeeping items share the table and
// stay out of the index: `patron#<id>` counts the patron's open loans and `open#<id>#<book>`
// points at the open record of that pair. Both change only in the transaction that opens or
// closes a record, and both are read strongly consistent.
#[derive(Debug, Clone)]
pub struct DDBBorrowLedger {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBorrowLedger {
    pub fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    fn counter_key(patron_id: &str) -> String {
        format!("patron#{}", patron_id)
    }

    fn marker_key(patron_id: &str, book_id: &str) -> String {
        format!("open#{}#{}", patron_id, book_id)
    }

    // bumps the open-loan counter, refusing to pass max_open when one is given
    pub(crate) fn count_loan_item(&self, patron_id: &str, max_open: Option<usize>) -> TransactWriteItem {
        let update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("borrow_id", AttributeValue::S(Self::counter_key(patron_id)))
            .update_expression("SET open_loans = if_not_exists(open_loans, :zero) + :one")
            .expression_attribute_values(":zero", AttributeValue::N("0".to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()));
        let update = match max_open {
            Some(max) => update
                .condition_expression("attribute_not_exists(open_loans) OR open_loans < :max")
                .expression_attribute_values(":max", AttributeValue::N(max.to_string())),
            None => update,
        };
        TransactWriteItem::builder().update(update.build()).build()
    }

    pub(crate) fn release_loan_item(&self, patron_id: &str) -> TransactWriteItem {
        let update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("borrow_id", AttributeValue::S(Self::counter_key(patron_id)))
            .update_expression("SET open_loans = open_loans - :one")
            .condition_expression("open_loans > :zero")
            .expression_attribute_values(":zero", AttributeValue::N("0".to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .build();
        TransactWriteItem::builder().update(update).build()
    }

    // claims the (patron, book) pair for record
    pub(crate) fn mark_open_item(&self, record: &BorrowRecordEntity) -> TransactWriteItem {
        let put = Put::builder()
            .table_name(self.table_name.as_str())
            .item("borrow_id", AttributeValue::S(Self::marker_key(record.patron_id.as_str(), record.book_id.as_str())))
            .item("owner_id", AttributeValue::S(record.borrow_id.to_string()))
            .condition_expression("attribute_not_exists(borrow_id)")
            .build();
        TransactWriteItem::builder().put(put).build()
    }

    pub(crate) fn unmark_open_item(&self, record: &BorrowRecordEntity) -> TransactWriteItem {
        let delete = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("borrow_id", AttributeValue::S(Self::marker_key(record.patron_id.as_str(), record.book_id.as_str())))
            .condition_expression("owner_id = :owner_id")
            .expression_attribute_values(":owner_id", AttributeValue::S(record.borrow_id.to_string()))
            .build();
        TransactWriteItem::builder().delete(delete).build()
    }

    pub(crate) fn put_record_item(&self, record: &BorrowRecordEntity) -> LibraryResult<TransactWriteItem> {
        let val = serde_json::to_value(record)?;
        let put = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(val)?))
            .condition_expression("attribute_not_exists(borrow_id)")
            .build();
        Ok(TransactWriteItem::builder().put(put).build())
    }

    // writes the closed state of record, only while the stored record is still open
    pub(crate) fn close_record_item(&self, record: &BorrowRecordEntity, returned_at: NaiveDateTime) -> TransactWriteItem {
        let update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("borrow_id", AttributeValue::S(record.borrow_id.to_string()))
            .update_expression("SET borrow_status = :returned, version = version + :one, updated_at = :updated_at, returned_at = :returned_at")
            .condition_expression("borrow_status = :open")
            .expression_attribute_values(":open", AttributeValue::S(BorrowStatus::Open.to_string()))
            .expression_attribute_values(":returned", AttributeValue::S(BorrowStatus::Returned.to_string()))
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .expression_attribute_values(":returned_at", string_date(returned_at))
            .build();
        TransactWriteItem::builder().update(update).build()
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    async fn get(&self, borrow_id: &str) -> LibraryResult<Option<BorrowRecordEntity>> {
        let item = get_item_consistent(&self.client, self.table_name.as_str(), "borrow_id", borrow_id).await?;
        Ok(item.filter(|item| item.contains_key("patron_id")).as_ref().map(BorrowRecordEntity::from))
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .key_condition_expression("patron_id = :patron_id")
                .expression_attribute_values(":patron_id", AttributeValue::S(patron_id.to_string()))
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(BorrowRecordEntity::from));
            }
            match out.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        records.sort_by(|a, b| a.borrow_at.cmp(&b.borrow_at));
        Ok(records)
    }
}

#[async_trait]
impl BorrowLedger for DDBBorrowLedger {
    async fn insert_borrow(&self, patron_id: &str, book_id: &str,
                           borrow_at: NaiveDateTime, due_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity> {
        let record = BorrowRecordEntity::new(patron_id, book_id, borrow_at, due_at);
        let items = vec![
            self.mark_open_item(&record),
            self.put_record_item(&record)?,
            self.count_loan_item(patron_id, None),
        ];
        match transact_write(&self.client, items).await? {
            None => Ok(record),
            Some(0) => Err(LibraryError::duplicate_key(
                format!("patron {} already has an open borrow of book {}", patron_id, book_id).as_str())),
            Some(_) => Err(LibraryError::duplicate_key(format!("borrow record {} already exists", record.borrow_id).as_str())),
        }
    }

    async fn close_borrow(&self, patron_id: &str, book_id: &str,
                          returned_at: NaiveDateTime) -> LibraryResult<BorrowRecordEntity> {
        let mut record = self.find_open(patron_id, book_id).await?
            .ok_or_else(LibraryError::no_active_borrow_record)?;
        let items = vec![
            self.close_record_item(&record, returned_at),
            self.unmark_open_item(&record),
            self.release_loan_item(patron_id),
        ];
        match transact_write(&self.client, items).await? {
            None => {
                record.close(returned_at);
                Ok(record)
            }
            // a concurrent return closed it first
            Some(_) => Err(LibraryError::no_active_borrow_record()),
        }
    }

    async fn count_open(&self, patron_id: &str) -> LibraryResult<usize> {
        let counter = get_item_consistent(
            &self.client, self.table_name.as_str(), "borrow_id", Self::counter_key(patron_id).as_str()).await?;
        Ok(counter.map(|c| parse_number_attribute("open_loans", &c).max(0) as usize).unwrap_or(0))
    }

    async fn list_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>> {
        self.query_patron(patron_id).await
    }

    async fn find_open(&self, patron_id: &str, book_id: &str) -> LibraryResult<Option<BorrowRecordEntity>> {
        let marker = get_item_consistent(
            &self.client, self.table_name.as_str(), "borrow_id", Self::marker_key(patron_id, book_id).as_str()).await?;
        let borrow_id = match marker.and_then(|m| parse_string_attribute("owner_id", &m)) {
            Some(borrow_id) => borrow_id,
            None => return Ok(None),
        };
        match self.get(borrow_id.as_str()).await? {
            Some(record) if record.is_open() => Ok(Some(record)),
            _ => {
                tracing::error!(patron_id, book_id, borrow_id = borrow_id.as_str(), "open-loan marker without an open record");
                Err(LibraryError::store_inconsistency(
                    format!("open-loan marker of patron {} and book {} points at no open record", patron_id, book_id).as_str()))
            }
        }
    }
}

impl From<&HashMap<String, AttributeValue>> for BorrowRecordEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        BorrowRecordEntity {
            borrow_id: parse_string_attribute("borrow_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            patron_id: parse_string_attribute("patron_id", map).unwrap_or_else(|| String::from("")),
            book_id: parse_string_attribute("book_id", map).unwrap_or_else(|| String::from("")),
            borrow_status: BorrowStatus::from(parse_string_attribute("borrow_status", map).unwrap_or_else(|| BorrowStatus::Open.to_string())),
            borrow_at: parse_date_attribute("borrow_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            due_at: parse_date_attribute("due_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            returned_at: parse_date_attribute("returned_at", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
