//! redb-based storage layer for order records
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `OrderRecord` (JSON) | Order rows |
//! | `sequence_counter` | `"order_number"` | `u64` | Next human-facing order number |
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns and the file
//! is always in a consistent state, so a shop PC losing power mid-save
//! leaves either the old or the new row.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::{AppError, OrderRecord};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order rows: key = order_id, value = JSON-serialized OrderRecord
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for counters: key = counter name, value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const ORDER_NUMBER_KEY: &str = "order_number";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already exists: {0}")]
    OrderAlreadyExists(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        use shared::ErrorCode;

        match err {
            StorageError::OrderNotFound(id) => AppError::order_not_found(id),
            StorageError::OrderAlreadyExists(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyExists, format!("Order {id} already exists"))
                    .with_detail("order_id", id)
            }
            StorageError::Serialization(e) => {
                AppError::with_message(ErrorCode::StorageCorrupted, e.to_string())
            }
            other => AppError::database(other.to_string()),
        }
    }
}

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").field("db", &"<redb>").finish()
    }
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and dry runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(ORDERS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(ORDER_NUMBER_KEY)?.is_none() {
                seq_table.insert(ORDER_NUMBER_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Number ==========

    /// Increment and return the order number (within the caller's transaction)
    pub fn next_order_number(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(ORDER_NUMBER_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(ORDER_NUMBER_KEY, next)?;
        Ok(next)
    }

    /// Last issued order number
    pub fn current_order_number(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(ORDER_NUMBER_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    // ========== Orders ==========

    /// Insert a new order row (within the caller's transaction)
    pub fn insert_order(&self, txn: &WriteTransaction, record: &OrderRecord) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        if table.get(record.id.as_str())?.is_some() {
            return Err(StorageError::OrderAlreadyExists(record.id.clone()));
        }
        let value = serde_json::to_vec(record)?;
        table.insert(record.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Replace an existing order row (within the caller's transaction)
    pub fn update_order(&self, txn: &WriteTransaction, record: &OrderRecord) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        if table.get(record.id.as_str())?.is_none() {
            return Err(StorageError::OrderNotFound(record.id.clone()));
        }
        let value = serde_json::to_vec(record)?;
        table.insert(record.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Load an order row inside a write transaction
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<OrderRecord>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Load an order row
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All order rows, newest order number first
    pub fn list_orders(&self) -> StorageResult<Vec<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut records: Vec<OrderRecord> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            records.push(serde_json::from_slice(value.value())?);
        }
        records.sort_by(|a, b| b.order_number.cmp(&a.order_number));

        Ok(records)
    }

    /// Remove an order row (within the caller's transaction)
    pub fn remove_order(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        if table.remove(order_id)?.is_none() {
            return Err(StorageError::OrderNotFound(order_id.to_string()));
        }
        Ok(())
    }

    /// Number of stored orders
    pub fn count_orders(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        Ok(table.len()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::record::{RecordMeta, build_record};
    use crate::pricing::compute_pricing;
    use shared::{OrderInput, Patient};

    fn make_record(id: &str, order_number: u64) -> OrderRecord {
        let mut input = OrderInput {
            patient: Patient {
                name: format!("Patient {order_number}"),
                ..Default::default()
            },
            ..Default::default()
        };
        input.draft.frame.list_price = 120.0;
        let meta = RecordMeta {
            id: id.to_string(),
            order_number,
            created_at: 0,
            updated_at: 0,
        };
        build_record(meta, &input, compute_pricing(&input.draft)).unwrap()
    }

    #[test]
    fn test_order_number_increment() {
        let storage = OrderStorage::open_in_memory().unwrap();
        assert_eq!(storage.current_order_number().unwrap(), 0);

        let txn = storage.begin_write().unwrap();
        let n1 = storage.next_order_number(&txn).unwrap();
        txn.commit().unwrap();
        assert_eq!(n1, 1);

        let txn = storage.begin_write().unwrap();
        let n2 = storage.next_order_number(&txn).unwrap();
        txn.commit().unwrap();
        assert_eq!(n2, 2);
        assert_eq!(storage.current_order_number().unwrap(), 2);
    }

    #[test]
    fn test_aborted_transaction_does_not_consume_number() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage.next_order_number(&txn).unwrap();
        txn.abort().unwrap();
        assert_eq!(storage.current_order_number().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let record = make_record("order-1", 1);

        let txn = storage.begin_write().unwrap();
        storage.insert_order(&txn, &record).unwrap();
        txn.commit().unwrap();

        assert_eq!(storage.get_order("order-1").unwrap(), Some(record));
        assert!(storage.get_order("missing").unwrap().is_none());
        assert_eq!(storage.count_orders().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let record = make_record("order-1", 1);

        let txn = storage.begin_write().unwrap();
        storage.insert_order(&txn, &record).unwrap();
        let err = storage.insert_order(&txn, &record).unwrap_err();
        assert!(matches!(err, StorageError::OrderAlreadyExists(_)));
    }

    #[test]
    fn test_update_missing_rejected() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let err = storage.update_order(&txn, &make_record("ghost", 1)).unwrap_err();
        assert!(matches!(err, StorageError::OrderNotFound(_)));
    }

    #[test]
    fn test_list_newest_first_and_remove() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage.insert_order(&txn, &make_record("b", 2)).unwrap();
        storage.insert_order(&txn, &make_record("a", 1)).unwrap();
        storage.insert_order(&txn, &make_record("c", 3)).unwrap();
        txn.commit().unwrap();

        let numbers: Vec<u64> = storage
            .list_orders()
            .unwrap()
            .iter()
            .map(|r| r.order_number)
            .collect();
        assert_eq!(numbers, vec![3, 2, 1]);

        let txn = storage.begin_write().unwrap();
        storage.remove_order(&txn, "b").unwrap();
        txn.commit().unwrap();
        assert_eq!(storage.count_orders().unwrap(), 2);

        let txn = storage.begin_write().unwrap();
        assert!(matches!(
            storage.remove_order(&txn, "b"),
            Err(StorageError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_storage_error_maps_to_app_error() {
        let err: AppError = StorageError::OrderNotFound("x".into()).into();
        assert_eq!(err.code, shared::ErrorCode::OrderNotFound);
        assert_eq!(err.detail_str("order_id"), Some("x"));
    }
}
