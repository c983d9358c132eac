//! # RFQ Repository
//!
//! Maps the RFQ aggregate onto three tables and back.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_by_id(7)          one read tx: both reads see the same commit    │
//! │                                                                         │
//! │  1. rfq ⋈ customers ON customers.id = rfq.customer_id  (one-to-one)    │
//! │     └── no row? → None                                                  │
//! │                                                                         │
//! │  2. rfq_items WHERE rfq_id = 7 ORDER BY position       (one-to-many)   │
//! │     └── zero rows is fine → items: []                                   │
//! │                                                                         │
//! │  3. Rfq { header, customer, items }                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION per write                          │
//! │                                                                         │
//! │  create:  INSERT customers → id                                         │
//! │           INSERT rfq (customer_id) → id                                 │
//! │           INSERT rfq_items × N (position = input order)                 │
//! │                                                                         │
//! │  update:  id check (no writes)                                          │
//! │           UPDATE rfq RETURNING customer_id → no row? NotFound           │
//! │           UPDATE customers (by the stored customer_id)                  │
//! │           DELETE rfq_items → INSERT rfq_items × N                       │
//! │                                                                         │
//! │  COMMIT ← all steps or none. An error, or the caller dropping the      │
//! │           future, drops the transaction, which rolls it back.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use rfq_core::validation::blank_to_none;
use rfq_core::{Customer, Rfq, RfqItem};

// =============================================================================
// Row Types
// =============================================================================

/// One row of the rfq ⋈ customers join.
#[derive(Debug, FromRow)]
struct HeaderRow {
    id: i64,
    quote_number: Option<String>,
    rfq_date: Option<String>,
    quote_date: Option<String>,
    valid_until: Option<String>,
    description: Option<String>,
    remarks: Option<String>,
    customer_id: i64,
    customer_name: String,
    customer_address: String,
    customer_phone: String,
    customer_email: String,
}

impl HeaderRow {
    fn into_rfq(self, items: Vec<RfqItem>) -> Rfq {
        Rfq {
            id: self.id,
            quote_number: self.quote_number,
            rfq_date: self.rfq_date,
            quote_date: self.quote_date,
            valid_until: self.valid_until,
            description: self.description,
            remarks: self.remarks,
            customer: Customer {
                id: self.customer_id,
                name: self.customer_name,
                address: self.customer_address,
                phone: self.customer_phone,
                email: self.customer_email,
            },
            items,
        }
    }
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    rfq_id: i64,
    item_no: String,
    description: String,
    qty: String,
    rate: String,
}

impl TryFrom<ItemRow> for RfqItem {
    type Error = DbError;

    fn try_from(row: ItemRow) -> DbResult<Self> {
        Ok(RfqItem {
            id: row.id,
            rfq_id: row.rfq_id,
            item_no: row.item_no,
            description: row.description,
            qty: parse_decimal("rfq_items.qty", row.qty)?,
            rate: parse_decimal("rfq_items.rate", row.rate)?,
        })
    }
}

fn parse_decimal(column: &'static str, value: String) -> DbResult<Decimal> {
    Decimal::from_str(&value).map_err(|_| DbError::CorruptValue { column, value })
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the RFQ aggregate.
///
/// ## Usage
/// ```rust,ignore
/// let repo = RfqRepository::new(pool);
///
/// let id = repo.create(&rfq).await?;
/// let stored = repo.fetch_by_id(id).await?.expect("just created");
/// ```
#[derive(Debug, Clone)]
pub struct RfqRepository {
    pool: SqlitePool,
}

impl RfqRepository {
    /// Creates a new RfqRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RfqRepository { pool }
    }

    /// Loads the full aggregate for `id`.
    ///
    /// ## Returns
    /// * `Ok(Some(rfq))` - header, customer and items (in submitted order)
    /// * `Ok(None)` - no RFQ row matches `id`
    pub async fn fetch_by_id(&self, id: i64) -> DbResult<Option<Rfq>> {
        debug!(rfq_id = id, "Fetching RFQ");

        let mut tx = self.begin().await?;

        let header: Option<HeaderRow> = sqlx::query_as(
            r#"
            SELECT
                r.id,
                r.quote_number,
                r.rfq_date,
                r.quote_date,
                r.valid_until,
                r.description,
                r.remarks,
                c.id      AS customer_id,
                c.name    AS customer_name,
                c.address AS customer_address,
                c.phone   AS customer_phone,
                c.email   AS customer_email
            FROM rfq r
            JOIN customers c ON c.id = r.customer_id
            WHERE r.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, rfq_id, item_no, description, qty, rate
            FROM rfq_items
            WHERE rfq_id = ?1
            ORDER BY position, id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        commit(tx).await?;

        let items = rows
            .into_iter()
            .map(RfqItem::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(header.into_rfq(items)))
    }

    /// Returns every RFQ id, newest (highest id) first.
    pub async fn list_ids(&self) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM rfq ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Number of stored RFQs.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rfq")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a new aggregate and returns its id.
    ///
    /// `rfq.id`, `rfq.customer.id` and item ids are ignored; the store
    /// assigns them. Blank optional dates are stored as NULL.
    ///
    /// ## Order
    /// 1. customer → captures customer id
    /// 2. rfq referencing that customer → captures rfq id
    /// 3. items referencing that rfq, in input order
    pub async fn create(&self, rfq: &Rfq) -> DbResult<i64> {
        let mut tx = self.begin().await?;

        let customer = &rfq.customer;
        let customer_id = sqlx::query(
            r#"
            INSERT INTO customers (name, address, phone, email)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.email)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::write("insert customer", e))?
        .last_insert_rowid();

        let rfq_id = sqlx::query(
            r#"
            INSERT INTO rfq (
                quote_number, rfq_date, quote_date, valid_until,
                description, remarks, customer_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&rfq.quote_number)
        .bind(blank_to_none(rfq.rfq_date.clone()))
        .bind(blank_to_none(rfq.quote_date.clone()))
        .bind(blank_to_none(rfq.valid_until.clone()))
        .bind(&rfq.description)
        .bind(&rfq.remarks)
        .bind(customer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::write("insert rfq", e))?
        .last_insert_rowid();

        insert_items(&mut tx, rfq_id, &rfq.items).await?;

        commit(tx).await?;

        info!(rfq_id, customer_id, items = rfq.items.len(), "RFQ created");
        Ok(rfq_id)
    }

    /// Replaces the aggregate stored under `id`.
    ///
    /// ## Semantics
    /// - `id` must equal `rfq.id`, checked before anything is written
    /// - no RFQ row for `id` → `NotFound` (never a silent no-op)
    /// - header fields and the owning customer are updated in place
    /// - ALL items are deleted and the submitted ones inserted, so item ids
    ///   never survive an update
    pub async fn update(&self, id: i64, rfq: &Rfq) -> DbResult<()> {
        if id != rfq.id {
            return Err(DbError::IdMismatch {
                path_id: id,
                body_id: rfq.id,
            });
        }

        let mut tx = self.begin().await?;

        // The first statement must write: a deferred transaction that reads
        // first cannot wait for the write lock and fails with SQLITE_BUSY.
        let customer_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE rfq SET
                quote_number = ?2,
                rfq_date = ?3,
                quote_date = ?4,
                valid_until = ?5,
                description = ?6,
                remarks = ?7
            WHERE id = ?1
            RETURNING customer_id
            "#,
        )
        .bind(id)
        .bind(&rfq.quote_number)
        .bind(blank_to_none(rfq.rfq_date.clone()))
        .bind(blank_to_none(rfq.quote_date.clone()))
        .bind(blank_to_none(rfq.valid_until.clone()))
        .bind(&rfq.description)
        .bind(&rfq.remarks)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DbError::write("update rfq", e))?;

        let Some(customer_id) = customer_id else {
            return Err(DbError::not_found("RFQ", id));
        };

        // Dropping `tx` here rolls the header update back.
        if rfq.customer.id != 0 && rfq.customer.id != customer_id {
            return Err(DbError::CustomerMismatch {
                rfq_id: id,
                body_customer_id: rfq.customer.id,
            });
        }

        let customer = &rfq.customer;
        sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                address = ?3,
                phone = ?4,
                email = ?5
            WHERE id = ?1
            "#,
        )
        .bind(customer_id)
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.phone)
        .bind(&customer.email)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::write("update customer", e))?;

        let removed = sqlx::query("DELETE FROM rfq_items WHERE rfq_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::write("delete items", e))?
            .rows_affected();

        insert_items(&mut tx, id, &rfq.items).await?;

        commit(tx).await?;

        info!(
            rfq_id = id,
            removed_items = removed,
            items = rfq.items.len(),
            "RFQ updated"
        );
        Ok(())
    }

    async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(|e| match DbError::from(e) {
            e @ (DbError::PoolExhausted | DbError::ConnectionFailed(_)) => e,
            other => DbError::TransactionFailed(other.to_string()),
        })
    }
}

/// Inserts `items` for `rfq_id`, recording input order in `position`.
async fn insert_items(
    tx: &mut Transaction<'static, Sqlite>,
    rfq_id: i64,
    items: &[RfqItem],
) -> DbResult<()> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO rfq_items (rfq_id, position, item_no, description, qty, rate)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(rfq_id)
        .bind(position as i64)
        .bind(&item.item_no)
        .bind(&item.description)
        .bind(item.qty.to_string())
        .bind(item.rate.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| DbError::write("insert item", e))?;
    }

    Ok(())
}

async fn commit(tx: Transaction<'static, Sqlite>) -> DbResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn sample_rfq() -> Rfq {
        Rfq {
            quote_number: Some("Q-2024-001".to_string()),
            rfq_date: Some("2024-05-01".to_string()),
            quote_date: Some("2024-05-03".to_string()),
            valid_until: Some("2024-06-01".to_string()),
            description: Some("Replacement pumps for line 3".to_string()),
            remarks: Some("Delivery within 4 weeks".to_string()),
            customer: Customer {
                id: 0,
                name: "Acme Industrial".to_string(),
                address: "1 Harbour Road".to_string(),
                phone: "555-0100".to_string(),
                email: "buyer@acme.test".to_string(),
            },
            items: vec![
                RfqItem::new("P-1", "Centrifugal pump", Decimal::from(2), dec(1000, 2)),
                RfqItem::new("S-7", "Seal kit", dec(15, 1), dec(1250, 2)),
            ],
            ..Rfq::default()
        }
    }

    fn assert_items_match(stored: &[RfqItem], submitted: &[RfqItem]) {
        assert_eq!(stored.len(), submitted.len());
        for (s, sub) in stored.iter().zip(submitted) {
            assert!(s.same_content(sub), "{s:?} != {sub:?}");
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trips() {
        let db = test_db().await;
        let rfq = sample_rfq();

        let id = db.rfqs().create(&rfq).await.unwrap();
        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.quote_number, rfq.quote_number);
        assert_eq!(stored.rfq_date, rfq.rfq_date);
        assert_eq!(stored.description, rfq.description);
        assert!(stored.customer.id > 0);
        assert!(stored.customer.same_contact(&rfq.customer));
        assert_items_match(&stored.items, &rfq.items);
        assert!(stored.items.iter().all(|i| i.rfq_id == id && i.id > 0));
    }

    #[tokio::test]
    async fn test_fetch_missing_returns_none() {
        let db = test_db().await;

        assert!(db.rfqs().fetch_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_without_items_returns_empty_list() {
        let db = test_db().await;
        let rfq = Rfq {
            items: Vec::new(),
            ..sample_rfq()
        };

        let id = db.rfqs().create(&rfq).await.unwrap();
        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        assert!(stored.items.is_empty());
    }

    #[tokio::test]
    async fn test_items_keep_submitted_order() {
        let db = test_db().await;
        let items: Vec<RfqItem> = ["c", "a", "b", "a"]
            .iter()
            .map(|n| RfqItem::new(*n, "", Decimal::ONE, Decimal::ONE))
            .collect();
        let rfq = Rfq {
            items: items.clone(),
            ..sample_rfq()
        };

        let id = db.rfqs().create(&rfq).await.unwrap();
        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        let order: Vec<&str> = stored.items.iter().map(|i| i.item_no.as_str()).collect();
        assert_eq!(order, ["c", "a", "b", "a"]);
    }

    #[tokio::test]
    async fn test_list_ids_newest_first() {
        let db = test_db().await;

        for id in [3_i64, 1, 4] {
            sqlx::query("INSERT INTO customers (id, name) VALUES (?1, 'c')")
                .bind(id)
                .execute(db.pool())
                .await
                .unwrap();
            sqlx::query("INSERT INTO rfq (id, customer_id) VALUES (?1, ?1)")
                .bind(id)
                .execute(db.pool())
                .await
                .unwrap();
        }

        assert_eq!(db.rfqs().list_ids().await.unwrap(), vec![4, 3, 1]);
        assert_eq!(db.rfqs().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_items() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        let before = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(before.items.len(), 2);

        let replacement = vec![RfqItem::new("N-1", "New part", Decimal::from(5), dec(200, 2))];
        let mut changed = before.clone();
        changed.items = replacement.clone();

        db.rfqs().update(id, &changed).await.unwrap();

        let after = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_items_match(&after.items, &replacement);
        assert!(before.items.iter().all(|old| old.id != after.items[0].id));
    }

    #[tokio::test]
    async fn test_update_with_same_items_creates_new_rows() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        let before = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        db.rfqs().update(id, &before).await.unwrap();

        let after = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_items_match(&after.items, &before.items);
        assert_ne!(after.items[0].id, before.items[0].id);
    }

    #[tokio::test]
    async fn test_update_changes_header_and_customer_in_place() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        let mut rfq = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        let customer_id = rfq.customer.id;

        rfq.quote_number = Some("Q-2024-001-R1".to_string());
        rfq.remarks = None;
        rfq.customer.name = "Acme Industrial Ltd".to_string();
        rfq.customer.email = "procurement@acme.test".to_string();
        db.rfqs().update(id, &rfq).await.unwrap();

        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quote_number.as_deref(), Some("Q-2024-001-R1"));
        assert_eq!(stored.remarks, None);
        assert_eq!(stored.customer.id, customer_id);
        assert_eq!(stored.customer.name, "Acme Industrial Ltd");
        assert_eq!(stored.customer.email, "procurement@acme.test");
    }

    #[tokio::test]
    async fn test_update_blank_dates_stored_as_null() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        let mut rfq = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        rfq.rfq_date = Some(String::new());
        rfq.quote_date = Some(String::new());
        rfq.valid_until = None;
        db.rfqs().update(id, &rfq).await.unwrap();

        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.rfq_date, None);
        assert_eq!(stored.quote_date, None);
        assert_eq!(stored.valid_until, None);

        let raw: Option<String> = sqlx::query_scalar("SELECT rfq_date FROM rfq WHERE id = ?1")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(raw, None);
    }

    #[tokio::test]
    async fn test_create_blank_dates_stored_as_null() {
        let db = test_db().await;
        let rfq = Rfq {
            rfq_date: Some(String::new()),
            valid_until: Some(" ".to_string()),
            ..sample_rfq()
        };

        let id = db.rfqs().create(&rfq).await.unwrap();
        let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        assert_eq!(stored.rfq_date, None);
        assert_eq!(stored.valid_until, None);
        assert_eq!(stored.quote_date.as_deref(), Some("2024-05-03"));
    }

    #[tokio::test]
    async fn test_update_id_mismatch_writes_nothing() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        let before = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();

        let mut changed = before.clone();
        changed.id = id + 1;
        changed.quote_number = Some("SHOULD-NOT-PERSIST".to_string());
        changed.items.clear();

        let err = db.rfqs().update(id, &changed).await.unwrap_err();
        assert!(matches!(err, DbError::IdMismatch { .. }));

        let after = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let rfq = Rfq {
            id: 77,
            ..sample_rfq()
        };

        let err = db.rfqs().update(77, &rfq).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.rfqs().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_foreign_customer_rejected() {
        let db = test_db().await;
        let first = db.rfqs().create(&sample_rfq()).await.unwrap();
        let second = db.rfqs().create(&sample_rfq()).await.unwrap();
        let other_customer = db.rfqs().fetch_by_id(second).await.unwrap().unwrap().customer;

        let mut rfq = db.rfqs().fetch_by_id(first).await.unwrap().unwrap();
        rfq.quote_number = Some("Q-HIJACK".to_string());
        rfq.customer = Customer {
            name: "Hijack".to_string(),
            ..other_customer
        };

        let err = db.rfqs().update(first, &rfq).await.unwrap_err();
        assert!(matches!(err, DbError::CustomerMismatch { .. }));

        let untouched = db.rfqs().fetch_by_id(second).await.unwrap().unwrap();
        assert_eq!(untouched.customer.name, "Acme Industrial");

        // the header update that ran first was rolled back
        let header = db.rfqs().fetch_by_id(first).await.unwrap().unwrap();
        assert_eq!(header.quote_number.as_deref(), Some("Q-2024-001"));
    }

    #[tokio::test]
    async fn test_failed_create_rolls_back_every_insert() {
        let db = test_db().await;
        sqlx::query("DROP TABLE rfq_items")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.rfqs().create(&sample_rfq()).await.unwrap_err();
        assert!(matches!(err, DbError::WriteFailed { step: "insert item", .. }));

        let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(customers, 0);
        assert_eq!(db.rfqs().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_quantity_is_reported() {
        let db = test_db().await;
        let id = db.rfqs().create(&sample_rfq()).await.unwrap();
        sqlx::query("UPDATE rfq_items SET qty = 'lots' WHERE rfq_id = ?1")
            .bind(id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.rfqs().fetch_by_id(id).await.unwrap_err();
        assert!(matches!(err, DbError::CorruptValue { column: "rfq_items.qty", .. }));
    }

    // -------------------------------------------------------------------------
    // File-backed concurrency
    // -------------------------------------------------------------------------

    async fn file_db(dir: &tempfile::TempDir) -> Database {
        Database::new(DbConfig::new(dir.path().join("rfq.db")).max_connections(5))
            .await
            .unwrap()
    }

    /// Aggregate whose quote number and every item number carry `tag`.
    fn tagged(id: i64, tag: &str, lines: usize) -> Rfq {
        Rfq {
            id,
            quote_number: Some(tag.to_string()),
            items: (0..lines)
                .map(|_| RfqItem::new(tag, "tagged line", Decimal::ONE, Decimal::ONE))
                .collect(),
            ..sample_rfq()
        }
    }

    /// Read-modify-write the way an API client does it.
    async fn retag(repo: &RfqRepository, id: i64, round: usize) -> DbResult<()> {
        let mut rfq = repo
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("RFQ", id))?;
        rfq.quote_number = Some(format!("R{round}"));
        rfq.items = vec![RfqItem::new(format!("R{round}"), "", Decimal::ONE, Decimal::ONE)];
        repo.update(id, &rfq).await
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir).await;

        let mut ids = Vec::new();
        for _ in 0..8 {
            ids.push(db.rfqs().create(&sample_rfq()).await.unwrap());
        }

        let mut tasks = Vec::new();
        for round in 0..20 {
            for &id in &ids {
                let repo = db.rfqs();
                tasks.push(tokio::spawn(async move { retag(&repo, id, round).await }));
            }
        }

        let mut failures = Vec::new();
        for task in tasks {
            if let Err(e) = task.await.unwrap() {
                failures.push(e.to_string());
            }
        }
        assert!(failures.is_empty(), "{} updates failed: {:?}", failures.len(), failures.first());

        for id in ids {
            let stored = db.rfqs().fetch_by_id(id).await.unwrap().unwrap();
            assert_eq!(stored.items.len(), 1);
            assert_eq!(Some(stored.items[0].item_no.clone()), stored.quote_number);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_fetch_never_mixes_header_and_items_of_different_updates() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir).await;
        let id = db.rfqs().create(&tagged(0, "A", 3)).await.unwrap();

        let writer = {
            let repo = db.rfqs();
            tokio::spawn(async move {
                for n in 0..100 {
                    let (tag, lines) = if n % 2 == 0 { ("B", 5) } else { ("A", 3) };
                    repo.update(id, &tagged(id, tag, lines)).await.unwrap();
                }
            })
        };

        let repo = db.rfqs();
        while !writer.is_finished() {
            let rfq = repo.fetch_by_id(id).await.unwrap().unwrap();
            let tag = rfq.quote_number.clone().unwrap();
            let expected = if tag == "A" { 3 } else { 5 };

            assert_eq!(rfq.items.len(), expected, "header {tag} with foreign items");
            assert!(rfq.items.iter().all(|item| item.item_no == tag));
        }

        writer.await.unwrap();
    }
}
