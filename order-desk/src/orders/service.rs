//! Order service
//!
//! Validates input, prices it and persists the result. The breakdown is
//! always recomputed here, so a saved order is priced exactly like the
//! preview the order-entry screen showed.

use shared::util::{new_order_id, now_millis};
use shared::{AppError, AppResult, OrderDraft, OrderInput, OrderRecord, PriceBreakdown};

use super::record::{RecordMeta, build_record, draft_from_record, input_from_record};
use super::storage::OrderStorage;
use super::validation::{validate_draft, validate_order_input};
use crate::pricing::PricingEngine;

/// Order operations over an explicitly owned storage handle
#[derive(Debug, Clone)]
pub struct OrderService {
    storage: OrderStorage,
    engine: PricingEngine,
}

impl OrderService {
    pub fn new(storage: OrderStorage, engine: PricingEngine) -> Self {
        Self { storage, engine }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Validate and price a draft without saving anything
    pub fn quote(&self, draft: &OrderDraft) -> AppResult<PriceBreakdown> {
        if let Err(e) = validate_draft(draft) {
            tracing::warn!(code = %e.code, error = %e, "Draft rejected");
            return Err(e);
        }
        Ok(self.engine.price(draft))
    }

    /// Create a new order
    pub fn create(&self, input: &OrderInput) -> AppResult<OrderRecord> {
        self.validate(input)?;
        let pricing = self.engine.price(&input.draft);

        let txn = self.storage.begin_write()?;
        let order_number = self.storage.next_order_number(&txn)?;
        let now = now_millis();
        let record = build_record(
            RecordMeta {
                id: new_order_id(),
                order_number,
                created_at: now,
                updated_at: now,
            },
            input,
            pricing,
        )?;
        self.storage.insert_order(&txn, &record)?;
        txn.commit().map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            order_id = %record.id,
            order_number = record.order_number,
            balance_due_regular = record.pricing.balance_due_regular,
            balance_due_insurance = record.pricing.balance_due_insurance,
            "Order created"
        );
        Ok(record)
    }

    /// Replace the inputs of an existing order and re-price it
    ///
    /// Id, order number and creation time are kept.
    pub fn update(&self, order_id: &str, input: &OrderInput) -> AppResult<OrderRecord> {
        self.validate(input)?;
        let pricing = self.engine.price(&input.draft);

        let txn = self.storage.begin_write()?;
        let existing = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| AppError::order_not_found(order_id))?;
        let record = build_record(
            RecordMeta {
                id: existing.id,
                order_number: existing.order_number,
                created_at: existing.created_at,
                updated_at: now_millis().max(existing.updated_at),
            },
            input,
            pricing,
        )?;
        self.storage.update_order(&txn, &record)?;
        txn.commit().map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(order_id = %record.id, order_number = record.order_number, "Order updated");
        Ok(record)
    }

    /// Re-price a stored order from its own input columns
    ///
    /// Picks up rate changes and applies the legacy lens fallback to
    /// orders saved before lens selections were a mapping.
    pub fn recompute(&self, order_id: &str) -> AppResult<OrderRecord> {
        let existing = self.get(order_id)?;
        let input = input_from_record(&existing)?;
        let previous = existing.pricing.clone();
        let record = self.update(order_id, &input)?;

        if record.pricing != previous {
            tracing::info!(
                order_id = %record.id,
                old_balance_due_regular = previous.balance_due_regular,
                new_balance_due_regular = record.pricing.balance_due_regular,
                "Order pricing changed on recompute"
            );
        }
        Ok(record)
    }

    /// Load an order
    pub fn get(&self, order_id: &str) -> AppResult<OrderRecord> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| AppError::order_not_found(order_id))
    }

    /// Price a stored order without writing it back
    pub fn price_stored(&self, order_id: &str) -> AppResult<PriceBreakdown> {
        let record = self.get(order_id)?;
        Ok(self.engine.price(&draft_from_record(&record)?))
    }

    /// All orders, newest first
    pub fn list(&self) -> AppResult<Vec<OrderRecord>> {
        Ok(self.storage.list_orders()?)
    }

    /// Delete an order
    pub fn delete(&self, order_id: &str) -> AppResult<()> {
        let txn = self.storage.begin_write()?;
        self.storage.remove_order(&txn, order_id)?;
        txn.commit().map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(order_id = %order_id, "Order deleted");
        Ok(())
    }

    fn validate(&self, input: &OrderInput) -> AppResult<()> {
        validate_order_input(input).inspect_err(|e| {
            tracing::warn!(code = %e.code, error = %e, "Order input rejected");
        })
    }
}
