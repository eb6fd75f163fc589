//! Legacy lens price compatibility
//!
//! Orders saved before lens selections were stored as a mapping carry one
//! flat price column per lens option. When such a record is re-priced the
//! regular lens total is the larger of the mapping sum and the flat-column
//! sum. Delete this module once historical orders are migrated.

use rust_decimal::Decimal;
use shared::LegacyLensPrices;

use super::money::{round2, to_decimal};

/// Sum of the flat legacy lens price columns
pub fn legacy_lens_total(prices: &LegacyLensPrices) -> Decimal {
    round2(prices.values().copied().map(to_decimal).sum())
}

/// Regular lens total after applying the legacy fallback
///
/// Only the regular path is affected; legacy records never had insurance
/// lens prices.
pub fn reconcile_regular_lens_total(mapping_total: Decimal, legacy: &LegacyLensPrices) -> Decimal {
    if legacy.is_empty() {
        return mapping_total;
    }

    let legacy_total = legacy_lens_total(legacy);
    if legacy_total > mapping_total {
        tracing::debug!(
            %mapping_total,
            %legacy_total,
            "Legacy lens columns exceed lens selections, using legacy total"
        );
    }
    mapping_total.max(legacy_total)
}
