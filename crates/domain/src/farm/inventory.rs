//! Egg and feed inventory arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use common::FeedStockId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EGGS_PER_PETI, FEED_BAG_KG, Money};

/// Eggs on hand.
///
/// Invariant: `total_eggs == total_peti * 360 + remaining_eggs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggInventory {
    pub total_eggs: u64,
    pub total_peti: u64,
    /// Loose eggs not yet making up a full Peti.
    pub remaining_eggs: u64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl EggInventory {
    /// Splits a new batch of good eggs into whole Peti and loose eggs,
    /// counting the loose eggs already held.
    pub fn peti_split(&self, good_eggs: u64) -> (u64, u64) {
        let combined = self.remaining_eggs.saturating_add(good_eggs);
        (combined / EGGS_PER_PETI, combined % EGGS_PER_PETI)
    }

    /// Adds a production batch whose split was computed with [`Self::peti_split`].
    pub fn add_production(
        &mut self,
        good_eggs: u64,
        peti_count: u64,
        remaining_eggs: u64,
        at: DateTime<Utc>,
    ) {
        self.total_eggs = self.total_eggs.saturating_add(good_eggs);
        self.total_peti = self.total_peti.saturating_add(peti_count);
        self.remaining_eggs = remaining_eggs;
        self.last_updated = Some(at);
    }

    /// Removes `peti_count` Peti worth of eggs, clamping at zero.
    pub fn deduct_peti(&mut self, peti_count: u64, at: DateTime<Utc>) {
        self.total_eggs = self
            .total_eggs
            .saturating_sub(peti_count.saturating_mul(EGGS_PER_PETI));
        self.total_peti = self.total_eggs / EGGS_PER_PETI;
        self.remaining_eggs = self.total_eggs % EGGS_PER_PETI;
        self.last_updated = Some(at);
    }

    /// Returns true if the Peti/loose split adds up to the egg total.
    pub fn is_consistent(&self) -> bool {
        self.total_peti * EGGS_PER_PETI + self.remaining_eggs == self.total_eggs
    }
}

/// Stock of one feed type. At most one exists per `feed_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStock {
    pub id: FeedStockId,
    pub feed_type: String,
    pub bags_in_stock: Decimal,
    /// Always 50.
    pub bag_size_kg: u32,
    /// Price paid at the most recent purchase.
    pub cost_per_bag: Money,
    pub last_purchase_date: NaiveDate,
}

impl FeedStock {
    /// Opens a stock entry from a first purchase.
    pub fn opened(
        id: FeedStockId,
        feed_type: impl Into<String>,
        bags: u32,
        cost_per_bag: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            feed_type: feed_type.into(),
            bags_in_stock: Decimal::from(bags),
            bag_size_kg: FEED_BAG_KG,
            cost_per_bag,
            last_purchase_date: date,
        }
    }

    /// Adds purchased bags. The latest price replaces the previous one; it is
    /// not averaged.
    pub fn restock(&mut self, bags: u32, cost_per_bag: Money, date: NaiveDate) {
        self.bags_in_stock += Decimal::from(bags);
        self.cost_per_bag = cost_per_bag;
        self.last_purchase_date = date;
    }

    /// Removes consumed bags, clamping at zero.
    pub fn consume(&mut self, bags_used: Decimal) {
        self.bags_in_stock = (self.bags_in_stock - bags_used).max(Decimal::ZERO);
    }

    /// Stock weight in kilograms.
    pub fn kilograms(&self) -> Decimal {
        self.bags_in_stock * Decimal::from(self.bag_size_kg)
    }
}
