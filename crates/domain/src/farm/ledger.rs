//! Ledger rules: how credits and debits move the farm's single bank account.
//!
//! The account may go negative. While it is negative the shortfall is
//! reported as `borrowed_amount` (money advanced by the financier); there is
//! no separate loan ledger, and a later credit simply brings the balance back
//! toward zero.

use chrono::{DateTime, NaiveDate, Utc};
use common::TransactionId;
use serde::{Deserialize, Serialize};

use super::{Category, LinkedCompany, Money, Transaction, TransactionKind};

/// The farm's cash account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Signed balance; never clamped.
    pub balance: Money,

    /// `max(0, -balance)`, kept alongside the balance for reporting.
    pub borrowed_amount: Money,

    pub last_updated: Option<DateTime<Utc>>,
}

impl BankAccount {
    /// Balance after posting `amount`, or None if it would not fit.
    pub fn balance_after(&self, kind: TransactionKind, amount: Money) -> Option<Money> {
        match kind {
            TransactionKind::Credit => self.balance.checked_add(amount),
            TransactionKind::Debit => self.balance.checked_sub(amount),
        }
    }

    /// Applies a transaction of the given kind and amount.
    ///
    /// Saturates at the `Money` bounds; decisions check [`Self::balance_after`]
    /// first.
    pub fn apply(&mut self, kind: TransactionKind, amount: Money, at: DateTime<Utc>) {
        match kind {
            TransactionKind::Credit => self.balance += amount,
            TransactionKind::Debit => self.balance -= amount,
        }
        self.borrowed_amount = if self.balance.is_negative() {
            self.balance.abs()
        } else {
            Money::zero()
        };
        self.last_updated = Some(at);
    }
}

// Ledger entries produced as side effects of farm events
impl Transaction {
    /// Credit for an egg sale to an outside buyer.
    ///
    /// Returns None if the sale total does not fit.
    pub fn egg_sale(
        id: TransactionId,
        date: NaiveDate,
        peti_count: u64,
        price_per_peti: Money,
        buyer_name: &str,
    ) -> Option<Self> {
        Some(Self {
            id,
            date,
            kind: TransactionKind::Credit,
            amount: price_per_peti.checked_multiply(peti_count)?,
            source: format!("Egg Sale - {peti_count} Peti to {buyer_name}"),
            linked_company: LinkedCompany::External,
            description: format!("Sold {peti_count} peti at {price_per_peti}/peti"),
            category: Category::EggSale,
        })
    }

    /// Debit for feed bought from the feed supplier.
    pub fn feed_purchase(
        id: TransactionId,
        date: NaiveDate,
        feed_type: &str,
        bags: u32,
        cost_per_bag: Money,
    ) -> Option<Self> {
        Some(Self {
            id,
            date,
            kind: TransactionKind::Debit,
            amount: cost_per_bag.checked_multiply(u64::from(bags))?,
            source: format!("Feed Purchase - {bags} bags of {feed_type}"),
            linked_company: LinkedCompany::ChairmanFeed,
            description: format!(
                "Purchased {bags} bags ({}kg each) at {cost_per_bag}/bag from Chairman Feed (External Supplier)",
                super::FEED_BAG_KG
            ),
            category: Category::FeedPurchase,
        })
    }

    /// Debit for treating a disease outbreak.
    pub fn medication(
        id: TransactionId,
        date: NaiveDate,
        disease_name: &str,
        treatment: &str,
        cost: Money,
    ) -> Self {
        Self {
            id,
            date,
            kind: TransactionKind::Debit,
            amount: cost,
            source: format!("Treatment for {disease_name}"),
            linked_company: LinkedCompany::External,
            description: treatment.to_string(),
            category: Category::Medication,
        }
    }

    /// Credit of funds advanced by the financier.
    pub fn initial_balance(id: TransactionId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id,
            date,
            kind: TransactionKind::Credit,
            amount,
            source: "Balance Added".to_string(),
            linked_company: LinkedCompany::ChairmanGroup,
            description: "Funds received from Chairman Group (External)".to_string(),
            category: Category::InitialBalance,
        }
    }

    /// Debit for birds bought from the hatchery.
    pub fn bird_purchase(
        id: TransactionId,
        date: NaiveDate,
        breed: &str,
        birds: u32,
        price_per_bird: Money,
    ) -> Option<Self> {
        Some(Self {
            id,
            date,
            kind: TransactionKind::Debit,
            amount: price_per_bird.checked_multiply(u64::from(birds))?,
            source: format!("Bird Purchase - {birds} birds"),
            linked_company: LinkedCompany::ChairmanHatchery,
            description: format!("Bird Purchase - {birds} {breed} from Chairman Hatchery"),
            category: Category::BirdPurchase,
        })
    }

    /// Debit for a wage payment.
    pub fn labour_payment(
        id: TransactionId,
        date: NaiveDate,
        name: &str,
        role: &str,
        amount: Money,
    ) -> Self {
        Self {
            id,
            date,
            kind: TransactionKind::Debit,
            amount,
            source: format!("Labour Payment - {name}"),
            linked_company: LinkedCompany::External,
            description: format!("Labour Payment - {name} ({role})"),
            category: Category::LabourPayment,
        }
    }
}
