//! Records kept in the farm state.

use chrono::NaiveDate;
use common::{
    DiseaseRecordId, FeedConsumptionId, FeedPurchaseId, FlockId, LabourPaymentId, LabourerId,
    ProductionId, SaleId, TransactionId, VaccinationId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    Category, DiseaseStatus, LabourerStatus, LinkedCompany, Money, TransactionKind,
    VaccinationStatus, WageType,
};

/// A ledger entry. Never mutated or removed once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive; the direction is carried by `kind`.
    pub amount: Money,
    pub source: String,
    pub linked_company: LinkedCompany,
    pub description: String,
    pub category: Category,
}

impl Transaction {
    /// Returns the amount with its ledger sign (credits positive, debits negative).
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Credit => self.amount,
            TransactionKind::Debit => -self.amount,
        }
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionKind::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionKind::Debit
    }
}

/// One cohort of birds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flock {
    pub id: FlockId,
    pub breed: String,
    pub number_of_layers: u32,
    /// Age in weeks at `start_date`.
    pub age_weeks: u32,
    pub start_date: NaiveDate,
    /// Cumulative deaths.
    pub mortality: u32,
    pub is_active: bool,
}

/// A day's egg collection from one flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggProduction {
    pub id: ProductionId,
    pub date: NaiveDate,
    /// Not enforced; a dangling id is tolerated.
    pub flock_id: FlockId,
    pub total_eggs: u64,
    pub broken_eggs: u64,
    pub good_eggs: u64,
    /// Whole Peti completed by this collection, counting the loose eggs
    /// already in inventory.
    pub peti_count: u64,
    /// Loose eggs left in inventory after this collection.
    pub remaining_eggs: u64,
}

/// A sale of eggs by the Peti.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggSale {
    pub id: SaleId,
    pub date: NaiveDate,
    pub peti_count: u64,
    pub price_per_peti: Money,
    pub total_amount: Money,
    pub buyer_name: String,
    pub transaction_id: TransactionId,
}

/// A purchase of feed bags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPurchase {
    pub id: FeedPurchaseId,
    pub date: NaiveDate,
    pub feed_type: String,
    pub bags: u32,
    pub cost_per_bag: Money,
    pub total_cost: Money,
    /// The debit posted for this purchase; None for free (zero-cost) feed.
    pub transaction_id: Option<TransactionId>,
}

/// Feed fed to a flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConsumption {
    pub id: FeedConsumptionId,
    pub date: NaiveDate,
    pub feed_type: String,
    /// May be fractional (half bags).
    pub bags_used: Decimal,
    pub flock_id: FlockId,
}

/// A vaccination planned or given to a flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: VaccinationId,
    pub flock_id: FlockId,
    pub vaccine_name: String,
    pub scheduled_date: NaiveDate,
    pub administered_date: Option<NaiveDate>,
    pub status: VaccinationStatus,
    pub notes: String,
}

impl Vaccination {
    /// Returns the status as presented on `today` (scheduled dates in the
    /// past read as overdue).
    pub fn status_on(&self, today: NaiveDate) -> VaccinationStatus {
        self.status.effective(self.scheduled_date, today)
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.status_on(today) == VaccinationStatus::Overdue
    }
}

/// A disease outbreak in a flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: DiseaseRecordId,
    pub flock_id: FlockId,
    pub disease_name: String,
    pub date_detected: NaiveDate,
    pub affected_birds: u32,
    pub treatment_cost: Money,
    pub treatment: String,
    pub status: DiseaseStatus,
}

/// Current selling price of one Peti.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggPrice {
    pub price_per_peti: Money,
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

impl EggPrice {
    /// Price used until the farmer sets one.
    pub const DEFAULT_PRICE_PER_PETI: i64 = 2500;
}

impl Default for EggPrice {
    fn default() -> Self {
        Self {
            price_per_peti: Money::from_rupees(Self::DEFAULT_PRICE_PER_PETI),
            last_updated: None,
        }
    }
}

/// A farm worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labourer {
    pub id: LabourerId,
    pub name: String,
    pub role: String,
    pub wage_type: WageType,
    pub wage_amount: Money,
    pub joining_date: NaiveDate,
    pub phone: String,
    pub status: LabourerStatus,
}

/// A wage paid to a labourer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabourPayment {
    pub id: LabourPaymentId,
    pub labourer_id: LabourerId,
    pub date: NaiveDate,
    pub amount: Money,
    pub notes: String,
    pub transaction_id: TransactionId,
}
