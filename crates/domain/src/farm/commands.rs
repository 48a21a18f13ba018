//! Farm commands.
//!
//! Business dates default to today (UTC) and can be overridden with `on`.

use chrono::{NaiveDate, Utc};
use common::{DiseaseRecordId, FlockId, LabourerId, VaccinationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::command::Command;

use super::{Category, FarmState, LabourerStatus, LinkedCompany, Money, TransactionKind, WageType};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

macro_rules! farm_command {
    ($($name:ident => $label:literal),* $(,)?) => {
        $(
            impl Command for $name {
                type Aggregate = FarmState;

                fn command_type(&self) -> &'static str {
                    $label
                }
            }
        )*
    };
}

farm_command! {
    RecordEggProduction => "record_egg_production",
    RecordEggSale => "record_egg_sale",
    PurchaseFeed => "purchase_feed",
    ConsumeFeed => "consume_feed",
    AddFlock => "add_flock",
    UpdateFlock => "update_flock",
    RecordMortality => "record_mortality",
    ScheduleVaccination => "schedule_vaccination",
    RescheduleVaccination => "reschedule_vaccination",
    CompleteVaccination => "complete_vaccination",
    ReportDisease => "report_disease",
    ResolveDisease => "resolve_disease",
    AddTransaction => "add_transaction",
    SetInitialBalance => "set_initial_balance",
    UpdateEggPrice => "update_egg_price",
    PurchaseBirds => "purchase_birds",
    HireLabourer => "hire_labourer",
    SetLabourerStatus => "set_labourer_status",
    PayLabourer => "pay_labourer",
}

/// A single-field change to a flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FlockUpdate {
    SetActive(bool),
    RenameBreed(String),
    SetAgeWeeks(u32),
    SetStartDate(NaiveDate),
}

/// Command to record a day's egg collection.
#[derive(Debug, Clone)]
pub struct RecordEggProduction {
    pub flock_id: FlockId,
    pub date: NaiveDate,
    pub total_eggs: u64,
    pub broken_eggs: u64,
}

impl RecordEggProduction {
    /// Creates a collection with no broken eggs, dated today.
    pub fn new(flock_id: FlockId, total_eggs: u64) -> Self {
        Self {
            flock_id,
            date: today(),
            total_eggs,
            broken_eggs: 0,
        }
    }

    pub fn with_broken(mut self, broken_eggs: u64) -> Self {
        self.broken_eggs = broken_eggs;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to sell eggs by the Peti.
#[derive(Debug, Clone)]
pub struct RecordEggSale {
    pub peti_count: u64,
    pub price_per_peti: Money,
    pub buyer_name: String,
    pub date: NaiveDate,
}

impl RecordEggSale {
    pub fn new(peti_count: u64, price_per_peti: Money, buyer_name: impl Into<String>) -> Self {
        Self {
            peti_count,
            price_per_peti,
            buyer_name: buyer_name.into(),
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to buy feed bags.
#[derive(Debug, Clone)]
pub struct PurchaseFeed {
    pub feed_type: String,
    pub bags: u32,
    pub cost_per_bag: Money,
    pub date: NaiveDate,
}

impl PurchaseFeed {
    pub fn new(feed_type: impl Into<String>, bags: u32, cost_per_bag: Money) -> Self {
        Self {
            feed_type: feed_type.into(),
            bags,
            cost_per_bag,
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to record feed given to a flock.
#[derive(Debug, Clone)]
pub struct ConsumeFeed {
    pub feed_type: String,
    pub bags_used: Decimal,
    pub flock_id: FlockId,
    pub date: NaiveDate,
}

impl ConsumeFeed {
    pub fn new(feed_type: impl Into<String>, bags_used: Decimal, flock_id: FlockId) -> Self {
        Self {
            feed_type: feed_type.into(),
            bags_used,
            flock_id,
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to register a flock.
#[derive(Debug, Clone)]
pub struct AddFlock {
    pub breed: String,
    pub number_of_layers: u32,
    pub age_weeks: u32,
    pub start_date: NaiveDate,
    pub is_active: bool,
}

impl AddFlock {
    /// Creates an active flock starting today.
    pub fn new(breed: impl Into<String>, number_of_layers: u32, age_weeks: u32) -> Self {
        Self {
            breed: breed.into(),
            number_of_layers,
            age_weeks,
            start_date: today(),
            is_active: true,
        }
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Command to change one field of a flock.
#[derive(Debug, Clone)]
pub struct UpdateFlock {
    pub flock_id: FlockId,
    pub update: FlockUpdate,
}

impl UpdateFlock {
    pub fn new(flock_id: FlockId, update: FlockUpdate) -> Self {
        Self { flock_id, update }
    }
}

/// Command to record bird deaths in a flock.
#[derive(Debug, Clone)]
pub struct RecordMortality {
    pub flock_id: FlockId,
    pub count: u32,
}

impl RecordMortality {
    pub fn new(flock_id: FlockId, count: u32) -> Self {
        Self { flock_id, count }
    }
}

/// Command to plan a vaccination.
#[derive(Debug, Clone)]
pub struct ScheduleVaccination {
    pub flock_id: FlockId,
    pub vaccine_name: String,
    pub scheduled_date: NaiveDate,
    pub notes: String,
}

impl ScheduleVaccination {
    pub fn new(flock_id: FlockId, vaccine_name: impl Into<String>, scheduled_date: NaiveDate) -> Self {
        Self {
            flock_id,
            vaccine_name: vaccine_name.into(),
            scheduled_date,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Command to move a vaccination to another date.
#[derive(Debug, Clone)]
pub struct RescheduleVaccination {
    pub vaccination_id: VaccinationId,
    pub scheduled_date: NaiveDate,
}

impl RescheduleVaccination {
    pub fn new(vaccination_id: VaccinationId, scheduled_date: NaiveDate) -> Self {
        Self {
            vaccination_id,
            scheduled_date,
        }
    }
}

/// Command to mark a vaccination as given.
#[derive(Debug, Clone)]
pub struct CompleteVaccination {
    pub vaccination_id: VaccinationId,
    pub administered_date: NaiveDate,
}

impl CompleteVaccination {
    /// Completes the vaccination as of today.
    pub fn new(vaccination_id: VaccinationId) -> Self {
        Self {
            vaccination_id,
            administered_date: today(),
        }
    }

    pub fn on(mut self, administered_date: NaiveDate) -> Self {
        self.administered_date = administered_date;
        self
    }
}

/// Command to report a disease outbreak.
#[derive(Debug, Clone)]
pub struct ReportDisease {
    pub flock_id: FlockId,
    pub disease_name: String,
    pub date_detected: NaiveDate,
    pub affected_birds: u32,
    pub treatment_cost: Money,
    pub treatment: String,
}

impl ReportDisease {
    /// Creates a report detected today with no treatment cost.
    pub fn new(flock_id: FlockId, disease_name: impl Into<String>, affected_birds: u32) -> Self {
        Self {
            flock_id,
            disease_name: disease_name.into(),
            date_detected: today(),
            affected_birds,
            treatment_cost: Money::zero(),
            treatment: String::new(),
        }
    }

    pub fn with_treatment(mut self, treatment: impl Into<String>, cost: Money) -> Self {
        self.treatment = treatment.into();
        self.treatment_cost = cost;
        self
    }

    pub fn on(mut self, date_detected: NaiveDate) -> Self {
        self.date_detected = date_detected;
        self
    }
}

/// Command to close a disease record.
#[derive(Debug, Clone)]
pub struct ResolveDisease {
    pub disease_id: DiseaseRecordId,
}

impl ResolveDisease {
    pub fn new(disease_id: DiseaseRecordId) -> Self {
        Self { disease_id }
    }
}

/// Command to post a manual ledger entry.
#[derive(Debug, Clone)]
pub struct AddTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: Money,
    pub source: String,
    pub linked_company: LinkedCompany,
    pub description: String,
    pub category: Category,
}

impl AddTransaction {
    /// Creates a manual entry with an outside party, dated today.
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        source: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            date: today(),
            kind,
            amount,
            source: source.into(),
            linked_company: LinkedCompany::External,
            description: String::new(),
            category,
        }
    }

    pub fn credit(amount: Money, source: impl Into<String>, category: Category) -> Self {
        Self::new(TransactionKind::Credit, amount, source, category)
    }

    pub fn debit(amount: Money, source: impl Into<String>, category: Category) -> Self {
        Self::new(TransactionKind::Debit, amount, source, category)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn linked_to(mut self, linked_company: LinkedCompany) -> Self {
        self.linked_company = linked_company;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to credit funds advanced by the financier.
#[derive(Debug, Clone)]
pub struct SetInitialBalance {
    pub amount: Money,
    pub date: NaiveDate,
}

impl SetInitialBalance {
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to change the current price per Peti.
#[derive(Debug, Clone)]
pub struct UpdateEggPrice {
    pub price_per_peti: Money,
}

impl UpdateEggPrice {
    pub fn new(price_per_peti: Money) -> Self {
        Self { price_per_peti }
    }
}

/// Command to buy birds and register them as a new flock.
#[derive(Debug, Clone)]
pub struct PurchaseBirds {
    pub breed: String,
    pub birds: u32,
    pub price_per_bird: Money,
    pub age_weeks: u32,
    pub date: NaiveDate,
}

impl PurchaseBirds {
    pub fn new(breed: impl Into<String>, birds: u32, price_per_bird: Money, age_weeks: u32) -> Self {
        Self {
            breed: breed.into(),
            birds,
            price_per_bird,
            age_weeks,
            date: today(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Command to take on a worker.
#[derive(Debug, Clone)]
pub struct HireLabourer {
    pub name: String,
    pub role: String,
    pub wage_type: WageType,
    pub wage_amount: Money,
    pub joining_date: NaiveDate,
    pub phone: String,
}

impl HireLabourer {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        wage_type: WageType,
        wage_amount: Money,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            wage_type,
            wage_amount,
            joining_date: today(),
            phone: String::new(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn joining(mut self, joining_date: NaiveDate) -> Self {
        self.joining_date = joining_date;
        self
    }
}

/// Command to activate or deactivate a worker.
#[derive(Debug, Clone)]
pub struct SetLabourerStatus {
    pub labourer_id: LabourerId,
    pub status: LabourerStatus,
}

impl SetLabourerStatus {
    pub fn new(labourer_id: LabourerId, status: LabourerStatus) -> Self {
        Self {
            labourer_id,
            status,
        }
    }
}

/// Command to pay a worker.
#[derive(Debug, Clone)]
pub struct PayLabourer {
    pub labourer_id: LabourerId,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
}

impl PayLabourer {
    pub fn new(labourer_id: LabourerId, amount: Money) -> Self {
        Self {
            labourer_id,
            amount,
            date: today(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}
