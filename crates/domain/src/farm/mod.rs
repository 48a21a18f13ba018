//! Farm aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod inventory;
mod ledger;
mod records;
mod service;
mod status;
mod values;

pub use aggregate::FarmState;
pub use commands::*;
pub use events::{
    DiseaseReportedData, DiseaseResolvedData, EggPriceUpdatedData, EggsProducedData,
    EggsSoldData, FarmEvent, FeedConsumedData, FeedPurchasedData, FlockAddedData,
    FlockUpdatedData, LabourPaidData, LabourerHiredData, LabourerStatusChangedData,
    MortalityRecordedData, TransactionRecordedData, VaccinationCompletedData,
    VaccinationRescheduledData, VaccinationScheduledData,
};
pub use inventory::{EggInventory, FeedStock};
pub use ledger::BankAccount;
pub use records::{
    DiseaseRecord, EggPrice, EggProduction, EggSale, FeedConsumption, FeedPurchase, Flock,
    LabourPayment, Labourer, Transaction, Vaccination,
};
pub use service::FarmService;
pub use status::{DiseaseStatus, LabourerStatus, VaccinationStatus};
pub use values::{
    Category, EGGS_PER_PETI, FEED_BAG_KG, LinkedCompany, Money, TransactionKind, UnknownVariant,
    WageType,
};

use common::{DiseaseRecordId, LabourerId, VaccinationId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during farm operations.
///
/// All of these are rejections: the state is left untouched.
#[derive(Debug, Error)]
pub enum FarmError {
    /// A required text field is empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A count is zero where a positive count is needed.
    #[error("Invalid {field}: must be greater than 0")]
    InvalidQuantity { field: &'static str },

    /// A money amount is out of range.
    #[error("Invalid {field}: {amount}")]
    InvalidAmount { field: &'static str, amount: Money },

    /// A computed total or the resulting balance does not fit.
    #[error("{field} is too large")]
    AmountOverflow { field: &'static str },

    #[error("Broken eggs ({broken}) cannot exceed total eggs ({total})")]
    BrokenEggsExceedTotal { broken: u64, total: u64 },

    /// Selling more Peti than are in inventory.
    #[error("Insufficient eggs: requested {requested} peti, only {available} peti available")]
    InsufficientEggs { requested: u64, available: u64 },

    #[error("Feed type not in stock: {feed_type}")]
    FeedNotStocked { feed_type: String },

    #[error(
        "Insufficient {feed_type}: requested {requested} bags, only {available} bags available"
    )]
    InsufficientFeed {
        feed_type: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Mortality ({requested}) exceeds flock size ({available} layers)")]
    MortalityExceedsFlock { requested: u32, available: u32 },

    #[error("Vaccination not found: {0}")]
    VaccinationNotFound(VaccinationId),

    #[error("Disease record not found: {0}")]
    DiseaseRecordNotFound(DiseaseRecordId),

    #[error("Labourer not found: {0}")]
    LabourerNotFound(LabourerId),

    /// The record is not in a state that allows the action.
    #[error("Invalid state transition: cannot {action} a {entity} that is {current}")]
    InvalidStateTransition {
        entity: &'static str,
        current: String,
        action: &'static str,
    },
}
