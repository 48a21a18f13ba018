//! Domain layer for the farm ledger.
//!
//! This crate provides:
//! - Aggregate trait for state persisted as a single document
//! - DomainEvent trait for domain events
//! - Command trait and CommandHandler for load, decide, apply and persist
//! - The farm state engine: flocks, eggs, feed, health, labour and the ledger

pub mod aggregate;
pub mod command;
pub mod error;
pub mod farm;

pub use aggregate::{Aggregate, DomainEvent};
pub use command::{Command, CommandHandler, CommandResult};
pub use error::DomainError;
pub use farm::{
    AddFlock, AddTransaction, BankAccount, Category, CompleteVaccination, ConsumeFeed,
    DiseaseRecord, DiseaseStatus, EGGS_PER_PETI, EggInventory, EggPrice, EggProduction, EggSale,
    FEED_BAG_KG, FarmError, FarmEvent, FarmService, FarmState, FeedConsumption, FeedPurchase,
    FeedStock, Flock, FlockUpdate, HireLabourer, LabourPayment, Labourer, LabourerStatus,
    LinkedCompany, Money, PayLabourer, PurchaseBirds, PurchaseFeed, RecordEggProduction,
    RecordEggSale, RecordMortality, ReportDisease, RescheduleVaccination, ResolveDisease,
    ScheduleVaccination, SetInitialBalance, SetLabourerStatus, Transaction, TransactionKind,
    UnknownVariant, UpdateEggPrice, UpdateFlock, Vaccination, VaccinationStatus, WageType,
};
