//! Shared identifier types used across the farm ledger crates.

pub mod types;

pub use types::{
    DiseaseRecordId, FeedConsumptionId, FeedPurchaseId, FeedStockId, FlockId, LabourPaymentId,
    LabourerId, ProductionId, SaleId, TransactionId, VaccinationId,
};
