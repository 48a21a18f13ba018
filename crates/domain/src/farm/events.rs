//! Farm domain events.

use chrono::{DateTime, NaiveDate, Utc};
use common::{DiseaseRecordId, FeedStockId, FlockId, LabourerId, VaccinationId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{
    DiseaseRecord, EggProduction, EggSale, FeedConsumption, FeedPurchase, Flock, FlockUpdate,
    LabourPayment, Labourer, LabourerStatus, Money, Transaction, Vaccination,
};

/// Events that can occur on the farm state.
///
/// Every derived value (ids, Peti split, totals) is computed before the event
/// is created, so applying an event never needs to make a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FarmEvent {
    /// A ledger entry was posted.
    TransactionRecorded(TransactionRecordedData),

    /// Eggs were collected from a flock.
    EggsProduced(EggsProducedData),

    /// Eggs were sold by the Peti.
    EggsSold(EggsSoldData),

    /// Feed bags were bought.
    FeedPurchased(FeedPurchasedData),

    /// Feed was fed to a flock.
    FeedConsumed(FeedConsumedData),

    /// A flock was registered.
    FlockAdded(FlockAddedData),

    /// A single field of a flock changed.
    FlockUpdated(FlockUpdatedData),

    /// Birds died.
    MortalityRecorded(MortalityRecordedData),

    VaccinationScheduled(VaccinationScheduledData),

    VaccinationRescheduled(VaccinationRescheduledData),

    VaccinationCompleted(VaccinationCompletedData),

    /// A disease outbreak was reported.
    DiseaseReported(DiseaseReportedData),

    DiseaseResolved(DiseaseResolvedData),

    /// The selling price per Peti changed.
    EggPriceUpdated(EggPriceUpdatedData),

    LabourerHired(LabourerHiredData),

    LabourerStatusChanged(LabourerStatusChangedData),

    /// A wage was paid.
    LabourPaid(LabourPaidData),
}

impl DomainEvent for FarmEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FarmEvent::TransactionRecorded(_) => "TransactionRecorded",
            FarmEvent::EggsProduced(_) => "EggsProduced",
            FarmEvent::EggsSold(_) => "EggsSold",
            FarmEvent::FeedPurchased(_) => "FeedPurchased",
            FarmEvent::FeedConsumed(_) => "FeedConsumed",
            FarmEvent::FlockAdded(_) => "FlockAdded",
            FarmEvent::FlockUpdated(_) => "FlockUpdated",
            FarmEvent::MortalityRecorded(_) => "MortalityRecorded",
            FarmEvent::VaccinationScheduled(_) => "VaccinationScheduled",
            FarmEvent::VaccinationRescheduled(_) => "VaccinationRescheduled",
            FarmEvent::VaccinationCompleted(_) => "VaccinationCompleted",
            FarmEvent::DiseaseReported(_) => "DiseaseReported",
            FarmEvent::DiseaseResolved(_) => "DiseaseResolved",
            FarmEvent::EggPriceUpdated(_) => "EggPriceUpdated",
            FarmEvent::LabourerHired(_) => "LabourerHired",
            FarmEvent::LabourerStatusChanged(_) => "LabourerStatusChanged",
            FarmEvent::LabourPaid(_) => "LabourPaid",
        }
    }
}

/// Data for TransactionRecorded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecordedData {
    pub transaction: Transaction,

    /// When the bank account was touched.
    pub recorded_at: DateTime<Utc>,
}

/// Data for EggsProduced event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EggsProducedData {
    /// The production record, with its Peti split already computed.
    pub production: EggProduction,

    pub recorded_at: DateTime<Utc>,
}

/// Data for EggsSold event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EggsSoldData {
    pub sale: EggSale,

    pub recorded_at: DateTime<Utc>,
}

/// Data for FeedPurchased event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPurchasedData {
    pub purchase: FeedPurchase,

    /// Id given to the stock entry if this feed type is not stocked yet.
    pub stock_id: FeedStockId,
}

/// Data for FeedConsumed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConsumedData {
    pub consumption: FeedConsumption,
}

/// Data for FlockAdded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockAddedData {
    pub flock: Flock,
}

/// Data for FlockUpdated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockUpdatedData {
    pub flock_id: FlockId,

    pub update: FlockUpdate,
}

/// Data for MortalityRecorded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortalityRecordedData {
    pub flock_id: FlockId,

    /// Number of birds that died.
    pub count: u32,
}

/// Data for VaccinationScheduled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationScheduledData {
    pub vaccination: Vaccination,
}

/// Data for VaccinationRescheduled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationRescheduledData {
    pub vaccination_id: VaccinationId,

    pub previous_date: NaiveDate,

    pub scheduled_date: NaiveDate,
}

/// Data for VaccinationCompleted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationCompletedData {
    pub vaccination_id: VaccinationId,

    pub administered_date: NaiveDate,
}

/// Data for DiseaseReported event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseReportedData {
    pub record: DiseaseRecord,
}

/// Data for DiseaseResolved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseResolvedData {
    pub disease_id: DiseaseRecordId,

    pub resolved_at: DateTime<Utc>,
}

/// Data for EggPriceUpdated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EggPriceUpdatedData {
    pub price_per_peti: Money,

    pub updated_at: DateTime<Utc>,
}

/// Data for LabourerHired event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabourerHiredData {
    pub labourer: Labourer,
}

/// Data for LabourerStatusChanged event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabourerStatusChangedData {
    pub labourer_id: LabourerId,

    pub status: LabourerStatus,
}

/// Data for LabourPaid event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabourPaidData {
    pub payment: LabourPayment,
}

// Convenience constructors for events
impl FarmEvent {
    /// Creates a TransactionRecorded event.
    pub fn transaction_recorded(transaction: Transaction) -> Self {
        FarmEvent::TransactionRecorded(TransactionRecordedData {
            transaction,
            recorded_at: Utc::now(),
        })
    }

    /// Creates an EggsProduced event.
    pub fn eggs_produced(production: EggProduction) -> Self {
        FarmEvent::EggsProduced(EggsProducedData {
            production,
            recorded_at: Utc::now(),
        })
    }

    /// Creates an EggsSold event.
    pub fn eggs_sold(sale: EggSale) -> Self {
        FarmEvent::EggsSold(EggsSoldData {
            sale,
            recorded_at: Utc::now(),
        })
    }

    /// Creates a FeedPurchased event.
    pub fn feed_purchased(purchase: FeedPurchase, stock_id: FeedStockId) -> Self {
        FarmEvent::FeedPurchased(FeedPurchasedData { purchase, stock_id })
    }

    /// Creates a FeedConsumed event.
    pub fn feed_consumed(consumption: FeedConsumption) -> Self {
        FarmEvent::FeedConsumed(FeedConsumedData { consumption })
    }

    /// Creates a FlockAdded event.
    pub fn flock_added(flock: Flock) -> Self {
        FarmEvent::FlockAdded(FlockAddedData { flock })
    }

    /// Creates a FlockUpdated event.
    pub fn flock_updated(flock_id: FlockId, update: FlockUpdate) -> Self {
        FarmEvent::FlockUpdated(FlockUpdatedData { flock_id, update })
    }

    /// Creates a MortalityRecorded event.
    pub fn mortality_recorded(flock_id: FlockId, count: u32) -> Self {
        FarmEvent::MortalityRecorded(MortalityRecordedData { flock_id, count })
    }

    /// Creates a VaccinationScheduled event.
    pub fn vaccination_scheduled(vaccination: Vaccination) -> Self {
        FarmEvent::VaccinationScheduled(VaccinationScheduledData { vaccination })
    }

    /// Creates a VaccinationRescheduled event.
    pub fn vaccination_rescheduled(
        vaccination_id: VaccinationId,
        previous_date: NaiveDate,
        scheduled_date: NaiveDate,
    ) -> Self {
        FarmEvent::VaccinationRescheduled(VaccinationRescheduledData {
            vaccination_id,
            previous_date,
            scheduled_date,
        })
    }

    /// Creates a VaccinationCompleted event.
    pub fn vaccination_completed(vaccination_id: VaccinationId, administered_date: NaiveDate) -> Self {
        FarmEvent::VaccinationCompleted(VaccinationCompletedData {
            vaccination_id,
            administered_date,
        })
    }

    /// Creates a DiseaseReported event.
    pub fn disease_reported(record: DiseaseRecord) -> Self {
        FarmEvent::DiseaseReported(DiseaseReportedData { record })
    }

    /// Creates a DiseaseResolved event.
    pub fn disease_resolved(disease_id: DiseaseRecordId) -> Self {
        FarmEvent::DiseaseResolved(DiseaseResolvedData {
            disease_id,
            resolved_at: Utc::now(),
        })
    }

    /// Creates an EggPriceUpdated event.
    pub fn egg_price_updated(price_per_peti: Money) -> Self {
        FarmEvent::EggPriceUpdated(EggPriceUpdatedData {
            price_per_peti,
            updated_at: Utc::now(),
        })
    }

    /// Creates a LabourerHired event.
    pub fn labourer_hired(labourer: Labourer) -> Self {
        FarmEvent::LabourerHired(LabourerHiredData { labourer })
    }

    /// Creates a LabourerStatusChanged event.
    pub fn labourer_status_changed(labourer_id: LabourerId, status: LabourerStatus) -> Self {
        FarmEvent::LabourerStatusChanged(LabourerStatusChangedData {
            labourer_id,
            status,
        })
    }

    /// Creates a LabourPaid event.
    pub fn labour_paid(payment: LabourPayment) -> Self {
        FarmEvent::LabourPaid(LabourPaidData { payment })
    }
}
