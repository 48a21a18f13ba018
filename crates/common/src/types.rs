use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
///
/// Each record kind gets its own type so a flock id can never be passed
/// where a transaction id is expected.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

record_id!(
    /// Identifier of a ledger transaction.
    TransactionId
);
record_id!(
    /// Identifier of a flock (one cohort of birds).
    FlockId
);
record_id!(
    /// Identifier of an egg production record.
    ProductionId
);
record_id!(
    /// Identifier of an egg sale.
    SaleId
);
record_id!(
    /// Identifier of a feed stock entry.
    FeedStockId
);
record_id!(
    /// Identifier of a feed purchase.
    FeedPurchaseId
);
record_id!(
    /// Identifier of a feed consumption record.
    FeedConsumptionId
);
record_id!(
    /// Identifier of a vaccination.
    VaccinationId
);
record_id!(
    /// Identifier of a disease record.
    DiseaseRecordId
);
record_id!(
    /// Identifier of a farm labourer.
    LabourerId
);
record_id!(
    /// Identifier of a wage payment.
    LabourPaymentId
);
