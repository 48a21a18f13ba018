//! Lifecycle states for vaccinations, disease records and labourers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The state of a vaccination.
///
/// State transitions:
/// ```text
/// Scheduled ──────────────► Completed
///     │                        ▲
///     └──► (Overdue) ──────────┘
/// ```
///
/// `Overdue` is never written by the engine: a scheduled vaccination whose
/// date has passed is *read* as overdue (see [`VaccinationStatus::effective`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VaccinationStatus {
    /// Planned, not yet given.
    #[default]
    Scheduled,

    /// Given to the flock (terminal state).
    Completed,

    /// Scheduled date has passed without completion.
    Overdue,
}

impl VaccinationStatus {
    /// Returns the status as presented on `today`.
    ///
    /// A stored `Scheduled` status with a date strictly before `today` reads
    /// as `Overdue`. Nothing is mutated.
    pub fn effective(&self, scheduled_date: NaiveDate, today: NaiveDate) -> VaccinationStatus {
        match self {
            VaccinationStatus::Scheduled if scheduled_date < today => VaccinationStatus::Overdue,
            other => *other,
        }
    }

    /// Returns true if the vaccination can still be moved to another date.
    pub fn can_reschedule(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VaccinationStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VaccinationStatus::Scheduled => "scheduled",
            VaccinationStatus::Completed => "completed",
            VaccinationStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The state of a disease record: `Active ──► Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseStatus {
    /// Outbreak under treatment.
    #[default]
    Active,

    /// Outbreak over (terminal state).
    Resolved,
}

impl DiseaseStatus {
    /// Returns true if the record can be resolved in this state.
    pub fn can_resolve(&self) -> bool {
        matches!(self, DiseaseStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseStatus::Active => "active",
            DiseaseStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for DiseaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment status of a labourer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabourerStatus {
    #[default]
    Active,
    Inactive,
}

impl LabourerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabourerStatus::Active => "active",
            LabourerStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for LabourerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LabourerStatus {
    type Err = super::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LabourerStatus::Active),
            "inactive" => Ok(LabourerStatus::Inactive),
            other => Err(super::UnknownVariant::new("labourer status", other)),
        }
    }
}
