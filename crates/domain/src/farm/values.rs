//! Value objects and closed vocabularies for the farm domain.

use serde::{Deserialize, Serialize};

/// Number of eggs in one Peti.
pub const EGGS_PER_PETI: u64 = 360;

/// Weight of one feed bag in kilograms.
pub const FEED_BAG_KG: u32 = 50;

/// Money amount in whole rupees.
///
/// Balances may be negative; transaction amounts are always positive.
/// The operators saturate at the `i64` bounds. Decisions that could exceed
/// them use the `checked_*` methods instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a money amount from whole rupees.
    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in rupees.
    pub fn rupees(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute amount.
    pub fn abs(&self) -> Money {
        Self(self.0.saturating_abs())
    }

    /// Multiplies by a quantity. Returns None if the product does not fit.
    pub fn checked_multiply(&self, quantity: u64) -> Option<Money> {
        let quantity = i64::try_from(quantity).ok()?;
        self.0.checked_mul(quantity).map(Self)
    }

    pub fn checked_add(&self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(&self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < 0 {
            write!(f, "-Rs.{}", self.0.unsigned_abs())
        } else {
            write!(f, "Rs.{}", self.0)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into the farm account.
    Credit,
    /// Money leaving the farm account.
    Debit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "credit",
            TransactionKind::Debit => "debit",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(TransactionKind::Credit),
            "debit" => Ok(TransactionKind::Debit),
            other => Err(UnknownVariant::new("transaction type", other)),
        }
    }
}

/// Ledger category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FeedPurchase,
    EggSale,
    Medication,
    Labor,
    Utilities,
    Other,
    InitialBalance,
    BirdPurchase,
    LabourPayment,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 9] = [
        Category::FeedPurchase,
        Category::EggSale,
        Category::Medication,
        Category::Labor,
        Category::Utilities,
        Category::Other,
        Category::InitialBalance,
        Category::BirdPurchase,
        Category::LabourPayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FeedPurchase => "feed_purchase",
            Category::EggSale => "egg_sale",
            Category::Medication => "medication",
            Category::Labor => "labor",
            Category::Utilities => "utilities",
            Category::Other => "other",
            Category::InitialBalance => "initial_balance",
            Category::BirdPurchase => "bird_purchase",
            Category::LabourPayment => "labour_payment",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// External party a transaction is linked to.
///
/// None of these is owned by the farm; the Chairman companies are the
/// financier and suppliers the farm deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkedCompany {
    /// Feed supplier.
    #[serde(rename = "Chairman Feed")]
    ChairmanFeed,
    /// Chick supplier.
    #[serde(rename = "Chairman Hatchery")]
    ChairmanHatchery,
    /// Financier covering shortfalls.
    #[serde(rename = "Chairman Group")]
    ChairmanGroup,
    /// Any other party (egg buyers, vets, workers).
    External,
}

impl LinkedCompany {
    pub const ALL: [LinkedCompany; 4] = [
        LinkedCompany::ChairmanFeed,
        LinkedCompany::ChairmanHatchery,
        LinkedCompany::ChairmanGroup,
        LinkedCompany::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkedCompany::ChairmanFeed => "Chairman Feed",
            LinkedCompany::ChairmanHatchery => "Chairman Hatchery",
            LinkedCompany::ChairmanGroup => "Chairman Group",
            LinkedCompany::External => "External",
        }
    }
}

impl std::fmt::Display for LinkedCompany {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LinkedCompany {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkedCompany::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("linked company", s))
    }
}

/// How a labourer's wage is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageType {
    Daily,
    Monthly,
}

impl WageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WageType::Daily => "daily",
            WageType::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for WageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WageType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(WageType::Daily),
            "monthly" => Ok(WageType::Monthly),
            other => Err(UnknownVariant::new("wage type", other)),
        }
    }
}

/// Error returned when parsing a closed vocabulary from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {vocabulary}: {value}")]
pub struct UnknownVariant {
    pub vocabulary: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(vocabulary: &'static str, value: &str) -> Self {
        Self {
            vocabulary,
            value: value.to_string(),
        }
    }
}
