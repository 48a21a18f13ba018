//! Derived figures over the farm state.
//!
//! Everything here is computed on demand from a `&FarmState`; nothing is
//! cached or written back.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use domain::{
    Category, DiseaseStatus, EGGS_PER_PETI, FarmState, Money, Vaccination, VaccinationStatus,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Feed types with fewer bags than this are reported as low.
pub const LOW_FEED_STOCK_BAGS: u32 = 10;

/// Number of upcoming vaccinations listed on the summary.
pub const UPCOMING_VACCINATION_LIMIT: usize = 5;

/// Dashboard figures as of a given day.
#[derive(Debug, Clone, Serialize)]
pub struct FarmSummary {
    pub as_of: NaiveDate,
    pub balance: Money,
    pub borrowed_amount: Money,
    pub active_flocks: usize,
    pub active_layers: u64,
    pub total_mortality: u64,
    pub peti_in_stock: u64,
    pub loose_eggs: u64,
    pub egg_price: Money,
    pub total_egg_revenue: Money,
    pub total_feed_cost: Money,
    pub medication_cost: Money,
    /// Egg revenue less feed and medication spend.
    pub profit_loss: Money,
    pub feed_bags_in_stock: Decimal,
    pub feed_kg_in_stock: Decimal,
    pub low_stock_feed: Vec<String>,
    pub upcoming_vaccinations: Vec<Vaccination>,
    pub overdue_vaccinations: Vec<Vaccination>,
    pub active_diseases: usize,
    pub total_credits: Money,
    pub total_debits: Money,
}

impl FarmSummary {
    /// Computes the summary for `today`.
    #[tracing::instrument(skip(state))]
    pub fn from_state(state: &FarmState, today: NaiveDate) -> Self {
        let total_egg_revenue = state.egg_sales().iter().map(|s| s.total_amount).sum();
        let total_feed_cost = state.feed_purchases().iter().map(|p| p.total_cost).sum();
        let medication_cost = debits_in(state, Category::Medication);

        let low_threshold = Decimal::from(LOW_FEED_STOCK_BAGS);
        let low_stock_feed = state
            .feed_stocks()
            .filter(|s| s.bags_in_stock < low_threshold)
            .map(|s| s.feed_type.clone())
            .collect();

        let upcoming_vaccinations = state
            .vaccinations()
            .iter()
            .filter(|v| v.status == VaccinationStatus::Scheduled && v.scheduled_date > today)
            .take(UPCOMING_VACCINATION_LIMIT)
            .cloned()
            .collect();

        let inventory = state.egg_inventory();

        Self {
            as_of: today,
            balance: state.balance(),
            borrowed_amount: state.bank_account().borrowed_amount,
            active_flocks: state.active_flocks().count(),
            active_layers: state.active_layers(),
            total_mortality: state.flocks().iter().map(|f| u64::from(f.mortality)).sum(),
            peti_in_stock: inventory.total_peti,
            loose_eggs: inventory.remaining_eggs,
            egg_price: state.egg_price().price_per_peti,
            total_egg_revenue,
            total_feed_cost,
            medication_cost,
            profit_loss: total_egg_revenue - total_feed_cost - medication_cost,
            feed_bags_in_stock: state.total_feed_bags(),
            feed_kg_in_stock: state.feed_stocks().map(|s| s.kilograms()).sum(),
            low_stock_feed,
            upcoming_vaccinations,
            overdue_vaccinations: state.overdue_vaccinations(today).cloned().collect(),
            active_diseases: state
                .disease_records()
                .iter()
                .filter(|r| r.status == DiseaseStatus::Active)
                .count(),
            total_credits: state.total_credits(),
            total_debits: state.total_debits(),
        }
    }
}

fn debits_in(state: &FarmState, category: Category) -> Money {
    state
        .transactions()
        .iter()
        .filter(|t| t.is_debit() && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Debit spend grouped by category.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseBreakdown {
    /// Categories with spend, in vocabulary order.
    pub entries: Vec<(Category, Money)>,
    pub total: Money,
}

impl ExpenseBreakdown {
    pub fn from_state(state: &FarmState) -> Self {
        let entries: Vec<_> = Category::ALL
            .into_iter()
            .map(|category| (category, debits_in(state, category)))
            .filter(|(_, amount)| amount.is_positive())
            .collect();
        let total = entries.iter().map(|(_, amount)| *amount).sum();

        Self { entries, total }
    }

    /// Returns the spend for one category (zero if none).
    pub fn amount_for(&self, category: Category) -> Money {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, amount)| *amount)
            .unwrap_or_default()
    }
}

/// Lifetime production and sales figures.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionStats {
    pub total_eggs: u64,
    pub broken_eggs: u64,
    pub good_eggs: u64,
    /// Broken eggs as a percentage of all collected, to two places.
    pub broken_percentage: Decimal,
    pub peti_sold: u64,
    pub eggs_sold: u64,
    pub revenue: Money,
    /// Rounded to whole rupees; zero when nothing has been sold.
    pub average_price_per_peti: Money,
}

impl ProductionStats {
    pub fn from_state(state: &FarmState) -> Self {
        let productions = state.egg_productions();
        let total_eggs: u64 = productions.iter().map(|p| p.total_eggs).sum();
        let broken_eggs: u64 = productions.iter().map(|p| p.broken_eggs).sum();
        let good_eggs: u64 = productions.iter().map(|p| p.good_eggs).sum();

        let broken_percentage = if total_eggs > 0 {
            (Decimal::from(broken_eggs) * Decimal::ONE_HUNDRED / Decimal::from(total_eggs))
                .round_dp(2)
        } else {
            Decimal::ZERO
        };

        let peti_sold: u64 = state.egg_sales().iter().map(|s| s.peti_count).sum();
        let revenue: Money = state.egg_sales().iter().map(|s| s.total_amount).sum();

        let average_price_per_peti = if peti_sold > 0 {
            let average = Decimal::from(revenue.rupees()) / Decimal::from(peti_sold);
            Money::from_rupees(average.round().to_i64().unwrap_or_default())
        } else {
            Money::zero()
        };

        Self {
            total_eggs,
            broken_eggs,
            good_eggs,
            broken_percentage,
            peti_sold,
            eggs_sold: peti_sold * EGGS_PER_PETI,
            revenue,
            average_price_per_peti,
        }
    }
}

/// Total spent on each feed type across all purchases.
pub fn feed_cost_by_type(state: &FarmState) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for purchase in state.feed_purchases() {
        *totals
            .entry(purchase.feed_type.clone())
            .or_insert_with(Money::zero) += purchase.total_cost;
    }
    totals
}

/// Good eggs collected per day for the `days` days ending `today`,
/// oldest first.
pub fn daily_production(state: &FarmState, today: NaiveDate, days: u64) -> Vec<(NaiveDate, u64)> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| {
            let good = state
                .egg_productions()
                .iter()
                .filter(|p| p.date == day)
                .map(|p| p.good_eggs)
                .sum();
            (day, good)
        })
        .collect()
}

/// Revenue against spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyProfitAndLoss {
    pub year: i32,
    pub month: u32,
    /// Egg sales.
    pub revenue: Money,
    /// All debits.
    pub expenses: Money,
    pub profit: Money,
}

impl MonthlyProfitAndLoss {
    /// Returns a short label such as `May 2026`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Profit and loss for the `months` calendar months ending with the month of
/// `today`, oldest first.
pub fn monthly_profit_and_loss(
    state: &FarmState,
    today: NaiveDate,
    months: u32,
) -> Vec<MonthlyProfitAndLoss> {
    let current = today.year() * 12 + today.month0() as i32;

    (0..months as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            let (year, month) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);
            let in_month = |date: &NaiveDate| date.year() == year && date.month() == month;

            let revenue: Money = state
                .egg_sales()
                .iter()
                .filter(|s| in_month(&s.date))
                .map(|s| s.total_amount)
                .sum();
            let expenses: Money = state
                .transactions()
                .iter()
                .filter(|t| t.is_debit() && in_month(&t.date))
                .map(|t| t.amount)
                .sum();

            MonthlyProfitAndLoss {
                year,
                month,
                revenue,
                expenses,
                profit: revenue - expenses,
            }
        })
        .collect()
}
