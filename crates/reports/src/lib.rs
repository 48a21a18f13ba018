//! Read side of the farm ledger.
//!
//! Nothing in this crate mutates the farm state:
//! - [`export`] renders record collections as delimited text
//! - [`summary`] derives dashboard figures and breakdowns

pub mod error;
pub mod export;
pub mod summary;

pub use error::{ReportError, Result};
pub use export::{ExportKind, egg_sales_csv, feed_purchases_csv, transactions_csv};
pub use summary::{
    ExpenseBreakdown, FarmSummary, MonthlyProfitAndLoss, ProductionStats, daily_production,
    feed_cost_by_type, monthly_profit_and_loss,
};
