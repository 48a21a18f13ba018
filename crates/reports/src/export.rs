//! CSV export of ledger, sales and feed purchase records.
//!
//! Output is a header row of labels followed by one line per record, in the
//! order the records were entered. Every data field is double-quoted, lines
//! are separated by `\n` and there is no trailing newline. Embedded quotes
//! are doubled.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use domain::{EggSale, FarmState, FeedPurchase, Transaction};
use serde::Serialize;

use crate::{ReportError, Result};

const TRANSACTION_HEADERS: [&str; 7] = [
    "Date",
    "Type",
    "Amount",
    "Source",
    "Linked Company",
    "Description",
    "Category",
];

const EGG_SALE_HEADERS: [&str; 5] = [
    "Date",
    "Peti Count",
    "Price per Peti",
    "Total Amount",
    "Buyer Name",
];

const FEED_PURCHASE_HEADERS: [&str; 5] = ["Date", "Feed Type", "Bags", "Cost per Bag", "Total Cost"];

/// Record collections that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Transactions,
    EggSales,
    FeedPurchases,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [
        ExportKind::Transactions,
        ExportKind::EggSales,
        ExportKind::FeedPurchases,
    ];

    /// Returns the name used on the command line and in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Transactions => "transactions",
            ExportKind::EggSales => "egg_sales",
            ExportKind::FeedPurchases => "feed_purchases",
        }
    }

    /// Returns the header labels for this export.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ExportKind::Transactions => &TRANSACTION_HEADERS,
            ExportKind::EggSales => &EGG_SALE_HEADERS,
            ExportKind::FeedPurchases => &FEED_PURCHASE_HEADERS,
        }
    }

    /// Returns the file name for an export taken on `date`,
    /// e.g. `transactions_2026-05-01.csv`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}_{}.csv", self.as_str(), date.format("%Y-%m-%d"))
    }

    /// Renders this collection of `state`.
    #[tracing::instrument(skip(state))]
    pub fn render(&self, state: &FarmState) -> Result<String> {
        match self {
            ExportKind::Transactions => transactions_csv(state.transactions()),
            ExportKind::EggSales => egg_sales_csv(state.egg_sales()),
            ExportKind::FeedPurchases => feed_purchases_csv(state.feed_purchases()),
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ReportError::UnknownKind(s.to_string()))
    }
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    date: NaiveDate,
    kind: &'static str,
    amount: i64,
    source: &'a str,
    linked_company: &'static str,
    description: &'a str,
    category: &'static str,
}

#[derive(Serialize)]
struct EggSaleRow<'a> {
    date: NaiveDate,
    peti_count: u64,
    price_per_peti: i64,
    total_amount: i64,
    buyer_name: &'a str,
}

#[derive(Serialize)]
struct FeedPurchaseRow<'a> {
    date: NaiveDate,
    feed_type: &'a str,
    bags: u32,
    cost_per_bag: i64,
    total_cost: i64,
}

/// Renders ledger entries.
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String> {
    render(
        &TRANSACTION_HEADERS,
        transactions.iter().map(|t| TransactionRow {
            date: t.date,
            kind: t.kind.as_str(),
            amount: t.amount.rupees(),
            source: &t.source,
            linked_company: t.linked_company.as_str(),
            description: &t.description,
            category: t.category.as_str(),
        }),
    )
}

/// Renders egg sales.
pub fn egg_sales_csv(sales: &[EggSale]) -> Result<String> {
    render(
        &EGG_SALE_HEADERS,
        sales.iter().map(|s| EggSaleRow {
            date: s.date,
            peti_count: s.peti_count,
            price_per_peti: s.price_per_peti.rupees(),
            total_amount: s.total_amount.rupees(),
            buyer_name: &s.buyer_name,
        }),
    )
}

/// Renders feed purchases.
pub fn feed_purchases_csv(purchases: &[FeedPurchase]) -> Result<String> {
    render(
        &FEED_PURCHASE_HEADERS,
        purchases.iter().map(|p| FeedPurchaseRow {
            date: p.date,
            feed_type: &p.feed_type,
            bags: p.bags,
            cost_per_bag: p.cost_per_bag.rupees(),
            total_cost: p.total_cost.rupees(),
        }),
    )
}

fn render<R: Serialize>(headers: &[&str], rows: impl Iterator<Item = R>) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    let body = writer.into_inner().map_err(|e| e.into_error())?;
    let body = String::from_utf8(body)?;

    let mut out = headers.join(",");
    let body = body.trim_end_matches('\n');
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body);
    }
    Ok(out)
}
