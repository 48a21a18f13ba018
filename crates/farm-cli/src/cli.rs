//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use common::{DiseaseRecordId, FlockId, LabourerId, VaccinationId};
use domain::{Category, LabourerStatus, LinkedCompany, Money, TransactionKind, WageType};
use reports::ExportKind;
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "farm")]
#[command(about = "Ledger and inventory for a layer farm", version)]
pub struct Cli {
    /// Database connection string (overrides `DATABASE_URL`).
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Name of the farm state document (overrides `FARM_DOCUMENT`).
    #[arg(long, global = true)]
    pub document: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record eggs collected from a flock.
    Production(ProductionArgs),

    /// Sell eggs by the Peti.
    Sale(SaleArgs),

    #[command(subcommand)]
    Feed(FeedCommand),

    #[command(subcommand)]
    Flock(FlockCommand),

    #[command(subcommand)]
    Vaccination(VaccinationCommand),

    #[command(subcommand)]
    Disease(DiseaseCommand),

    #[command(subcommand)]
    Ledger(LedgerCommand),

    #[command(subcommand)]
    Price(PriceCommand),

    #[command(subcommand)]
    Birds(BirdsCommand),

    #[command(subcommand)]
    Labour(LabourCommand),

    /// Print dashboard figures.
    Summary(SummaryArgs),

    /// Write records to CSV files.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ProductionArgs {
    #[arg(long)]
    pub flock: FlockId,
    #[arg(long)]
    pub total: u64,
    #[arg(long, default_value_t = 0)]
    pub broken: u64,
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct SaleArgs {
    #[arg(long)]
    pub peti: u64,
    /// Price per Peti in rupees.
    #[arg(long, value_parser = parse_money)]
    pub price: Money,
    #[arg(long)]
    pub buyer: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum FeedCommand {
    /// Buy bags of feed.
    Purchase {
        #[arg(long = "type")]
        feed_type: String,
        #[arg(long)]
        bags: u32,
        #[arg(long, value_parser = parse_money)]
        cost_per_bag: Money,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Feed bags to a flock. Fractions are allowed.
    Consume {
        #[arg(long = "type")]
        feed_type: String,
        #[arg(long)]
        bags: Decimal,
        #[arg(long)]
        flock: FlockId,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlockCommand {
    /// Register a flock.
    Add {
        #[arg(long)]
        breed: String,
        #[arg(long)]
        layers: u32,
        #[arg(long, default_value_t = 0)]
        age_weeks: u32,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        inactive: bool,
    },
    /// Change one field of a flock.
    Update(FlockUpdateArgs),
    /// Record birds that died.
    Mortality {
        #[arg(long)]
        flock: FlockId,
        #[arg(long)]
        count: u32,
    },
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("field")
        .required(true)
        .args(["active", "breed", "age_weeks", "start_date"])
))]
pub struct FlockUpdateArgs {
    #[arg(long)]
    pub flock: FlockId,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub age_weeks: Option<u32>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum VaccinationCommand {
    Schedule {
        #[arg(long)]
        flock: FlockId,
        #[arg(long)]
        vaccine: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        notes: Option<String>,
    },
    Reschedule {
        id: VaccinationId,
        #[arg(long)]
        date: NaiveDate,
    },
    Complete {
        id: VaccinationId,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiseaseCommand {
    Report {
        #[arg(long)]
        flock: FlockId,
        #[arg(long)]
        disease: String,
        #[arg(long)]
        affected: u32,
        #[arg(long)]
        treatment: Option<String>,
        #[arg(long, value_parser = parse_money, default_value = "0")]
        cost: Money,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Resolve {
        id: DiseaseRecordId,
    },
}

#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    /// Post a manual credit or debit.
    Add {
        #[arg(long)]
        kind: TransactionKind,
        #[arg(long, value_parser = parse_money)]
        amount: Money,
        #[arg(long)]
        source: String,
        #[arg(long)]
        category: Category,
        #[arg(long, default_value = "External")]
        company: LinkedCompany,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Post the opening balance.
    InitialBalance {
        #[arg(value_parser = parse_money)]
        amount: Money,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// Set the selling price per Peti.
    Set {
        #[arg(value_parser = parse_money)]
        price: Money,
    },
}

#[derive(Subcommand, Debug)]
pub enum BirdsCommand {
    /// Buy birds and register them as a new flock.
    Purchase {
        #[arg(long)]
        breed: String,
        #[arg(long)]
        birds: u32,
        #[arg(long, value_parser = parse_money)]
        price_per_bird: Money,
        #[arg(long, default_value_t = 0)]
        age_weeks: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LabourCommand {
    Hire {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        wage_type: WageType,
        #[arg(long, value_parser = parse_money)]
        wage: Money,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        joining_date: Option<NaiveDate>,
    },
    Status {
        id: LabourerId,
        status: LabourerStatus,
    },
    Pay {
        id: LabourerId,
        #[arg(long, value_parser = parse_money)]
        amount: Money,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Months of profit and loss to include.
    #[arg(long, default_value_t = 6)]
    pub months: u32,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// What to export; all kinds when omitted.
    pub kind: Option<ExportKind>,

    /// Directory the files are written to.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

/// Parses a whole-rupee amount.
pub fn parse_money(raw: &str) -> Result<Money, String> {
    let trimmed = raw.trim().trim_start_matches("Rs.");
    trimmed
        .parse::<i64>()
        .map(Money::from_rupees)
        .map_err(|_| format!("not a whole rupee amount: {raw}"))
}
