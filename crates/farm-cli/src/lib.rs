//! Command-line front end for the farm ledger.
//!
//! Every invocation loads the farm document, runs one operation and writes
//! the result back before printing what changed.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use domain::{
    AddFlock, AddTransaction, CommandResult, CompleteVaccination, ConsumeFeed, FarmService,
    FarmState, FlockUpdate, HireLabourer, PayLabourer, PurchaseBirds, PurchaseFeed,
    RecordEggProduction, RecordEggSale, RecordMortality, ReportDisease, RescheduleVaccination,
    ResolveDisease, ScheduleVaccination, SetInitialBalance, SetLabourerStatus, UpdateEggPrice,
    UpdateFlock,
};
use reports::{ExpenseBreakdown, ExportKind, FarmSummary, ProductionStats};
use state_store::{SqliteStateStore, StateStore, StoreError};

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};

use cli::{
    BirdsCommand, DiseaseCommand, FeedCommand, FlockCommand, LabourCommand, LedgerCommand,
    PriceCommand, VaccinationCommand,
};

/// Opens the configured database and runs one command against it.
pub async fn run(command: Command, config: &Config) -> Result<String> {
    let store = SqliteStateStore::connect(&config.database_url).await?;
    store.run_migrations().await.map_err(StoreError::from)?;
    tracing::debug!(database = %config.database_url, document = %config.document, "store ready");

    let service = FarmService::with_document(store, config.document.clone());
    let today = chrono::Local::now().date_naive();
    execute(&service, command, today).await
}

/// Runs one command and returns the text to print.
///
/// `today` decides overdue vaccinations and export file names.
pub async fn execute<S: StateStore>(
    service: &FarmService<S>,
    command: Command,
    today: NaiveDate,
) -> Result<String> {
    let result = match command {
        Command::Production(args) => {
            let cmd = dated(
                RecordEggProduction::new(args.flock, args.total).with_broken(args.broken),
                args.date,
                RecordEggProduction::on,
            );
            service.record_egg_production(cmd).await?
        }
        Command::Sale(args) => {
            let cmd = dated(
                RecordEggSale::new(args.peti, args.price, args.buyer),
                args.date,
                RecordEggSale::on,
            );
            service.record_egg_sale(cmd).await?
        }
        Command::Feed(FeedCommand::Purchase {
            feed_type,
            bags,
            cost_per_bag,
            date,
        }) => {
            let cmd = dated(
                PurchaseFeed::new(feed_type, bags, cost_per_bag),
                date,
                PurchaseFeed::on,
            );
            service.purchase_feed(cmd).await?
        }
        Command::Feed(FeedCommand::Consume {
            feed_type,
            bags,
            flock,
            date,
        }) => {
            let cmd = dated(ConsumeFeed::new(feed_type, bags, flock), date, ConsumeFeed::on);
            service.consume_feed(cmd).await?
        }
        Command::Flock(FlockCommand::Add {
            breed,
            layers,
            age_weeks,
            start_date,
            inactive,
        }) => {
            let mut cmd = dated(
                AddFlock::new(breed, layers, age_weeks),
                start_date,
                AddFlock::starting,
            );
            if inactive {
                cmd = cmd.inactive();
            }
            service.add_flock(cmd).await?
        }
        Command::Flock(FlockCommand::Update(args)) => {
            // clap guarantees exactly one field is present
            let update = if let Some(active) = args.active {
                FlockUpdate::SetActive(active)
            } else if let Some(breed) = args.breed {
                FlockUpdate::RenameBreed(breed)
            } else if let Some(weeks) = args.age_weeks {
                FlockUpdate::SetAgeWeeks(weeks)
            } else if let Some(date) = args.start_date {
                FlockUpdate::SetStartDate(date)
            } else {
                return Ok(output::describe_all(&[]));
            };
            service
                .update_flock(UpdateFlock::new(args.flock, update))
                .await?
        }
        Command::Flock(FlockCommand::Mortality { flock, count }) => {
            service
                .record_mortality(RecordMortality::new(flock, count))
                .await?
        }
        Command::Vaccination(VaccinationCommand::Schedule {
            flock,
            vaccine,
            date,
            notes,
        }) => {
            let mut cmd = ScheduleVaccination::new(flock, vaccine, date);
            if let Some(notes) = notes {
                cmd = cmd.with_notes(notes);
            }
            service.schedule_vaccination(cmd).await?
        }
        Command::Vaccination(VaccinationCommand::Reschedule { id, date }) => {
            service
                .reschedule_vaccination(RescheduleVaccination::new(id, date))
                .await?
        }
        Command::Vaccination(VaccinationCommand::Complete { id, date }) => {
            let cmd = CompleteVaccination::new(id).on(date.unwrap_or(today));
            service.complete_vaccination(cmd).await?
        }
        Command::Disease(DiseaseCommand::Report {
            flock,
            disease,
            affected,
            treatment,
            cost,
            date,
        }) => {
            let cmd = ReportDisease::new(flock, disease, affected)
                .with_treatment(treatment.unwrap_or_default(), cost);
            service
                .report_disease(dated(cmd, date, ReportDisease::on))
                .await?
        }
        Command::Disease(DiseaseCommand::Resolve { id }) => {
            service.resolve_disease(ResolveDisease::new(id)).await?
        }
        Command::Ledger(LedgerCommand::Add {
            kind,
            amount,
            source,
            category,
            company,
            description,
            date,
        }) => {
            let mut cmd = AddTransaction::new(kind, amount, source, category).linked_to(company);
            if let Some(description) = description {
                cmd = cmd.with_description(description);
            }
            service
                .add_transaction(dated(cmd, date, AddTransaction::on))
                .await?
        }
        Command::Ledger(LedgerCommand::InitialBalance { amount, date }) => {
            let cmd = dated(SetInitialBalance::new(amount), date, SetInitialBalance::on);
            service.set_initial_balance(cmd).await?
        }
        Command::Price(PriceCommand::Set { price }) => {
            service.update_egg_price(UpdateEggPrice::new(price)).await?
        }
        Command::Birds(BirdsCommand::Purchase {
            breed,
            birds,
            price_per_bird,
            age_weeks,
            date,
        }) => {
            let cmd = dated(
                PurchaseBirds::new(breed, birds, price_per_bird, age_weeks),
                date,
                PurchaseBirds::on,
            );
            service.purchase_birds(cmd).await?
        }
        Command::Labour(LabourCommand::Hire {
            name,
            role,
            wage_type,
            wage,
            phone,
            joining_date,
        }) => {
            let mut cmd = dated(
                HireLabourer::new(name, role, wage_type, wage),
                joining_date,
                HireLabourer::joining,
            );
            if let Some(phone) = phone {
                cmd = cmd.with_phone(phone);
            }
            service.hire_labourer(cmd).await?
        }
        Command::Labour(LabourCommand::Status { id, status }) => {
            service
                .set_labourer_status(SetLabourerStatus::new(id, status))
                .await?
        }
        Command::Labour(LabourCommand::Pay {
            id,
            amount,
            notes,
            date,
        }) => {
            let mut cmd = dated(PayLabourer::new(id, amount), date, PayLabourer::on);
            if let Some(notes) = notes {
                cmd = cmd.with_notes(notes);
            }
            service.pay_labourer(cmd).await?
        }
        Command::Summary(args) => {
            let state = service.state().await?;
            return summarize(&state, today, args.months, args.json);
        }
        Command::Export(args) => {
            let state = service.state().await?;
            let kinds = match args.kind {
                Some(kind) => vec![kind],
                None => ExportKind::ALL.to_vec(),
            };
            let mut written = Vec::with_capacity(kinds.len());
            for kind in kinds {
                written.push(export(&state, kind, &args.out, today).await?);
            }
            return Ok(written
                .iter()
                .map(|path| format!("wrote {}", path.display()))
                .collect::<Vec<_>>()
                .join("\n"));
        }
    };

    Ok(report(&result))
}

fn dated<C>(cmd: C, date: Option<NaiveDate>, on: fn(C, NaiveDate) -> C) -> C {
    match date {
        Some(date) => on(cmd, date),
        None => cmd,
    }
}

fn report(result: &CommandResult<FarmState>) -> String {
    let mut text = output::describe_all(&result.events);
    if !result.events.is_empty() {
        text.push_str(&format!("\nbalance {}", result.aggregate.balance()));
    }
    text
}

fn summarize(state: &FarmState, today: NaiveDate, months: u32, json: bool) -> Result<String> {
    let summary = FarmSummary::from_state(state, today);
    let stats = ProductionStats::from_state(state);
    let expenses = ExpenseBreakdown::from_state(state);
    let monthly = reports::monthly_profit_and_loss(state, today, months);

    if json {
        let value = serde_json::json!({
            "summary": summary,
            "production": stats,
            "expenses": expenses,
            "monthly": monthly,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(output::render_summary(&summary, &stats, &expenses, &monthly))
}

/// Writes one export file into `dir` and returns its path.
#[tracing::instrument(skip(state))]
pub async fn export(
    state: &FarmState,
    kind: ExportKind,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let contents = kind.render(state)?;
    let path = dir.join(kind.file_name(today));

    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;

    metrics::counter!("farm_exports_total", "kind" => kind.as_str()).increment(1);
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}
