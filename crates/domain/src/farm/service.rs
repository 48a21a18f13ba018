//! Farm service providing one entry point per farm operation.

use state_store::StateStore;

use crate::command::{Command, CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    AddFlock, AddTransaction, CompleteVaccination, ConsumeFeed, FarmError, FarmEvent, FarmState,
    HireLabourer, PayLabourer, PurchaseBirds, PurchaseFeed, RecordEggProduction, RecordEggSale,
    RecordMortality, ReportDisease, RescheduleVaccination, ResolveDisease, ScheduleVaccination,
    SetInitialBalance, SetLabourerStatus, UpdateEggPrice, UpdateFlock,
};

impl From<FarmError> for DomainError {
    fn from(e: FarmError) -> Self {
        DomainError::Farm(e)
    }
}

/// Service for running farm operations.
///
/// Each call loads the farm document, decides, applies and writes the new
/// state back before returning it. Calls are meant to be issued one at a
/// time by a single writer.
pub struct FarmService<S: StateStore> {
    handler: CommandHandler<S, FarmState>,
}

impl<S: StateStore> FarmService<S> {
    /// Creates a service over the default `farm_state` document.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Creates a service over a named document.
    pub fn with_document(store: S, document: impl Into<String>) -> Self {
        Self {
            handler: CommandHandler::with_document(store, document),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, FarmState> {
        &self.handler
    }

    /// Loads the current farm state.
    #[tracing::instrument(skip(self))]
    pub async fn state(&self) -> Result<FarmState, DomainError> {
        self.handler.load().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_egg_production(
        &self,
        cmd: RecordEggProduction,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.record_egg_production(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_egg_sale(
        &self,
        cmd: RecordEggSale,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.record_egg_sale(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn purchase_feed(
        &self,
        cmd: PurchaseFeed,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.purchase_feed(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn consume_feed(
        &self,
        cmd: ConsumeFeed,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.consume_feed(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_flock(&self, cmd: AddFlock) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.add_flock(&cmd)).await
    }

    /// Changes one field of a flock. Unknown flocks are left alone.
    #[tracing::instrument(skip(self))]
    pub async fn update_flock(
        &self,
        cmd: UpdateFlock,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.update_flock(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_mortality(
        &self,
        cmd: RecordMortality,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.record_mortality(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn schedule_vaccination(
        &self,
        cmd: ScheduleVaccination,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.schedule_vaccination(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn reschedule_vaccination(
        &self,
        cmd: RescheduleVaccination,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.reschedule_vaccination(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn complete_vaccination(
        &self,
        cmd: CompleteVaccination,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.complete_vaccination(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn report_disease(
        &self,
        cmd: ReportDisease,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.report_disease(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve_disease(
        &self,
        cmd: ResolveDisease,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.resolve_disease(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_transaction(
        &self,
        cmd: AddTransaction,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.add_transaction(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_initial_balance(
        &self,
        cmd: SetInitialBalance,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.set_initial_balance(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_egg_price(
        &self,
        cmd: UpdateEggPrice,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.update_egg_price(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn purchase_birds(
        &self,
        cmd: PurchaseBirds,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.purchase_birds(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn hire_labourer(
        &self,
        cmd: HireLabourer,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.hire_labourer(&cmd)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_labourer_status(
        &self,
        cmd: SetLabourerStatus,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.set_labourer_status(&cmd))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn pay_labourer(
        &self,
        cmd: PayLabourer,
    ) -> Result<CommandResult<FarmState>, DomainError> {
        self.run(&cmd, |state| state.pay_labourer(&cmd)).await
    }

    async fn run<C, F>(
        &self,
        cmd: &C,
        decide: F,
    ) -> Result<CommandResult<FarmState>, DomainError>
    where
        C: Command<Aggregate = FarmState>,
        F: FnOnce(&FarmState) -> Result<Vec<FarmEvent>, FarmError>,
    {
        let command = cmd.command_type();
        metrics::counter!("farm_commands_total", "command" => command).increment(1);

        match self.handler.execute(decide).await {
            Ok(result) => {
                tracing::info!(
                    command,
                    events = result.events.len(),
                    revision = %result.revision,
                    "farm command applied"
                );
                Ok(result)
            }
            Err(e) if e.is_rejection() => {
                metrics::counter!("farm_commands_rejected", "command" => command).increment(1);
                tracing::warn!(command, error = %e, "farm command rejected");
                Err(e)
            }
            Err(e) => {
                tracing::error!(command, error = %e, "farm state not saved");
                Err(e)
            }
        }
    }
}
