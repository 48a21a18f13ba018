//! Farm state aggregate implementation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::{
    DiseaseRecordId, FeedConsumptionId, FeedPurchaseId, FeedStockId, FlockId, LabourPaymentId,
    LabourerId, ProductionId, SaleId, TransactionId, VaccinationId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use state_store::Revision;

use crate::aggregate::Aggregate;

use super::{
    AddFlock, AddTransaction, BankAccount, CompleteVaccination, ConsumeFeed, DiseaseRecord,
    DiseaseStatus, EggInventory, EggPrice, EggProduction, EggSale, FarmError, FarmEvent,
    FeedConsumption, FeedPurchase, FeedStock, Flock, FlockUpdate, HireLabourer, LabourPayment,
    Labourer, LabourerStatus, Money, PayLabourer, PurchaseBirds, PurchaseFeed, RecordEggProduction,
    RecordEggSale, RecordMortality, ReportDisease, RescheduleVaccination, ResolveDisease,
    ScheduleVaccination, SetInitialBalance, SetLabourerStatus, Transaction, UpdateEggPrice,
    UpdateFlock, Vaccination, VaccinationStatus,
    events::{
        EggsProducedData, EggsSoldData, FeedPurchasedData, FlockUpdatedData,
        TransactionRecordedData,
    },
};

/// The whole farm, persisted as one document.
///
/// Every collection is kept in insertion order. Records are never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmState {
    /// Revision of the stored document this state was loaded from.
    #[serde(skip)]
    revision: Revision,

    bank_account: BankAccount,
    transactions: Vec<Transaction>,
    flocks: Vec<Flock>,
    egg_productions: Vec<EggProduction>,
    egg_sales: Vec<EggSale>,
    egg_inventory: EggInventory,

    /// Keyed by feed type.
    feed_stocks: BTreeMap<String, FeedStock>,
    feed_purchases: Vec<FeedPurchase>,
    feed_consumptions: Vec<FeedConsumption>,
    vaccinations: Vec<Vaccination>,
    disease_records: Vec<DiseaseRecord>,
    egg_price: EggPrice,
    labourers: Vec<Labourer>,
    labour_payments: Vec<LabourPayment>,
}

impl Aggregate for FarmState {
    type Event = FarmEvent;
    type Error = FarmError;

    fn document_name() -> &'static str {
        "farm_state"
    }

    fn revision(&self) -> Revision {
        self.revision
    }

    fn set_revision(&mut self, revision: Revision) {
        self.revision = revision;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            FarmEvent::TransactionRecorded(data) => self.apply_transaction_recorded(data),
            FarmEvent::EggsProduced(data) => self.apply_eggs_produced(data),
            FarmEvent::EggsSold(data) => self.apply_eggs_sold(data),
            FarmEvent::FeedPurchased(data) => self.apply_feed_purchased(data),
            FarmEvent::FeedConsumed(data) => {
                let consumption = data.consumption;
                if let Some(stock) = self.feed_stocks.get_mut(&consumption.feed_type) {
                    stock.consume(consumption.bags_used);
                }
                self.feed_consumptions.push(consumption);
            }
            FarmEvent::FlockAdded(data) => self.flocks.push(data.flock),
            FarmEvent::FlockUpdated(data) => self.apply_flock_updated(data),
            FarmEvent::MortalityRecorded(data) => {
                if let Some(flock) = self.flock_mut(data.flock_id) {
                    flock.mortality = flock.mortality.saturating_add(data.count);
                    flock.number_of_layers = flock.number_of_layers.saturating_sub(data.count);
                }
            }
            FarmEvent::VaccinationScheduled(data) => self.vaccinations.push(data.vaccination),
            FarmEvent::VaccinationRescheduled(data) => {
                if let Some(vaccination) = self.vaccination_mut(data.vaccination_id) {
                    vaccination.scheduled_date = data.scheduled_date;
                }
            }
            FarmEvent::VaccinationCompleted(data) => {
                if let Some(vaccination) = self.vaccination_mut(data.vaccination_id) {
                    vaccination.status = VaccinationStatus::Completed;
                    vaccination.administered_date = Some(data.administered_date);
                }
            }
            FarmEvent::DiseaseReported(data) => self.disease_records.push(data.record),
            FarmEvent::DiseaseResolved(data) => {
                if let Some(record) = self
                    .disease_records
                    .iter_mut()
                    .find(|r| r.id == data.disease_id)
                {
                    record.status = DiseaseStatus::Resolved;
                }
            }
            FarmEvent::EggPriceUpdated(data) => {
                self.egg_price.price_per_peti = data.price_per_peti;
                self.egg_price.last_updated = Some(data.updated_at);
            }
            FarmEvent::LabourerHired(data) => self.labourers.push(data.labourer),
            FarmEvent::LabourerStatusChanged(data) => {
                if let Some(labourer) = self
                    .labourers
                    .iter_mut()
                    .find(|l| l.id == data.labourer_id)
                {
                    labourer.status = data.status;
                }
            }
            FarmEvent::LabourPaid(data) => self.labour_payments.push(data.payment),
        }
    }
}

// Query methods
impl FarmState {
    pub fn bank_account(&self) -> &BankAccount {
        &self.bank_account
    }

    /// Returns the current bank balance.
    pub fn balance(&self) -> Money {
        self.bank_account.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn flocks(&self) -> &[Flock] {
        &self.flocks
    }

    /// Returns a flock by ID.
    pub fn flock(&self, flock_id: FlockId) -> Option<&Flock> {
        self.flocks.iter().find(|f| f.id == flock_id)
    }

    /// Returns the flocks currently laying.
    pub fn active_flocks(&self) -> impl Iterator<Item = &Flock> {
        self.flocks.iter().filter(|f| f.is_active)
    }

    /// Returns the number of live layers across active flocks.
    pub fn active_layers(&self) -> u64 {
        self.active_flocks()
            .map(|f| u64::from(f.number_of_layers))
            .sum()
    }

    pub fn egg_productions(&self) -> &[EggProduction] {
        &self.egg_productions
    }

    pub fn egg_sales(&self) -> &[EggSale] {
        &self.egg_sales
    }

    pub fn egg_inventory(&self) -> &EggInventory {
        &self.egg_inventory
    }

    /// Returns all feed stocks, ordered by feed type.
    pub fn feed_stocks(&self) -> impl Iterator<Item = &FeedStock> {
        self.feed_stocks.values()
    }

    /// Returns the stock for a feed type.
    pub fn feed_stock(&self, feed_type: &str) -> Option<&FeedStock> {
        self.feed_stocks.get(feed_type)
    }

    /// Returns the number of bags in stock across every feed type.
    pub fn total_feed_bags(&self) -> Decimal {
        self.feed_stocks.values().map(|s| s.bags_in_stock).sum()
    }

    pub fn feed_purchases(&self) -> &[FeedPurchase] {
        &self.feed_purchases
    }

    pub fn feed_consumptions(&self) -> &[FeedConsumption] {
        &self.feed_consumptions
    }

    pub fn vaccinations(&self) -> &[Vaccination] {
        &self.vaccinations
    }

    /// Returns a vaccination by ID.
    pub fn vaccination(&self, vaccination_id: VaccinationId) -> Option<&Vaccination> {
        self.vaccinations.iter().find(|v| v.id == vaccination_id)
    }

    /// Returns vaccinations that read as overdue on `today`.
    pub fn overdue_vaccinations(&self, today: NaiveDate) -> impl Iterator<Item = &Vaccination> {
        self.vaccinations
            .iter()
            .filter(move |v| v.is_overdue_on(today))
    }

    pub fn disease_records(&self) -> &[DiseaseRecord] {
        &self.disease_records
    }

    /// Returns a disease record by ID.
    pub fn disease_record(&self, disease_id: DiseaseRecordId) -> Option<&DiseaseRecord> {
        self.disease_records.iter().find(|r| r.id == disease_id)
    }

    pub fn egg_price(&self) -> &EggPrice {
        &self.egg_price
    }

    pub fn labourers(&self) -> &[Labourer] {
        &self.labourers
    }

    /// Returns a labourer by ID.
    pub fn labourer(&self, labourer_id: LabourerId) -> Option<&Labourer> {
        self.labourers.iter().find(|l| l.id == labourer_id)
    }

    pub fn labour_payments(&self) -> &[LabourPayment] {
        &self.labour_payments
    }

    /// Returns the sum of all credits ever posted.
    pub fn total_credits(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_credit())
            .map(|t| t.amount)
            .sum()
    }

    /// Returns the sum of all debits ever posted.
    pub fn total_debits(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount)
            .sum()
    }
}

fn require(field: &'static str, value: &str) -> Result<String, FarmError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FarmError::MissingField { field });
    }
    Ok(value.to_string())
}

fn require_positive(field: &'static str, amount: Money) -> Result<(), FarmError> {
    if !amount.is_positive() {
        return Err(FarmError::InvalidAmount { field, amount });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, amount: Money) -> Result<(), FarmError> {
    if amount.is_negative() {
        return Err(FarmError::InvalidAmount { field, amount });
    }
    Ok(())
}

// Command methods (return events)
impl FarmState {
    /// Rejects an entry that would push the balance past the `Money` range.
    fn check_posting(&self, transaction: &Transaction) -> Result<(), FarmError> {
        self.bank_account
            .balance_after(transaction.kind, transaction.amount)
            .map(|_| ())
            .ok_or(FarmError::AmountOverflow { field: "balance" })
    }

    /// Records a day's collection. Broken eggs never enter inventory.
    pub fn record_egg_production(
        &self,
        cmd: &RecordEggProduction,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        if cmd.broken_eggs > cmd.total_eggs {
            return Err(FarmError::BrokenEggsExceedTotal {
                broken: cmd.broken_eggs,
                total: cmd.total_eggs,
            });
        }

        let good_eggs = cmd.total_eggs - cmd.broken_eggs;
        let (peti_count, remaining_eggs) = self.egg_inventory.peti_split(good_eggs);

        Ok(vec![FarmEvent::eggs_produced(EggProduction {
            id: ProductionId::new(),
            date: cmd.date,
            flock_id: cmd.flock_id,
            total_eggs: cmd.total_eggs,
            broken_eggs: cmd.broken_eggs,
            good_eggs,
            peti_count,
            remaining_eggs,
        })])
    }

    /// Sells whole Peti from inventory and credits the proceeds.
    pub fn record_egg_sale(&self, cmd: &RecordEggSale) -> Result<Vec<FarmEvent>, FarmError> {
        if cmd.peti_count == 0 {
            return Err(FarmError::InvalidQuantity {
                field: "peti count",
            });
        }
        require_positive("price per peti", cmd.price_per_peti)?;
        let buyer_name = require("buyer name", &cmd.buyer_name)?;

        let available = self.egg_inventory.total_peti;
        if cmd.peti_count > available {
            return Err(FarmError::InsufficientEggs {
                requested: cmd.peti_count,
                available,
            });
        }

        let transaction = Transaction::egg_sale(
            TransactionId::new(),
            cmd.date,
            cmd.peti_count,
            cmd.price_per_peti,
            &buyer_name,
        )
        .ok_or(FarmError::AmountOverflow {
            field: "sale total",
        })?;
        self.check_posting(&transaction)?;
        let sale = EggSale {
            id: SaleId::new(),
            date: cmd.date,
            peti_count: cmd.peti_count,
            price_per_peti: cmd.price_per_peti,
            total_amount: transaction.amount,
            buyer_name,
            transaction_id: transaction.id,
        };

        Ok(vec![
            FarmEvent::eggs_sold(sale),
            FarmEvent::transaction_recorded(transaction),
        ])
    }

    /// Buys feed, debits the cost and restocks the feed type.
    ///
    /// Free feed (cost 0) is stocked without posting a transaction.
    pub fn purchase_feed(&self, cmd: &PurchaseFeed) -> Result<Vec<FarmEvent>, FarmError> {
        let feed_type = require("feed type", &cmd.feed_type)?;
        if cmd.bags == 0 {
            return Err(FarmError::InvalidQuantity { field: "bags" });
        }
        require_non_negative("cost per bag", cmd.cost_per_bag)?;

        let total_cost = cmd
            .cost_per_bag
            .checked_multiply(u64::from(cmd.bags))
            .ok_or(FarmError::AmountOverflow {
                field: "feed purchase total",
            })?;

        // total_cost fits, so the entry always builds
        let transaction = cmd
            .cost_per_bag
            .is_positive()
            .then(|| {
                Transaction::feed_purchase(
                    TransactionId::new(),
                    cmd.date,
                    &feed_type,
                    cmd.bags,
                    cmd.cost_per_bag,
                )
            })
            .flatten();
        if let Some(transaction) = &transaction {
            self.check_posting(transaction)?;
        }

        let stock_id = self
            .feed_stocks
            .get(&feed_type)
            .map(|stock| stock.id)
            .unwrap_or_default();

        let purchase = FeedPurchase {
            id: FeedPurchaseId::new(),
            date: cmd.date,
            feed_type,
            bags: cmd.bags,
            cost_per_bag: cmd.cost_per_bag,
            total_cost,
            transaction_id: transaction.as_ref().map(|t| t.id),
        };

        let mut events = vec![FarmEvent::feed_purchased(purchase, stock_id)];
        events.extend(transaction.map(FarmEvent::transaction_recorded));
        Ok(events)
    }

    /// Records feed given to a flock. No money moves.
    pub fn consume_feed(&self, cmd: &ConsumeFeed) -> Result<Vec<FarmEvent>, FarmError> {
        let feed_type = require("feed type", &cmd.feed_type)?;
        if cmd.bags_used <= Decimal::ZERO {
            return Err(FarmError::InvalidQuantity { field: "bags used" });
        }

        let stock = self
            .feed_stocks
            .get(&feed_type)
            .ok_or_else(|| FarmError::FeedNotStocked {
                feed_type: feed_type.clone(),
            })?;

        if cmd.bags_used > stock.bags_in_stock {
            return Err(FarmError::InsufficientFeed {
                feed_type,
                requested: cmd.bags_used,
                available: stock.bags_in_stock,
            });
        }

        Ok(vec![FarmEvent::feed_consumed(FeedConsumption {
            id: FeedConsumptionId::new(),
            date: cmd.date,
            feed_type,
            bags_used: cmd.bags_used,
            flock_id: cmd.flock_id,
        })])
    }

    /// Registers a flock with no recorded deaths.
    pub fn add_flock(&self, cmd: &AddFlock) -> Result<Vec<FarmEvent>, FarmError> {
        let breed = require("breed", &cmd.breed)?;

        Ok(vec![FarmEvent::flock_added(Flock {
            id: FlockId::new(),
            breed,
            number_of_layers: cmd.number_of_layers,
            age_weeks: cmd.age_weeks,
            start_date: cmd.start_date,
            mortality: 0,
            is_active: cmd.is_active,
        })])
    }

    /// Changes one field of a flock.
    ///
    /// An unknown flock, or an update that changes nothing, yields no events.
    pub fn update_flock(&self, cmd: &UpdateFlock) -> Result<Vec<FarmEvent>, FarmError> {
        let Some(flock) = self.flock(cmd.flock_id) else {
            return Ok(vec![]);
        };

        let update = match &cmd.update {
            FlockUpdate::RenameBreed(breed) => FlockUpdate::RenameBreed(require("breed", breed)?),
            other => other.clone(),
        };

        let unchanged = match &update {
            FlockUpdate::SetActive(active) => flock.is_active == *active,
            FlockUpdate::RenameBreed(breed) => flock.breed == *breed,
            FlockUpdate::SetAgeWeeks(weeks) => flock.age_weeks == *weeks,
            FlockUpdate::SetStartDate(date) => flock.start_date == *date,
        };
        if unchanged {
            return Ok(vec![]);
        }

        Ok(vec![FarmEvent::flock_updated(cmd.flock_id, update)])
    }

    /// Records deaths in a flock. Unknown flocks are ignored.
    pub fn record_mortality(&self, cmd: &RecordMortality) -> Result<Vec<FarmEvent>, FarmError> {
        if cmd.count == 0 {
            return Err(FarmError::InvalidQuantity { field: "mortality" });
        }

        let Some(flock) = self.flock(cmd.flock_id) else {
            return Ok(vec![]);
        };

        if cmd.count > flock.number_of_layers {
            return Err(FarmError::MortalityExceedsFlock {
                requested: cmd.count,
                available: flock.number_of_layers,
            });
        }

        Ok(vec![FarmEvent::mortality_recorded(cmd.flock_id, cmd.count)])
    }

    pub fn schedule_vaccination(
        &self,
        cmd: &ScheduleVaccination,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        let vaccine_name = require("vaccine name", &cmd.vaccine_name)?;

        Ok(vec![FarmEvent::vaccination_scheduled(Vaccination {
            id: VaccinationId::new(),
            flock_id: cmd.flock_id,
            vaccine_name,
            scheduled_date: cmd.scheduled_date,
            administered_date: None,
            status: VaccinationStatus::Scheduled,
            notes: cmd.notes.trim().to_string(),
        })])
    }

    /// Moves a vaccination that has not been given yet.
    pub fn reschedule_vaccination(
        &self,
        cmd: &RescheduleVaccination,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        let vaccination = self
            .vaccination(cmd.vaccination_id)
            .ok_or(FarmError::VaccinationNotFound(cmd.vaccination_id))?;

        if !vaccination.status.can_reschedule() {
            return Err(FarmError::InvalidStateTransition {
                entity: "vaccination",
                current: vaccination.status.to_string(),
                action: "reschedule",
            });
        }

        if vaccination.scheduled_date == cmd.scheduled_date {
            return Ok(vec![]);
        }

        Ok(vec![FarmEvent::vaccination_rescheduled(
            cmd.vaccination_id,
            vaccination.scheduled_date,
            cmd.scheduled_date,
        )])
    }

    /// Marks a vaccination as given, whatever its current status.
    pub fn complete_vaccination(
        &self,
        cmd: &CompleteVaccination,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        if self.vaccination(cmd.vaccination_id).is_none() {
            return Err(FarmError::VaccinationNotFound(cmd.vaccination_id));
        }

        Ok(vec![FarmEvent::vaccination_completed(
            cmd.vaccination_id,
            cmd.administered_date,
        )])
    }

    /// Reports an outbreak. A treatment cost posts one medication debit.
    pub fn report_disease(&self, cmd: &ReportDisease) -> Result<Vec<FarmEvent>, FarmError> {
        let disease_name = require("disease name", &cmd.disease_name)?;
        require_non_negative("treatment cost", cmd.treatment_cost)?;
        let treatment = cmd.treatment.trim().to_string();

        let transaction = cmd.treatment_cost.is_positive().then(|| {
            Transaction::medication(
                TransactionId::new(),
                cmd.date_detected,
                &disease_name,
                &treatment,
                cmd.treatment_cost,
            )
        });
        if let Some(transaction) = &transaction {
            self.check_posting(transaction)?;
        }

        let record = DiseaseRecord {
            id: DiseaseRecordId::new(),
            flock_id: cmd.flock_id,
            disease_name,
            date_detected: cmd.date_detected,
            affected_birds: cmd.affected_birds,
            treatment_cost: cmd.treatment_cost,
            treatment,
            status: DiseaseStatus::Active,
        };

        let mut events = vec![FarmEvent::disease_reported(record)];
        events.extend(transaction.map(FarmEvent::transaction_recorded));
        Ok(events)
    }

    /// Closes an active outbreak. No money moves.
    pub fn resolve_disease(&self, cmd: &ResolveDisease) -> Result<Vec<FarmEvent>, FarmError> {
        let record = self
            .disease_record(cmd.disease_id)
            .ok_or(FarmError::DiseaseRecordNotFound(cmd.disease_id))?;

        if !record.status.can_resolve() {
            return Err(FarmError::InvalidStateTransition {
                entity: "disease record",
                current: record.status.to_string(),
                action: "resolve",
            });
        }

        Ok(vec![FarmEvent::disease_resolved(cmd.disease_id)])
    }

    /// Posts a manual ledger entry.
    pub fn add_transaction(&self, cmd: &AddTransaction) -> Result<Vec<FarmEvent>, FarmError> {
        require_positive("amount", cmd.amount)?;
        let source = require("source", &cmd.source)?;

        let transaction = Transaction {
            id: TransactionId::new(),
            date: cmd.date,
            kind: cmd.kind,
            amount: cmd.amount,
            source,
            linked_company: cmd.linked_company,
            description: cmd.description.trim().to_string(),
            category: cmd.category,
        };
        self.check_posting(&transaction)?;

        Ok(vec![FarmEvent::transaction_recorded(transaction)])
    }

    /// Credits funds received from the financier.
    pub fn set_initial_balance(
        &self,
        cmd: &SetInitialBalance,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        require_positive("amount", cmd.amount)?;

        let transaction = Transaction::initial_balance(TransactionId::new(), cmd.date, cmd.amount);
        self.check_posting(&transaction)?;

        Ok(vec![FarmEvent::transaction_recorded(transaction)])
    }

    /// Sets the price used for future sales.
    pub fn update_egg_price(&self, cmd: &UpdateEggPrice) -> Result<Vec<FarmEvent>, FarmError> {
        require_positive("price per peti", cmd.price_per_peti)?;

        Ok(vec![FarmEvent::egg_price_updated(cmd.price_per_peti)])
    }

    /// Buys birds from the hatchery and registers them as an active flock.
    pub fn purchase_birds(&self, cmd: &PurchaseBirds) -> Result<Vec<FarmEvent>, FarmError> {
        let breed = require("breed", &cmd.breed)?;
        if cmd.birds == 0 {
            return Err(FarmError::InvalidQuantity { field: "birds" });
        }
        require_positive("price per bird", cmd.price_per_bird)?;

        let transaction = Transaction::bird_purchase(
            TransactionId::new(),
            cmd.date,
            &breed,
            cmd.birds,
            cmd.price_per_bird,
        )
        .ok_or(FarmError::AmountOverflow {
            field: "bird purchase total",
        })?;
        self.check_posting(&transaction)?;
        let flock = Flock {
            id: FlockId::new(),
            breed,
            number_of_layers: cmd.birds,
            age_weeks: cmd.age_weeks,
            start_date: cmd.date,
            mortality: 0,
            is_active: true,
        };

        Ok(vec![
            FarmEvent::flock_added(flock),
            FarmEvent::transaction_recorded(transaction),
        ])
    }

    pub fn hire_labourer(&self, cmd: &HireLabourer) -> Result<Vec<FarmEvent>, FarmError> {
        let name = require("name", &cmd.name)?;
        let role = require("role", &cmd.role)?;
        require_positive("wage amount", cmd.wage_amount)?;

        Ok(vec![FarmEvent::labourer_hired(Labourer {
            id: LabourerId::new(),
            name,
            role,
            wage_type: cmd.wage_type,
            wage_amount: cmd.wage_amount,
            joining_date: cmd.joining_date,
            phone: cmd.phone.trim().to_string(),
            status: LabourerStatus::Active,
        })])
    }

    pub fn set_labourer_status(
        &self,
        cmd: &SetLabourerStatus,
    ) -> Result<Vec<FarmEvent>, FarmError> {
        let labourer = self
            .labourer(cmd.labourer_id)
            .ok_or(FarmError::LabourerNotFound(cmd.labourer_id))?;

        if labourer.status == cmd.status {
            return Ok(vec![]);
        }

        Ok(vec![FarmEvent::labourer_status_changed(
            cmd.labourer_id,
            cmd.status,
        )])
    }

    /// Pays an active labourer and debits the wage.
    pub fn pay_labourer(&self, cmd: &PayLabourer) -> Result<Vec<FarmEvent>, FarmError> {
        let labourer = self
            .labourer(cmd.labourer_id)
            .ok_or(FarmError::LabourerNotFound(cmd.labourer_id))?;

        if labourer.status != LabourerStatus::Active {
            return Err(FarmError::InvalidStateTransition {
                entity: "labourer",
                current: labourer.status.to_string(),
                action: "pay",
            });
        }
        require_positive("amount", cmd.amount)?;

        let transaction = Transaction::labour_payment(
            TransactionId::new(),
            cmd.date,
            &labourer.name,
            &labourer.role,
            cmd.amount,
        );
        self.check_posting(&transaction)?;
        let payment = LabourPayment {
            id: LabourPaymentId::new(),
            labourer_id: cmd.labourer_id,
            date: cmd.date,
            amount: cmd.amount,
            notes: cmd.notes.trim().to_string(),
            transaction_id: transaction.id,
        };

        Ok(vec![
            FarmEvent::labour_paid(payment),
            FarmEvent::transaction_recorded(transaction),
        ])
    }
}

// Apply event helpers
impl FarmState {
    fn apply_transaction_recorded(&mut self, data: TransactionRecordedData) {
        let transaction = data.transaction;
        self.bank_account
            .apply(transaction.kind, transaction.amount, data.recorded_at);
        self.transactions.push(transaction);
    }

    fn apply_eggs_produced(&mut self, data: EggsProducedData) {
        let production = data.production;
        self.egg_inventory.add_production(
            production.good_eggs,
            production.peti_count,
            production.remaining_eggs,
            data.recorded_at,
        );
        self.egg_productions.push(production);
    }

    fn apply_eggs_sold(&mut self, data: EggsSoldData) {
        self.egg_inventory
            .deduct_peti(data.sale.peti_count, data.recorded_at);
        self.egg_sales.push(data.sale);
    }

    fn apply_feed_purchased(&mut self, data: FeedPurchasedData) {
        let purchase = data.purchase;
        match self.feed_stocks.get_mut(&purchase.feed_type) {
            Some(stock) => stock.restock(purchase.bags, purchase.cost_per_bag, purchase.date),
            None => {
                let stock = FeedStock::opened(
                    data.stock_id,
                    purchase.feed_type.clone(),
                    purchase.bags,
                    purchase.cost_per_bag,
                    purchase.date,
                );
                self.feed_stocks.insert(purchase.feed_type.clone(), stock);
            }
        }
        self.feed_purchases.push(purchase);
    }

    fn apply_flock_updated(&mut self, data: FlockUpdatedData) {
        let Some(flock) = self.flock_mut(data.flock_id) else {
            return;
        };

        match data.update {
            FlockUpdate::SetActive(active) => flock.is_active = active,
            FlockUpdate::RenameBreed(breed) => flock.breed = breed,
            FlockUpdate::SetAgeWeeks(weeks) => flock.age_weeks = weeks,
            FlockUpdate::SetStartDate(date) => flock.start_date = date,
        }
    }

    fn flock_mut(&mut self, flock_id: FlockId) -> Option<&mut Flock> {
        self.flocks.iter_mut().find(|f| f.id == flock_id)
    }

    fn vaccination_mut(&mut self, vaccination_id: VaccinationId) -> Option<&mut Vaccination> {
        self.vaccinations.iter_mut().find(|v| v.id == vaccination_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farm::{Category, LinkedCompany, TransactionKind, WageType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(state: &mut FarmState, events: Vec<FarmEvent>) {
        state.apply_events(events);
    }

    fn state_with_flock(layers: u32) -> (FarmState, FlockId) {
        let mut state = FarmState::default();
        let events = state
            .add_flock(&AddFlock::new("Lohmann Brown", layers, 20))
            .unwrap();
        run(&mut state, events);
        let flock_id = state.flocks()[0].id;
        (state, flock_id)
    }

    #[test]
    fn test_default_state() {
        let state = FarmState::default();
        assert_eq!(state.balance(), Money::zero());
        assert_eq!(state.egg_price().price_per_peti.rupees(), 2500);
        assert_eq!(state.revision(), Revision::initial());
        assert!(state.transactions().is_empty());
    }

    #[test]
    fn test_production_splits_into_peti() {
        let (mut state, flock_id) = state_with_flock(1000);

        let events = state
            .record_egg_production(&RecordEggProduction::new(flock_id, 400).with_broken(40))
            .unwrap();
        run(&mut state, events);

        let production = &state.egg_productions()[0];
        assert_eq!(production.good_eggs, 360);
        assert_eq!(production.peti_count, 1);
        assert_eq!(production.remaining_eggs, 0);

        let inventory = state.egg_inventory();
        assert_eq!(inventory.total_eggs, 360);
        assert_eq!(inventory.total_peti, 1);
        assert_eq!(inventory.remaining_eggs, 0);
        assert!(state.transactions().is_empty());
    }

    #[test]
    fn test_production_carries_loose_eggs() {
        let (mut state, flock_id) = state_with_flock(1000);

        for total in [200, 200] {
            let events = state
                .record_egg_production(&RecordEggProduction::new(flock_id, total))
                .unwrap();
            run(&mut state, events);
        }

        let second = &state.egg_productions()[1];
        assert_eq!(second.peti_count, 1);
        assert_eq!(second.remaining_eggs, 40);
        assert_eq!(state.egg_inventory().total_eggs, 400);
    }

    #[test]
    fn test_production_rejects_broken_over_total() {
        let state = FarmState::default();
        let result = state
            .record_egg_production(&RecordEggProduction::new(FlockId::new(), 10).with_broken(11));

        assert!(matches!(
            result,
            Err(FarmError::BrokenEggsExceedTotal {
                broken: 11,
                total: 10
            })
        ));
    }

    #[test]
    fn test_production_tolerates_unknown_flock() {
        let state = FarmState::default();
        let events = state
            .record_egg_production(&RecordEggProduction::new(FlockId::new(), 50))
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_sale_credits_ledger() {
        let (mut state, flock_id) = state_with_flock(1000);
        let events = state
            .record_egg_production(&RecordEggProduction::new(flock_id, 400).with_broken(40))
            .unwrap();
        run(&mut state, events);

        let events = state
            .record_egg_sale(&RecordEggSale::new(1, Money::from_rupees(2500), "Ravi Traders"))
            .unwrap();
        assert_eq!(events.len(), 2);
        run(&mut state, events);

        let sale = &state.egg_sales()[0];
        assert_eq!(sale.total_amount.rupees(), 2500);
        assert_eq!(state.egg_inventory(), &EggInventory {
            last_updated: state.egg_inventory().last_updated,
            ..EggInventory::default()
        });

        let transaction = &state.transactions()[0];
        assert_eq!(transaction.id, sale.transaction_id);
        assert_eq!(transaction.kind, TransactionKind::Credit);
        assert_eq!(transaction.category, Category::EggSale);
        assert_eq!(transaction.linked_company, LinkedCompany::External);
        assert_eq!(transaction.source, "Egg Sale - 1 Peti to Ravi Traders");
        assert_eq!(transaction.description, "Sold 1 peti at Rs.2500/peti");
        assert_eq!(state.balance().rupees(), 2500);
        assert_eq!(state.bank_account().borrowed_amount, Money::zero());
    }

    #[test]
    fn test_sale_rejects_oversell() {
        let state = FarmState::default();
        let result =
            state.record_egg_sale(&RecordEggSale::new(2, Money::from_rupees(2500), "Buyer"));

        assert!(matches!(
            result,
            Err(FarmError::InsufficientEggs {
                requested: 2,
                available: 0
            })
        ));
    }

    #[test]
    fn test_sale_requires_buyer() {
        let state = FarmState::default();
        let result = state.record_egg_sale(&RecordEggSale::new(1, Money::from_rupees(2500), " "));
        assert!(matches!(
            result,
            Err(FarmError::MissingField {
                field: "buyer name"
            })
        ));
    }

    #[test]
    fn test_feed_purchase_debits_and_stocks() {
        let mut state = FarmState::default();
        let events = state
            .purchase_feed(&PurchaseFeed::new("Layer Mash", 10, Money::from_rupees(3500)))
            .unwrap();
        run(&mut state, events);

        let purchase = &state.feed_purchases()[0];
        assert_eq!(purchase.total_cost.rupees(), 35_000);
        assert!(purchase.transaction_id.is_some());

        assert_eq!(state.balance().rupees(), -35_000);
        assert_eq!(state.bank_account().borrowed_amount.rupees(), 35_000);

        let transaction = &state.transactions()[0];
        assert_eq!(transaction.category, Category::FeedPurchase);
        assert_eq!(transaction.linked_company, LinkedCompany::ChairmanFeed);
        assert_eq!(
            transaction.description,
            "Purchased 10 bags (50kg each) at Rs.3500/bag from Chairman Feed (External Supplier)"
        );

        let stock = state.feed_stock("Layer Mash").unwrap();
        assert_eq!(stock.bags_in_stock, dec!(10));
        assert_eq!(stock.bag_size_kg, 50);
    }

    #[test]
    fn test_feed_purchase_latest_price_wins() {
        let mut state = FarmState::default();
        for (bags, cost, day) in [(10, 3500, 1), (4, 3600, 9)] {
            let events = state
                .purchase_feed(
                    &PurchaseFeed::new("Layer Mash", bags, Money::from_rupees(cost))
                        .on(date(2026, 5, day)),
                )
                .unwrap();
            run(&mut state, events);
        }

        assert_eq!(state.feed_stocks().count(), 1);
        let stock = state.feed_stock("Layer Mash").unwrap();
        assert_eq!(stock.bags_in_stock, dec!(14));
        assert_eq!(stock.cost_per_bag.rupees(), 3600);
        assert_eq!(stock.last_purchase_date, date(2026, 5, 9));
    }

    #[test]
    fn test_free_feed_posts_no_transaction() {
        let mut state = FarmState::default();
        let events = state
            .purchase_feed(&PurchaseFeed::new("Sample Feed", 2, Money::zero()))
            .unwrap();
        assert_eq!(events.len(), 1);
        run(&mut state, events);

        assert!(state.transactions().is_empty());
        assert_eq!(state.feed_purchases()[0].transaction_id, None);
        assert_eq!(state.total_feed_bags(), dec!(2));
    }

    #[test]
    fn test_consume_feed() {
        let (mut state, flock_id) = state_with_flock(500);
        let events = state
            .purchase_feed(&PurchaseFeed::new("Layer Mash", 5, Money::from_rupees(3500)))
            .unwrap();
        run(&mut state, events);
        let balance = state.balance();

        let events = state
            .consume_feed(&ConsumeFeed::new("Layer Mash", dec!(2.5), flock_id))
            .unwrap();
        run(&mut state, events);

        assert_eq!(state.feed_stock("Layer Mash").unwrap().bags_in_stock, dec!(2.5));
        assert_eq!(state.feed_consumptions().len(), 1);
        assert_eq!(state.balance(), balance);
    }

    #[test]
    fn test_consume_feed_rejects_overconsumption() {
        let mut state = FarmState::default();
        let events = state
            .purchase_feed(&PurchaseFeed::new("Layer Mash", 2, Money::from_rupees(3500)))
            .unwrap();
        run(&mut state, events);

        let result = state.consume_feed(&ConsumeFeed::new("Layer Mash", dec!(3), FlockId::new()));
        assert!(matches!(result, Err(FarmError::InsufficientFeed { .. })));

        let result = state.consume_feed(&ConsumeFeed::new("Grower", dec!(1), FlockId::new()));
        assert!(matches!(result, Err(FarmError::FeedNotStocked { .. })));
    }

    #[test]
    fn test_update_flock() {
        let (mut state, flock_id) = state_with_flock(500);

        let events = state
            .update_flock(&UpdateFlock::new(flock_id, FlockUpdate::SetActive(false)))
            .unwrap();
        run(&mut state, events);
        assert!(!state.flock(flock_id).unwrap().is_active);
        assert_eq!(state.active_layers(), 0);

        let events = state
            .update_flock(&UpdateFlock::new(
                flock_id,
                FlockUpdate::RenameBreed("Hy-Line".to_string()),
            ))
            .unwrap();
        run(&mut state, events);
        assert_eq!(state.flock(flock_id).unwrap().breed, "Hy-Line");
    }

    #[test]
    fn test_update_unknown_flock_is_noop() {
        let state = FarmState::default();
        let events = state
            .update_flock(&UpdateFlock::new(FlockId::new(), FlockUpdate::SetAgeWeeks(30)))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_update_flock_without_change_is_noop() {
        let (state, flock_id) = state_with_flock(500);
        let events = state
            .update_flock(&UpdateFlock::new(flock_id, FlockUpdate::SetActive(true)))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_record_mortality() {
        let (mut state, flock_id) = state_with_flock(500);

        let events = state
            .record_mortality(&RecordMortality::new(flock_id, 12))
            .unwrap();
        run(&mut state, events);

        let flock = state.flock(flock_id).unwrap();
        assert_eq!(flock.mortality, 12);
        assert_eq!(flock.number_of_layers, 488);

        let result = state.record_mortality(&RecordMortality::new(flock_id, 489));
        assert!(matches!(
            result,
            Err(FarmError::MortalityExceedsFlock {
                requested: 489,
                available: 488
            })
        ));
    }

    #[test]
    fn test_mortality_for_unknown_flock_is_noop() {
        let state = FarmState::default();
        let events = state
            .record_mortality(&RecordMortality::new(FlockId::new(), 3))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_apply_mortality_saturates() {
        let (mut state, flock_id) = state_with_flock(5);
        state.apply(FarmEvent::mortality_recorded(flock_id, 9));

        let flock = state.flock(flock_id).unwrap();
        assert_eq!(flock.number_of_layers, 0);
        assert_eq!(flock.mortality, 9);
    }

    #[test]
    fn test_vaccination_lifecycle() {
        let (mut state, flock_id) = state_with_flock(500);
        let today = date(2026, 6, 10);

        let events = state
            .schedule_vaccination(&ScheduleVaccination::new(
                flock_id,
                "Newcastle (Lasota)",
                date(2026, 6, 1),
            ))
            .unwrap();
        run(&mut state, events);
        let vaccination_id = state.vaccinations()[0].id;

        assert!(state.vaccination(vaccination_id).unwrap().is_overdue_on(today));
        assert_eq!(
            state.vaccination(vaccination_id).unwrap().status,
            VaccinationStatus::Scheduled
        );
        assert_eq!(state.overdue_vaccinations(today).count(), 1);

        let events = state
            .complete_vaccination(&CompleteVaccination::new(vaccination_id).on(today))
            .unwrap();
        run(&mut state, events);

        let vaccination = state.vaccination(vaccination_id).unwrap();
        assert_eq!(vaccination.status, VaccinationStatus::Completed);
        assert_eq!(vaccination.administered_date, Some(today));
        assert_eq!(state.overdue_vaccinations(today).count(), 0);
    }

    #[test]
    fn test_reschedule_vaccination() {
        let mut state = FarmState::default();
        let events = state
            .schedule_vaccination(&ScheduleVaccination::new(
                FlockId::new(),
                "Gumboro",
                date(2026, 6, 1),
            ))
            .unwrap();
        run(&mut state, events);
        let vaccination_id = state.vaccinations()[0].id;

        let events = state
            .reschedule_vaccination(&RescheduleVaccination::new(vaccination_id, date(2026, 6, 20)))
            .unwrap();
        run(&mut state, events);
        assert_eq!(
            state.vaccination(vaccination_id).unwrap().scheduled_date,
            date(2026, 6, 20)
        );

        let events = state
            .complete_vaccination(&CompleteVaccination::new(vaccination_id))
            .unwrap();
        run(&mut state, events);

        let result =
            state.reschedule_vaccination(&RescheduleVaccination::new(vaccination_id, date(2026, 7, 1)));
        assert!(matches!(
            result,
            Err(FarmError::InvalidStateTransition {
                action: "reschedule",
                ..
            })
        ));
    }

    #[test]
    fn test_complete_unknown_vaccination() {
        let state = FarmState::default();
        let id = VaccinationId::new();
        let result = state.complete_vaccination(&CompleteVaccination::new(id));
        assert!(matches!(result, Err(FarmError::VaccinationNotFound(v)) if v == id));
    }

    #[test]
    fn test_disease_with_cost_debits_medication() {
        let (mut state, flock_id) = state_with_flock(500);

        let events = state
            .report_disease(
                &ReportDisease::new(flock_id, "Coccidiosis", 40)
                    .with_treatment("Amprolium 5 days", Money::from_rupees(5000)),
            )
            .unwrap();
        run(&mut state, events);

        assert_eq!(state.transactions().len(), 1);
        let transaction = &state.transactions()[0];
        assert_eq!(transaction.category, Category::Medication);
        assert_eq!(transaction.source, "Treatment for Coccidiosis");
        assert_eq!(transaction.description, "Amprolium 5 days");
        assert_eq!(state.balance().rupees(), -5000);

        let disease_id = state.disease_records()[0].id;
        let events = state
            .resolve_disease(&ResolveDisease::new(disease_id))
            .unwrap();
        run(&mut state, events);

        assert_eq!(
            state.disease_record(disease_id).unwrap().status,
            DiseaseStatus::Resolved
        );
        assert_eq!(state.transactions().len(), 1);
        assert_eq!(state.balance().rupees(), -5000);

        let result = state.resolve_disease(&ResolveDisease::new(disease_id));
        assert!(matches!(
            result,
            Err(FarmError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_disease_without_cost_posts_nothing() {
        let state = FarmState::default();
        let events = state
            .report_disease(&ReportDisease::new(FlockId::new(), "Fowl pox", 3))
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_add_transaction_and_initial_balance() {
        let mut state = FarmState::default();

        let events = state
            .set_initial_balance(&SetInitialBalance::new(Money::from_rupees(100_000)))
            .unwrap();
        run(&mut state, events);

        let initial = &state.transactions()[0];
        assert_eq!(initial.category, Category::InitialBalance);
        assert_eq!(initial.linked_company, LinkedCompany::ChairmanGroup);
        assert_eq!(initial.source, "Balance Added");

        let events = state
            .add_transaction(
                &AddTransaction::debit(Money::from_rupees(1200), "Electricity", Category::Utilities)
                    .with_description("May bill"),
            )
            .unwrap();
        run(&mut state, events);

        assert_eq!(state.balance().rupees(), 98_800);
        assert_eq!(state.total_credits().rupees(), 100_000);
        assert_eq!(state.total_debits().rupees(), 1200);

        let result = state.add_transaction(&AddTransaction::credit(
            Money::zero(),
            "Nothing",
            Category::Other,
        ));
        assert!(matches!(result, Err(FarmError::InvalidAmount { .. })));
    }

    #[test]
    fn test_update_egg_price() {
        let mut state = FarmState::default();
        let events = state
            .update_egg_price(&UpdateEggPrice::new(Money::from_rupees(2700)))
            .unwrap();
        run(&mut state, events);

        assert_eq!(state.egg_price().price_per_peti.rupees(), 2700);
        assert!(state.egg_price().last_updated.is_some());
    }

    #[test]
    fn test_purchase_birds_adds_flock_and_debit() {
        let mut state = FarmState::default();
        let events = state
            .purchase_birds(&PurchaseBirds::new("BV-300", 1000, Money::from_rupees(45), 1))
            .unwrap();
        run(&mut state, events);

        let flock = &state.flocks()[0];
        assert_eq!(flock.number_of_layers, 1000);
        assert!(flock.is_active);

        let transaction = &state.transactions()[0];
        assert_eq!(transaction.amount.rupees(), 45_000);
        assert_eq!(transaction.category, Category::BirdPurchase);
        assert_eq!(transaction.linked_company, LinkedCompany::ChairmanHatchery);
        assert_eq!(
            transaction.description,
            "Bird Purchase - 1000 BV-300 from Chairman Hatchery"
        );
    }

    #[test]
    fn test_labour_payment() {
        let mut state = FarmState::default();
        let events = state
            .hire_labourer(&HireLabourer::new(
                "Suresh",
                "Shed hand",
                WageType::Monthly,
                Money::from_rupees(12_000),
            ))
            .unwrap();
        run(&mut state, events);
        let labourer_id = state.labourers()[0].id;

        let events = state
            .pay_labourer(&PayLabourer::new(labourer_id, Money::from_rupees(12_000)))
            .unwrap();
        run(&mut state, events);

        let payment = &state.labour_payments()[0];
        let transaction = &state.transactions()[0];
        assert_eq!(payment.transaction_id, transaction.id);
        assert_eq!(transaction.category, Category::LabourPayment);
        assert_eq!(transaction.description, "Labour Payment - Suresh (Shed hand)");
        assert_eq!(state.balance().rupees(), -12_000);

        let events = state
            .set_labourer_status(&SetLabourerStatus::new(labourer_id, LabourerStatus::Inactive))
            .unwrap();
        run(&mut state, events);

        let result = state.pay_labourer(&PayLabourer::new(labourer_id, Money::from_rupees(500)));
        assert!(matches!(
            result,
            Err(FarmError::InvalidStateTransition { action: "pay", .. })
        ));

        let unknown = LabourerId::new();
        let result = state.pay_labourer(&PayLabourer::new(unknown, Money::from_rupees(500)));
        assert!(matches!(result, Err(FarmError::LabourerNotFound(id)) if id == unknown));
    }

    #[test]
    fn test_zero_collection_day_is_recorded() {
        let (mut state, flock_id) = state_with_flock(1000);
        let events = state
            .record_egg_production(&RecordEggProduction::new(flock_id, 200))
            .unwrap();
        run(&mut state, events);

        let events = state
            .record_egg_production(&RecordEggProduction::new(flock_id, 0))
            .unwrap();
        run(&mut state, events);

        let production = &state.egg_productions()[1];
        assert_eq!(production.good_eggs, 0);
        assert_eq!(production.peti_count, 0);
        assert_eq!(production.remaining_eggs, 200);
        assert_eq!(state.egg_inventory().total_eggs, 200);
        assert!(state.egg_inventory().is_consistent());
    }

    #[test]
    fn test_flock_without_layers_is_accepted() {
        let (state, _) = state_with_flock(0);
        assert_eq!(state.flocks()[0].number_of_layers, 0);
        assert_eq!(state.active_layers(), 0);
    }

    #[test]
    fn test_feed_purchase_total_overflow_is_rejected() {
        let state = FarmState::default();
        let result = state.purchase_feed(&PurchaseFeed::new(
            "Layer Mash",
            3,
            Money::from_rupees(i64::MAX / 2),
        ));

        assert!(matches!(
            result,
            Err(FarmError::AmountOverflow {
                field: "feed purchase total"
            })
        ));
    }

    #[test]
    fn test_sale_total_overflow_is_rejected() {
        let (mut state, flock_id) = state_with_flock(1000);
        let events = state
            .record_egg_production(&RecordEggProduction::new(flock_id, 3 * 360))
            .unwrap();
        run(&mut state, events);

        let result = state.record_egg_sale(&RecordEggSale::new(
            3,
            Money::from_rupees(i64::MAX / 2),
            "Hotel",
        ));
        assert!(matches!(
            result,
            Err(FarmError::AmountOverflow { field: "sale total" })
        ));
        assert_eq!(state.egg_inventory().total_peti, 3);
    }

    #[test]
    fn test_bird_purchase_total_overflow_is_rejected() {
        let state = FarmState::default();
        let result = state.purchase_birds(&PurchaseBirds::new(
            "BV-300",
            4,
            Money::from_rupees(i64::MAX / 3),
            1,
        ));
        assert!(matches!(
            result,
            Err(FarmError::AmountOverflow {
                field: "bird purchase total"
            })
        ));
    }

    #[test]
    fn test_balance_overflow_is_rejected() {
        let mut state = FarmState::default();
        let half = Money::from_rupees(i64::MAX / 2 + 10);

        let events = state
            .set_initial_balance(&SetInitialBalance::new(half))
            .unwrap();
        run(&mut state, events);

        let result = state.set_initial_balance(&SetInitialBalance::new(half));
        assert!(matches!(
            result,
            Err(FarmError::AmountOverflow { field: "balance" })
        ));
        let result = state.add_transaction(&AddTransaction::credit(half, "Bank", Category::Other));
        assert!(matches!(result, Err(FarmError::AmountOverflow { .. })));
        assert_eq!(state.balance(), half);
    }

    #[test]
    fn test_debit_past_money_range_is_rejected() {
        let (mut state, flock_id) = state_with_flock(100);
        let events = state
            .add_transaction(&AddTransaction::debit(
                Money::from_rupees(i64::MAX),
                "Loan",
                Category::Other,
            ))
            .unwrap();
        run(&mut state, events);

        let result = state.report_disease(
            &ReportDisease::new(flock_id, "Coryza", 5)
                .with_treatment("Antibiotics", Money::from_rupees(10)),
        );
        assert!(matches!(
            result,
            Err(FarmError::AmountOverflow { field: "balance" })
        ));

        let result = state.purchase_feed(&PurchaseFeed::new("Grower", 1, Money::from_rupees(10)));
        assert!(matches!(result, Err(FarmError::AmountOverflow { .. })));

        let events = state
            .hire_labourer(&HireLabourer::new(
                "Suresh",
                "Shed hand",
                WageType::Daily,
                Money::from_rupees(500),
            ))
            .unwrap();
        run(&mut state, events);
        let labourer_id = state.labourers()[0].id;
        let result = state.pay_labourer(&PayLabourer::new(labourer_id, Money::from_rupees(500)));
        assert!(matches!(result, Err(FarmError::AmountOverflow { .. })));
        assert!(state.labour_payments().is_empty());
    }

    #[test]
    fn test_state_serialization_skips_revision() {
        let (mut state, _) = state_with_flock(100);
        state.set_revision(Revision::new(7));

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("revision").is_none());
        assert!(json["feed_stocks"].is_object());

        let restored: FarmState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.revision(), Revision::initial());
        assert_eq!(restored.flocks().len(), 1);
    }

    #[test]
    fn test_partial_document_loads_with_defaults() {
        let json = serde_json::json!({ "flocks": [] });
        let state: FarmState = serde_json::from_value(json).unwrap();
        assert_eq!(state.egg_price().price_per_peti.rupees(), 2500);
    }
}
