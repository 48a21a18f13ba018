//! Integration tests for the farm state engine.
//!
//! These run whole operations through `FarmService`, so every step goes
//! through load, decide, apply and a whole-document put.

use chrono::NaiveDate;
use common::FlockId;
use domain::{
    AddFlock, AddTransaction, Aggregate, Category, CompleteVaccination, ConsumeFeed, DomainError,
    EGGS_PER_PETI, FarmError, FarmService, FarmState, HireLabourer, LinkedCompany, Money,
    PayLabourer, PurchaseBirds, PurchaseFeed, RecordEggProduction, RecordEggSale, RecordMortality,
    ReportDisease, ResolveDisease, ScheduleVaccination, SetInitialBalance, TransactionKind,
    VaccinationStatus, WageType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;
use state_store::{InMemoryStateStore, Revision, SqliteStateStore, StateStore};

fn create_service() -> FarmService<InMemoryStateStore> {
    FarmService::new(InMemoryStateStore::new())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn add_flock(service: &FarmService<InMemoryStateStore>, layers: u32) -> FlockId {
    let result = service
        .add_flock(AddFlock::new("Lohmann Brown", layers, 20))
        .await
        .unwrap();
    result.aggregate.flocks().last().unwrap().id
}

fn assert_ledger_conserved(state: &FarmState) {
    let signed: Money = state.transactions().iter().map(|t| t.signed_amount()).sum();
    assert_eq!(state.balance(), signed);
    assert_eq!(state.balance(), state.total_credits() - state.total_debits());

    let expected_borrowed = if state.balance().is_negative() {
        state.balance().abs()
    } else {
        Money::zero()
    };
    assert_eq!(state.bank_account().borrowed_amount, expected_borrowed);
}

mod eggs {
    use super::*;

    #[tokio::test]
    async fn production_then_sale_of_one_peti() {
        let service = create_service();
        let flock_id = add_flock(&service, 1000).await;

        let result = service
            .record_egg_production(RecordEggProduction::new(flock_id, 400).with_broken(40))
            .await
            .unwrap();

        let production = &result.aggregate.egg_productions()[0];
        assert_eq!(production.good_eggs, 360);
        assert_eq!(production.peti_count, 1);
        assert_eq!(production.remaining_eggs, 0);

        let inventory = result.aggregate.egg_inventory();
        assert_eq!(
            (inventory.total_eggs, inventory.total_peti, inventory.remaining_eggs),
            (360, 1, 0)
        );

        let result = service
            .record_egg_sale(RecordEggSale::new(1, Money::from_rupees(2500), "Local market"))
            .await
            .unwrap();
        let state = result.aggregate;

        assert_eq!(state.egg_sales()[0].total_amount.rupees(), 2500);
        assert_eq!(state.egg_inventory().total_eggs, 0);
        assert_eq!(state.egg_inventory().total_peti, 0);
        assert_eq!(state.egg_inventory().remaining_eggs, 0);

        assert_eq!(state.transactions().len(), 1);
        assert_eq!(state.transactions()[0].kind, TransactionKind::Credit);
        assert_eq!(state.transactions()[0].amount.rupees(), 2500);
        assert_eq!(state.balance().rupees(), 2500);
        assert_eq!(state.bank_account().borrowed_amount, Money::zero());
    }

    #[tokio::test]
    async fn peti_conservation_over_mixed_sequence() {
        let service = create_service();
        let flock_id = add_flock(&service, 3000).await;

        let collections = [(1250, 12), (980, 0), (1500, 33), (47, 47), (2999, 1)];
        let mut good_total = 0;
        let mut sold_peti = 0;

        for (i, (total, broken)) in collections.into_iter().enumerate() {
            let result = service
                .record_egg_production(
                    RecordEggProduction::new(flock_id, total).with_broken(broken),
                )
                .await
                .unwrap();
            good_total += total - broken;

            let inventory = result.aggregate.egg_inventory();
            assert!(inventory.is_consistent());

            if i % 2 == 0 && inventory.total_peti > 0 {
                let result = service
                    .record_egg_sale(RecordEggSale::new(
                        inventory.total_peti,
                        Money::from_rupees(2500),
                        "Wholesaler",
                    ))
                    .await
                    .unwrap();
                sold_peti += result.aggregate.egg_sales().last().unwrap().peti_count;
                assert!(result.aggregate.egg_inventory().is_consistent());
            }
        }

        let state = service.state().await.unwrap();
        let inventory = state.egg_inventory();
        assert!(inventory.is_consistent());
        assert_eq!(inventory.total_eggs, good_total - sold_peti * EGGS_PER_PETI);
        assert_ledger_conserved(&state);
    }

    #[tokio::test]
    async fn oversell_is_rejected_and_nothing_changes() {
        let service = create_service();
        let flock_id = add_flock(&service, 1000).await;
        let before = service
            .record_egg_production(RecordEggProduction::new(flock_id, 720))
            .await
            .unwrap();

        let err = service
            .record_egg_sale(RecordEggSale::new(3, Money::from_rupees(2500), "Buyer"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Farm(FarmError::InsufficientEggs {
                requested: 3,
                available: 2
            })
        ));
        assert!(err.to_string().contains("only 2 peti available"));

        let after = service.state().await.unwrap();
        assert_eq!(after.revision(), before.revision);
        assert!(after.transactions().is_empty());
        assert_eq!(after.egg_inventory().total_eggs, 720);
    }
}

mod ledger {
    use super::*;

    #[tokio::test]
    async fn feed_purchase_drives_balance_negative() {
        let service = create_service();

        let result = service
            .purchase_feed(PurchaseFeed::new("Layer Mash", 10, Money::from_rupees(3500)))
            .await
            .unwrap();
        let state = result.aggregate;

        assert_eq!(state.feed_purchases()[0].total_cost.rupees(), 35_000);
        assert_eq!(state.balance().rupees(), -35_000);
        assert_eq!(state.bank_account().borrowed_amount.rupees(), 35_000);

        let debits: Vec<_> = state
            .transactions()
            .iter()
            .filter(|t| t.category == Category::FeedPurchase)
            .collect();
        assert_eq!(debits.len(), 1);
        assert_eq!(debits[0].kind, TransactionKind::Debit);
    }

    #[tokio::test]
    async fn credit_pays_back_borrowing() {
        let service = create_service();
        service
            .purchase_feed(PurchaseFeed::new("Layer Mash", 10, Money::from_rupees(3500)))
            .await
            .unwrap();

        let result = service
            .set_initial_balance(SetInitialBalance::new(Money::from_rupees(20_000)))
            .await
            .unwrap();
        assert_eq!(result.aggregate.balance().rupees(), -15_000);
        assert_eq!(result.aggregate.bank_account().borrowed_amount.rupees(), 15_000);

        let result = service
            .add_transaction(AddTransaction::credit(
                Money::from_rupees(40_000),
                "Advance from Chairman Group",
                Category::Other,
            ))
            .await
            .unwrap();
        assert_eq!(result.aggregate.balance().rupees(), 25_000);
        assert_eq!(result.aggregate.bank_account().borrowed_amount, Money::zero());
        assert_ledger_conserved(&result.aggregate);
    }

    #[tokio::test]
    async fn ledger_conserved_across_every_money_operation() {
        let service = create_service();
        let flock_id = add_flock(&service, 800).await;

        service
            .set_initial_balance(SetInitialBalance::new(Money::from_rupees(10_000)))
            .await
            .unwrap();
        service
            .purchase_feed(PurchaseFeed::new("Grower", 6, Money::from_rupees(3200)))
            .await
            .unwrap();
        service
            .report_disease(
                ReportDisease::new(flock_id, "Coryza", 25)
                    .with_treatment("Sulfa drugs", Money::from_rupees(1800)),
            )
            .await
            .unwrap();
        service
            .record_egg_production(RecordEggProduction::new(flock_id, 1100))
            .await
            .unwrap();
        service
            .record_egg_sale(RecordEggSale::new(3, Money::from_rupees(2600), "Hotel"))
            .await
            .unwrap();
        let result = service
            .add_transaction(AddTransaction::debit(
                Money::from_rupees(950),
                "Electricity",
                Category::Utilities,
            ))
            .await
            .unwrap();

        let state = result.aggregate;
        assert_eq!(state.transactions().len(), 5);
        assert_eq!(state.balance().rupees(), 10_000 - 19_200 - 1800 + 7800 - 950);
        assert_ledger_conserved(&state);
    }

    #[tokio::test]
    async fn birds_and_wages_are_debits_to_outside_parties() {
        let service = create_service();

        let result = service
            .purchase_birds(PurchaseBirds::new("BV-300", 1000, Money::from_rupees(45), 1))
            .await
            .unwrap();
        let flock = &result.aggregate.flocks()[0];
        assert_eq!(flock.number_of_layers, 1000);
        assert!(flock.is_active);

        let hired = service
            .hire_labourer(HireLabourer::new(
                "Sita",
                "Collector",
                WageType::Daily,
                Money::from_rupees(600),
            ))
            .await
            .unwrap();
        let labourer_id = hired.aggregate.labourers()[0].id;

        let result = service
            .pay_labourer(PayLabourer::new(labourer_id, Money::from_rupees(600)))
            .await
            .unwrap();

        let state = result.aggregate;
        let transactions = state.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].category, Category::BirdPurchase);
        assert_eq!(transactions[0].linked_company, LinkedCompany::ChairmanHatchery);
        assert_eq!(transactions[0].amount, Money::from_rupees(45_000));
        assert_eq!(transactions[1].category, Category::LabourPayment);
        assert_eq!(transactions[1].linked_company, LinkedCompany::External);
        assert_eq!(state.balance(), Money::from_rupees(-45_600));
        assert_eq!(state.bank_account().borrowed_amount, Money::from_rupees(45_600));
        assert_eq!(state.labour_payments().len(), 1);
        assert_ledger_conserved(&state);
    }

    #[tokio::test]
    async fn balance_that_would_overflow_is_rejected() {
        let service = create_service();
        let half = Money::from_rupees(i64::MAX / 2 + 10);
        let before = service
            .set_initial_balance(SetInitialBalance::new(half))
            .await
            .unwrap();

        let err = service
            .set_initial_balance(SetInitialBalance::new(half))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Farm(FarmError::AmountOverflow { field: "balance" })
        ));

        let after = service.state().await.unwrap();
        assert_eq!(after.revision(), before.revision);
        assert_eq!(after.transactions().len(), 1);
        assert_eq!(after.balance(), half);
        assert_ledger_conserved(&after);
    }
}

mod feed_and_flocks {
    use super::*;

    #[tokio::test]
    async fn stock_never_goes_negative() {
        let service = create_service();
        let flock_id = add_flock(&service, 500).await;
        service
            .purchase_feed(PurchaseFeed::new("Layer Mash", 3, Money::from_rupees(3500)))
            .await
            .unwrap();

        for used in [dec!(1.5), dec!(1), dec!(0.5)] {
            service
                .consume_feed(ConsumeFeed::new("Layer Mash", used, flock_id))
                .await
                .unwrap();
        }

        let err = service
            .consume_feed(ConsumeFeed::new("Layer Mash", dec!(0.5), flock_id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Farm(FarmError::InsufficientFeed { .. })
        ));

        let state = service.state().await.unwrap();
        assert_eq!(
            state.feed_stock("Layer Mash").unwrap().bags_in_stock,
            Decimal::ZERO
        );
        assert_eq!(state.feed_consumptions().len(), 3);
    }

    #[tokio::test]
    async fn layers_never_go_negative() {
        let service = create_service();
        let flock_id = add_flock(&service, 10).await;

        service
            .record_mortality(RecordMortality::new(flock_id, 10))
            .await
            .unwrap();
        let err = service
            .record_mortality(RecordMortality::new(flock_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Farm(FarmError::MortalityExceedsFlock { .. })
        ));

        let state = service.state().await.unwrap();
        let flock = state.flock(flock_id).unwrap();
        assert_eq!(flock.number_of_layers, 0);
        assert_eq!(flock.mortality, 10);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn disease_cost_posts_one_medication_debit() {
        let service = create_service();
        let flock_id = add_flock(&service, 500).await;

        let result = service
            .report_disease(
                ReportDisease::new(flock_id, "Newcastle disease", 60)
                    .with_treatment("Vaccination + vitamins", Money::from_rupees(5000)),
            )
            .await
            .unwrap();
        let disease_id = result.aggregate.disease_records()[0].id;

        let medication: Vec<_> = result
            .aggregate
            .transactions()
            .iter()
            .filter(|t| t.category == Category::Medication)
            .collect();
        assert_eq!(medication.len(), 1);
        assert_eq!(medication[0].amount.rupees(), 5000);

        let result = service
            .resolve_disease(ResolveDisease::new(disease_id))
            .await
            .unwrap();
        assert_eq!(result.aggregate.transactions().len(), 1);
        assert_eq!(result.aggregate.balance().rupees(), -5000);
    }

    #[tokio::test]
    async fn past_vaccination_reads_overdue_until_completed() {
        let service = create_service();
        let flock_id = add_flock(&service, 500).await;
        let today = date(2026, 8, 15);

        let result = service
            .schedule_vaccination(ScheduleVaccination::new(
                flock_id,
                "Infectious Bronchitis",
                date(2026, 8, 1),
            ))
            .await
            .unwrap();
        let vaccination_id = result.aggregate.vaccinations()[0].id;
        let revision = result.revision;

        let state = service.state().await.unwrap();
        let vaccination = state.vaccination(vaccination_id).unwrap();
        assert_eq!(vaccination.status_on(today), VaccinationStatus::Overdue);
        assert_eq!(vaccination.status, VaccinationStatus::Scheduled);
        assert_eq!(state.revision(), revision);

        let result = service
            .complete_vaccination(CompleteVaccination::new(vaccination_id).on(today))
            .await
            .unwrap();
        let vaccination = result.aggregate.vaccination(vaccination_id).unwrap();
        assert_eq!(vaccination.status, VaccinationStatus::Completed);
        assert_eq!(vaccination.administered_date, Some(today));
        assert_eq!(vaccination.status_on(today), VaccinationStatus::Completed);
    }
}

mod persistence {
    use super::*;

    async fn sqlite_store() -> SqliteStateStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let store = SqliteStateStore::new(pool);
        store.run_migrations().await.unwrap();
        store
    }

    #[tokio::test]
    async fn state_survives_reload_from_sqlite() {
        let store = sqlite_store().await;
        let service = FarmService::new(store.clone());

        let result = service
            .add_flock(AddFlock::new("Hy-Line W-36", 1200, 22))
            .await
            .unwrap();
        let flock_id = result.aggregate.flocks()[0].id;
        service
            .purchase_feed(PurchaseFeed::new("Layer Mash", 4, Money::from_rupees(3500)))
            .await
            .unwrap();
        service
            .consume_feed(ConsumeFeed::new("Layer Mash", dec!(1.5), flock_id))
            .await
            .unwrap();

        let reopened = FarmService::new(store.clone());
        let state = reopened.state().await.unwrap();

        assert_eq!(state.revision(), Revision::new(3));
        assert_eq!(state.flocks().len(), 1);
        assert_eq!(state.balance().rupees(), -14_000);
        assert_eq!(
            state.feed_stock("Layer Mash").unwrap().bags_in_stock,
            dec!(2.5)
        );
        assert_eq!(store.get_revision("farm_state").await.unwrap(), Revision::new(3));
    }

    #[tokio::test]
    async fn rejected_command_is_not_persisted_to_sqlite() {
        let store = sqlite_store().await;
        let service = FarmService::new(store.clone());

        let err = service
            .consume_feed(ConsumeFeed::new("Layer Mash", dec!(1), FlockId::new()))
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert!(store.get("farm_state").await.unwrap().is_none());
    }
}
