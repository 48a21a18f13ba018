//! Plain-text rendering of command outcomes and summaries.

use std::fmt::Write;

use domain::{FarmEvent, FlockUpdate};
use reports::{ExpenseBreakdown, FarmSummary, MonthlyProfitAndLoss, ProductionStats};

/// One line per event, naming the ids a follow-up command would need.
pub fn describe(event: &FarmEvent) -> String {
    match event {
        FarmEvent::TransactionRecorded(data) => {
            let t = &data.transaction;
            format!(
                "{} {} {} ({}, {})",
                t.kind, t.amount, t.source, t.category, t.linked_company
            )
        }
        FarmEvent::EggsProduced(data) => {
            let p = &data.production;
            format!(
                "production {}: {} good eggs, {} peti + {} loose",
                p.id, p.good_eggs, p.peti_count, p.remaining_eggs
            )
        }
        FarmEvent::EggsSold(data) => {
            let s = &data.sale;
            format!(
                "sale {}: {} peti to {} for {}",
                s.id, s.peti_count, s.buyer_name, s.total_amount
            )
        }
        FarmEvent::FeedPurchased(data) => {
            let p = &data.purchase;
            format!(
                "feed purchase {}: {} bags of {} for {}",
                p.id, p.bags, p.feed_type, p.total_cost
            )
        }
        FarmEvent::FeedConsumed(data) => {
            let c = &data.consumption;
            format!(
                "fed {} bags of {} to flock {}",
                c.bags_used, c.feed_type, c.flock_id
            )
        }
        FarmEvent::FlockAdded(data) => format!(
            "flock {}: {} {} layers",
            data.flock.id, data.flock.number_of_layers, data.flock.breed
        ),
        FarmEvent::FlockUpdated(data) => {
            let change = match &data.update {
                FlockUpdate::SetActive(true) => "reactivated".to_string(),
                FlockUpdate::SetActive(false) => "deactivated".to_string(),
                FlockUpdate::RenameBreed(breed) => format!("breed set to {breed}"),
                FlockUpdate::SetAgeWeeks(weeks) => format!("age set to {weeks} weeks"),
                FlockUpdate::SetStartDate(date) => format!("start date set to {date}"),
            };
            format!("flock {} {change}", data.flock_id)
        }
        FarmEvent::MortalityRecorded(data) => {
            format!("flock {}: {} birds lost", data.flock_id, data.count)
        }
        FarmEvent::VaccinationScheduled(data) => {
            let v = &data.vaccination;
            format!(
                "vaccination {}: {} on {}",
                v.id, v.vaccine_name, v.scheduled_date
            )
        }
        FarmEvent::VaccinationRescheduled(data) => format!(
            "vaccination {} moved from {} to {}",
            data.vaccination_id, data.previous_date, data.scheduled_date
        ),
        FarmEvent::VaccinationCompleted(data) => format!(
            "vaccination {} completed on {}",
            data.vaccination_id, data.administered_date
        ),
        FarmEvent::DiseaseReported(data) => {
            let r = &data.record;
            format!(
                "disease {}: {} affecting {} birds",
                r.id, r.disease_name, r.affected_birds
            )
        }
        FarmEvent::DiseaseResolved(data) => format!("disease {} resolved", data.disease_id),
        FarmEvent::EggPriceUpdated(data) => {
            format!("egg price set to {} per peti", data.price_per_peti)
        }
        FarmEvent::LabourerHired(data) => {
            let l = &data.labourer;
            format!(
                "labourer {}: {} ({}, {} {})",
                l.id, l.name, l.role, l.wage_type, l.wage_amount
            )
        }
        FarmEvent::LabourerStatusChanged(data) => {
            format!("labourer {} is now {}", data.labourer_id, data.status)
        }
        FarmEvent::LabourPaid(data) => {
            let p = &data.payment;
            format!("paid {} to labourer {}", p.amount, p.labourer_id)
        }
    }
}

/// Renders the events of one command, or a note when nothing changed.
pub fn describe_all(events: &[FarmEvent]) -> String {
    if events.is_empty() {
        return "nothing to change".to_string();
    }
    events.iter().map(describe).collect::<Vec<_>>().join("\n")
}

/// Renders the dashboard as aligned text.
pub fn render_summary(
    summary: &FarmSummary,
    stats: &ProductionStats,
    expenses: &ExpenseBreakdown,
    months: &[MonthlyProfitAndLoss],
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Farm summary as of {}", summary.as_of);
    let _ = writeln!(out, "  balance            {}", summary.balance);
    if summary.borrowed_amount.is_positive() {
        let _ = writeln!(out, "  borrowed           {}", summary.borrowed_amount);
    }
    let _ = writeln!(
        out,
        "  flocks             {} active, {} layers, {} lost",
        summary.active_flocks, summary.active_layers, summary.total_mortality
    );
    let _ = writeln!(
        out,
        "  eggs in stock      {} peti + {} loose",
        summary.peti_in_stock, summary.loose_eggs
    );
    let _ = writeln!(out, "  egg price          {} per peti", summary.egg_price);
    let _ = writeln!(
        out,
        "  production         {} collected, {} broken ({}%)",
        stats.total_eggs, stats.broken_eggs, stats.broken_percentage
    );
    let _ = writeln!(out, "  egg revenue        {}", summary.total_egg_revenue);
    let _ = writeln!(out, "  feed cost          {}", summary.total_feed_cost);
    let _ = writeln!(out, "  medication cost    {}", summary.medication_cost);
    let _ = writeln!(out, "  profit/loss        {}", summary.profit_loss);
    let _ = writeln!(
        out,
        "  feed in stock      {} bags ({} kg)",
        summary.feed_bags_in_stock, summary.feed_kg_in_stock
    );
    if !summary.low_stock_feed.is_empty() {
        let _ = writeln!(
            out,
            "  low feed           {}",
            summary.low_stock_feed.join(", ")
        );
    }
    let _ = writeln!(out, "  active diseases    {}", summary.active_diseases);

    for v in &summary.overdue_vaccinations {
        let _ = writeln!(
            out,
            "  OVERDUE            {} for flock {} (due {})",
            v.vaccine_name, v.flock_id, v.scheduled_date
        );
    }
    for v in &summary.upcoming_vaccinations {
        let _ = writeln!(
            out,
            "  upcoming           {} for flock {} on {}",
            v.vaccine_name, v.flock_id, v.scheduled_date
        );
    }

    if !expenses.entries.is_empty() {
        let _ = writeln!(out, "Expenses ({})", expenses.total);
        for (category, amount) in &expenses.entries {
            let _ = writeln!(out, "  {:<18} {amount}", category.as_str());
        }
    }

    if !months.is_empty() {
        let _ = writeln!(out, "Profit and loss");
        for month in months {
            let _ = writeln!(
                out,
                "  {:<18} revenue {}, expenses {}, profit {}",
                month.label(),
                month.revenue,
                month.expenses,
                month.profit
            );
        }
    }

    out.trim_end().to_string()
}
