//! Output formatting module

use crate::cli::OutputFormat;
use anyhow::Result;
use rentdesk::domain::branch::Branch;
use rentdesk::domain::rate_plan::{Quote, RatePlan};
use rentdesk::domain::reservation::Reservation;
use rentdesk::domain::user::{DriverProfile, User};
use rentdesk::domain::vehicle::{VehicleModel, VehicleUnit};
use rentdesk::state::{NoticeLevel, NoticeState, VehiclesState};
use rentdesk::utils::{format_money, format_number, format_opt_datetime, truncate};
use serde::Serialize;

fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_dash(s: Option<&str>) -> &str {
    s.filter(|s| !s.is_empty()).unwrap_or("-")
}

/// Error notices raised while the command ran, on stderr
pub fn print_notices(notices: &NoticeState) {
    for notice in notices.entries().filter(|n| n.level == NoticeLevel::Error) {
        match &notice.retry {
            Some(kind) => eprintln!("! {} (retry: {})", notice.message, kind.label()),
            None => eprintln!("! {}", notice.message),
        }
    }
}

pub fn print_user(format: OutputFormat, user: &User) -> Result<()> {
    if format == OutputFormat::Json {
        return json(user);
    }
    println!("Name:    {}", user.display_name());
    println!("Email:   {}", user.email);
    println!("Role:    {:?}", user.role);
    println!("Branch:  {}", or_dash(Some(user.branch.display())));
    Ok(())
}

pub fn print_branches(format: OutputFormat, branches: &[&Branch]) -> Result<()> {
    if format == OutputFormat::Json {
        return json(branches);
    }
    println!("{:<26} {:<28} {:<36} {}", "ID", "NAME", "LOCATION", "ACTIVE");
    for b in branches {
        println!(
            "{:<26} {:<28} {:<36} {}",
            truncate(&b.id, 26),
            truncate(&b.label(), 28),
            truncate(&b.location(), 36),
            if b.is_active() { "yes" } else { "no" }
        );
    }
    println!("\n{} branches", branches.len());
    Ok(())
}

pub fn print_models(format: OutputFormat, models: &[&VehicleModel]) -> Result<()> {
    if format == OutputFormat::Json {
        return json(models);
    }
    println!("{:<26} {:<32} {:<12} {:>5}", "ID", "MODEL", "CLASS", "SEATS");
    for m in models {
        println!(
            "{:<26} {:<32} {:<12} {:>5}",
            truncate(&m.id, 26),
            truncate(&m.display_name(), 32),
            m.class.label(),
            m.seats.map(|s| s.to_string()).unwrap_or_else(|| "-".into())
        );
    }
    println!("\n{} models", models.len());
    Ok(())
}

pub fn print_units(
    format: OutputFormat,
    units: &[&VehicleUnit],
    vehicles: &VehiclesState,
) -> Result<()> {
    if format == OutputFormat::Json {
        return json(units);
    }
    println!(
        "{:<26} {:<10} {:<28} {:<20} {:<12} {:>10}",
        "ID", "PLATE", "MODEL", "BRANCH", "STATUS", "ODOMETER"
    );
    for u in units {
        let odometer = u
            .odometer
            .as_f64()
            .map(|km| format_number(km as i64))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<26} {:<10} {:<28} {:<20} {:<12} {:>10}",
            truncate(&u.id, 26),
            truncate(&u.plate, 10),
            truncate(&vehicles.model_label(&u.model), 28),
            truncate(&vehicles.branch_label(&u.branch), 20),
            u.status.label(),
            odometer
        );
    }
    println!("\n{} units", units.len());
    Ok(())
}

pub fn print_unit(format: OutputFormat, unit: &VehicleUnit, vehicles: &VehiclesState) -> Result<()> {
    if format == OutputFormat::Json {
        return json(unit);
    }
    println!("Unit {}", unit.label());
    println!("===============");
    println!("VIN:       {}", or_dash(unit.vin.as_deref()));
    println!("Plate:     {}", unit.plate);
    println!("Model:     {}", vehicles.model_label(&unit.model));
    println!("Branch:    {}", vehicles.branch_label(&unit.branch));
    println!("Status:    {}", unit.status.label());
    println!("Color:     {}", or_dash(unit.color.as_deref()));
    println!("Odometer:  {}", unit.odometer.display_or("-"));
    if unit.photos.is_empty() {
        println!("Photos:    none");
    } else {
        println!("Photos:");
        for (i, url) in unit.photos.iter().enumerate() {
            println!("  {}. {}", i + 1, url);
        }
    }
    Ok(())
}

pub fn print_rate_plans(format: OutputFormat, plans: &[&RatePlan]) -> Result<()> {
    if format == OutputFormat::Json {
        return json(plans);
    }
    println!(
        "{:<26} {:<28} {:<24} {:>8} {:>12} {}",
        "ID", "NAME", "SCOPE", "PRIORITY", "DAILY", "ACTIVE"
    );
    for p in plans {
        println!(
            "{:<26} {:<28} {:<24} {:>8} {:>12} {}",
            truncate(&p.id, 26),
            truncate(&p.name, 28),
            truncate(&p.scope_label(), 24),
            p.priority.unwrap_or(0),
            p.rates.daily.display_or("-"),
            if p.is_active() { "yes" } else { "no" }
        );
    }
    println!("\n{} rate plans", plans.len());
    Ok(())
}

pub fn print_rate_plan(format: OutputFormat, plan: &RatePlan) -> Result<()> {
    if format == OutputFormat::Json {
        return json(plan);
    }
    println!("{}", plan.name);
    println!("===============");
    println!("Scope:     {}", plan.scope_label());
    println!("Currency:  {}", plan.currency());
    println!("Priority:  {}", plan.priority.unwrap_or(0));
    println!("Active:    {}", if plan.is_active() { "yes" } else { "no" });

    println!("\n--- Rates ---");
    println!("Daily:     {}", plan.rates.daily.display_or("-"));
    println!("Weekly:    {}", plan.rates.weekly.display_or("-"));
    println!("Monthly:   {}", plan.rates.monthly.display_or("-"));
    println!("Weekend:   {}", plan.rates.weekend.display_or("-"));

    if !plan.taxes.is_empty() {
        println!("\n--- Taxes ---");
        for tax in &plan.taxes {
            println!("{:<24} {}%", tax.name, tax.percent.display_or("0"));
        }
    }
    if !plan.fees.is_empty() {
        println!("\n--- Fees ---");
        for fee in &plan.fees {
            let per = if fee.per_day { " / day" } else { "" };
            println!("{:<24} {}{}", fee.name, fee.amount.display_or("0"), per);
        }
    }
    if !plan.seasonal_rates.is_empty() {
        println!("\n--- Seasons ---");
        for season in &plan.seasonal_rates {
            println!(
                "{:<24} {} .. {}  daily {}",
                season.name,
                or_dash(season.start_date.as_deref()),
                or_dash(season.end_date.as_deref()),
                season.rates.daily.display_or("(base)")
            );
        }
    }
    Ok(())
}

pub fn print_quote(format: OutputFormat, plan: &RatePlan, quote: &Quote) -> Result<()> {
    if format == OutputFormat::Json {
        return json(quote);
    }
    println!("Quote for {} ({} days)", plan.name, quote.days);
    if let Some(season) = &quote.season {
        println!("Season: {season}");
    }
    println!("-------------------------");
    for line in &quote.lines {
        println!("{:<32} {:>16}", line.label, format_money(line.amount, &quote.currency));
    }
    println!("-------------------------");
    println!("{:<32} {:>16}", "Subtotal", format_money(quote.subtotal, &quote.currency));
    println!("{:<32} {:>16}", "Fees", format_money(quote.fees, &quote.currency));
    println!("{:<32} {:>16}", "Taxes", format_money(quote.taxes, &quote.currency));
    println!("{:<32} {:>16}", "Total", format_money(quote.total, &quote.currency));
    Ok(())
}

pub fn print_drivers(format: OutputFormat, drivers: &[&DriverProfile]) -> Result<()> {
    if format == OutputFormat::Json {
        return json(drivers);
    }
    println!("{:<26} {:<24} {:<16} {:<12} {}", "ID", "NAME", "LICENSE", "EXPIRES", "AVAILABLE");
    for d in drivers {
        println!(
            "{:<26} {:<24} {:<16} {:<12} {}",
            truncate(&d.id, 26),
            truncate(&d.name, 24),
            or_dash(d.license_number.as_deref()),
            or_dash(d.license_expiry.as_deref()),
            if d.available == Some(false) { "no" } else { "yes" }
        );
    }
    println!("\n{} drivers", drivers.len());
    Ok(())
}

pub fn print_reservations(format: OutputFormat, reservations: &[&Reservation]) -> Result<()> {
    if format == OutputFormat::Json {
        return json(reservations);
    }
    println!(
        "{:<12} {:<22} {:<17} {:<17} {:<12} {:>10}",
        "CODE", "CUSTOMER", "PICKUP", "RETURN", "STATUS", "TOTAL"
    );
    for r in reservations {
        println!(
            "{:<12} {:<22} {:<17} {:<17} {:<12} {:>10}",
            truncate(r.code(), 12),
            truncate(&r.customer.name, 22),
            format_opt_datetime(r.pickup_at.as_ref()),
            format_opt_datetime(r.return_at.as_ref()),
            r.status.label(),
            r.total.display_or("-")
        );
    }
    println!("\n{} reservations", reservations.len());
    Ok(())
}

pub fn print_reservation(format: OutputFormat, r: &Reservation) -> Result<()> {
    if format == OutputFormat::Json {
        return json(r);
    }
    println!("Reservation {}", r.code());
    println!("===============");
    println!("Status:    {}", r.status.label());
    println!("Customer:  {}", r.customer.name);
    println!("Email:     {}", or_dash(r.customer.email.as_deref()));
    println!("Phone:     {}", or_dash(r.customer.phone.as_deref()));
    println!("Pickup:    {} at {}", format_opt_datetime(r.pickup_at.as_ref()), r.pickup_branch.display());
    println!("Return:    {} at {}", format_opt_datetime(r.return_at.as_ref()), r.return_branch.display());
    println!("Model:     {}", or_dash(Some(r.model.display())));
    println!("Unit:      {}", or_dash(Some(r.unit.display())));
    println!("Rate plan: {}", or_dash(Some(r.rate_plan.display())));
    println!("Total:     {}", r.total.display_or("-"));
    if let Some(notes) = r.notes.as_deref().filter(|n| !n.is_empty()) {
        println!("\nNotes:\n{notes}");
    }
    Ok(())
}
