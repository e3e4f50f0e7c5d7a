//! RatePlan - Pricing Records and Quote Estimation

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::refs::{EntityRef, deserialize_id};
use crate::domain::value::{FlexNumber, format_plain};
use crate::domain::vehicle::VehicleClass;
use crate::error::{Error, Result};

const MONTH_DAYS: i64 = 30;
const WEEK_DAYS: i64 = 7;

/// What a rate plan applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    #[default]
    #[serde(alias = "all")]
    Global,
    Branch,
    #[serde(alias = "vehicleClass", alias = "class")]
    VehicleClass,
    #[serde(alias = "vehicleModel")]
    Model,
    #[serde(alias = "vehicleUnit")]
    Unit,
}

impl ScopeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Branch => "branch",
            ScopeKind::VehicleClass => "vehicle_class",
            ScopeKind::Model => "model",
            ScopeKind::Unit => "unit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string())).ok()
    }
}

/// The four rate tiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rates {
    #[serde(alias = "dailyRate")]
    pub daily: FlexNumber,
    #[serde(alias = "weeklyRate")]
    pub weekly: FlexNumber,
    #[serde(alias = "monthlyRate")]
    pub monthly: FlexNumber,
    #[serde(alias = "weekendRate")]
    pub weekend: FlexNumber,
}

impl Rates {
    /// Field-wise overlay: `self` where set, else `base`
    fn over(&self, base: &Rates) -> Rates {
        let pick = |own: &FlexNumber, fallback: &FlexNumber| {
            if own.as_f64().is_some() {
                own.clone()
            } else {
                fallback.clone()
            }
        };
        Rates {
            daily: pick(&self.daily, &base.daily),
            weekly: pick(&self.weekly, &base.weekly),
            monthly: pick(&self.monthly, &base.monthly),
            weekend: pick(&self.weekend, &base.weekend),
        }
    }
}

/// Percent tax applied on subtotal plus fees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tax {
    pub name: String,
    #[serde(alias = "rate", alias = "percentage")]
    pub percent: FlexNumber,
}

/// Flat fee, charged once or per rental day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fee {
    pub name: String,
    pub amount: FlexNumber,
    #[serde(alias = "daily")]
    pub per_day: bool,
}

/// Rates that replace the base rates inside a date window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonalRate {
    pub name: String,
    #[serde(alias = "from")]
    pub start_date: Option<String>,
    #[serde(alias = "to")]
    pub end_date: Option<String>,
    pub rates: Rates,
}

impl SeasonalRate {
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.as_deref().and_then(parse_date)
    }

    /// Inclusive on both ends; an open side matches everything
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start().is_none_or(|s| s <= date) && self.end().is_none_or(|e| date <= e)
    }
}

/// Accepts `YYYY-MM-DD` or any RFC 3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// A pricing record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatePlan {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "scopeType")]
    pub scope: ScopeKind,
    #[serde(alias = "branchId")]
    pub branch: EntityRef,
    pub vehicle_class: Option<VehicleClass>,
    #[serde(alias = "vehicleModel", alias = "modelId", alias = "vehicleModelId")]
    pub model: EntityRef,
    #[serde(alias = "vehicleUnit", alias = "unitId", alias = "vehicleUnitId")]
    pub unit: EntityRef,
    pub currency: Option<String>,
    pub rates: Rates,
    pub taxes: Vec<Tax>,
    pub fees: Vec<Fee>,
    #[serde(alias = "seasons", alias = "seasonalOverrides")]
    pub seasonal_rates: Vec<SeasonalRate>,
    #[serde(alias = "isActive")]
    pub active: Option<bool>,
    pub priority: Option<i32>,
}

impl RatePlan {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("USD")
    }

    /// Target of the plan for display, e.g. "branch Airport"
    pub fn scope_label(&self) -> String {
        match self.scope {
            ScopeKind::Global => "all vehicles".to_string(),
            ScopeKind::Branch => format!("branch {}", self.branch.display()),
            ScopeKind::VehicleClass => format!(
                "class {}",
                self.vehicle_class.unwrap_or_default().label()
            ),
            ScopeKind::Model => format!("model {}", self.model.display()),
            ScopeKind::Unit => format!("unit {}", self.unit.display()),
        }
    }

    /// Seasonal override covering `date`, if any
    pub fn season_for(&self, date: NaiveDate) -> Option<&SeasonalRate> {
        self.seasonal_rates.iter().find(|s| s.covers(date))
    }
}

/// One priced line of a quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub label: String,
    pub amount: f64,
}

/// Client-side price estimate for a rental window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub currency: String,
    pub days: i64,
    pub season: Option<String>,
    pub lines: Vec<QuoteLine>,
    pub subtotal: f64,
    pub fees: f64,
    pub taxes: f64,
    pub total: f64,
}

fn round_cents(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Number of billable days: started 24h blocks, minimum one
pub fn rental_days(pickup: DateTime<Utc>, dropoff: DateTime<Utc>) -> i64 {
    let minutes = (dropoff - pickup).num_minutes().max(0);
    ((minutes + 24 * 60 - 1) / (24 * 60)).max(1)
}

/// Estimate the price of renting under `plan` from `pickup` to `dropoff`
pub fn quote(plan: &RatePlan, pickup: DateTime<Utc>, dropoff: DateTime<Utc>) -> Result<Quote> {
    if dropoff <= pickup {
        return Err(Error::Invalid {
            message: "Return must be after pickup".to_string(),
        });
    }

    let start_date = pickup.date_naive();
    let season = plan.season_for(start_date);
    let rates = match season {
        Some(s) => s.rates.over(&plan.rates),
        None => plan.rates.clone(),
    };

    let Some(daily) = rates.daily.as_f64() else {
        return Err(Error::Invalid {
            message: format!("Rate plan '{}' has no daily rate", plan.name),
        });
    };

    let days = rental_days(pickup, dropoff);
    let mut remaining = days;
    let mut offset = 0;
    let mut lines = Vec::new();

    if let Some(monthly) = rates.monthly.as_f64() {
        let months = remaining / MONTH_DAYS;
        if months > 0 {
            lines.push(QuoteLine {
                label: format!("Monthly x {months}"),
                amount: monthly * months as f64,
            });
            remaining -= months * MONTH_DAYS;
            offset += months * MONTH_DAYS;
        }
    }

    if let Some(weekly) = rates.weekly.as_f64() {
        let weeks = remaining / WEEK_DAYS;
        if weeks > 0 {
            lines.push(QuoteLine {
                label: format!("Weekly x {weeks}"),
                amount: weekly * weeks as f64,
            });
            remaining -= weeks * WEEK_DAYS;
            offset += weeks * WEEK_DAYS;
        }
    }

    let weekend = rates.weekend.as_f64();
    let (mut weekday_days, mut weekend_days) = (0i64, 0i64);
    for i in 0..remaining {
        let date = start_date + Duration::days(offset + i);
        let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        if is_weekend && weekend.is_some() {
            weekend_days += 1;
        } else {
            weekday_days += 1;
        }
    }
    if weekday_days > 0 {
        lines.push(QuoteLine {
            label: format!("Daily x {weekday_days} @ {}", format_plain(daily)),
            amount: daily * weekday_days as f64,
        });
    }
    if let (Some(rate), true) = (weekend, weekend_days > 0) {
        lines.push(QuoteLine {
            label: format!("Weekend x {weekend_days} @ {}", format_plain(rate)),
            amount: rate * weekend_days as f64,
        });
    }

    let subtotal: f64 = lines.iter().map(|l| l.amount).sum();

    let mut fees_total = 0.0;
    for fee in &plan.fees {
        let Some(amount) = fee.amount.as_f64() else {
            continue;
        };
        let amount = if fee.per_day { amount * days as f64 } else { amount };
        fees_total += amount;
        lines.push(QuoteLine {
            label: fee.name.clone(),
            amount: round_cents(amount),
        });
    }

    let taxable = subtotal + fees_total;
    let mut taxes_total = 0.0;
    for tax in &plan.taxes {
        let Some(percent) = tax.percent.as_f64() else {
            continue;
        };
        let amount = taxable * percent / 100.0;
        taxes_total += amount;
        lines.push(QuoteLine {
            label: format!("{} ({}%)", tax.name, format_plain(percent)),
            amount: round_cents(amount),
        });
    }

    Ok(Quote {
        currency: plan.currency().to_string(),
        days,
        season: season.map(|s| s.name.clone()),
        lines,
        subtotal: round_cents(subtotal),
        fees: round_cents(fees_total),
        taxes: round_cents(taxes_total),
        total: round_cents(taxable + taxes_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid date")
    }

    fn plan() -> RatePlan {
        serde_json::from_value(json!({
            "_id": "rp1",
            "name": "Standard",
            "scope": "branch",
            "branchId": { "_id": "b1", "name": "Airport" },
            "currency": "EUR",
            "rates": { "dailyRate": "40", "weeklyRate": 250, "weekendRate": { "$numberDecimal": "30" } },
            "taxes": [{ "name": "VAT", "rate": 10 }],
            "fees": [{ "name": "Airport fee", "amount": 15 }, { "name": "Insurance", "amount": "5", "perDay": true }],
            "seasonalRates": [{ "name": "Summer", "startDate": "2026-07-01", "endDate": "2026-08-31", "rates": { "daily": 60 } }]
        }))
        .expect("plan")
    }

    #[test]
    fn parses_plan_shape() {
        let plan = plan();
        assert_eq!(plan.scope, ScopeKind::Branch);
        assert_eq!(plan.scope_label(), "branch Airport");
        assert_eq!(plan.rates.weekend.to_display(), "30");
        assert_eq!(plan.taxes[0].percent.as_f64(), Some(10.0));
        assert!(plan.fees[1].per_day);
        assert!(plan.is_active());
    }

    #[test]
    fn rental_days_rounds_up_started_days() {
        assert_eq!(rental_days(at(2026, 3, 2, 10), at(2026, 3, 2, 12)), 1);
        assert_eq!(rental_days(at(2026, 3, 2, 10), at(2026, 3, 3, 10)), 1);
        assert_eq!(rental_days(at(2026, 3, 2, 10), at(2026, 3, 3, 11)), 2);
    }

    #[test]
    fn weekday_rental_uses_daily_rate() {
        // Mon 2 March 2026 to Wed 4 March: two days.
        let q = quote(&plan(), at(2026, 3, 2, 9), at(2026, 3, 4, 9)).expect("quote");
        assert_eq!(q.days, 2);
        assert_eq!(q.subtotal, 80.0);
        assert_eq!(q.fees, 25.0);
        assert_eq!(q.taxes, 10.5);
        assert_eq!(q.total, 115.5);
        assert_eq!(q.currency, "EUR");
    }

    #[test]
    fn weekend_days_use_weekend_rate() {
        // Fri 6 March to Mon 9 March: Fri daily, Sat + Sun weekend.
        let q = quote(&plan(), at(2026, 3, 6, 9), at(2026, 3, 9, 9)).expect("quote");
        assert_eq!(q.days, 3);
        assert_eq!(q.subtotal, 40.0 + 60.0);
    }

    #[test]
    fn long_rental_uses_weekly_block() {
        // Mon 2 March, nine days: one week + Mon 9, Tue 10.
        let q = quote(&plan(), at(2026, 3, 2, 9), at(2026, 3, 11, 9)).expect("quote");
        assert_eq!(q.days, 9);
        assert_eq!(q.subtotal, 250.0 + 80.0);
    }

    #[test]
    fn seasonal_override_replaces_daily_rate() {
        // Wed 1 July 2026, one day.
        let q = quote(&plan(), at(2026, 7, 1, 9), at(2026, 7, 2, 9)).expect("quote");
        assert_eq!(q.season.as_deref(), Some("Summer"));
        assert_eq!(q.subtotal, 60.0);
    }

    fn bare_plan(rates: serde_json::Value, seasons: serde_json::Value) -> RatePlan {
        serde_json::from_value(json!({
            "_id": "rp2",
            "name": "Bare",
            "rates": rates,
            "seasonalRates": seasons
        }))
        .expect("plan")
    }

    #[test]
    fn monthly_block_then_weekly_then_daily() {
        // Mon 2 March to Fri 10 April: 39 days = 30 + 7 + Wed 8, Thu 9 April.
        let plan = bare_plan(json!({ "daily": 40, "weekly": 250, "monthly": 900 }), json!([]));
        let q = quote(&plan, at(2026, 3, 2, 9), at(2026, 4, 10, 9)).expect("quote");
        assert_eq!(q.days, 39);
        let labels: Vec<&str> = q.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Monthly x 1", "Weekly x 1", "Daily x 2 @ 40"]);
        assert_eq!(q.subtotal, 900.0 + 250.0 + 80.0);
        assert_eq!(q.total, q.subtotal);
    }

    #[test]
    fn missing_weekly_rate_falls_back_to_daily() {
        // Nine days including a weekend, with neither weekly nor weekend rate.
        let plan = bare_plan(json!({ "daily": 40 }), json!([]));
        let q = quote(&plan, at(2026, 3, 2, 9), at(2026, 3, 11, 9)).expect("quote");
        assert_eq!(q.days, 9);
        assert_eq!(q.lines.len(), 1);
        assert_eq!(q.lines[0].label, "Daily x 9 @ 40");
        assert_eq!(q.subtotal, 360.0);
    }

    #[test]
    fn season_keeps_base_weekend_rate() {
        // Fri 3 July to Mon 6 July: Fri at the summer daily, Sat + Sun at base weekend.
        let plan = bare_plan(
            json!({ "daily": 40, "weekend": 30 }),
            json!([{ "name": "Summer", "startDate": "2026-07-01", "endDate": "2026-08-31", "rates": { "daily": 60 } }]),
        );
        let q = quote(&plan, at(2026, 7, 3, 9), at(2026, 7, 6, 9)).expect("quote");
        assert_eq!(q.season.as_deref(), Some("Summer"));
        assert_eq!(q.days, 3);
        assert_eq!(q.subtotal, 60.0 + 2.0 * 30.0);
    }

    #[test]
    fn rejects_inverted_window_and_missing_daily_rate() {
        assert!(quote(&plan(), at(2026, 3, 4, 9), at(2026, 3, 2, 9)).is_err());
        let empty = RatePlan {
            name: "Empty".into(),
            ..Default::default()
        };
        assert!(quote(&empty, at(2026, 3, 2, 9), at(2026, 3, 3, 9)).is_err());
    }

    #[test]
    fn parse_date_accepts_timestamps() {
        assert_eq!(
            parse_date("2026-07-01T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2026, 7, 1)
        );
        assert_eq!(parse_date("2026-07-01"), NaiveDate::from_ymd_opt(2026, 7, 1));
        assert_eq!(parse_date("soon"), None);
    }
}
