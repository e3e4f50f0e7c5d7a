//! RatePlanForm - Create/Edit Rate Plans

use crate::domain::rate_plan::{Fee, RatePlan, Rates, ScopeKind, SeasonalRate, Tax, parse_date};
use crate::domain::vehicle::VehicleClass;
use crate::error::Result;
use crate::forms::{FieldErrors, put, text};
use crate::helpers::{move_down, move_up, remove_at};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatesForm {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
    pub weekend: String,
}

impl RatesForm {
    fn from_rates(rates: &Rates) -> Self {
        Self {
            daily: rates.daily.to_display(),
            weekly: rates.weekly.to_display(),
            monthly: rates.monthly.to_display(),
            weekend: rates.weekend.to_display(),
        }
    }

    /// Validated rates object and whether any tier was set
    fn to_value(&self, prefix: &str, errors: &mut FieldErrors) -> (Value, bool) {
        let mut map = Map::new();
        for (key, raw) in [
            ("daily", &self.daily),
            ("weekly", &self.weekly),
            ("monthly", &self.monthly),
            ("weekend", &self.weekend),
        ] {
            put(&mut map, key, errors.amount(&format!("{prefix}.{key}"), raw));
        }
        let any = !map.is_empty();
        (Value::Object(map), any)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxRow {
    pub name: String,
    pub percent: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeRow {
    pub name: String,
    pub amount: String,
    pub per_day: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonRow {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub rates: RatesForm,
}

/// Which repeated section of the form a row operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowList {
    Taxes,
    Fees,
    Seasons,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatePlanForm {
    /// Set when editing an existing plan
    pub id: Option<String>,
    pub name: String,
    pub scope: String,
    pub branch: String,
    pub vehicle_class: String,
    pub model: String,
    pub unit: String,
    pub currency: String,
    pub priority: String,
    pub active: bool,
    pub rates: RatesForm,
    pub taxes: Vec<TaxRow>,
    pub fees: Vec<FeeRow>,
    pub seasons: Vec<SeasonRow>,
}

impl Default for RatePlanForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            scope: ScopeKind::Global.label().to_string(),
            branch: String::new(),
            vehicle_class: String::new(),
            model: String::new(),
            unit: String::new(),
            currency: "USD".to_string(),
            priority: String::new(),
            active: true,
            rates: RatesForm::default(),
            taxes: Vec::new(),
            fees: Vec::new(),
            seasons: Vec::new(),
        }
    }
}

impl RatePlanForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every field from an existing plan
    pub fn from_plan(plan: &RatePlan) -> Self {
        Self {
            id: (!plan.id.is_empty()).then(|| plan.id.clone()),
            name: plan.name.clone(),
            scope: plan.scope.label().to_string(),
            branch: plan.branch.id.clone(),
            vehicle_class: plan
                .vehicle_class
                .map(|c| c.slug().to_string())
                .unwrap_or_default(),
            model: plan.model.id.clone(),
            unit: plan.unit.id.clone(),
            currency: plan.currency().to_string(),
            priority: plan.priority.map(|p| p.to_string()).unwrap_or_default(),
            active: plan.is_active(),
            rates: RatesForm::from_rates(&plan.rates),
            taxes: plan.taxes.iter().map(tax_row).collect(),
            fees: plan.fees.iter().map(fee_row).collect(),
            seasons: plan.seasonal_rates.iter().map(season_row).collect(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    // ==================== Rows ====================

    pub fn add_tax(&mut self) {
        self.taxes.push(TaxRow::default());
    }

    pub fn add_fee(&mut self) {
        self.fees.push(FeeRow::default());
    }

    pub fn add_season(&mut self) {
        self.seasons.push(SeasonRow::default());
    }

    pub fn move_row_up(&mut self, list: RowList, index: usize) -> bool {
        match list {
            RowList::Taxes => move_up(&mut self.taxes, index),
            RowList::Fees => move_up(&mut self.fees, index),
            RowList::Seasons => move_up(&mut self.seasons, index),
        }
    }

    pub fn move_row_down(&mut self, list: RowList, index: usize) -> bool {
        match list {
            RowList::Taxes => move_down(&mut self.taxes, index),
            RowList::Fees => move_down(&mut self.fees, index),
            RowList::Seasons => move_down(&mut self.seasons, index),
        }
    }

    pub fn remove_row(&mut self, list: RowList, index: usize) -> bool {
        match list {
            RowList::Taxes => remove_at(&mut self.taxes, index).is_some(),
            RowList::Fees => remove_at(&mut self.fees, index).is_some(),
            RowList::Seasons => remove_at(&mut self.seasons, index).is_some(),
        }
    }

    // ==================== Payload ====================

    /// Validate and build the request body, omitting blank optionals
    pub fn to_payload(&self) -> Result<Value> {
        let mut errors = FieldErrors::default();
        let mut body = Map::new();

        put(&mut body, "name", errors.required("name", &self.name));

        let scope = ScopeKind::parse(&self.scope);
        match scope {
            Some(kind) => {
                body.insert("scope".into(), json!(kind.label()));
                self.scope_target(kind, &mut body, &mut errors);
            }
            None => errors.add("scope", format!("unknown scope \"{}\"", self.scope.trim())),
        }

        if let Some(currency) = text(&self.currency) {
            if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic()) {
                body.insert("currency".into(), json!(currency.to_ascii_uppercase()));
            } else {
                errors.add("currency", "must be a three-letter code");
            }
        }

        if let Some(priority) = text(&self.priority) {
            match priority.parse::<i32>() {
                Ok(p) => {
                    body.insert("priority".into(), json!(p));
                }
                Err(_) => errors.add("priority", "must be a whole number"),
            }
        }
        body.insert("active".into(), json!(self.active));

        let (rates, any_rate) = self.rates.to_value("rates", &mut errors);
        if !any_rate {
            errors.add("rates", "at least one rate is required");
        }
        body.insert("rates".into(), rates);

        body.insert("taxes".into(), self.taxes_value(&mut errors));
        body.insert("fees".into(), self.fees_value(&mut errors));
        body.insert("seasonalRates".into(), self.seasons_value(&mut errors));

        errors.finish(Value::Object(body))
    }

    fn scope_target(&self, kind: ScopeKind, body: &mut Map<String, Value>, errors: &mut FieldErrors) {
        match kind {
            ScopeKind::Global => {}
            ScopeKind::Branch => put(body, "branch", errors.required("branch", &self.branch)),
            ScopeKind::Model => put(body, "model", errors.required("model", &self.model)),
            ScopeKind::Unit => put(body, "unit", errors.required("unit", &self.unit)),
            ScopeKind::VehicleClass => {
                if let Some(raw) = errors.required("vehicleClass", &self.vehicle_class) {
                    match VehicleClass::parse(&raw) {
                        VehicleClass::Other => {
                            errors.add("vehicleClass", format!("unknown class \"{raw}\""))
                        }
                        class => {
                            body.insert("vehicleClass".into(), json!(class.slug()));
                        }
                    }
                }
            }
        }
        // A branch narrows any scope when given
        if kind != ScopeKind::Branch {
            put(body, "branch", text(&self.branch));
        }
    }

    fn taxes_value(&self, errors: &mut FieldErrors) -> Value {
        let rows = self.taxes.iter().enumerate().map(|(i, row)| {
            let name = errors.required(&format!("taxes[{i}].name"), &row.name);
            let field = format!("taxes[{i}].percent");
            let percent = errors.amount(&field, &row.percent);
            match percent {
                None if row.percent.trim().is_empty() => errors.add(&field, "is required"),
                Some(p) if p > 100.0 => errors.add(&field, "must be at most 100"),
                _ => {}
            }
            json!({ "name": name, "percent": percent })
        });
        Value::Array(rows.collect())
    }

    fn fees_value(&self, errors: &mut FieldErrors) -> Value {
        let rows = self.fees.iter().enumerate().map(|(i, row)| {
            let name = errors.required(&format!("fees[{i}].name"), &row.name);
            let field = format!("fees[{i}].amount");
            let amount = errors.amount(&field, &row.amount);
            if row.amount.trim().is_empty() {
                errors.add(&field, "is required");
            }
            json!({ "name": name, "amount": amount, "perDay": row.per_day })
        });
        Value::Array(rows.collect())
    }

    fn seasons_value(&self, errors: &mut FieldErrors) -> Value {
        let rows = self.seasons.iter().enumerate().map(|(i, row)| {
            let prefix = format!("seasonalRates[{i}]");
            let name = errors.required(&format!("{prefix}.name"), &row.name);
            let start = season_date(errors, &format!("{prefix}.startDate"), &row.start_date);
            let end = season_date(errors, &format!("{prefix}.endDate"), &row.end_date);
            if let (Some(start), Some(end)) = (start, end) {
                if end < start {
                    errors.add(format!("{prefix}.endDate"), "must not be before the start date");
                }
            }
            let (rates, any_rate) = row.rates.to_value(&format!("{prefix}.rates"), errors);
            if !any_rate {
                errors.add(format!("{prefix}.rates"), "at least one rate is required");
            }

            let mut season = Map::new();
            put(&mut season, "name", name);
            put(&mut season, "startDate", start.map(|d| d.to_string()));
            put(&mut season, "endDate", end.map(|d| d.to_string()));
            season.insert("rates".into(), rates);
            Value::Object(season)
        });
        Value::Array(rows.collect())
    }
}

fn season_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<chrono::NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        errors.add(field, "must be a date (YYYY-MM-DD)");
    }
    parsed
}

fn tax_row(tax: &Tax) -> TaxRow {
    TaxRow {
        name: tax.name.clone(),
        percent: tax.percent.to_display(),
    }
}

fn fee_row(fee: &Fee) -> FeeRow {
    FeeRow {
        name: fee.name.clone(),
        amount: fee.amount.to_display(),
        per_day: fee.per_day,
    }
}

fn season_row(season: &SeasonalRate) -> SeasonRow {
    SeasonRow {
        name: season.name.clone(),
        start_date: season.start().map(|d| d.to_string()).unwrap_or_default(),
        end_date: season.end().map(|d| d.to_string()).unwrap_or_default(),
        rates: RatesForm::from_rates(&season.rates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn plan() -> RatePlan {
        serde_json::from_value(json!({
            "_id": "rp1",
            "name": "Airport standard",
            "scope": "branch",
            "branchId": { "_id": "b1", "name": "Airport" },
            "rates": { "daily": { "$numberDecimal": "45.00" }, "weekly": "270" },
            "taxes": [{ "name": "VAT", "percent": 21 }],
            "fees": [{ "name": "Airport fee", "amount": 12.5 }],
            "seasonalRates": [{
                "name": "Summer",
                "startDate": "2026-06-01T00:00:00.000Z",
                "endDate": "2026-08-31",
                "rates": { "daily": 60 }
            }],
            "priority": 5
        }))
        .expect("plan")
    }

    fn validation_fields(result: Result<Value>) -> Vec<String> {
        match result {
            Err(Error::Validation { errors }) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn fills_display_defaults() {
        let form = RatePlanForm::from_plan(&plan());
        assert_eq!(form.id.as_deref(), Some("rp1"));
        assert_eq!(form.scope, "branch");
        assert_eq!(form.branch, "b1");
        assert_eq!(form.rates.daily, "45");
        assert_eq!(form.rates.weekly, "270");
        assert_eq!(form.rates.monthly, "");
        assert_eq!(form.currency, "USD");
        assert_eq!(form.priority, "5");
        assert!(form.active);
        assert_eq!(form.seasons[0].start_date, "2026-06-01");
        assert_eq!(form.fees[0].amount, "12.5");
    }

    #[test]
    fn payload_round_trips_edit() {
        let payload = RatePlanForm::from_plan(&plan()).to_payload().expect("payload");
        assert_eq!(payload["name"], "Airport standard");
        assert_eq!(payload["scope"], "branch");
        assert_eq!(payload["branch"], "b1");
        assert_eq!(payload["rates"], json!({ "daily": 45.0, "weekly": 270.0 }));
        assert_eq!(payload["taxes"], json!([{ "name": "VAT", "percent": 21.0 }]));
        assert_eq!(payload["seasonalRates"][0]["endDate"], "2026-08-31");
        assert_eq!(payload["priority"], 5);
    }

    #[test]
    fn empty_form_reports_name_and_rates() {
        let fields = validation_fields(RatePlanForm::new().to_payload());
        assert_eq!(fields, ["name", "rates"]);
    }

    #[test]
    fn scope_target_and_rows_are_checked() {
        let mut form = RatePlanForm::new();
        form.name = "Vans".into();
        form.scope = "vehicle_class".into();
        form.vehicle_class = "spaceship".into();
        form.rates.daily = "-3".into();
        form.rates.weekly = "200".into();
        form.add_tax();
        form.taxes[0].name = "City".into();
        form.taxes[0].percent = "150".into();
        form.add_season();
        let season = &mut form.seasons[0];
        season.name = "Peak".into();
        season.start_date = "2026-12-31".into();
        season.end_date = "2026-12-01".into();
        season.rates.daily = "80".into();
        let fields = validation_fields(form.to_payload());
        assert_eq!(
            fields,
            [
                "vehicleClass",
                "rates.daily",
                "taxes[0].percent",
                "seasonalRates[0].endDate"
            ]
        );
    }

    #[test]
    fn class_scope_serializes_class() {
        let mut form = RatePlanForm::new();
        form.name = "SUVs".into();
        form.scope = "vehicleClass".into();
        form.vehicle_class = "SUV".into();
        form.rates.daily = "70".into();
        form.currency = "eur".into();
        let payload = form.to_payload().expect("payload");
        assert_eq!(payload["scope"], "vehicle_class");
        assert_eq!(payload["vehicleClass"], "suv");
        assert_eq!(payload["currency"], "EUR");
        assert!(payload.get("branch").is_none());
    }

    #[test]
    fn rows_reorder_and_remove() {
        let mut form = RatePlanForm::from_plan(&plan());
        form.add_fee();
        form.fees[1].name = "Child seat".into();
        assert!(form.move_row_up(RowList::Fees, 1));
        assert_eq!(form.fees[0].name, "Child seat");
        assert!(!form.move_row_up(RowList::Fees, 0));
        assert!(!form.move_row_down(RowList::Fees, 1));
        assert!(form.remove_row(RowList::Fees, 0));
        assert_eq!(form.fees[0].name, "Airport fee");
        assert!(!form.remove_row(RowList::Taxes, 9));
    }
}
