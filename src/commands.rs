//! Command handlers
//!
//! Each command runs its thunks on the shared runtime, folds the resulting
//! actions into a [`Store`] and prints from the store.

use crate::cli::{
    BranchAction, Cli, Commands, ConfigAction, DriverAction, ModelAction, OutputFormat, RatePlanAction,
    RatePlanFields, ReservationAction, ReservationFields, UnitAction, UnitFields,
};
use crate::output;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use rentdesk::domain::rate_plan::{ScopeKind, quote};
use rentdesk::domain::reservation::ReservationStatus;
use rentdesk::domain::settings::AppSettings;
use rentdesk::domain::vehicle::UnitStatus;
use rentdesk::filter::{Filter, RatePlanFilter, ReservationFilter, UnitFilter};
use rentdesk::forms::{FeeRow, RatePlanForm, ReservationForm, TaxRow, VehicleUnitForm, parse_instant};
use rentdesk::helpers::get_or_create_data_dir;
use rentdesk::services::rate_plans::RatePlanQuery;
use rentdesk::services::reservations::ReservationQuery;
use rentdesk::services::vehicles::UnitQuery;
use rentdesk::services::{ServiceHub, block_on};
use rentdesk::session::{Session, SessionStore, SettingsStore};
use rentdesk::state::{NoticeState, Store, thunks};
use rentdesk::utils::format_bytes;
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli, settings_store: &SettingsStore, mut settings: AppSettings) -> Result<()> {
    if let Some(url) = cli.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        settings.api.base_url = url.to_string();
    }
    let sessions = SessionStore::open_default()?;
    let format = cli.format;

    match cli.command {
        Commands::Config { action: None | Some(ConfigAction::Show) } => {
            cmd_config(settings_store, &sessions, &settings)
        }
        Commands::Config {
            action: Some(ConfigAction::Set { key, value }),
        } => cmd_config_set(settings_store, &key, &value),
        Commands::Logout => cmd_logout(&sessions),
        command => {
            let session = sessions.load()?;
            let mut desk = Desk::new(&settings, session.as_ref(), format)?;
            desk.execute(command, &sessions, &settings)
        }
    }
}

fn cmd_config(settings_store: &SettingsStore, sessions: &SessionStore, settings: &AppSettings) -> Result<()> {
    println!("Settings file: {}", settings_store.path().display());
    println!("Session file:  {}", sessions.path().display());
    println!("Log dir:       {}", get_or_create_data_dir()?.display());
    println!();
    println!("API:           {}", settings.api.base_url);
    println!("Timeout:       {}s", settings.api.timeout_secs);
    println!("Storage:       {}", settings.storage.bucket_url);
    println!("Upload limit:  {}", format_bytes(settings.storage.max_upload_bytes));
    Ok(())
}

/// Writes the file's own values; environment and `--api-url` overrides are
/// not persisted
fn cmd_config_set(settings_store: &SettingsStore, key: &str, value: &str) -> Result<()> {
    let mut stored = settings_store.load()?;
    stored.set(key, value)?;
    settings_store.save(&stored)?;
    println!("Set {} in {}", key.trim(), settings_store.path().display());
    Ok(())
}

fn cmd_logout(sessions: &SessionStore) -> Result<()> {
    sessions.clear()?;
    println!("Signed out");
    Ok(())
}

/// `YYYY-MM-DD` is taken as midnight UTC; anything else goes through
/// [`parse_instant`]
fn parse_when(flag: &str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Some(dt) = parse_instant(value) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .with_context(|| format!("--{flag}: cannot read '{value}' as a date or time"))
}

fn unit_status(s: &str) -> Result<UnitStatus> {
    match UnitStatus::parse(s) {
        UnitStatus::Other => bail!("unknown unit status '{s}'"),
        status => Ok(status),
    }
}

fn parse_unit_status(value: Option<&str>) -> Result<Option<UnitStatus>> {
    value.map(unit_status).transpose()
}

fn reservation_status(s: &str) -> Result<ReservationStatus> {
    match ReservationStatus::parse(s) {
        ReservationStatus::Other => bail!("unknown reservation status '{s}'"),
        status => Ok(status),
    }
}

fn parse_reservation_status(value: Option<&str>) -> Result<Option<ReservationStatus>> {
    value.map(reservation_status).transpose()
}

fn parse_scope(value: Option<&str>) -> Result<Option<ScopeKind>> {
    value
        .map(|s| ScopeKind::parse(s).with_context(|| format!("--scope: unknown scope '{s}'")))
        .transpose()
}

/// Latest notice for table output; JSON output carries only the entity
fn table_notice(format: OutputFormat, notices: &NoticeState) -> Option<&str> {
    match format {
        OutputFormat::Table => notices.latest().map(|n| n.message.as_str()),
        OutputFormat::Json => None,
    }
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn fill_unit_form(form: &mut VehicleUnitForm, fields: UnitFields) {
    set(&mut form.plate, fields.plate);
    set(&mut form.vin, fields.vin);
    set(&mut form.model, fields.model);
    set(&mut form.branch, fields.branch);
    set(&mut form.odometer, fields.odometer);
    set(&mut form.color, fields.color);
    set(&mut form.status, fields.status);
}

/// `NAME=PERCENT`
fn parse_tax(raw: &str) -> Result<TaxRow> {
    let (name, percent) = raw
        .split_once('=')
        .with_context(|| format!("--tax: expected NAME=PERCENT, got '{raw}'"))?;
    Ok(TaxRow {
        name: name.trim().to_string(),
        percent: percent.trim().trim_end_matches('%').to_string(),
    })
}

/// `NAME=AMOUNT` or `NAME=AMOUNT/day`
fn parse_fee(raw: &str) -> Result<FeeRow> {
    let (name, amount) = raw
        .split_once('=')
        .with_context(|| format!("--fee: expected NAME=AMOUNT, got '{raw}'"))?;
    let amount = amount.trim();
    let (amount, per_day) = match amount.strip_suffix("/day") {
        Some(amount) => (amount, true),
        None => (amount, false),
    };
    Ok(FeeRow {
        name: name.trim().to_string(),
        amount: amount.trim().to_string(),
        per_day,
    })
}

fn fill_rate_plan_form(form: &mut RatePlanForm, fields: RatePlanFields) -> Result<()> {
    set(&mut form.name, fields.name);
    set(&mut form.scope, fields.scope);
    set(&mut form.branch, fields.branch);
    set(&mut form.vehicle_class, fields.vehicle_class);
    set(&mut form.model, fields.model);
    set(&mut form.unit, fields.unit);
    set(&mut form.currency, fields.currency);
    set(&mut form.priority, fields.priority);
    set(&mut form.rates.daily, fields.daily);
    set(&mut form.rates.weekly, fields.weekly);
    set(&mut form.rates.monthly, fields.monthly);
    set(&mut form.rates.weekend, fields.weekend);
    if let Some(active) = fields.active {
        form.active = active;
    }
    if !fields.taxes.is_empty() {
        form.taxes = fields.taxes.iter().map(|t| parse_tax(t)).collect::<Result<_>>()?;
    }
    if !fields.fees.is_empty() {
        form.fees = fields.fees.iter().map(|f| parse_fee(f)).collect::<Result<_>>()?;
    }
    Ok(())
}

fn fill_reservation_form(form: &mut ReservationForm, fields: ReservationFields) {
    set(&mut form.customer_name, fields.customer);
    set(&mut form.customer_email, fields.email);
    set(&mut form.customer_phone, fields.phone);
    set(&mut form.pickup_branch, fields.pickup_branch);
    set(&mut form.return_branch, fields.return_branch);
    set(&mut form.pickup_at, fields.pickup);
    set(&mut form.return_at, fields.return_at);
    set(&mut form.model, fields.model);
    set(&mut form.unit, fields.unit);
    set(&mut form.rate_plan, fields.rate_plan);
    set(&mut form.notes, fields.notes);
}

/// One command's worth of services plus the store they report into
struct Desk {
    hub: ServiceHub,
    store: Store,
    format: OutputFormat,
}

impl Desk {
    fn new(settings: &AppSettings, session: Option<&Session>, format: OutputFormat) -> Result<Self> {
        Ok(Self {
            hub: ServiceHub::new(settings, session)?,
            store: Store::new(),
            format,
        })
    }

    /// Block on a thunk, then fold its actions into the store
    fn run<T>(&mut self, fut: impl Future<Output = rentdesk::error::Result<T>>) -> Result<T> {
        let result = block_on(fut)?;
        let applied = self.store.drain(&self.hub.actions());
        debug!("Applied {} actions (revision {})", applied, self.store.revision());
        Ok(result?)
    }

    fn require_login(&self) -> Result<()> {
        if !self.hub.api().is_authenticated() {
            bail!("Not logged in. Run `rentdesk login <email>` first.");
        }
        Ok(())
    }

    fn execute(&mut self, command: Commands, sessions: &SessionStore, settings: &AppSettings) -> Result<()> {
        match command {
            Commands::Login { email, password } => self.cmd_login(sessions, settings, &email, &password),
            Commands::Whoami => self.cmd_whoami(),
            Commands::Branches { action } => {
                self.require_login()?;
                self.cmd_branches(action)
            }
            Commands::Models { action } => {
                self.require_login()?;
                self.cmd_models(action)
            }
            Commands::Units { action } => {
                self.require_login()?;
                self.cmd_units(action)
            }
            Commands::RatePlans { action } => {
                self.require_login()?;
                self.cmd_rate_plans(action)
            }
            Commands::Drivers { action } => {
                self.require_login()?;
                self.cmd_drivers(action)
            }
            Commands::Reservations { action } => {
                self.require_login()?;
                self.cmd_reservations(action)
            }
            Commands::Logout | Commands::Config { .. } => Ok(()),
        }
    }

    fn cmd_login(
        &mut self,
        sessions: &SessionStore,
        settings: &AppSettings,
        email: &str,
        password: &str,
    ) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let response = self.run(thunks::login(&hub, &tx, email, password))?;

        let mut session = Session::new(settings.api.base_url.clone(), response.token.clone());
        let user = match response.user {
            Some(user) => Some(user),
            None => self.run(hub.auth.me()).ok(),
        };
        if let Some(user) = &user {
            session = session.with_user(user);
        }
        sessions.save(&session)?;

        let name = user
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| email.to_string());
        println!("Signed in as {name}");
        Ok(())
    }

    fn cmd_whoami(&mut self) -> Result<()> {
        self.require_login()?;
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        self.run(thunks::load_current_user(&hub, &tx))?;
        let user = self
            .store
            .auth
            .user()
            .context("The server did not return a user")?;
        output::print_user(self.format, user)
    }

    fn cmd_branches(&mut self, action: BranchAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            BranchAction::List { active } => {
                self.run(thunks::load_branches(&hub, &tx))?;
                let branches: Vec<_> = self
                    .store
                    .vehicles
                    .branches
                    .iter()
                    .filter(|b| !active || b.is_active())
                    .collect();
                output::print_branches(self.format, &branches)
            }
        }
    }

    fn cmd_models(&mut self, action: ModelAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            ModelAction::List => {
                self.run(thunks::load_models(&hub, &tx))?;
                let models: Vec<_> = self.store.vehicles.models.iter().collect();
                output::print_models(self.format, &models)
            }
        }
    }

    fn cmd_units(&mut self, action: UnitAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            UnitAction::List {
                status,
                branch,
                model,
                search,
            } => {
                let status = parse_unit_status(status.as_deref())?;
                let query = UnitQuery {
                    branch: branch.clone(),
                    model: model.clone(),
                    status,
                };
                // Dropdown failures only cost the display names
                if let Err(err) = self.run(thunks::load_units_with_dropdowns(&hub, &tx, query)) {
                    if self.store.vehicles.units.load_state().is_failed() {
                        return Err(err);
                    }
                    output::print_notices(&self.store.notices);
                }

                let filter = UnitFilter {
                    status,
                    branch,
                    model,
                    text: search,
                };
                let vehicles = &self.store.vehicles;
                let units = filter.apply(vehicles.units.iter());
                output::print_units(self.format, &units, vehicles)
            }
            UnitAction::Show { id } => {
                let unit = self.run(hub.units.get(&id))?;
                // Dropdown lists only improve labels; a failure is not fatal
                let models = self.run(thunks::load_models(&hub, &tx));
                let branches = self.run(thunks::load_branches(&hub, &tx));
                if models.is_err() || branches.is_err() {
                    output::print_notices(&self.store.notices);
                }
                output::print_unit(self.format, &unit, &self.store.vehicles)
            }
            UnitAction::Create { fields } => {
                let mut form = VehicleUnitForm::new();
                fill_unit_form(&mut form, fields);
                self.save_unit(&form)
            }
            UnitAction::Edit { id, fields } => {
                let unit = self.run(hub.units.get(&id))?;
                let mut form = VehicleUnitForm::from_unit(&unit);
                fill_unit_form(&mut form, fields);
                self.save_unit(&form)
            }
            UnitAction::SetStatus { id, status } => {
                let status = unit_status(&status)?;
                let unit = self.run(thunks::set_unit_status(&hub, &tx, &id, status))?;
                self.report(|desk| output::print_unit(desk.format, &unit, &desk.store.vehicles))
            }
            UnitAction::UploadPhoto { id, path } => self.cmd_upload_photo(&id, &path),
            UnitAction::Delete { id } => {
                self.run(thunks::delete_unit(&hub, &tx, &id))?;
                self.print_latest_notice();
                Ok(())
            }
        }
    }

    fn cmd_drivers(&mut self, action: DriverAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            DriverAction::List { available } => {
                self.run(thunks::load_drivers(&hub, &tx))?;
                let drivers: Vec<_> = if available {
                    self.store.drivers.available().collect()
                } else {
                    self.store.drivers.drivers.iter().collect()
                };
                output::print_drivers(self.format, &drivers)
            }
            DriverAction::SetAvailable { id, available } => {
                self.run(thunks::set_driver_available(&hub, &tx, &id, available))?;
                self.print_latest_notice();
                Ok(())
            }
        }
    }

    fn cmd_upload_photo(&mut self, id: &str, path: &Path) -> Result<()> {
        if !path.is_file() {
            bail!("{} is not a file", path.display());
        }
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let unit = self.run(thunks::upload_unit_photo(&hub, &tx, id, path))?;
        self.report(|desk| output::print_unit(desk.format, &unit, &desk.store.vehicles))
    }

    fn save_unit(&mut self, form: &VehicleUnitForm) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let unit = self.run(thunks::save_unit(&hub, &tx, form))?;
        self.report(|desk| output::print_unit(desk.format, &unit, &desk.store.vehicles))
    }

    fn save_rate_plan(&mut self, form: &RatePlanForm) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let plan = self.run(thunks::save_rate_plan(&hub, &tx, form))?;
        self.report(|desk| output::print_rate_plan(desk.format, &plan))
    }

    fn save_reservation(&mut self, form: &ReservationForm) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let reservation = self.run(thunks::save_reservation(&hub, &tx, form))?;
        self.report(|desk| output::print_reservation(desk.format, &reservation))
    }

    fn cmd_rate_plans(&mut self, action: RatePlanAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            RatePlanAction::List {
                scope,
                branch,
                active,
                search,
            } => {
                let scope = parse_scope(scope.as_deref())?;
                let query = RatePlanQuery {
                    branch: branch.clone(),
                    scope,
                    active,
                };
                self.run(thunks::load_rate_plans(&hub, &tx, query))?;

                let filter = RatePlanFilter {
                    scope,
                    branch,
                    active,
                    text: search,
                };
                let plans = filter.apply(self.store.reservations.rate_plans.iter());
                output::print_rate_plans(self.format, &plans)
            }
            RatePlanAction::Show { id } => {
                let plan = self.run(hub.rate_plans.get(&id))?;
                output::print_rate_plan(self.format, &plan)
            }
            RatePlanAction::Create { fields } => {
                let mut form = RatePlanForm::new();
                fill_rate_plan_form(&mut form, fields)?;
                self.save_rate_plan(&form)
            }
            RatePlanAction::Edit { id, fields } => {
                let plan = self.run(hub.rate_plans.get(&id))?;
                let mut form = RatePlanForm::from_plan(&plan);
                fill_rate_plan_form(&mut form, fields)?;
                self.save_rate_plan(&form)
            }
            RatePlanAction::Quote {
                id,
                pickup,
                dropoff,
            } => {
                let pickup = parse_when("pickup", &pickup)?;
                let dropoff = parse_when("return", &dropoff)?;
                let plan = self.run(hub.rate_plans.get(&id))?;
                let estimate = quote(&plan, pickup, dropoff)?;
                output::print_quote(self.format, &plan, &estimate)
            }
            RatePlanAction::Delete { id } => {
                self.run(thunks::delete_rate_plan(&hub, &tx, &id))?;
                self.print_latest_notice();
                Ok(())
            }
            RatePlanAction::Activate { id } => self.set_active(&id, true),
            RatePlanAction::Deactivate { id } => self.set_active(&id, false),
        }
    }

    fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        let plan = self.run(thunks::set_rate_plan_active(&hub, &tx, id, active))?;
        self.report(|desk| output::print_rate_plan(desk.format, &plan))
    }

    fn cmd_reservations(&mut self, action: ReservationAction) -> Result<()> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        match action {
            ReservationAction::List {
                status,
                branch,
                from,
                to,
                search,
            } => {
                let status = parse_reservation_status(status.as_deref())?;
                let from = from.as_deref().map(|v| parse_when("from", v)).transpose()?;
                let to = to.as_deref().map(|v| parse_when("to", v)).transpose()?;
                if let (Some(from), Some(to)) = (from, to) {
                    if to < from {
                        bail!("--to must not be before --from");
                    }
                }
                let query = ReservationQuery {
                    branch: branch.clone(),
                    status,
                    from,
                    to,
                };
                self.run(thunks::load_reservations(&hub, &tx, query))?;

                let filter = ReservationFilter {
                    status,
                    branch,
                    from,
                    to,
                    text: search,
                };
                let reservations = filter.apply(self.store.reservations.reservations.iter());
                output::print_reservations(self.format, &reservations)
            }
            ReservationAction::Show { id } => {
                let reservation = match self.run(hub.reservations.get(&id)) {
                    Ok(r) => r,
                    Err(err) => self.find_by_code(&id).context(err)?,
                };
                output::print_reservation(self.format, &reservation)
            }
            ReservationAction::Create { fields } => {
                let mut form = ReservationForm::new();
                fill_reservation_form(&mut form, fields);
                self.save_reservation(&form)
            }
            ReservationAction::Edit { id, fields } => {
                let reservation = self.run(hub.reservations.get(&id))?;
                let mut form = ReservationForm::from_reservation(&reservation);
                fill_reservation_form(&mut form, fields);
                self.save_reservation(&form)
            }
            ReservationAction::SetStatus { id, status } => {
                let status = reservation_status(&status)?;
                let reservation = self.run(thunks::set_reservation_status(&hub, &tx, &id, status))?;
                self.report(|desk| output::print_reservation(desk.format, &reservation))
            }
            ReservationAction::Cancel { id, reason } => {
                let reservation = self.run(thunks::cancel_reservation(&hub, &tx, &id, reason.as_deref()))?;
                self.report(|desk| output::print_reservation(desk.format, &reservation))
            }
        }
    }

    /// Fall back to scanning the list when `id` is a confirmation code
    fn find_by_code(&mut self, code: &str) -> Option<rentdesk::domain::reservation::Reservation> {
        let (hub, tx) = (self.hub.clone(), self.hub.sender());
        self.run(thunks::load_reservations(&hub, &tx, ReservationQuery::default()))
            .ok()?;
        self.store.reservations.find_by_code(code).cloned()
    }

    fn print_latest_notice(&self) {
        if let Some(message) = table_notice(self.format, &self.store.notices) {
            println!("{message}");
        }
    }

    /// After a mutation: the entity as JSON, or the confirmation notice
    fn report(&self, print_json: impl FnOnce(&Self) -> Result<()>) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(self);
        }
        self.print_latest_notice();
        Ok(())
    }
}
