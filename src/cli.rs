//! CLI definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "rentdesk")]
#[command(version)]
#[command(about = "Management client for the car-rental backend")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'f', global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// API base URL for this run (overrides settings and RENTDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Account email
        email: String,

        /// Password, read from RENTDESK_PASSWORD when omitted
        #[arg(long, short = 'p', env = "RENTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Branch locations
    Branches {
        #[command(subcommand)]
        action: BranchAction,
    },

    /// Vehicle models (make, model, class)
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Physical vehicles in the fleet
    Units {
        #[command(subcommand)]
        action: UnitAction,
    },

    /// Pricing rules
    RatePlans {
        #[command(subcommand)]
        action: RatePlanAction,
    },

    /// Driver roster
    Drivers {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Customer bookings
    Reservations {
        #[command(subcommand)]
        action: ReservationAction,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show where settings, session and logs live (default)
    Show,

    /// Write one setting to settings.toml
    Set {
        /// api.base_url, api.timeout_secs, storage.bucket_url,
        /// storage.public_base_url, storage.token, storage.max_upload_bytes,
        /// log_level
        key: String,

        /// New value; blank clears optional settings
        value: String,
    },
}

#[derive(Subcommand)]
pub enum BranchAction {
    /// List branches
    List {
        /// Only active branches
        #[arg(long)]
        active: bool,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List vehicle models
    List,
}

#[derive(Subcommand)]
pub enum UnitAction {
    /// List units; the model and branch lists are loaded for display names
    List {
        /// available, rented, maintenance, retired
        #[arg(long)]
        status: Option<String>,

        /// Branch id
        #[arg(long)]
        branch: Option<String>,

        /// Vehicle model id
        #[arg(long)]
        model: Option<String>,

        /// Text matched against VIN, plate and color
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one unit
    Show { id: String },

    /// Add a unit to the fleet
    Create {
        #[command(flatten)]
        fields: UnitFields,
    },

    /// Change fields of a unit; omitted flags keep their value
    Edit {
        id: String,

        #[command(flatten)]
        fields: UnitFields,
    },

    /// Change a unit's status
    SetStatus {
        id: String,

        /// available, rented, maintenance, retired
        status: String,
    },

    /// Upload a photo and attach it to a unit
    UploadPhoto {
        id: String,

        /// Image file
        path: PathBuf,
    },

    /// Delete a unit
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum DriverAction {
    /// List drivers
    List {
        /// Only drivers not marked unavailable
        #[arg(long)]
        available: bool,
    },

    /// Mark a driver available (true) or unavailable (false)
    SetAvailable {
        id: String,

        #[arg(action = clap::ArgAction::Set)]
        available: bool,
    },
}

#[derive(Subcommand)]
pub enum RatePlanAction {
    /// List rate plans, highest priority first
    List {
        /// global, branch, vehicle_class, model, unit
        #[arg(long)]
        scope: Option<String>,

        /// Branch id
        #[arg(long)]
        branch: Option<String>,

        /// Only active (true) or inactive (false) plans
        #[arg(long)]
        active: Option<bool>,

        /// Text matched against the plan name
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one plan with its rates, taxes, fees and seasons
    Show { id: String },

    /// Create a plan
    Create {
        #[command(flatten)]
        fields: RatePlanFields,
    },

    /// Change fields of a plan; omitted flags keep their value
    Edit {
        id: String,

        #[command(flatten)]
        fields: RatePlanFields,
    },

    /// Estimate the price of a rental window under a plan
    Quote {
        id: String,

        /// Pickup time (RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD")
        #[arg(long)]
        pickup: String,

        /// Return time, same formats as --pickup
        #[arg(long = "return")]
        dropoff: String,
    },

    /// Delete a plan
    Delete { id: String },

    /// Mark a plan active
    Activate { id: String },

    /// Mark a plan inactive
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum ReservationAction {
    /// List reservations
    List {
        /// pending, confirmed, checked_out, returned, cancelled, no_show
        #[arg(long)]
        status: Option<String>,

        /// Branch id (pickup or return)
        #[arg(long)]
        branch: Option<String>,

        /// Window start (same formats as rate-plans quote)
        #[arg(long)]
        from: Option<String>,

        /// Window end
        #[arg(long)]
        to: Option<String>,

        /// Text matched against code, customer name and email
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one reservation
    Show {
        /// Id or confirmation code
        id: String,
    },

    /// Book a rental
    Create {
        #[command(flatten)]
        fields: ReservationFields,
    },

    /// Change fields of a reservation; omitted flags keep their value
    Edit {
        id: String,

        #[command(flatten)]
        fields: ReservationFields,
    },

    /// Move a reservation to another status
    SetStatus {
        id: String,

        /// pending, confirmed, checked_out, returned, cancelled, no_show
        status: String,
    },

    /// Cancel a reservation
    Cancel {
        id: String,

        /// Reason stored with the cancellation
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct UnitFields {
    /// License plate
    #[arg(long)]
    pub plate: Option<String>,

    /// 17-character VIN
    #[arg(long)]
    pub vin: Option<String>,

    /// Vehicle model id
    #[arg(long)]
    pub model: Option<String>,

    /// Branch id
    #[arg(long)]
    pub branch: Option<String>,

    /// Odometer reading in km
    #[arg(long)]
    pub odometer: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// available, rented, maintenance, retired
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RatePlanFields {
    #[arg(long)]
    pub name: Option<String>,

    /// global, branch, vehicle_class, model, unit
    #[arg(long)]
    pub scope: Option<String>,

    /// Branch id for branch scope
    #[arg(long)]
    pub branch: Option<String>,

    /// Vehicle class for vehicle_class scope
    #[arg(long = "class")]
    pub vehicle_class: Option<String>,

    /// Model id for model scope
    #[arg(long)]
    pub model: Option<String>,

    /// Unit id for unit scope
    #[arg(long)]
    pub unit: Option<String>,

    /// Three-letter currency code
    #[arg(long)]
    pub currency: Option<String>,

    /// Higher wins when several plans apply
    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub daily: Option<String>,

    #[arg(long)]
    pub weekly: Option<String>,

    #[arg(long)]
    pub monthly: Option<String>,

    /// Rate for Saturday and Sunday days
    #[arg(long)]
    pub weekend: Option<String>,

    /// Active (true) or inactive (false)
    #[arg(long)]
    pub active: Option<bool>,

    /// Tax as NAME=PERCENT; repeat for several, replaces the current taxes
    #[arg(long = "tax", value_name = "NAME=PERCENT")]
    pub taxes: Vec<String>,

    /// Fee as NAME=AMOUNT, or NAME=AMOUNT/day when charged per day;
    /// repeat for several, replaces the current fees
    #[arg(long = "fee", value_name = "NAME=AMOUNT")]
    pub fees: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ReservationFields {
    /// Customer name
    #[arg(long)]
    pub customer: Option<String>,

    /// Customer email
    #[arg(long)]
    pub email: Option<String>,

    /// Customer phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Pickup branch id
    #[arg(long)]
    pub pickup_branch: Option<String>,

    /// Return branch id; defaults to the pickup branch
    #[arg(long)]
    pub return_branch: Option<String>,

    /// Pickup time (RFC 3339 or "YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub pickup: Option<String>,

    /// Return time, same formats as --pickup
    #[arg(long = "return")]
    pub return_at: Option<String>,

    /// Vehicle model id
    #[arg(long)]
    pub model: Option<String>,

    /// Vehicle unit id
    #[arg(long)]
    pub unit: Option<String>,

    /// Rate plan id
    #[arg(long)]
    pub rate_plan: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}
