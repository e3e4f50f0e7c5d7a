//! Service Hub
//!
//! Builds every service from the settings and the stored session, and owns
//! the action channel that thunks use to report back to the store.

use crate::constants::ENV_TOKEN;
use crate::domain::settings::AppSettings;
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::auth::AuthService;
use crate::services::branches::BranchService;
use crate::services::chat::ChatService;
use crate::services::drivers::DriverService;
use crate::services::profile::ProfileService;
use crate::services::rate_plans::RatePlanService;
use crate::services::reservations::ReservationService;
use crate::services::storage::StorageUploader;
use crate::services::transport::{HttpTransport, Transport};
use crate::services::vehicles::{VehicleModelService, VehicleUnitService};
use crate::session::Session;
use crate::state::Action;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Pick the bearer token: the environment wins, then a session issued by
/// the same backend
pub fn resolve_token(
    settings: &AppSettings,
    session: Option<&Session>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty()) {
        return Some(token.trim().to_string());
    }
    let base = settings.api.base_url.trim().trim_end_matches('/');
    session
        .filter(|s| s.base_url.trim().trim_end_matches('/') == base)
        .map(|s| s.token.clone())
        .filter(|t| !t.is_empty())
}

/// Central hub for all backend services
#[derive(Clone)]
pub struct ServiceHub {
    api: ApiClient,
    pub auth: AuthService,
    pub branches: BranchService,
    pub models: VehicleModelService,
    pub units: VehicleUnitService,
    pub rate_plans: RatePlanService,
    pub reservations: ReservationService,
    pub drivers: DriverService,
    pub chat: ChatService,
    pub profile: ProfileService,
    pub storage: StorageUploader,
    tx: Sender<Action>,
    rx: Receiver<Action>,
}

impl ServiceHub {
    /// Hub backed by the real HTTP transport
    pub fn new(settings: &AppSettings, session: Option<&Session>) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(settings.api.timeout_secs.max(1)))?;
        let token = resolve_token(settings, session, |key| std::env::var(key).ok());
        Ok(Self::with_transport(settings, token, Arc::new(transport)))
    }

    pub fn with_transport(
        settings: &AppSettings,
        token: Option<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let api = ApiClient::new(&settings.api.base_url, transport.clone()).with_token(token);

        tracing::info!(
            "Service hub ready for {} (authenticated: {})",
            api.base_url(),
            api.is_authenticated()
        );

        Self {
            auth: AuthService::new(api.clone()),
            branches: BranchService::new(api.clone()),
            models: VehicleModelService::new(api.clone()),
            units: VehicleUnitService::new(api.clone()),
            rate_plans: RatePlanService::new(api.clone()),
            reservations: ReservationService::new(api.clone()),
            drivers: DriverService::new(api.clone()),
            chat: ChatService::new(api.clone()),
            profile: ProfileService::new(api.clone()),
            storage: StorageUploader::new(settings.storage.clone(), transport),
            api,
            tx,
            rx,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Sender handed to thunks
    pub fn sender(&self) -> Sender<Action> {
        self.tx.clone()
    }

    /// Receiver drained by the store
    pub fn actions(&self) -> Receiver<Action> {
        self.rx.clone()
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub")
            .field("api", &self.api)
            .field("queued_actions", &self.rx.len())
            .finish()
    }
}
