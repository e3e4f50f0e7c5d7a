//! AuthState - Logged-in User

use crate::domain::user::User;
use crate::error::ApiError;
use crate::state::LoadState;

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    user: Option<User>,
    authenticated: bool,
    status: LoadState,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn status(&self) -> &LoadState {
        &self.status
    }

    /// Staff roles may open the admin surface
    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_staff())
    }

    pub(crate) fn set_pending(&mut self) {
        self.status = LoadState::Loading;
    }

    pub(crate) fn set_logged_in(&mut self, user: Option<User>) {
        self.authenticated = true;
        if user.is_some() {
            self.user = user;
        }
        self.status = LoadState::Loaded;
    }

    /// An unauthorized failure also drops the session
    pub(crate) fn set_failed(&mut self, err: ApiError) {
        if err.is_unauthorized() {
            self.authenticated = false;
            self.user = None;
        }
        self.status = LoadState::Failed(err);
    }
}
