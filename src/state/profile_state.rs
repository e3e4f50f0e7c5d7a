//! ProfileState - Own Profile

use crate::domain::user::User;
use crate::error::ApiError;
use crate::state::LoadState;

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    user: Option<User>,
    load_state: LoadState,
}

impl ProfileState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub(crate) fn set_pending(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub(crate) fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.load_state = LoadState::Loaded;
    }

    pub(crate) fn set_failed(&mut self, err: ApiError) {
        self.load_state = LoadState::Failed(err);
    }
}
