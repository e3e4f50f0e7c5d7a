//! DriversState - Driver Roster

use crate::domain::user::DriverProfile;
use crate::state::Collection;

#[derive(Debug, Clone, Default)]
pub struct DriversState {
    pub drivers: Collection<DriverProfile>,
}

impl DriversState {
    /// Drivers not explicitly marked unavailable
    pub fn available(&self) -> impl Iterator<Item = &DriverProfile> {
        self.drivers.iter().filter(|d| d.available != Some(false))
    }
}
