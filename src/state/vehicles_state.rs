//! VehiclesState - Units plus the Model and Branch Dropdowns

use crate::domain::branch::Branch;
use crate::domain::refs::EntityRef;
use crate::domain::vehicle::{VehicleModel, VehicleUnit};
use crate::services::vehicles::UnitQuery;
use crate::state::Collection;

#[derive(Debug, Clone, Default)]
pub struct VehiclesState {
    pub units: Collection<VehicleUnit>,
    pub models: Collection<VehicleModel>,
    pub branches: Collection<Branch>,
    /// Query of the last unit load, reused by retry
    pub unit_query: UnitQuery,
}

impl VehiclesState {
    /// Dropdown label for a unit's model, preferring the loaded list
    pub fn model_label(&self, model: &EntityRef) -> String {
        self.models
            .get(&model.id)
            .map(VehicleModel::display_name)
            .unwrap_or_else(|| model.display().to_string())
    }

    pub fn branch_label(&self, branch: &EntityRef) -> String {
        self.branches
            .get(&branch.id)
            .map(Branch::label)
            .unwrap_or_else(|| branch.display().to_string())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
