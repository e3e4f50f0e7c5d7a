//! Vehicle Services - `/vehicle-models` and `/vehicle-units`

use crate::domain::vehicle::{UnitStatus, VehicleModel, VehicleUnit};
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use serde_json::{Value, json};
use tracing::info;

const MODEL_KEYS: ResourceKeys = ResourceKeys {
    path: "vehicle-models",
    entity: &["vehicleModel", "model"],
    list: &["vehicleModels", "models"],
};

const UNIT_KEYS: ResourceKeys = ResourceKeys {
    path: "vehicle-units",
    entity: &["vehicleUnit", "unit"],
    list: &["vehicleUnits", "units"],
};

#[derive(Clone)]
pub struct VehicleModelService {
    resource: Resource<VehicleModel>,
}

impl VehicleModelService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, MODEL_KEYS),
        }
    }

    /// All models, sorted by display name (dropdown data)
    pub async fn list(&self) -> Result<Vec<VehicleModel>> {
        let mut models = self.resource.list().await?;
        models.sort_by_key(|m| m.display_name().to_lowercase());
        Ok(models)
    }

    pub async fn get(&self, id: &str) -> Result<VehicleModel> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<VehicleModel> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<VehicleModel> {
        self.resource.update(id, body).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}

/// Server-side narrowing for unit lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitQuery {
    pub branch: Option<String>,
    pub model: Option<String>,
    pub status: Option<UnitStatus>,
}

impl UnitQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("branchId", self.branch.clone().unwrap_or_default()),
            ("vehicleModelId", self.model.clone().unwrap_or_default()),
            (
                "status",
                self.status.map(|s| s.label().to_string()).unwrap_or_default(),
            ),
        ]
    }
}

#[derive(Clone)]
pub struct VehicleUnitService {
    resource: Resource<VehicleUnit>,
}

impl VehicleUnitService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, UNIT_KEYS),
        }
    }

    pub async fn list(&self, query: &UnitQuery) -> Result<Vec<VehicleUnit>> {
        self.resource.list_where(&query.pairs()).await
    }

    pub async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<VehicleUnit>> {
        self.list(&UnitQuery {
            branch: Some(branch_id.to_string()),
            ..Default::default()
        })
        .await
    }

    pub async fn get(&self, id: &str) -> Result<VehicleUnit> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<VehicleUnit> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<VehicleUnit> {
        self.resource.update(id, body).await
    }

    pub async fn set_status(&self, id: &str, status: UnitStatus) -> Result<VehicleUnit> {
        self.resource
            .patch(id, &json!({ "status": status.label() }))
            .await
    }

    /// Replace the photo list with `photos` (already uploaded URLs, in order)
    pub async fn set_photos(&self, id: &str, photos: &[String]) -> Result<VehicleUnit> {
        let unit = self.resource.patch(id, &json!({ "photos": photos })).await?;
        info!("Unit {} now has {} photos", id, unit.photos.len());
        Ok(unit)
    }

    /// Append one uploaded photo to the unit
    pub async fn attach_photo(&self, id: &str, url: &str) -> Result<VehicleUnit> {
        let unit = self.get(id).await?;
        let mut photos = unit.photos;
        photos.push(url.to_string());
        self.set_photos(id, &photos).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}
