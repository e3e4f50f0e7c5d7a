//! Keyed Collections
//!
//! Every list slice stores entities by id with a stable display order, a
//! selection, and the load state of the last fetch.

use crate::domain::branch::Branch;
use crate::domain::chat::Conversation;
use crate::domain::rate_plan::RatePlan;
use crate::domain::reservation::Reservation;
use crate::domain::user::DriverProfile;
use crate::domain::vehicle::{VehicleModel, VehicleUnit};
use crate::error::ApiError;
use crate::state::LoadState;
use ahash::AHashMap;

/// Entities addressable by their backend id
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed_by_id!(
    Branch,
    Conversation,
    DriverProfile,
    RatePlan,
    Reservation,
    VehicleModel,
    VehicleUnit,
);

#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: AHashMap<String, T>,
    order: Vec<String>,
    selected: Option<String>,
    load_state: LoadState,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: AHashMap::new(),
            order: Vec::new(),
            selected: None,
            load_state: LoadState::Idle,
        }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Load lifecycle ====================

    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Replace the contents, keeping server order; later duplicates win
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items.clear();
        self.order.clear();
        for item in items {
            self.insert(item);
        }
        if let Some(id) = &self.selected {
            if !self.items.contains_key(id) {
                self.selected = None;
            }
        }
        self.load_state = LoadState::Loaded;
    }

    pub fn set_failed(&mut self, err: ApiError) {
        self.load_state = LoadState::Failed(err);
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    // ==================== Items ====================

    fn insert(&mut self, item: T) -> bool {
        let id = item.key().to_string();
        let is_new = self.items.insert(id.clone(), item).is_none();
        if is_new {
            self.order.push(id);
        }
        is_new
    }

    /// Insert or replace one entity; new ones go last. Returns true if new.
    pub fn upsert(&mut self, item: T) -> bool {
        self.insert(item)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let removed = self.items.remove(id)?;
        self.order.retain(|k| k != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    /// Items in display order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ==================== Selection ====================

    /// Select an existing item, or clear with `None`. Returns false for an
    /// unknown id.
    pub fn select(&mut self, id: Option<String>) -> bool {
        match id {
            Some(id) if !self.items.contains_key(&id) => false,
            id => {
                self.selected = id;
                true
            }
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.items.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_server_order() {
        let mut branches = Collection::new();
        branches.set_items(vec![branch("b2", "Downtown"), branch("b1", "Airport")]);
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Downtown", "Airport"]);
        assert!(branches.load_state().is_loaded());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut branches = Collection::new();
        branches.set_items(vec![branch("b1", "Airport"), branch("b2", "Downtown")]);
        assert!(!branches.upsert(branch("b1", "Airport T2")));
        assert!(branches.upsert(branch("b3", "Harbor")));
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Airport T2", "Downtown", "Harbor"]);
    }

    #[test]
    fn failure_keeps_data() {
        let mut branches = Collection::new();
        branches.set_items(vec![branch("b1", "Airport")]);
        branches.set_failed(ApiError::transport("GET", "u", "offline"));
        assert_eq!(branches.len(), 1);
        assert!(branches.load_state().is_failed());
    }

    #[test]
    fn selection_follows_removal_and_reload() {
        let mut branches = Collection::new();
        branches.set_items(vec![branch("b1", "Airport"), branch("b2", "Downtown")]);
        assert!(!branches.select(Some("nope".into())));
        assert!(branches.select(Some("b2".into())));
        assert_eq!(branches.selected().map(|b| b.name.as_str()), Some("Downtown"));

        branches.set_items(vec![branch("b2", "Downtown")]);
        assert_eq!(branches.selected_id(), Some("b2"));

        branches.remove("b2");
        assert_eq!(branches.selected_id(), None);
        assert!(branches.is_empty());
    }
}
