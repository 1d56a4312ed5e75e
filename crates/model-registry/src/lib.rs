//! Static model catalog with category-filtered queries.
//!
//! The registry is immutable after construction and answers pure lookups;
//! `find` on an unknown id is a recoverable error by contract — callers fall
//! back to a default descriptor or skip the operation.

pub mod catalog;

use std::collections::HashMap;

use atelier_types::{Category, ModelDescriptor};

/// Errors from registry construction and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("model not found: {id}")]
    NotFound { id: String },

    #[error("duplicate model id in catalog: {id}")]
    DuplicateId { id: String },

    #[error("failed to parse catalog: {reason}")]
    ParseError { reason: String },
}

/// The immutable model catalog.
///
/// Descriptors keep their declaration order; queries never sort.
#[derive(Debug, Clone)]
pub struct Registry {
    models: Vec<ModelDescriptor>,
    by_id: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self, RegistryError> {
        let mut by_id = HashMap::with_capacity(models.len());
        for (idx, model) in models.iter().enumerate() {
            if by_id.insert(model.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateId {
                    id: model.id.clone(),
                });
            }
        }
        Ok(Self { models, by_id })
    }

    /// The shipped product catalog.
    pub fn builtin() -> Self {
        catalog::builtin()
    }

    /// Parse a catalog from its JSON configuration form.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let models: Vec<ModelDescriptor> =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                reason: e.to_string(),
            })?;
        Self::new(models)
    }

    /// All descriptors of a category, in declaration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&ModelDescriptor> {
        self.models
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Look up a descriptor by id.
    pub fn find(&self, id: &str) -> Result<&ModelDescriptor, RegistryError> {
        self.by_id
            .get(id)
            .map(|&idx| &self.models[idx])
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
