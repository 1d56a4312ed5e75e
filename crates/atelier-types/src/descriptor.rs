use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A selectable asset in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique slug, e.g. `avatar-1`. Uniqueness is enforced by the registry.
    pub id: String,
    /// Display label shown in the shortlist.
    pub name: String,
    /// Catalog category; drives the wizard's shortlist query.
    pub category: Category,
    /// Locator for the scene graph resource (GLB), resolved by the host.
    pub asset_path: String,
    /// Thumbnail locator. UI-only, optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        asset_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            asset_path: asset_path.into(),
            preview_image: None,
        }
    }

    pub fn with_preview(mut self, preview_image: impl Into<String>) -> Self {
        self.preview_image = Some(preview_image.into());
        self
    }
}
