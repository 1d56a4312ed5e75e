use serde::{Deserialize, Serialize};

/// Coarse asset classification used to filter the model registry.
/// The wizard's decision table resolves to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Avatar,
    Animal,
    Building,
}

impl Category {
    /// All categories in catalog declaration order.
    pub const ALL: [Category; 3] = [Category::Avatar, Category::Animal, Category::Building];

    /// Lowercase label, matching the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Avatar => "avatar",
            Category::Animal => "animal",
            Category::Building => "building",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
