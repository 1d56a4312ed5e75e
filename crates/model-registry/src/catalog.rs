//! The built-in product catalog.

use atelier_types::{Category, ModelDescriptor};

use crate::Registry;

/// The shipped catalog: three characters, three creatures, three habitat
/// kits. Declaration order here is the order the shortlist shows them in.
pub fn builtin() -> Registry {
    let models = vec![
        ModelDescriptor::new("avatar-1", "Character 1", Category::Avatar, "/models/character1.glb")
            .with_preview("/previews/character1.webp"),
        ModelDescriptor::new("avatar-2", "Character 2", Category::Avatar, "/models/character2.glb")
            .with_preview("/previews/character2.webp"),
        ModelDescriptor::new("avatar-3", "Character 3", Category::Avatar, "/models/character3.glb")
            .with_preview("/previews/character3.webp"),
        ModelDescriptor::new("animal-1", "Creature 1", Category::Animal, "/models/animal1.glb")
            .with_preview("/previews/animal1.webp"),
        ModelDescriptor::new("animal-2", "Creature 2", Category::Animal, "/models/animal2.glb")
            .with_preview("/previews/animal2.webp"),
        ModelDescriptor::new("animal-3", "Creature 3", Category::Animal, "/models/animal3.glb")
            .with_preview("/previews/animal3.webp"),
        ModelDescriptor::new("building-1", "Habitat Kit 1", Category::Building, "/models/home1.glb")
            .with_preview("/previews/home1.webp"),
        ModelDescriptor::new("building-2", "Habitat Kit 2", Category::Building, "/models/home2.glb")
            .with_preview("/previews/home2.webp"),
        ModelDescriptor::new("building-3", "Habitat Kit 3", Category::Building, "/models/home3.glb")
            .with_preview("/previews/home3.webp"),
    ];

    // The shipped catalog has no duplicate ids; a failure here is a bug in
    // this file, caught by the unit tests below.
    Registry::new(models).expect("builtin catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let registry = builtin();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.find("animal-2").unwrap().name, "Creature 2");
    }
}
