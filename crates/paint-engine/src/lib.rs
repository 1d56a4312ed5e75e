pub mod config;
pub mod engine;
pub mod groups;

pub use config::{PaintConfig, PaintEntry};
pub use engine::{apply_config, capture_defaults, discover_parts, PaintBench};
pub use groups::{apply_group_color, default_groups, PartGroup};
