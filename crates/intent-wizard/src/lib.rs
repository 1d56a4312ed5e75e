pub mod rules;
pub mod session;
pub mod steps;
pub mod types;

pub use rules::derive_category;
pub use session::WizardSession;
pub use types::*;
