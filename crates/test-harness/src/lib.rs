//! Test harness for scripting full customizer sessions.
//!
//! Provides programmatic tools for driving multi-step workshop workflows
//! through the real message dispatch and verifying the outcome at every
//! step.
//!
//! # Key Components
//!
//! - [`WorkshopBuilder`] — fluent API for driving and verifying sessions
//! - [`helpers`] — error type, payload encoding, canned intake answers
//! - [`assertions`] — rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod workflow;

pub use helpers::HarnessError;
pub use workflow::{ExportedAsset, WorkshopBuilder};
