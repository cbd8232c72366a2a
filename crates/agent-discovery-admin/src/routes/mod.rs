//! Admin HTTP routes.

pub mod features;
pub mod health;

pub use features::query_registry;
