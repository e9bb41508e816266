//! `shelfcheck-recon`: sales/inventory reconciliation engine.
//!
//! Pure engine crate: receives decoded tables, returns a classified
//! dashboard. No file or network IO.

pub mod classify;
pub mod config;
pub mod derived;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;

pub use config::ShelfConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ClassifiedItem, Dashboard, ReconciledItem, Tier};
