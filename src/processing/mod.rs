//! Network processing logic.
//!
//! This module contains the ingestion and merge steps:
//! - [`collector`] - filtering and parsing raw address/mask pairs
//! - [`reconcile`] - folding networks into a set and iterating to a fixpoint

mod collector;
mod reconcile;

// Re-export public functions
pub use collector::NetworkCollector;
pub use reconcile::{reconcile_pass, reconcile_to_fixpoint, PassResult, Reconciled};
