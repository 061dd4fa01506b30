//! PC build model and pricing metrics
//!
//! A [`Configuration`] is one named build made of eight [`Component`] slots
//! and a sale target. The [`metrics`] module derives totals, margins,
//! completeness and aggregate statistics from it.

pub mod metrics;
pub mod models;

pub use metrics::{Statistics, is_complete, margin, missing_slots, total_price};
pub use models::{Component, ComponentSlot, Configuration};
