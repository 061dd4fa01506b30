//! Derived pricing metrics
//!
//! Pure functions over [`Configuration`] values. Totals are computed by
//! enumerating [`ComponentSlot::ALL`], so every slot is counted exactly once.

use crate::build::models::{ComponentSlot, Configuration};

/// Sum of the prices of all eight components
pub fn total_price(config: &Configuration) -> f64 {
    config.components().map(|(_, component)| component.price).sum()
}

/// Whether every slot has a name and a positive price, and the sale target is positive
pub fn is_complete(config: &Configuration) -> bool {
    config.sale_target > 0.0 && config.components().all(|(_, component)| component.is_filled())
}

/// Sale target minus total price; negative when the build costs more than it sells for
pub fn margin(config: &Configuration) -> f64 {
    config.sale_target - total_price(config)
}

/// Slots that still need a name or a positive price, in slot order
pub fn missing_slots(config: &Configuration) -> Vec<ComponentSlot> {
    config
        .components()
        .filter(|(_, component)| !component.is_filled())
        .map(|(slot, _)| slot)
        .collect()
}

/// Aggregate statistics over a list of configurations
///
/// Every field is 0 for an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Number of configurations
    pub count: usize,
    /// Number of complete configurations
    pub complete_count: usize,
    /// Mean total price
    pub mean_total: f64,
    /// Highest total price
    pub max_total: f64,
    /// Lowest total price
    pub min_total: f64,
}

impl Statistics {
    /// Compute statistics for the given configurations
    pub fn from_configs(configs: &[Configuration]) -> Self {
        if configs.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            count: configs.len(),
            min_total: f64::INFINITY,
            max_total: f64::NEG_INFINITY,
            ..Self::default()
        };
        let mut sum = 0.0;

        for config in configs {
            let total = total_price(config);
            sum += total;
            stats.max_total = stats.max_total.max(total);
            stats.min_total = stats.min_total.min(total);
            if is_complete(config) {
                stats.complete_count += 1;
            }
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "Configuration counts are far below 2^52"
        )]
        let count = stats.count as f64;
        stats.mean_total = sum / count;
        stats
    }
}
