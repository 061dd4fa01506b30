//! Configuration data models
//!
//! This module defines the PC build data structures that are persisted to
//! the key-value store and exported to JSON files.

use crate::error::RigbookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One priced part of a build
///
/// An empty `name` or a `price` of 0 means the part has not been chosen yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    /// Part label, empty when unset
    pub name: String,
    /// Non-negative price, 0 when unpriced
    pub price: f64,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Component {
    /// Create a named, priced component without notes
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            notes: None,
        }
    }

    /// Whether the part has both a name and a positive price
    pub fn is_filled(&self) -> bool {
        !self.name.is_empty() && self.price > 0.0
    }
}

/// The eight fixed component roles of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentSlot {
    /// Motherboard
    Motherboard,
    /// Case
    Case,
    /// Power supply
    PowerSupply,
    /// System memory
    Ram,
    /// Processor
    Cpu,
    /// Solid state drive
    Ssd,
    /// Hard disk drive
    Hdd,
    /// Graphics card
    GraphicsCard,
}

impl ComponentSlot {
    /// Every slot, in display and serialization order
    pub const ALL: [ComponentSlot; 8] = [
        ComponentSlot::Motherboard,
        ComponentSlot::Case,
        ComponentSlot::PowerSupply,
        ComponentSlot::Ram,
        ComponentSlot::Cpu,
        ComponentSlot::Ssd,
        ComponentSlot::Hdd,
        ComponentSlot::GraphicsCard,
    ];

    /// JSON field name of the slot
    pub fn key(self) -> &'static str {
        match self {
            ComponentSlot::Motherboard => "motherboard",
            ComponentSlot::Case => "case",
            ComponentSlot::PowerSupply => "powerSupply",
            ComponentSlot::Ram => "ram",
            ComponentSlot::Cpu => "cpu",
            ComponentSlot::Ssd => "ssd",
            ComponentSlot::Hdd => "hdd",
            ComponentSlot::GraphicsCard => "graphicsCard",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            ComponentSlot::Motherboard => "Motherboard",
            ComponentSlot::Case => "Case",
            ComponentSlot::PowerSupply => "Power supply",
            ComponentSlot::Ram => "RAM",
            ComponentSlot::Cpu => "CPU",
            ComponentSlot::Ssd => "SSD",
            ComponentSlot::Hdd => "HDD",
            ComponentSlot::GraphicsCard => "Graphics card",
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentSlot {
    type Err = RigbookError;

    /// Parses the JSON key case-insensitively, ignoring `-`, `_` and spaces,
    /// plus the `psu` and `gpu` shorthands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "motherboard" | "mobo" => Ok(ComponentSlot::Motherboard),
            "case" => Ok(ComponentSlot::Case),
            "powersupply" | "psu" => Ok(ComponentSlot::PowerSupply),
            "ram" | "memory" => Ok(ComponentSlot::Ram),
            "cpu" | "processor" => Ok(ComponentSlot::Cpu),
            "ssd" => Ok(ComponentSlot::Ssd),
            "hdd" => Ok(ComponentSlot::Hdd),
            "graphicscard" | "gpu" => Ok(ComponentSlot::GraphicsCard),
            _ => Err(RigbookError::InvalidComponentSlot(s.to_string())),
        }
    }
}

/// One PC build
///
/// All eight slots are always present; a missing slot in a stored document
/// deserializes as an unset [`Component`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Unique identifier, fixed at creation
    pub id: Uuid,
    /// Display name, not required to be unique
    #[serde(default)]
    pub name: String,
    /// Motherboard slot
    #[serde(default)]
    pub motherboard: Component,
    /// Case slot
    #[serde(default)]
    pub case: Component,
    /// Power supply slot
    #[serde(default)]
    pub power_supply: Component,
    /// RAM slot
    #[serde(default)]
    pub ram: Component,
    /// CPU slot
    #[serde(default)]
    pub cpu: Component,
    /// SSD slot
    #[serde(default)]
    pub ssd: Component,
    /// HDD slot
    #[serde(default)]
    pub hdd: Component,
    /// Graphics card slot
    #[serde(default)]
    pub graphics_card: Component,
    /// Target sale price
    #[serde(default)]
    pub sale_target: f64,
}

impl Configuration {
    /// Create an empty configuration with a freshly minted id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create an empty configuration with the given id
    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            motherboard: Component::default(),
            case: Component::default(),
            power_supply: Component::default(),
            ram: Component::default(),
            cpu: Component::default(),
            ssd: Component::default(),
            hdd: Component::default(),
            graphics_card: Component::default(),
            sale_target: 0.0,
        }
    }

    /// Component in the given slot
    pub fn component(&self, slot: ComponentSlot) -> &Component {
        match slot {
            ComponentSlot::Motherboard => &self.motherboard,
            ComponentSlot::Case => &self.case,
            ComponentSlot::PowerSupply => &self.power_supply,
            ComponentSlot::Ram => &self.ram,
            ComponentSlot::Cpu => &self.cpu,
            ComponentSlot::Ssd => &self.ssd,
            ComponentSlot::Hdd => &self.hdd,
            ComponentSlot::GraphicsCard => &self.graphics_card,
        }
    }

    /// Mutable component in the given slot
    pub fn component_mut(&mut self, slot: ComponentSlot) -> &mut Component {
        match slot {
            ComponentSlot::Motherboard => &mut self.motherboard,
            ComponentSlot::Case => &mut self.case,
            ComponentSlot::PowerSupply => &mut self.power_supply,
            ComponentSlot::Ram => &mut self.ram,
            ComponentSlot::Cpu => &mut self.cpu,
            ComponentSlot::Ssd => &mut self.ssd,
            ComponentSlot::Hdd => &mut self.hdd,
            ComponentSlot::GraphicsCard => &mut self.graphics_card,
        }
    }

    /// All eight components paired with their slot, in slot order
    pub fn components(&self) -> impl Iterator<Item = (ComponentSlot, &Component)> {
        ComponentSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.component(slot)))
    }
}
