//! Inventory item instances and the gear vocabulary shared with the
//! catalog.

use crate::catalog::{self, Gear};
use crate::constants::SELL_VALUE_PER_UPGRADE;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equipment slots. Each holds at most one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearSlot {
    Weapon,
    Armor,
    Accessory,
}

impl GearSlot {
    pub fn all() -> [GearSlot; 3] {
        [GearSlot::Weapon, GearSlot::Armor, GearSlot::Accessory]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GearSlot::Weapon => "Weapon",
            GearSlot::Armor => "Armor",
            GearSlot::Accessory => "Accessory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }
}

/// One acquired piece of gear. References its catalog entry by id; the
/// upgrade level is the only mutable part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub instance_id: String,
    pub gear_id: String,
    pub upgrade_level: u32,
}

impl InventoryItem {
    /// Creates a fresh drop of the given gear at upgrade level 0.
    pub fn new(gear_id: &str) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            gear_id: gear_id.to_string(),
            upgrade_level: 0,
        }
    }

    /// Resolves the catalog entry. `None` only if catalog and state
    /// desynced, which callers treat as a no-op.
    pub fn gear(&self) -> Option<Gear> {
        catalog::get_gear(&self.gear_id)
    }

    /// Power contributed by this item at its current upgrade level.
    pub fn power_bonus(&self) -> f64 {
        match self.gear() {
            Some(gear) => gear.base_power_bonus + self.upgrade_level as f64 * gear.power_upgrade_bonus,
            None => 0.0,
        }
    }

    /// Gold-find bonus (percent) contributed by this item.
    pub fn gold_bonus(&self) -> f64 {
        match self.gear() {
            Some(gear) => gear.base_gold_bonus + self.upgrade_level as f64 * gear.gold_upgrade_bonus,
            None => 0.0,
        }
    }

    /// Gold received when selling. Upgrades invested raise the price.
    pub fn sell_value(&self) -> u32 {
        match self.gear() {
            Some(gear) => {
                let scaled =
                    gear.sell_value as f64 * (1.0 + self.upgrade_level as f64 * SELL_VALUE_PER_UPGRADE);
                scaled.floor() as u32
            }
            None => 0,
        }
    }

    /// Whether another upgrade can still be applied.
    pub fn can_upgrade(&self) -> bool {
        match self.gear() {
            Some(gear) => self.upgrade_level < gear.max_upgrade_level,
            None => false,
        }
    }

    /// Display name, with the upgrade suffix once enhanced.
    pub fn display_name(&self) -> String {
        let name = self.gear().map(|g| g.name).unwrap_or("Unknown");
        if self.upgrade_level > 0 {
            format!("{} +{}", name, self.upgrade_level)
        } else {
            name.to_string()
        }
    }
}
