//! Equipped gear slots and the inventory operations that move items
//! between inventory, slots, and gold.

use crate::game_state::GameState;
use crate::items::{GearSlot, InventoryItem};
use crate::tick::TickEvent;
use serde::{Deserialize, Serialize};

/// At most one item per slot. The item in a slot always matches the
/// slot's gear type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedGear {
    pub weapon: Option<InventoryItem>,
    pub armor: Option<InventoryItem>,
    pub accessory: Option<InventoryItem>,
}

impl EquippedGear {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: GearSlot) -> &Option<InventoryItem> {
        match slot {
            GearSlot::Weapon => &self.weapon,
            GearSlot::Armor => &self.armor,
            GearSlot::Accessory => &self.accessory,
        }
    }

    pub fn get_mut(&mut self, slot: GearSlot) -> &mut Option<InventoryItem> {
        match slot {
            GearSlot::Weapon => &mut self.weapon,
            GearSlot::Armor => &mut self.armor,
            GearSlot::Accessory => &mut self.accessory,
        }
    }

    /// Places an item in a slot, returning whatever was there before.
    pub fn swap(&mut self, slot: GearSlot, item: Option<InventoryItem>) -> Option<InventoryItem> {
        std::mem::replace(self.get_mut(slot), item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &InventoryItem> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }
}

/// Moves an inventory item into its gear slot; a displaced item returns
/// to the inventory. Unknown instance or gear ids are no-ops.
pub fn equip_item(state: &mut GameState, instance_id: &str) -> Vec<TickEvent> {
    let mut events = Vec::new();

    let Some(pos) = state
        .inventory
        .iter()
        .position(|item| item.instance_id == instance_id)
    else {
        return events;
    };
    let Some(gear) = state.inventory[pos].gear() else {
        return events;
    };

    let item = state.inventory.remove(pos);
    if let Some(displaced) = state.equipped_gear.swap(gear.slot, Some(item)) {
        state.inventory.push(displaced);
    }

    // Gear power feeds total power, which can reveal enemies and satisfy
    // power quests.
    crate::game_logic::refresh_progression(state, &mut events);
    events
}

/// Removes the item in a slot back to the inventory. Empty slots are a
/// no-op.
pub fn unequip_slot(state: &mut GameState, slot: GearSlot) -> Vec<TickEvent> {
    let mut events = Vec::new();

    if let Some(item) = state.equipped_gear.swap(slot, None) {
        state.inventory.push(item);
        crate::game_logic::refresh_progression(state, &mut events);
    }
    events
}

/// Sells an inventory item for gold. Equipped items cannot be sold
/// without unequipping first.
pub fn sell_item(state: &mut GameState, instance_id: &str) -> Vec<TickEvent> {
    let mut events = Vec::new();

    let Some(pos) = state
        .inventory
        .iter()
        .position(|item| item.instance_id == instance_id)
    else {
        return events;
    };

    let item = state.inventory.remove(pos);
    let value = item.sell_value();
    state.player.gold += value as f64;
    events.push(TickEvent::ItemSold {
        name: item.display_name(),
        gold: value,
    });

    crate::game_logic::refresh_progression(state, &mut events);
    events
}

/// Consumes an inventory duplicate of an equipped item to raise its
/// upgrade level by one.
pub fn upgrade_via_duplicate(state: &mut GameState, instance_id: &str) -> Vec<TickEvent> {
    let mut events = Vec::new();

    let Some(pos) = state
        .inventory
        .iter()
        .position(|item| item.instance_id == instance_id)
    else {
        return events;
    };
    let Some(gear) = state.inventory[pos].gear() else {
        return events;
    };

    let duplicate_gear_id = state.inventory[pos].gear_id.clone();
    let new_level = match state.equipped_gear.get_mut(gear.slot).as_mut() {
        Some(equipped) if equipped.gear_id == duplicate_gear_id => {
            if !equipped.can_upgrade() {
                events.push(TickEvent::EnhanceAtMaxLevel {
                    name: gear.name.to_string(),
                });
                return events;
            }
            equipped.upgrade_level += 1;
            equipped.upgrade_level
        }
        _ => {
            events.push(TickEvent::EnhanceNoMatch);
            return events;
        }
    };
    state.inventory.remove(pos);
    events.push(TickEvent::ItemEnhanced {
        name: gear.name.to_string(),
        new_level,
    });

    crate::game_logic::refresh_progression(state, &mut events);
    events
}
