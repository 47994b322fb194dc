//! The serializable world state: everything the engine mutates, in one
//! snapshot that is also the unit of persistence.

use crate::catalog::ActionCategory;
use crate::combat::Enemy;
use crate::entity::Entity;
use crate::equipment::EquippedGear;
use crate::items::InventoryItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base player progression numbers. Gear bonuses are layered on top by
/// [`crate::derived_stats::TotalStats`], never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Base power, excluding gear.
    pub power: u32,
    pub gold: f64,
    pub xp: f64,
    pub level: u32,
    /// Always `floor(100 * 1.5^(level-1))`; xp stays below this after any
    /// mutation.
    pub xp_to_next_level: u64,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            power: 1,
            gold: 0.0,
            xp: 0.0,
            level: 1,
            xp_to_next_level: 100,
        }
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Full game state. Serialized fields form the persisted snapshot;
/// `#[serde(skip)]` fields are re-derived after load (combat restarts
/// fresh, the manual action slot comes back idle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerStats,
    pub current_enemy_index: usize,
    pub found_entities: Vec<Entity>,
    pub unlocked_actions: Vec<ActionCategory>,
    pub unlocked_sub_actions: Vec<String>,
    pub quest_completion: HashMap<String, bool>,
    pub quest_progress: HashMap<String, u32>,
    pub active_quest_id: Option<String>,
    pub unlocked_enemy_names: Vec<String>,
    pub sub_action_completion_counts: HashMap<String, u32>,
    /// Per enemy name, per gear id: how many times that drop occurred.
    /// Display only, never consulted by gameplay.
    pub enemy_drop_history: HashMap<String, HashMap<String, u32>>,
    pub inventory: Vec<InventoryItem>,
    pub equipped_gear: EquippedGear,
    pub offline_progress_enabled: bool,
    pub active_manual_category: ActionCategory,
    pub last_save_time: i64,

    #[serde(skip)]
    pub current_enemy: Option<Enemy>,
    #[serde(skip)]
    pub active_manual_sub_action_id: Option<String>,
    #[serde(skip)]
    pub manual_progress: f64,
}

impl GameState {
    /// Creates a fresh game: level 1, Training unlocked, push-ups and
    /// sit-ups available, first quest active.
    pub fn new(current_time: i64) -> Self {
        Self {
            player: PlayerStats::new(),
            current_enemy_index: 0,
            found_entities: Vec::new(),
            unlocked_actions: vec![ActionCategory::Training],
            unlocked_sub_actions: vec!["pushups".to_string(), "situps".to_string()],
            quest_completion: HashMap::new(),
            quest_progress: HashMap::new(),
            active_quest_id: Some("q1".to_string()),
            unlocked_enemy_names: Vec::new(),
            sub_action_completion_counts: HashMap::new(),
            enemy_drop_history: HashMap::new(),
            inventory: Vec::new(),
            equipped_gear: EquippedGear::new(),
            offline_progress_enabled: true,
            active_manual_category: ActionCategory::Training,
            last_save_time: current_time,
            current_enemy: None,
            active_manual_sub_action_id: None,
            manual_progress: 0.0,
        }
    }

    pub fn is_action_unlocked(&self, category: ActionCategory) -> bool {
        self.unlocked_actions.contains(&category)
    }

    pub fn is_sub_action_unlocked(&self, id: &str) -> bool {
        self.unlocked_sub_actions.iter().any(|s| s == id)
    }

    pub fn is_quest_completed(&self, id: &str) -> bool {
        self.quest_completion.get(id).copied().unwrap_or(false)
    }

    pub fn quest_progress(&self, id: &str) -> u32 {
        self.quest_progress.get(id).copied().unwrap_or(0)
    }

    pub fn find_entity(&self, entity_id: &str) -> Option<&Entity> {
        self.found_entities.iter().find(|e| e.id == entity_id)
    }

    pub fn find_entity_mut(&mut self, entity_id: &str) -> Option<&mut Entity> {
        self.found_entities.iter_mut().find(|e| e.id == entity_id)
    }

    /// Records a loot drop for the tooltip history.
    pub fn record_drop(&mut self, enemy_name: &str, gear_id: &str) {
        *self
            .enemy_drop_history
            .entry(enemy_name.to_string())
            .or_default()
            .entry(gear_id.to_string())
            .or_insert(0) += 1;
    }
}
