//! Static content tables: sub-actions, gear, enemies, quests, and
//! automaton templates.
//!
//! Everything here is loaded once per lookup and never mutated; all runtime
//! state references catalog entries by id or name.

use crate::items::{GearSlot, Rarity};
use serde::{Deserialize, Serialize};

/// The three action categories a sub-action (and automaton) can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Training,
    Fighting,
    Exploring,
}

impl ActionCategory {
    pub fn all() -> [ActionCategory; 3] {
        [
            ActionCategory::Training,
            ActionCategory::Fighting,
            ActionCategory::Exploring,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Training => "Training",
            ActionCategory::Fighting => "Fighting",
            ActionCategory::Exploring => "Exploring",
        }
    }
}

/// A concrete task with a fixed duration and rewards.
#[derive(Debug, Clone)]
pub struct SubAction {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ActionCategory,
    /// Ticks required to reach 100% progress at speed 1.
    pub duration: u32,
    pub xp_reward: f64,
    pub power_gain: u32,
    pub gold_find: f64,
    pub description: &'static str,
}

/// Returns all sub-actions in the game.
pub fn sub_actions() -> Vec<SubAction> {
    vec![
        SubAction {
            id: "pushups",
            name: "Push-ups",
            category: ActionCategory::Training,
            duration: 50,
            xp_reward: 2.0,
            power_gain: 1,
            gold_find: 0.0,
            description: "Basic strength building.",
        },
        SubAction {
            id: "situps",
            name: "Sit-ups",
            category: ActionCategory::Training,
            duration: 70,
            xp_reward: 3.0,
            power_gain: 1,
            gold_find: 0.0,
            description: "Core workout.",
        },
        SubAction {
            id: "sparring",
            name: "Sparring",
            category: ActionCategory::Training,
            duration: 200,
            xp_reward: 15.0,
            power_gain: 5,
            gold_find: 0.0,
            description: "Practice combat techniques.",
        },
        SubAction {
            id: "look_bush",
            name: "Look in a bush",
            category: ActionCategory::Exploring,
            duration: 100,
            xp_reward: 5.0,
            power_gain: 0,
            gold_find: 2.0,
            description: "You might find something.",
        },
        SubAction {
            id: "explore_cave",
            name: "Explore the Cave",
            category: ActionCategory::Exploring,
            duration: 300,
            xp_reward: 20.0,
            power_gain: 0,
            gold_find: 15.0,
            description: "Dark and mysterious.",
        },
        SubAction {
            id: "attack",
            name: "Attack",
            category: ActionCategory::Fighting,
            duration: 20,
            xp_reward: 0.0,
            power_gain: 0,
            gold_find: 0.0,
            description: "Repeatedly attack the current enemy.",
        },
    ]
}

/// Looks up a sub-action by id.
pub fn get_sub_action(id: &str) -> Option<SubAction> {
    sub_actions().into_iter().find(|sa| sa.id == id)
}

/// A gear catalog entry. Instances of it live in the inventory as
/// [`crate::items::InventoryItem`]s referencing the entry by id.
#[derive(Debug, Clone)]
pub struct Gear {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: GearSlot,
    pub rarity: Rarity,
    pub base_power_bonus: f64,
    /// Percentage added to gold found from sub-actions.
    pub base_gold_bonus: f64,
    pub power_upgrade_bonus: f64,
    pub gold_upgrade_bonus: f64,
    pub max_upgrade_level: u32,
    pub sell_value: u32,
}

/// Returns the full gear pool.
pub fn gear_pool() -> Vec<Gear> {
    vec![
        // Common
        Gear {
            id: "rusty_sword",
            name: "Rusty Sword",
            slot: GearSlot::Weapon,
            rarity: Rarity::Common,
            base_power_bonus: 1.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 0.2,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 10,
        },
        Gear {
            id: "wooden_shield",
            name: "Wooden Shield",
            slot: GearSlot::Armor,
            rarity: Rarity::Common,
            base_power_bonus: 1.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 0.1,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 10,
        },
        // Uncommon
        Gear {
            id: "goblin_smasher",
            name: "Goblin Smasher",
            slot: GearSlot::Weapon,
            rarity: Rarity::Uncommon,
            base_power_bonus: 5.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 0.5,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 25,
        },
        Gear {
            id: "leather_vest",
            name: "Leather Vest",
            slot: GearSlot::Armor,
            rarity: Rarity::Uncommon,
            base_power_bonus: 3.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 0.3,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 25,
        },
        Gear {
            id: "lucky_coin",
            name: "Lucky Coin",
            slot: GearSlot::Accessory,
            rarity: Rarity::Uncommon,
            base_power_bonus: 0.0,
            base_gold_bonus: 10.0,
            power_upgrade_bonus: 0.0,
            gold_upgrade_bonus: 0.5,
            max_upgrade_level: 50,
            sell_value: 50,
        },
        // Rare
        Gear {
            id: "orcish_cleaver",
            name: "Orcish Cleaver",
            slot: GearSlot::Weapon,
            rarity: Rarity::Rare,
            base_power_bonus: 15.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 1.0,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 75,
        },
        Gear {
            id: "dragonscale_shield",
            name: "Dragonscale Shield",
            slot: GearSlot::Armor,
            rarity: Rarity::Rare,
            base_power_bonus: 10.0,
            base_gold_bonus: 5.0,
            power_upgrade_bonus: 0.8,
            gold_upgrade_bonus: 0.1,
            max_upgrade_level: 100,
            sell_value: 150,
        },
        Gear {
            id: "golem_crusher",
            name: "Golem Crusher",
            slot: GearSlot::Weapon,
            rarity: Rarity::Rare,
            base_power_bonus: 30.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 2.0,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 200,
        },
        // Epic
        Gear {
            id: "wyrmstooth_blade",
            name: "Wyrmstooth Blade",
            slot: GearSlot::Weapon,
            rarity: Rarity::Epic,
            base_power_bonus: 75.0,
            base_gold_bonus: 0.0,
            power_upgrade_bonus: 5.0,
            gold_upgrade_bonus: 0.0,
            max_upgrade_level: 100,
            sell_value: 500,
        },
        Gear {
            id: "amulet_of_swiftness",
            name: "Amulet of Swiftness",
            slot: GearSlot::Accessory,
            rarity: Rarity::Epic,
            base_power_bonus: 10.0,
            base_gold_bonus: 25.0,
            power_upgrade_bonus: 1.0,
            gold_upgrade_bonus: 1.0,
            max_upgrade_level: 50,
            sell_value: 750,
        },
    ]
}

/// Looks up a gear entry by id.
pub fn get_gear(id: &str) -> Option<Gear> {
    gear_pool().into_iter().find(|g| g.id == id)
}

/// One entry in an enemy's loot table.
#[derive(Debug, Clone)]
pub struct GearDrop {
    pub gear_id: &'static str,
    pub chance: f64,
}

/// An enemy catalog template. Live encounters are instantiated from it
/// with fresh HP.
#[derive(Debug, Clone)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub max_hp: u32,
    pub gold_reward: u32,
    pub xp_reward: u32,
    pub power_level: u32,
    /// Total player power needed to reveal this enemy.
    pub unlock_power: u32,
    pub gear_drops: Vec<GearDrop>,
}

/// Returns all enemies, in catalog order (ascending power).
pub fn enemies() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate {
            name: "Slime",
            max_hp: 10,
            gold_reward: 5,
            xp_reward: 10,
            power_level: 1,
            unlock_power: 1,
            gear_drops: vec![GearDrop {
                gear_id: "rusty_sword",
                chance: 0.1,
            }],
        },
        EnemyTemplate {
            name: "Goblin",
            max_hp: 30,
            gold_reward: 15,
            xp_reward: 25,
            power_level: 5,
            unlock_power: 10,
            gear_drops: vec![
                GearDrop {
                    gear_id: "wooden_shield",
                    chance: 0.1,
                },
                GearDrop {
                    gear_id: "goblin_smasher",
                    chance: 0.05,
                },
            ],
        },
        EnemyTemplate {
            name: "Orc",
            max_hp: 100,
            gold_reward: 50,
            xp_reward: 75,
            power_level: 20,
            unlock_power: 40,
            gear_drops: vec![
                GearDrop {
                    gear_id: "leather_vest",
                    chance: 0.15,
                },
                GearDrop {
                    gear_id: "orcish_cleaver",
                    chance: 0.05,
                },
                GearDrop {
                    gear_id: "lucky_coin",
                    chance: 0.02,
                },
            ],
        },
        EnemyTemplate {
            name: "Stone Golem",
            max_hp: 250,
            gold_reward: 120,
            xp_reward: 200,
            power_level: 50,
            unlock_power: 75,
            gear_drops: vec![GearDrop {
                gear_id: "golem_crusher",
                chance: 0.05,
            }],
        },
        EnemyTemplate {
            name: "Ogre",
            max_hp: 500,
            gold_reward: 200,
            xp_reward: 300,
            power_level: 100,
            unlock_power: 150,
            gear_drops: vec![],
        },
        EnemyTemplate {
            name: "Dragon Whelp",
            max_hp: 800,
            gold_reward: 400,
            xp_reward: 600,
            power_level: 200,
            unlock_power: 250,
            gear_drops: vec![
                GearDrop {
                    gear_id: "dragonscale_shield",
                    chance: 0.1,
                },
                GearDrop {
                    gear_id: "wyrmstooth_blade",
                    chance: 0.02,
                },
            ],
        },
        EnemyTemplate {
            name: "Mini Dragon",
            max_hp: 2000,
            gold_reward: 1000,
            xp_reward: 1500,
            power_level: 500,
            unlock_power: 600,
            gear_drops: vec![GearDrop {
                gear_id: "amulet_of_swiftness",
                chance: 0.05,
            }],
        },
    ]
}

/// Looks up an enemy template by name.
pub fn get_enemy(name: &str) -> Option<EnemyTemplate> {
    enemies().into_iter().find(|e| e.name == name)
}

/// What a quest objective counts or compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    /// Satisfied when the player reaches the target level.
    Level,
    /// Satisfied when total power reaches the target.
    Power,
    /// Accumulates enemy kills, optionally of a named enemy.
    Kill,
    /// Accumulates completions of a specific sub-action.
    SubActionComplete,
    /// Accumulates automaton discoveries.
    FindEntity,
}

impl ObjectiveKind {
    /// Whether progress toward this objective is accumulated (as opposed
    /// to compared directly against live player stats).
    pub fn accumulates(&self) -> bool {
        !matches!(self, ObjectiveKind::Level | ObjectiveKind::Power)
    }
}

#[derive(Debug, Clone)]
pub struct QuestObjective {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub qualifier: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct QuestReward {
    pub xp: f64,
    pub gold: f64,
    /// Sub-action id unlocked on completion, if any.
    pub unlocks: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Quest {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub objective: QuestObjective,
    pub reward: QuestReward,
}

/// Returns the full quest chain, in play order.
pub fn quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "q1",
            title: "Getting Started",
            description: "Strength is everything. Do 10 push-ups to begin your journey.",
            objective: QuestObjective {
                kind: ObjectiveKind::SubActionComplete,
                target: 10,
                qualifier: Some("pushups"),
            },
            reward: QuestReward {
                xp: 50.0,
                gold: 10.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q2",
            title: "First Blood",
            description: "Your power grows. Time to test it. Defeat a Slime. (Fighting unlocks at Level 2)",
            objective: QuestObjective {
                kind: ObjectiveKind::Kill,
                target: 1,
                qualifier: Some("Slime"),
            },
            reward: QuestReward {
                xp: 100.0,
                gold: 20.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q3",
            title: "A New Horizon",
            description: "Your journey is just beginning. Reach level 3 to unlock the ability to explore your surroundings.",
            objective: QuestObjective {
                kind: ObjectiveKind::Level,
                target: 3,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 150.0,
                gold: 50.0,
                unlocks: Some("look_bush"),
            },
        },
        Quest {
            id: "q4",
            title: "Pathfinder",
            description: "The world is larger than you think. Look in a bush 5 times.",
            objective: QuestObjective {
                kind: ObjectiveKind::SubActionComplete,
                target: 5,
                qualifier: Some("look_bush"),
            },
            reward: QuestReward {
                xp: 150.0,
                gold: 50.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q5",
            title: "Whispers in the Woods",
            description: "While exploring, you sense a strange presence. Find what's hiding out there.",
            objective: QuestObjective {
                kind: ObjectiveKind::FindEntity,
                target: 1,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 200.0,
                gold: 100.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q6",
            title: "Goblin Menace",
            description: "Goblins are causing trouble nearby. Thin their numbers.",
            objective: QuestObjective {
                kind: ObjectiveKind::Kill,
                target: 5,
                qualifier: Some("Goblin"),
            },
            reward: QuestReward {
                xp: 250.0,
                gold: 150.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q7",
            title: "Growing Power",
            description: "You feel a new potential welling up inside. Reach level 5.",
            objective: QuestObjective {
                kind: ObjectiveKind::Level,
                target: 5,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 200.0,
                gold: 100.0,
                unlocks: Some("explore_cave"),
            },
        },
        Quest {
            id: "q8",
            title: "Automated Aggression",
            description: "There are rumors of a more aggressive automaton. Perhaps exploring deeper, in a cave, would reveal it.",
            objective: QuestObjective {
                kind: ObjectiveKind::FindEntity,
                target: 2,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 300.0,
                gold: 200.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q9",
            title: "Bigger and Badder",
            description: "An Orc has been spotted. It's a significant threat, but the rewards are great.",
            objective: QuestObjective {
                kind: ObjectiveKind::Kill,
                target: 1,
                qualifier: Some("Orc"),
            },
            reward: QuestReward {
                xp: 400.0,
                gold: 250.0,
                unlocks: None,
            },
        },
        Quest {
            id: "q10",
            title: "Stepping Up",
            description: "Basic training is no longer enough. Reach level 10 to unlock a new training method.",
            objective: QuestObjective {
                kind: ObjectiveKind::Level,
                target: 10,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 500.0,
                gold: 500.0,
                unlocks: Some("sparring"),
            },
        },
        Quest {
            id: "q11",
            title: "Greedy Little Helpers",
            description: "You've heard tales of a creature that loves shiny things and helps those who explore. Find it by exploring the caves.",
            objective: QuestObjective {
                kind: ObjectiveKind::FindEntity,
                target: 3,
                qualifier: None,
            },
            reward: QuestReward {
                xp: 750.0,
                gold: 500.0,
                unlocks: None,
            },
        },
    ]
}

/// Looks up a quest by id.
pub fn get_quest(id: &str) -> Option<Quest> {
    quests().into_iter().find(|q| q.id == id)
}

/// Position of a quest in the chain.
pub fn quest_index(id: &str) -> Option<usize> {
    quests().iter().position(|q| q.id == id)
}

/// An automaton archetype. At most one instance of each is ever
/// discovered.
#[derive(Debug, Clone)]
pub struct EntityTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ActionCategory,
    pub automation_speed: f64,
}

/// Returns all discoverable automaton templates, in discovery order.
pub fn entity_templates() -> Vec<EntityTemplate> {
    vec![
        EntityTemplate {
            id: "training_wisp",
            name: "Training Wisp",
            kind: ActionCategory::Training,
            automation_speed: 0.2,
        },
        EntityTemplate {
            id: "combat_drone",
            name: "Combat Drone",
            kind: ActionCategory::Fighting,
            automation_speed: 0.1,
        },
        EntityTemplate {
            id: "scavenging_gremlin",
            name: "Scavenging Gremlin",
            kind: ActionCategory::Exploring,
            automation_speed: 0.15,
        },
    ]
}
