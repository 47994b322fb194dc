//! Live enemy encounters and enemy-selector navigation.

use crate::catalog::{self, EnemyTemplate};
use crate::game_state::GameState;
use crate::tick::TickEvent;

/// An active combat target, instantiated fresh from a catalog template
/// each time combat (re)starts. Not persisted; loading respawns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub power_level: u32,
    pub gold_reward: u32,
    pub xp_reward: u32,
}

impl Enemy {
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            power_level: template.power_level,
            gold_reward: template.gold_reward,
            xp_reward: template.xp_reward,
        }
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.current_hp as f64 / self.max_hp as f64
        }
    }
}

/// Spawns a fresh encounter against the unlocked enemy at `index`. Out of
/// range (or nothing unlocked yet) clears the slot instead.
pub fn start_new_fight(state: &mut GameState, index: usize, events: &mut Vec<TickEvent>) {
    let Some(name) = state.unlocked_enemy_names.get(index) else {
        state.current_enemy = None;
        return;
    };
    let Some(template) = catalog::get_enemy(name) else {
        state.current_enemy = None;
        return;
    };

    state.current_enemy = Some(Enemy::from_template(&template));
    events.push(TickEvent::EnemyAppeared {
        name: template.name.to_string(),
    });
}

/// Navigates the enemy selector. Invalid indices leave state untouched.
pub fn select_enemy(state: &mut GameState, index: usize) -> Vec<TickEvent> {
    let mut events = Vec::new();
    if index >= state.unlocked_enemy_names.len() {
        return events;
    }
    state.current_enemy_index = index;
    start_new_fight(state, index, &mut events);
    events
}
