//! Damage computation and defeat resolution: rewards, loot rolls with
//! duplicate protection, drop history, and respawn.

use crate::catalog::{self, ObjectiveKind};
use crate::combat::start_new_fight;
use crate::constants::AUTO_DAMAGE_POWER_DIVISOR;
use crate::derived_stats::TotalStats;
use crate::game_state::GameState;
use crate::items::InventoryItem;
use crate::tick::TickEvent;
use rand::Rng;

/// Manual attack damage. The floor of 1 keeps combat moving even against
/// enemies far above the player's power.
pub fn manual_damage(total_power: u32, enemy_power_level: u32) -> u32 {
    (total_power as i64 - (enemy_power_level / 2) as i64).max(1) as u32
}

/// Automated attack damage: a tenth of player power scaled by the
/// automaton's level curve.
pub fn automated_damage(total_power: u32, entity_level: u32) -> u32 {
    let raw = (total_power as f64 / AUTO_DAMAGE_POWER_DIVISOR)
        * (entity_level as f64 / 2.0 + 0.5);
    (raw.floor() as u32).max(1)
}

/// Resolves one manual attack against the current enemy. With no live
/// enemy this (re)acquires one instead of dealing damage.
pub fn player_attack(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<TickEvent>) {
    if state.current_enemy.is_none() {
        start_new_fight(state, state.current_enemy_index, events);
        return;
    }

    let total = TotalStats::calculate(&state.player, &state.equipped_gear);
    let defeated = {
        let Some(enemy) = state.current_enemy.as_mut() else {
            return;
        };
        let damage = manual_damage(total.power, enemy.power_level);
        enemy.take_damage(damage);
        !enemy.is_alive()
    };

    if defeated {
        resolve_defeat(state, rng, None, events);
    }
}

/// Resolves one automated attack by the automaton at `entity_index`.
pub fn automaton_attack(
    state: &mut GameState,
    entity_index: usize,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) {
    if state.current_enemy.is_none() {
        start_new_fight(state, state.current_enemy_index, events);
        return;
    }
    let Some(entity_level) = state.found_entities.get(entity_index).map(|e| e.level) else {
        return;
    };

    let total = TotalStats::calculate(&state.player, &state.equipped_gear);
    let defeated = {
        let Some(enemy) = state.current_enemy.as_mut() else {
            return;
        };
        let damage = automated_damage(total.power, entity_level);
        enemy.take_damage(damage);
        !enemy.is_alive()
    };

    if defeated {
        resolve_defeat(state, rng, Some(entity_index), events);
    }
}

/// Defeat handling shared by manual and automated attacks: grant rewards,
/// roll each loot-table entry independently, advance the kill objective,
/// and respawn the same enemy index. `attribution` credits an automaton's
/// lifetime stats.
fn resolve_defeat(
    state: &mut GameState,
    rng: &mut impl Rng,
    attribution: Option<usize>,
    events: &mut Vec<TickEvent>,
) {
    let Some(enemy) = state.current_enemy.take() else {
        return;
    };

    state.player.gold += enemy.gold_reward as f64;
    state.player.xp += enemy.xp_reward as f64;
    *state
        .sub_action_completion_counts
        .entry("attack".to_string())
        .or_insert(0) += 1;

    let defeated_by = attribution
        .and_then(|idx| state.found_entities.get(idx))
        .map(|e| e.name.clone());
    events.push(TickEvent::EnemyDefeated {
        name: enemy.name.clone(),
        gold: enemy.gold_reward,
        xp: enemy.xp_reward,
        by: defeated_by,
    });

    if let Some(template) = catalog::get_enemy(&enemy.name) {
        for drop in &template.gear_drops {
            if rng.gen::<f64>() < drop.chance {
                state.record_drop(&enemy.name, drop.gear_id);
                award_drop(state, drop.gear_id, events);
            }
        }
    }

    if let Some(idx) = attribution {
        if let Some(entity) = state.found_entities.get_mut(idx) {
            entity.stats.gold_gained += enemy.gold_reward as f64;
            entity.stats.xp_gained += enemy.xp_reward as f64;
            entity.stats.enemies_defeated += 1;
        }
    }

    crate::game_logic::apply_level_ups(&mut state.player, events);
    crate::quests::update_quest_progress(
        state,
        ObjectiveKind::Kill,
        Some(enemy.name.as_str()),
        1,
        events,
    );
    crate::game_logic::refresh_progression(state, events);

    start_new_fight(state, state.current_enemy_index, events);
}

/// Routes a successful loot roll: a redundant drop of the equipped item
/// becomes an in-place upgrade instead of new inventory; everything else
/// lands as a fresh item at level 0.
fn award_drop(state: &mut GameState, gear_id: &str, events: &mut Vec<TickEvent>) {
    let Some(gear) = catalog::get_gear(gear_id) else {
        return;
    };

    let upgraded = match state.equipped_gear.get_mut(gear.slot).as_mut() {
        Some(equipped) if equipped.gear_id == gear_id && equipped.can_upgrade() => {
            equipped.upgrade_level += 1;
            Some(equipped.upgrade_level)
        }
        _ => None,
    };

    match upgraded {
        Some(new_level) => {
            events.push(TickEvent::ItemEnhanced {
                name: gear.name.to_string(),
                new_level,
            });
        }
        None => {
            state.inventory.push(InventoryItem::new(gear_id));
            events.push(TickEvent::ItemLooted {
                name: gear.name.to_string(),
                rarity: gear.rarity,
            });
        }
    }
}
