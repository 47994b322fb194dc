//! Offline reconciliation: replays elapsed real time in closed form
//! instead of iterating millions of ticks.
//!
//! Each automaton's completed-action count is derived from its effective
//! speed; gains scale linearly from there. Combat catch-up counts whole
//! kills and deliberately skips loot rolls and mid-fight HP carry-over.
//! The level-up cascade runs once at the end, which yields the same
//! level/xp pair as running it per virtual tick.

use crate::catalog::{self, ActionCategory, ObjectiveKind};
use crate::constants::{MAX_OFFLINE_SECONDS, MIN_OFFLINE_SECONDS, TICK_SECONDS};
use crate::derived_stats::TotalStats;
use crate::entity::Entity;
use crate::game_state::GameState;
use crate::tick::TickEvent;

/// Report of offline progression results.
#[derive(Debug, Default, Clone)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    /// Whether any catch-up was applied at all.
    pub reconciled: bool,
    pub actions_completed: u64,
    pub xp_gained: f64,
    pub gold_gained: f64,
    pub power_gained: u32,
    pub enemies_defeated: u32,
    pub level_ups: u32,
    /// Narrative events for the log, summary line first.
    pub events: Vec<TickEvent>,
}

/// Reconstructs the cumulative effect of `elapsed_seconds` of unattended
/// automation. Below the minimum threshold, or with offline progress
/// disabled, the state is left untouched so a load stays verbatim.
pub fn reconcile_offline(state: &mut GameState, elapsed_seconds: i64) -> OfflineReport {
    let mut report = OfflineReport {
        elapsed_seconds,
        ..OfflineReport::default()
    };
    if !state.offline_progress_enabled || elapsed_seconds < MIN_OFFLINE_SECONDS {
        return report;
    }

    report.reconciled = true;
    let elapsed = elapsed_seconds.min(MAX_OFFLINE_SECONDS) as f64;
    let total = TotalStats::calculate(&state.player, &state.equipped_gear);
    let level_before = state.player.level;

    let mut events: Vec<TickEvent> = Vec::new();
    let mut entity_discovered = false;

    for index in 0..state.found_entities.len() {
        let entity = state.found_entities[index].clone();
        let Some(id) = entity.assigned_sub_action_id.as_deref() else {
            continue;
        };
        let Some(sub_action) = catalog::get_sub_action(id) else {
            continue;
        };
        if !state.is_sub_action_unlocked(id) {
            continue;
        }

        let time_per_action = (100.0 / entity.effective_speed()) * TICK_SECONDS;
        let actions_completed = (elapsed / time_per_action).floor() as u64;
        if actions_completed == 0 {
            continue;
        }
        report.actions_completed += actions_completed;

        let mut xp_gained = 0.0;
        let mut power_gained = 0u32;
        let mut gold_gained = 0.0;
        let mut enemies_defeated = 0u32;

        if sub_action.category == ActionCategory::Fighting {
            if let Some(kills) = offline_kills(state, &entity, total.power, elapsed) {
                enemies_defeated = kills.count;
                gold_gained = kills.gold;
                xp_gained = kills.xp;
            }
        } else {
            xp_gained = actions_completed as f64 * sub_action.xp_reward;
            power_gained = (actions_completed as u32).saturating_mul(sub_action.power_gain);
            gold_gained = actions_completed as f64 * sub_action.gold_find;

            if sub_action.category == ActionCategory::Exploring && !entity_discovered {
                // One expected-value discovery check, capped at a single
                // new automaton per reconciliation to bound the report.
                let find_rolls =
                    (actions_completed as f64 * crate::constants::ENTITY_FIND_CHANCE).floor();
                if find_rolls >= 1.0 {
                    if let Some(event) = discover_offline_entity(state, &entity.name) {
                        events.push(event);
                        entity_discovered = true;
                    }
                }
            }
        }

        state.player.xp += xp_gained;
        state.player.power = state.player.power.saturating_add(power_gained);
        state.player.gold += gold_gained;

        if let Some(entity) = state.found_entities.get_mut(index) {
            entity.stats.xp_gained += xp_gained;
            entity.stats.power_gained += power_gained;
            entity.stats.gold_gained += gold_gained;
            entity.stats.enemies_defeated += enemies_defeated;
        }

        // Batched accumulator update; completion resolves after the loop.
        crate::quests::accumulate_progress(
            state,
            ObjectiveKind::SubActionComplete,
            Some(sub_action.id),
            actions_completed.min(u32::MAX as u64) as u32,
        );

        report.xp_gained += xp_gained;
        report.power_gained = report.power_gained.saturating_add(power_gained);
        report.gold_gained += gold_gained;
        report.enemies_defeated += enemies_defeated;
    }

    report.level_ups = crate::game_logic::apply_level_ups(&mut state.player, &mut events);

    events.insert(
        0,
        TickEvent::OfflineSummary {
            minutes: (elapsed / 60.0).floor() as i64,
            actions_completed: report.actions_completed,
        },
    );
    if state.player.level > level_before {
        events.push(TickEvent::OfflineLevelsGained {
            levels: state.player.level - level_before,
        });
    }

    crate::game_logic::refresh_progression(state, &mut events);

    report.events = events;
    report
}

struct OfflineKills {
    count: u32,
    gold: f64,
    xp: f64,
}

/// Closed-form combat catch-up against the currently selected enemy.
/// Whole kills only; loot is intentionally excluded offline.
fn offline_kills(
    state: &GameState,
    entity: &Entity,
    total_power: u32,
    elapsed: f64,
) -> Option<OfflineKills> {
    let name = state
        .unlocked_enemy_names
        .get(state.current_enemy_index)?;
    let template = catalog::get_enemy(name)?;
    let attack = catalog::get_sub_action("attack")?;

    let auto_damage = ((total_power as f64 / crate::constants::AUTO_DAMAGE_POWER_DIVISOR)
        * (entity.level as f64 / 2.0 + 0.5))
        .max(1.0);
    let hits_to_kill = (template.max_hp as f64 / auto_damage).ceil();
    let time_to_kill = hits_to_kill * attack.duration as f64 * TICK_SECONDS;
    let count = (elapsed / time_to_kill).floor() as u32;

    Some(OfflineKills {
        count,
        gold: count as f64 * template.gold_reward as f64,
        xp: count as f64 * template.xp_reward as f64,
    })
}

/// Hands the first undiscovered template to an exploring automaton.
/// Offline discoveries arrive unassigned; the player sets them up on
/// return.
fn discover_offline_entity(state: &mut GameState, finder_name: &str) -> Option<TickEvent> {
    let templates = catalog::entity_templates();
    let template = templates
        .iter()
        .find(|t| state.find_entity(t.id).is_none())?;

    let entity = Entity::from_template(template);
    let event = TickEvent::EntityDiscovered {
        name: entity.name.clone(),
        kind: entity.kind,
        by: Some(finder_name.to_string()),
    };
    state.found_entities.push(entity);
    Some(event)
}
