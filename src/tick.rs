//! The per-tick state transition: advances the manual action slot and
//! every automaton by one discrete step, resolving completions.

use crate::catalog::{self, ActionCategory, SubAction};
use crate::derived_stats::TotalStats;
use crate::game_state::GameState;
use crate::items::Rarity;
use rand::Rng;

/// A single structured event produced by engine mutations.
///
/// The presentation layer renders these to log lines (see
/// [`crate::log::render_event`]); the engine never formats UI text
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Progression ─────────────────────────────────────────────
    LevelUp {
        new_level: u32,
    },
    ActionUnlocked {
        category: ActionCategory,
    },
    SubActionUnlocked {
        name: String,
    },
    EnemiesUnlocked {
        names: Vec<String>,
    },

    // ── Combat ──────────────────────────────────────────────────
    EnemyAppeared {
        name: String,
    },
    /// `by` names the automaton responsible, or `None` for a manual kill.
    EnemyDefeated {
        name: String,
        gold: u32,
        xp: u32,
        by: Option<String>,
    },

    // ── Loot and gear ───────────────────────────────────────────
    GoldFound {
        amount: u32,
    },
    ItemLooted {
        name: String,
        rarity: Rarity,
    },
    /// A redundant drop or consumed duplicate raised an equipped item.
    ItemEnhanced {
        name: String,
        new_level: u32,
    },
    EnhanceAtMaxLevel {
        name: String,
    },
    EnhanceNoMatch,
    ItemSold {
        name: String,
        gold: u32,
    },

    // ── Automatons ──────────────────────────────────────────────
    /// `by` names the automaton that found it during offline catch-up.
    EntityDiscovered {
        name: String,
        kind: ActionCategory,
        by: Option<String>,
    },
    EntityUpgraded {
        name: String,
        new_level: u32,
    },
    UpgradeRefused {
        name: String,
        cost: u64,
    },

    // ── Quests ──────────────────────────────────────────────────
    QuestCompleted {
        title: String,
    },
    QuestStarted {
        title: String,
    },
    AllQuestsComplete,

    // ── Offline reconciliation ──────────────────────────────────
    OfflineSummary {
        minutes: i64,
        actions_completed: u64,
    },
    OfflineLevelsGained {
        levels: u32,
    },
}

/// Advances the world by one discrete tick.
///
/// The manual slot and every automaton progress independently; automatons
/// are processed in discovery order so replays are deterministic. All
/// completions cascade level-ups, quest updates, and unlock checks before
/// the tick returns.
pub fn game_tick(state: &mut GameState, rng: &mut impl Rng) -> Vec<TickEvent> {
    let mut events = Vec::new();

    advance_manual_action(state, rng, &mut events);

    for index in 0..state.found_entities.len() {
        advance_automaton(state, index, rng, &mut events);
    }

    events
}

fn advance_manual_action(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<TickEvent>) {
    let Some(id) = state.active_manual_sub_action_id.clone() else {
        return;
    };
    // Catalog desync: leave the slot idle rather than erroring.
    let Some(sub_action) = catalog::get_sub_action(&id) else {
        return;
    };

    state.manual_progress += 100.0 / sub_action.duration as f64;
    if state.manual_progress < 100.0 {
        return;
    }
    state.manual_progress = 0.0;

    if sub_action.category == ActionCategory::Fighting {
        crate::combat_logic::player_attack(state, rng, events);
    } else {
        complete_manual_sub_action(state, &sub_action, rng, events);
    }
}

fn complete_manual_sub_action(
    state: &mut GameState,
    sub_action: &SubAction,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) {
    let total = TotalStats::calculate(&state.player, &state.equipped_gear);

    state.player.xp += sub_action.xp_reward;
    state.player.power = state.player.power.saturating_add(sub_action.power_gain);
    if sub_action.gold_find > 0.0 {
        let found = (sub_action.gold_find * (1.0 + total.gold_bonus / 100.0)).floor();
        state.player.gold += found;
        events.push(TickEvent::GoldFound {
            amount: found as u32,
        });
    }

    if sub_action.category == ActionCategory::Exploring {
        crate::game_logic::find_new_entity(state, rng, events);
    }

    *state
        .sub_action_completion_counts
        .entry(sub_action.id.to_string())
        .or_insert(0) += 1;

    crate::game_logic::apply_level_ups(&mut state.player, events);
    crate::quests::update_quest_progress(
        state,
        catalog::ObjectiveKind::SubActionComplete,
        Some(sub_action.id),
        1,
        events,
    );
    crate::game_logic::refresh_progression(state, events);
}

fn advance_automaton(
    state: &mut GameState,
    index: usize,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) {
    let (sub_action, speed) = {
        let Some(entity) = state.found_entities.get(index) else {
            return;
        };
        let Some(id) = entity.assigned_sub_action_id.as_deref() else {
            return;
        };
        let Some(sub_action) = catalog::get_sub_action(id) else {
            return;
        };
        // A task revoked by a reset stays assigned but idle.
        if !state.is_sub_action_unlocked(id) {
            return;
        }
        (sub_action, entity.effective_speed())
    };

    let completed = {
        let Some(entity) = state.found_entities.get_mut(index) else {
            return;
        };
        entity.progress += speed;
        if entity.progress >= 100.0 {
            // Carry the overshoot so fast automatons lose nothing.
            entity.progress -= 100.0;
            true
        } else {
            false
        }
    };

    if completed {
        complete_automated_sub_action(state, index, &sub_action, rng, events);
    }
}

fn complete_automated_sub_action(
    state: &mut GameState,
    index: usize,
    sub_action: &SubAction,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) {
    if sub_action.category == ActionCategory::Fighting {
        // Kill credit, loot, and the attack counter are handled by the
        // combat resolver.
        crate::combat_logic::automaton_attack(state, index, rng, events);
        return;
    }

    state.player.xp += sub_action.xp_reward;
    state.player.power = state.player.power.saturating_add(sub_action.power_gain);
    state.player.gold += sub_action.gold_find;

    if let Some(entity) = state.found_entities.get_mut(index) {
        entity.stats.xp_gained += sub_action.xp_reward;
        entity.stats.power_gained += sub_action.power_gain;
        entity.stats.gold_gained += sub_action.gold_find;
    }

    if sub_action.category == ActionCategory::Exploring {
        crate::game_logic::find_new_entity(state, rng, events);
    }

    *state
        .sub_action_completion_counts
        .entry(sub_action.id.to_string())
        .or_insert(0) += 1;

    crate::game_logic::apply_level_ups(&mut state.player, events);
    crate::quests::update_quest_progress(
        state,
        catalog::ObjectiveKind::SubActionComplete,
        Some(sub_action.id),
        1,
        events,
    );
    crate::game_logic::refresh_progression(state, events);
}
