//! Quest tracking: one active quest, objective matching, rewards, and
//! advancement through the fixed chain.

use crate::catalog::{self, ObjectiveKind, Quest};
use crate::derived_stats::TotalStats;
use crate::game_state::GameState;
use crate::tick::TickEvent;

/// Resolves the currently active quest, if any.
pub fn active_quest(state: &GameState) -> Option<Quest> {
    state
        .active_quest_id
        .as_deref()
        .and_then(catalog::get_quest)
}

/// Bumps the active quest's accumulator if the event matches its
/// objective. Level/power objectives never accumulate; completed quests
/// never move again.
pub fn accumulate_progress(
    state: &mut GameState,
    kind: ObjectiveKind,
    qualifier: Option<&str>,
    amount: u32,
) {
    let Some(quest) = active_quest(state) else {
        return;
    };
    if state.is_quest_completed(quest.id) || !quest.objective.kind.accumulates() {
        return;
    }
    if quest.objective.kind != kind {
        return;
    }
    if let Some(required) = quest.objective.qualifier {
        if qualifier != Some(required) {
            return;
        }
    }

    *state
        .quest_progress
        .entry(quest.id.to_string())
        .or_insert(0) += amount;
}

/// Accumulates progress and immediately resolves any completion it
/// caused.
pub fn update_quest_progress(
    state: &mut GameState,
    kind: ObjectiveKind,
    qualifier: Option<&str>,
    amount: u32,
    events: &mut Vec<TickEvent>,
) {
    accumulate_progress(state, kind, qualifier, amount);
    check_quest_completion(state, events);
}

/// Tests the active quest's objective against live state, and on success
/// grants the reward, advances the chain, and keeps resolving in case the
/// next quest is already satisfied.
pub fn check_quest_completion(state: &mut GameState, events: &mut Vec<TickEvent>) {
    let Some(quest) = active_quest(state) else {
        return;
    };
    if state.is_quest_completed(quest.id) {
        return;
    }

    let satisfied = match quest.objective.kind {
        ObjectiveKind::Level => state.player.level >= quest.objective.target,
        ObjectiveKind::Power => {
            TotalStats::calculate(&state.player, &state.equipped_gear).power
                >= quest.objective.target
        }
        _ => state.quest_progress(quest.id) >= quest.objective.target,
    };
    if !satisfied {
        return;
    }

    events.push(TickEvent::QuestCompleted {
        title: quest.title.to_string(),
    });
    state.quest_completion.insert(quest.id.to_string(), true);

    state.player.xp += quest.reward.xp;
    state.player.gold += quest.reward.gold;

    if let Some(unlock) = quest.reward.unlocks {
        if let Some(sub_action) = catalog::get_sub_action(unlock) {
            if !state.is_sub_action_unlocked(unlock) {
                state.unlocked_sub_actions.push(unlock.to_string());
                events.push(TickEvent::SubActionUnlocked {
                    name: sub_action.name.to_string(),
                });
            }
        }
    }

    crate::game_logic::apply_level_ups(&mut state.player, events);
    crate::game_logic::check_unlocks(state, events);

    advance_quest(state, events);
    // A freshly activated level/power quest may already be satisfied.
    check_quest_completion(state, events);
}

/// Moves to the next quest in catalog order, or clears the slot when the
/// chain is exhausted.
fn advance_quest(state: &mut GameState, events: &mut Vec<TickEvent>) {
    let Some(current_id) = state.active_quest_id.as_deref() else {
        return;
    };
    let Some(index) = catalog::quest_index(current_id) else {
        state.active_quest_id = None;
        return;
    };

    let chain = catalog::quests();
    match chain.get(index + 1) {
        Some(next) => {
            state.active_quest_id = Some(next.id.to_string());
            events.push(TickEvent::QuestStarted {
                title: next.title.to_string(),
            });
        }
        None => {
            state.active_quest_id = None;
            events.push(TickEvent::AllQuestsComplete);
        }
    }
}
