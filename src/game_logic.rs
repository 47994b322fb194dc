//! Progression engine: the level-up cascade, unlock thresholds, automaton
//! discovery and upgrades, and the manual action slot.

use crate::catalog::{self, ActionCategory};
use crate::constants::*;
use crate::derived_stats::TotalStats;
use crate::entity::Entity;
use crate::game_state::{GameState, PlayerStats};
use crate::tick::TickEvent;
use rand::Rng;

/// Calculates the XP required to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * XP_CURVE_FACTOR.powi(level.saturating_sub(1) as i32)).floor() as u64
}

/// Cost of the next automaton level, given the current one.
pub fn entity_upgrade_cost(level: u32) -> u64 {
    (ENTITY_UPGRADE_COST_BASE * ENTITY_UPGRADE_COST_FACTOR.powi(level as i32)).floor() as u64
}

/// Consumes accumulated XP into level-ups until xp drops below the
/// threshold again. Loops so a single large reward can cross several
/// levels; each level grants one base power.
///
/// Returns the number of levels gained.
pub fn apply_level_ups(stats: &mut PlayerStats, events: &mut Vec<TickEvent>) -> u32 {
    let mut level_ups = 0;

    while stats.xp >= stats.xp_to_next_level as f64 {
        stats.xp -= stats.xp_to_next_level as f64;
        stats.level += 1;
        stats.power = stats.power.saturating_add(POWER_PER_LEVEL);
        stats.xp_to_next_level = xp_for_next_level(stats.level);
        events.push(TickEvent::LevelUp {
            new_level: stats.level,
        });
        level_ups += 1;
    }

    level_ups
}

/// Compares player level and total power against the fixed unlock
/// thresholds, revealing action categories and combat targets. Newly
/// revealed enemies keep the selector sorted weakest-to-strongest.
pub fn check_unlocks(state: &mut GameState, events: &mut Vec<TickEvent>) {
    if state.player.level >= FIGHTING_UNLOCK_LEVEL
        && !state.is_action_unlocked(ActionCategory::Fighting)
    {
        state.unlocked_actions.push(ActionCategory::Fighting);
        if !state.is_sub_action_unlocked("attack") {
            state.unlocked_sub_actions.push("attack".to_string());
        }
        events.push(TickEvent::ActionUnlocked {
            category: ActionCategory::Fighting,
        });
    }

    if state.player.level >= EXPLORING_UNLOCK_LEVEL
        && !state.is_action_unlocked(ActionCategory::Exploring)
    {
        state.unlocked_actions.push(ActionCategory::Exploring);
        events.push(TickEvent::ActionUnlocked {
            category: ActionCategory::Exploring,
        });
    }

    if !state.is_action_unlocked(ActionCategory::Fighting) {
        return;
    }

    let total = TotalStats::calculate(&state.player, &state.equipped_gear);
    let roster = catalog::enemies();
    let newly_unlocked: Vec<String> = roster
        .iter()
        .filter(|e| total.power >= e.unlock_power)
        .map(|e| e.name.to_string())
        .filter(|name| !state.unlocked_enemy_names.contains(name))
        .collect();

    if !newly_unlocked.is_empty() {
        state
            .unlocked_enemy_names
            .extend(newly_unlocked.iter().cloned());
        // Ascending power level; ties keep catalog order.
        state.unlocked_enemy_names.sort_by_key(|name| {
            roster
                .iter()
                .position(|e| e.name == name)
                .map(|idx| (roster[idx].power_level, idx))
                .unwrap_or((u32::MAX, usize::MAX))
        });
        events.push(TickEvent::EnemiesUnlocked {
            names: newly_unlocked,
        });
    }
}

/// Re-runs unlock and quest checks after any mutation that can move
/// level, power, or quest progress.
pub fn refresh_progression(state: &mut GameState, events: &mut Vec<TickEvent>) {
    check_unlocks(state, events);
    crate::quests::check_quest_completion(state, events);
}

/// Rolls the discovery check that runs after each completed exploration.
/// At most one instance of each template ever exists; a discovered
/// automaton starts on the first unlocked sub-action of its category.
pub fn find_new_entity(
    state: &mut GameState,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) -> bool {
    let templates = catalog::entity_templates();
    if state.found_entities.len() >= templates.len() {
        return false;
    }
    if rng.gen::<f64>() >= ENTITY_FIND_CHANCE {
        return false;
    }

    let Some(template) = templates
        .iter()
        .find(|t| state.find_entity(t.id).is_none())
    else {
        return false;
    };

    let mut entity = Entity::from_template(template);
    entity.assigned_sub_action_id = catalog::sub_actions()
        .iter()
        .find(|sa| sa.category == template.kind && state.is_sub_action_unlocked(sa.id))
        .map(|sa| sa.id.to_string());

    events.push(TickEvent::EntityDiscovered {
        name: entity.name.clone(),
        kind: entity.kind,
        by: None,
    });
    state.found_entities.push(entity);

    crate::quests::update_quest_progress(
        state,
        catalog::ObjectiveKind::FindEntity,
        None,
        1,
        events,
    );
    true
}

/// Points an automaton at a sub-action of its own category. Mismatched
/// categories or unknown ids are no-ops.
pub fn assign_entity_task(state: &mut GameState, entity_id: &str, sub_action_id: &str) {
    let Some(sub_action) = catalog::get_sub_action(sub_action_id) else {
        return;
    };
    let Some(entity) = state.find_entity_mut(entity_id) else {
        return;
    };
    if sub_action.category != entity.kind {
        return;
    }

    entity.assigned_sub_action_id = Some(sub_action_id.to_string());
    entity.progress = 0.0;
}

/// Spends gold to raise an automaton's level. Insufficient gold leaves
/// state untouched and reports the refusal.
pub fn upgrade_entity(state: &mut GameState, entity_id: &str) -> Vec<TickEvent> {
    let mut events = Vec::new();

    let Some(entity) = state.find_entity(entity_id) else {
        return events;
    };
    let cost = entity_upgrade_cost(entity.level);
    let name = entity.name.clone();

    if state.player.gold < cost as f64 {
        events.push(TickEvent::UpgradeRefused { name, cost });
        return events;
    }

    state.player.gold -= cost as f64;
    if let Some(entity) = state.find_entity_mut(entity_id) {
        entity.level += 1;
        events.push(TickEvent::EntityUpgraded {
            name,
            new_level: entity.level,
        });
    }
    events
}

/// Activates a manual sub-action. Locked or unknown ids are no-ops;
/// starting the attack action with no live enemy acquires one first.
pub fn start_manual_action(state: &mut GameState, sub_action_id: &str) -> Vec<TickEvent> {
    let mut events = Vec::new();

    let Some(sub_action) = catalog::get_sub_action(sub_action_id) else {
        return events;
    };
    if !state.is_sub_action_unlocked(sub_action_id) {
        return events;
    }

    if sub_action.category == ActionCategory::Fighting && state.current_enemy.is_none() {
        crate::combat::start_new_fight(state, state.current_enemy_index, &mut events);
    }

    state.active_manual_sub_action_id = Some(sub_action_id.to_string());
    state.manual_progress = 0.0;
    state.active_manual_category = sub_action.category;
    events
}

/// Deactivates the manual slot. Safe to call repeatedly.
pub fn stop_manual_action(state: &mut GameState) {
    state.active_manual_sub_action_id = None;
    state.manual_progress = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_xp_for_next_level() {
        assert_eq!(xp_for_next_level(1), 100);
        assert_eq!(xp_for_next_level(2), 150);
        assert_eq!(xp_for_next_level(3), 225);
        assert_eq!(xp_for_next_level(4), 337);
        assert_eq!(xp_for_next_level(10), 3844);
    }

    #[test]
    fn test_xp_curve_monotonic() {
        let mut previous = 0;
        for level in 1..40 {
            let needed = xp_for_next_level(level);
            assert!(needed >= previous);
            previous = needed;
        }
    }

    #[test]
    fn test_entity_upgrade_cost() {
        assert_eq!(entity_upgrade_cost(1), 90);
        assert_eq!(entity_upgrade_cost(2), 162);
        assert_eq!(entity_upgrade_cost(3), 291);
    }

    #[test]
    fn test_apply_level_ups_none() {
        let mut stats = PlayerStats::new();
        stats.xp = 50.0;
        let mut events = Vec::new();

        let ups = apply_level_ups(&mut stats, &mut events);

        assert_eq!(ups, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 50.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_apply_level_ups_single() {
        let mut stats = PlayerStats::new();
        stats.xp = 100.0;
        let mut events = Vec::new();

        let ups = apply_level_ups(&mut stats, &mut events);

        assert_eq!(ups, 1);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.power, 2);
        assert_eq!(stats.xp, 0.0);
        assert_eq!(stats.xp_to_next_level, 150);
    }

    #[test]
    fn test_apply_level_ups_crosses_multiple_thresholds() {
        let mut stats = PlayerStats::new();
        stats.xp = 250.0;
        let mut events = Vec::new();

        let ups = apply_level_ups(&mut stats, &mut events);

        // 250 - 100 (level 1) - 150 (level 2) = 0
        assert_eq!(ups, 2);
        assert_eq!(stats.level, 3);
        assert_eq!(stats.xp, 0.0);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TickEvent::LevelUp { new_level: 2 }));
        assert!(matches!(events[1], TickEvent::LevelUp { new_level: 3 }));
    }

    #[test]
    fn test_apply_level_ups_keeps_remainder() {
        let mut stats = PlayerStats::new();
        stats.xp = 130.0;
        let mut events = Vec::new();

        apply_level_ups(&mut stats, &mut events);

        assert_eq!(stats.level, 2);
        assert_eq!(stats.xp, 30.0);
        assert!(stats.xp < stats.xp_to_next_level as f64);
    }

    #[test]
    fn test_check_unlocks_fighting_at_level_two() {
        let mut state = GameState::new(0);
        state.player.level = 2;
        let mut events = Vec::new();

        check_unlocks(&mut state, &mut events);

        assert!(state.is_action_unlocked(ActionCategory::Fighting));
        assert!(state.is_sub_action_unlocked("attack"));
        assert!(!state.is_action_unlocked(ActionCategory::Exploring));
        // Power 1 reveals the Slime immediately once Fighting opens
        assert_eq!(state.unlocked_enemy_names, vec!["Slime".to_string()]);
    }

    #[test]
    fn test_check_unlocks_exploring_at_level_three() {
        let mut state = GameState::new(0);
        state.player.level = 3;
        let mut events = Vec::new();

        check_unlocks(&mut state, &mut events);

        assert!(state.is_action_unlocked(ActionCategory::Exploring));
    }

    #[test]
    fn test_check_unlocks_is_idempotent() {
        let mut state = GameState::new(0);
        state.player.level = 3;
        let mut events = Vec::new();

        check_unlocks(&mut state, &mut events);
        let actions = state.unlocked_actions.clone();
        let enemies = state.unlocked_enemy_names.clone();

        check_unlocks(&mut state, &mut events);
        assert_eq!(state.unlocked_actions, actions);
        assert_eq!(state.unlocked_enemy_names, enemies);
    }

    #[test]
    fn test_enemy_unlocks_gated_on_fighting() {
        let mut state = GameState::new(0);
        state.player.power = 1000;
        let mut events = Vec::new();

        check_unlocks(&mut state, &mut events);
        assert!(state.unlocked_enemy_names.is_empty());

        state.player.level = 2;
        check_unlocks(&mut state, &mut events);
        // Power 1000 exceeds every unlock threshold
        assert_eq!(state.unlocked_enemy_names.len(), 7);
    }

    #[test]
    fn test_enemy_unlocks_sorted_by_power() {
        let mut state = GameState::new(0);
        state.player.level = 2;
        state.player.power = 1000;
        let mut events = Vec::new();

        check_unlocks(&mut state, &mut events);

        let roster = catalog::enemies();
        let powers: Vec<u32> = state
            .unlocked_enemy_names
            .iter()
            .map(|n| roster.iter().find(|e| e.name == n).unwrap().power_level)
            .collect();
        let mut sorted = powers.clone();
        sorted.sort();
        assert_eq!(powers, sorted);
    }

    #[test]
    fn test_find_new_entity_assigns_unlocked_task() {
        let mut state = GameState::new(0);
        let mut events = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // Force a discovery by trying until the 5% roll hits
        let mut found = false;
        for _ in 0..500 {
            if find_new_entity(&mut state, &mut rng, &mut events) {
                found = true;
                break;
            }
        }
        assert!(found);

        let entity = &state.found_entities[0];
        assert_eq!(entity.id, "training_wisp");
        // Training wisp starts on the first unlocked training action
        assert_eq!(entity.assigned_sub_action_id.as_deref(), Some("pushups"));
    }

    #[test]
    fn test_find_new_entity_exhausts_pool() {
        let mut state = GameState::new(0);
        let mut events = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..5000 {
            find_new_entity(&mut state, &mut rng, &mut events);
        }

        assert_eq!(state.found_entities.len(), 3);
        // No duplicates: each template discovered exactly once
        for template in catalog::entity_templates() {
            assert_eq!(
                state
                    .found_entities
                    .iter()
                    .filter(|e| e.id == template.id)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_find_new_entity_probability() {
        let mut events = Vec::new();
        let mut rng = rand::thread_rng();
        let mut discoveries = 0;
        let trials = 10000;

        for _ in 0..trials {
            let mut state = GameState::new(0);
            if find_new_entity(&mut state, &mut rng, &mut events) {
                discoveries += 1;
            }
        }

        // 5% rate = 500 expected in 10000 trials; allow wide variance
        assert!(
            (300..=800).contains(&discoveries),
            "Expected ~500 discoveries (5%), got {}",
            discoveries
        );
    }

    #[test]
    fn test_assign_entity_task_rejects_wrong_category() {
        let mut state = GameState::new(0);
        let templates = catalog::entity_templates();
        state.found_entities.push(Entity::from_template(&templates[0])); // Training

        assign_entity_task(&mut state, "training_wisp", "look_bush");
        assert!(state.found_entities[0].assigned_sub_action_id.is_none());

        assign_entity_task(&mut state, "training_wisp", "situps");
        assert_eq!(
            state.found_entities[0].assigned_sub_action_id.as_deref(),
            Some("situps")
        );
        assert_eq!(state.found_entities[0].progress, 0.0);
    }

    #[test]
    fn test_upgrade_entity_requires_gold() {
        let mut state = GameState::new(0);
        let templates = catalog::entity_templates();
        state.found_entities.push(Entity::from_template(&templates[0]));

        let events = upgrade_entity(&mut state, "training_wisp");
        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::UpgradeRefused { cost: 90, .. })));
        assert_eq!(state.found_entities[0].level, 1);

        state.player.gold = 100.0;
        let events = upgrade_entity(&mut state, "training_wisp");
        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::EntityUpgraded { new_level: 2, .. })));
        assert_eq!(state.found_entities[0].level, 2);
        assert_eq!(state.player.gold, 10.0);
    }

    #[test]
    fn test_start_manual_action_requires_unlock() {
        let mut state = GameState::new(0);

        start_manual_action(&mut state, "sparring");
        assert!(state.active_manual_sub_action_id.is_none());

        start_manual_action(&mut state, "pushups");
        assert_eq!(
            state.active_manual_sub_action_id.as_deref(),
            Some("pushups")
        );
        assert_eq!(state.active_manual_category, ActionCategory::Training);
    }

    #[test]
    fn test_start_attack_acquires_enemy() {
        let mut state = GameState::new(0);
        state.player.level = 2;
        let mut events = Vec::new();
        check_unlocks(&mut state, &mut events);

        start_manual_action(&mut state, "attack");

        assert!(state.current_enemy.is_some());
        assert_eq!(state.active_manual_category, ActionCategory::Fighting);
    }

    #[test]
    fn test_stop_manual_action_is_idempotent() {
        let mut state = GameState::new(0);
        start_manual_action(&mut state, "pushups");
        state.manual_progress = 40.0;

        stop_manual_action(&mut state);
        assert!(state.active_manual_sub_action_id.is_none());
        assert_eq!(state.manual_progress, 0.0);

        stop_manual_action(&mut state);
        assert!(state.active_manual_sub_action_id.is_none());
        assert_eq!(state.manual_progress, 0.0);
    }
}
