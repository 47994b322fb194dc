//! Persistence boundary: checksummed round trips and the corrupt-save
//! fallback contract.

use idle_automata::catalog::entity_templates;
use idle_automata::entity::Entity;
use idle_automata::equipment::equip_item;
use idle_automata::game_state::GameState;
use idle_automata::items::InventoryItem;
use idle_automata::save_manager::SaveManager;
use std::fs;

fn temp_manager(name: &str) -> SaveManager {
    let path = std::env::temp_dir().join(format!("idle-automata-save-{}.dat", name));
    let _ = fs::remove_file(&path);
    SaveManager::from_path(path)
}

fn populated_state() -> GameState {
    let mut state = GameState::new(42);
    state.player.level = 6;
    state.player.power = 23;
    state.player.gold = 512.0;
    state.player.xp = 99.5;
    state.unlocked_enemy_names = vec!["Slime".to_string(), "Goblin".to_string()];
    state.current_enemy_index = 1;
    state
        .sub_action_completion_counts
        .insert("pushups".to_string(), 80);
    state.record_drop("Slime", "rusty_sword");

    let sword = InventoryItem::new("rusty_sword");
    let sword_id = sword.instance_id.clone();
    state.inventory.push(sword);
    equip_item(&mut state, &sword_id);
    state.inventory.push(InventoryItem::new("lucky_coin"));

    let templates = entity_templates();
    let mut wisp = Entity::from_template(&templates[0]);
    wisp.level = 4;
    wisp.assigned_sub_action_id = Some("situps".to_string());
    wisp.stats.xp_gained = 1234.0;
    state.found_entities.push(wisp);

    state.active_quest_id = Some("q4".to_string());
    state.quest_completion.insert("q1".to_string(), true);
    state.quest_progress.insert("q4".to_string(), 3);
    state.offline_progress_enabled = false;

    state
}

#[test]
fn test_full_snapshot_roundtrip() {
    let manager = temp_manager("full");
    let original = populated_state();

    manager.save(&original).unwrap();
    let loaded = manager.load().unwrap();

    assert_eq!(loaded.player, original.player);
    assert_eq!(loaded.current_enemy_index, 1);
    assert_eq!(loaded.unlocked_enemy_names, original.unlocked_enemy_names);
    assert_eq!(loaded.inventory, original.inventory);
    assert_eq!(loaded.equipped_gear, original.equipped_gear);
    assert_eq!(loaded.found_entities, original.found_entities);
    assert_eq!(loaded.quest_completion, original.quest_completion);
    assert_eq!(loaded.quest_progress, original.quest_progress);
    assert_eq!(loaded.active_quest_id, original.active_quest_id);
    assert_eq!(loaded.enemy_drop_history, original.enemy_drop_history);
    assert_eq!(
        loaded.sub_action_completion_counts,
        original.sub_action_completion_counts
    );
    assert!(!loaded.offline_progress_enabled);
    assert_eq!(loaded.last_save_time, 42);

    let _ = fs::remove_file(manager.save_path());
}

#[test]
fn test_runtime_combat_state_not_persisted() {
    let manager = temp_manager("runtime");
    let mut state = populated_state();
    state.current_enemy = Some(idle_automata::combat::Enemy::from_template(
        &idle_automata::catalog::get_enemy("Goblin").unwrap(),
    ));
    state.active_manual_sub_action_id = Some("situps".to_string());
    state.manual_progress = 73.0;

    manager.save(&state).unwrap();
    let loaded = manager.load().unwrap();

    // Combat restarts fresh on load; the manual slot comes back idle
    assert!(loaded.current_enemy.is_none());
    assert!(loaded.active_manual_sub_action_id.is_none());
    assert_eq!(loaded.manual_progress, 0.0);

    let _ = fs::remove_file(manager.save_path());
}

#[test]
fn test_corrupt_save_falls_back_to_default() {
    let manager = temp_manager("corrupt");
    manager.save(&populated_state()).unwrap();

    // Truncate the file mid-payload
    let bytes = fs::read(manager.save_path()).unwrap();
    fs::write(manager.save_path(), &bytes[..bytes.len() / 2]).unwrap();

    let state = manager.load_or_default(100);
    assert_eq!(state.player.level, 1);
    assert_eq!(state.player.gold, 0.0);
    assert_eq!(state.last_save_time, 100);
    assert_eq!(state.active_quest_id.as_deref(), Some("q1"));

    let _ = fs::remove_file(manager.save_path());
}

#[test]
fn test_missing_save_falls_back_to_default() {
    let manager = temp_manager("absent");

    assert!(!manager.save_exists());
    let state = manager.load_or_default(7);
    assert_eq!(state.player.level, 1);
    assert_eq!(state.last_save_time, 7);
}

#[test]
fn test_tampered_checksum_rejected() {
    let manager = temp_manager("tamper");
    manager.save(&populated_state()).unwrap();

    let mut bytes = fs::read(manager.save_path()).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(manager.save_path(), &bytes).unwrap();

    assert!(manager.load().is_err());

    let _ = fs::remove_file(manager.save_path());
}

#[test]
fn test_save_overwrites_previous() {
    let manager = temp_manager("overwrite");

    let mut first = GameState::new(1);
    first.player.gold = 5.0;
    manager.save(&first).unwrap();

    let mut second = GameState::new(2);
    second.player.gold = 50.0;
    manager.save(&second).unwrap();

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.player.gold, 50.0);
    assert_eq!(loaded.last_save_time, 2);

    let _ = fs::remove_file(manager.save_path());
}
