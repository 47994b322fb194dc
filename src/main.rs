mod ui;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use idle_automata::build_info;
use idle_automata::catalog;
use idle_automata::combat::select_enemy;
use idle_automata::constants::{AUTOSAVE_INTERVAL_SECONDS, TICK_INTERVAL_MS};
use idle_automata::equipment::{equip_item, sell_item, unequip_slot, upgrade_via_duplicate};
use idle_automata::game_logic::{
    assign_entity_task, start_manual_action, stop_manual_action, upgrade_entity,
};
use idle_automata::game_state::GameState;
use idle_automata::items::GearSlot;
use idle_automata::log::{GameLog, LogCategory};
use idle_automata::offline::reconcile_offline;
use idle_automata::save_manager::SaveManager;
use idle_automata::tick::game_tick;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use ui::UiState;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "dump" => {
                let save_manager = SaveManager::new()?;
                match save_manager.load() {
                    Ok(state) => {
                        let json = serde_json::to_string_pretty(&state)
                            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                        println!("{}", json);
                        std::process::exit(0);
                    }
                    Err(e) => {
                        eprintln!("Could not read save: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--version" | "-v" => {
                println!(
                    "idle-automata {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Idle Automata - Terminal-Based Idle Game\n");
                println!("Usage: idle-automata [command]\n");
                println!("Commands:");
                println!("  dump       Print the current save as JSON");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'idle-automata --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let save_manager = SaveManager::new()?;
    let now = Utc::now().timestamp();
    let mut state = save_manager.load_or_default(now);
    let mut log = GameLog::new();

    // Catch up on time spent away before the first tick runs
    let elapsed = now - state.last_save_time;
    let report = reconcile_offline(&mut state, elapsed);
    log.push_events(&report.events);
    state.last_save_time = now;

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_game(&mut terminal, &mut state, &mut log, &save_manager);

    // Always restore the terminal, even if the loop errored
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    state.last_save_time = Utc::now().timestamp();
    save_manager.save(&state)?;

    run_result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut GameState,
    log: &mut GameLog,
    save_manager: &SaveManager,
) -> io::Result<()> {
    let mut ui_state = UiState::new();
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();
    let mut last_save = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, state, &ui_state, log))?;

        if event::poll(Duration::from_millis(25))? {
            if let Event::Key(key_event) = event::read()? {
                if handle_key(key_event.code, state, &mut ui_state, log) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let events = game_tick(state, &mut rng);
            log.push_events(&events);
            last_tick = Instant::now();
        }

        if last_save.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS) {
            state.last_save_time = Utc::now().timestamp();
            if save_manager.save(state).is_err() {
                log.push(
                    "Autosave failed; progress is kept in memory.".to_string(),
                    idle_automata::log::LogType::Automation,
                );
            }
            last_save = Instant::now();
        }
    }
}

/// Routes one key press. Returns true when the game should quit.
fn handle_key(code: KeyCode, state: &mut GameState, ui_state: &mut UiState, log: &mut GameLog) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        // ── Manual actions ──────────────────────────────────────
        KeyCode::Tab => {
            ui_state.cycle_category(state);
        }
        KeyCode::Up => {
            ui_state.selected_action = ui_state.selected_action.saturating_sub(1);
        }
        KeyCode::Down => {
            let count = ui::visible_sub_actions(state).len();
            if ui_state.selected_action + 1 < count {
                ui_state.selected_action += 1;
            }
        }
        KeyCode::Enter => {
            let actions = ui::visible_sub_actions(state);
            if let Some(sub_action) = actions.get(ui_state.selected_action) {
                if state.active_manual_sub_action_id.as_deref() == Some(sub_action.id) {
                    stop_manual_action(state);
                } else {
                    let events = start_manual_action(state, sub_action.id);
                    log.push_events(&events);
                }
            }
        }

        // ── Enemy navigation ────────────────────────────────────
        KeyCode::Left => {
            if state.current_enemy_index > 0 {
                let events = select_enemy(state, state.current_enemy_index - 1);
                log.push_events(&events);
            }
        }
        KeyCode::Right => {
            let events = select_enemy(state, state.current_enemy_index + 1);
            log.push_events(&events);
        }

        // ── Inventory and gear ──────────────────────────────────
        KeyCode::Char('[') => {
            ui_state.selected_item = ui_state.selected_item.saturating_sub(1);
        }
        KeyCode::Char(']') => {
            if ui_state.selected_item + 1 < state.inventory.len() {
                ui_state.selected_item += 1;
            }
        }
        KeyCode::Char('e') => {
            if let Some(instance_id) = ui_state.selected_instance_id(state) {
                let events = equip_item(state, &instance_id);
                log.push_events(&events);
                ui_state.clamp_item_selection(state);
            }
        }
        KeyCode::Char('s') => {
            if let Some(instance_id) = ui_state.selected_instance_id(state) {
                let events = sell_item(state, &instance_id);
                log.push_events(&events);
                ui_state.clamp_item_selection(state);
            }
        }
        KeyCode::Char('u') => {
            if let Some(instance_id) = ui_state.selected_instance_id(state) {
                let events = upgrade_via_duplicate(state, &instance_id);
                log.push_events(&events);
                ui_state.clamp_item_selection(state);
            }
        }
        KeyCode::Char('w') => {
            log.push_events(&unequip_slot(state, GearSlot::Weapon));
        }
        KeyCode::Char('a') => {
            log.push_events(&unequip_slot(state, GearSlot::Armor));
        }
        KeyCode::Char('c') => {
            log.push_events(&unequip_slot(state, GearSlot::Accessory));
        }

        // ── Automatons ──────────────────────────────────────────
        KeyCode::Char(digit @ '1'..='3') => {
            let index = digit as usize - '1' as usize;
            if index < state.found_entities.len() {
                ui_state.selected_entity = index;
            }
        }
        KeyCode::Char('g') => {
            if let Some(entity) = state.found_entities.get(ui_state.selected_entity) {
                let id = entity.id.clone();
                let events = upgrade_entity(state, &id);
                log.push_events(&events);
            }
        }
        KeyCode::Char('t') => {
            if let Some(entity) = state.found_entities.get(ui_state.selected_entity) {
                let id = entity.id.clone();
                let kind = entity.kind;
                let current = entity.assigned_sub_action_id.clone();
                // Cycle through the unlocked sub-actions of this
                // automaton's category
                let options: Vec<_> = catalog::sub_actions()
                    .into_iter()
                    .filter(|sa| sa.category == kind && state.is_sub_action_unlocked(sa.id))
                    .collect();
                if !options.is_empty() {
                    let next = match current
                        .as_deref()
                        .and_then(|c| options.iter().position(|sa| sa.id == c))
                    {
                        Some(pos) => (pos + 1) % options.len(),
                        None => 0,
                    };
                    assign_entity_task(state, &id, options[next].id);
                }
            }
        }

        // ── Settings ────────────────────────────────────────────
        KeyCode::Char('o') => {
            state.offline_progress_enabled = !state.offline_progress_enabled;
            let text = if state.offline_progress_enabled {
                "Offline progress enabled."
            } else {
                "Offline progress disabled."
            };
            log.push(text.to_string(), idle_automata::log::LogType::Automation);
        }
        KeyCode::Char('f') => {
            ui_state.log_filter = match ui_state.log_filter {
                None => Some(LogCategory::System),
                Some(LogCategory::System) => Some(LogCategory::Combat),
                Some(LogCategory::Combat) => Some(LogCategory::Loot),
                Some(LogCategory::Loot) => Some(LogCategory::Automation),
                Some(LogCategory::Automation) => None,
            };
        }

        _ => {}
    }

    false
}
