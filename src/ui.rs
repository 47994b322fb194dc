//! Terminal rendering. Pure presentation: reads engine state and draws
//! it; every mutation goes back through the engine's operations.

use idle_automata::catalog::{self, ObjectiveKind, SubAction};
use idle_automata::derived_stats::TotalStats;
use idle_automata::game_logic::entity_upgrade_cost;
use idle_automata::game_state::GameState;
use idle_automata::items::GearSlot;
use idle_automata::log::{GameLog, LogCategory, LogType};
use idle_automata::quests;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Selection and filter state owned by the front end.
pub struct UiState {
    pub selected_action: usize,
    pub selected_item: usize,
    pub selected_entity: usize,
    pub log_filter: Option<LogCategory>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            selected_action: 0,
            selected_item: 0,
            selected_entity: 0,
            log_filter: None,
        }
    }

    /// Moves the manual-action tab to the next unlocked category.
    pub fn cycle_category(&mut self, state: &mut GameState) {
        if state.unlocked_actions.is_empty() {
            return;
        }
        let position = state
            .unlocked_actions
            .iter()
            .position(|c| *c == state.active_manual_category)
            .unwrap_or(0);
        let next = (position + 1) % state.unlocked_actions.len();
        state.active_manual_category = state.unlocked_actions[next];
        self.selected_action = 0;
    }

    pub fn selected_instance_id(&self, state: &GameState) -> Option<String> {
        state
            .inventory
            .get(self.selected_item)
            .map(|item| item.instance_id.clone())
    }

    pub fn clamp_item_selection(&mut self, state: &GameState) {
        if self.selected_item >= state.inventory.len() {
            self.selected_item = state.inventory.len().saturating_sub(1);
        }
    }
}

/// Sub-actions shown for the active category tab.
pub fn visible_sub_actions(state: &GameState) -> Vec<SubAction> {
    catalog::sub_actions()
        .into_iter()
        .filter(|sa| {
            sa.category == state.active_manual_category && state.is_sub_action_unlocked(sa.id)
        })
        .collect()
}

pub fn draw(frame: &mut Frame, state: &GameState, ui_state: &UiState, log: &GameLog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header stats
            Constraint::Length(3),  // XP gauge
            Constraint::Min(12),    // Actions / automations
            Constraint::Length(10), // Log / inventory
            Constraint::Length(1),  // Help line
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);
    draw_xp_gauge(frame, chunks[1], state);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_actions_panel(frame, middle[0], state, ui_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(middle[1]);
    draw_quest_panel(frame, right[0], state);
    draw_automations_panel(frame, right[1], state, ui_state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);
    draw_log_panel(frame, bottom[0], log, ui_state);
    draw_gear_panel(frame, bottom[1], state, ui_state);

    draw_help_line(frame, chunks[4]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &GameState) {
    let total = TotalStats::calculate(&state.player, &state.equipped_gear);

    let line = Line::from(vec![
        Span::styled(
            "Idle Automata",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(format!("Power {}", total.power), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled(
            format!("Gold {}", state.player.gold.floor() as u64),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!(
                "XP {}/{}",
                state.player.xp.floor() as u64,
                state.player.xp_to_next_level
            ),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Level {}", state.player.level),
            Style::default().fg(Color::Blue),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_xp_gauge(frame: &mut Frame, area: Rect, state: &GameState) {
    let ratio = if state.player.xp_to_next_level > 0 {
        (state.player.xp / state.player.xp_to_next_level as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Experience"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(format!("Level {} XP", state.player.level));
    frame.render_widget(gauge, area);
}

fn draw_actions_panel(frame: &mut Frame, area: Rect, state: &GameState, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Sub-action list
            Constraint::Length(3), // Manual progress
            Constraint::Length(5), // Enemy
        ])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        format!("[Tab] {}", state.active_manual_category.label()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (index, sub_action) in visible_sub_actions(state).iter().enumerate() {
        let active = state.active_manual_sub_action_id.as_deref() == Some(sub_action.id);
        let marker = if index == ui_state.selected_action {
            "> "
        } else {
            "  "
        };
        let style = if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, sub_action.name),
            style,
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Manual Actions"),
    );
    frame.render_widget(list, chunks[0]);

    let progress_label = state
        .active_manual_sub_action_id
        .as_deref()
        .and_then(catalog::get_sub_action)
        .map(|sa| sa.name.to_string())
        .unwrap_or_else(|| "Idle".to_string());
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((state.manual_progress / 100.0).clamp(0.0, 1.0))
        .label(progress_label);
    frame.render_widget(gauge, chunks[1]);

    draw_enemy_panel(frame, chunks[2], state);
}

fn draw_enemy_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default().borders(Borders::ALL).title("Combat");

    match &state.current_enemy {
        Some(enemy) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1)])
                .split(inner);

            let title = Line::from(vec![
                Span::styled(
                    enemy.name.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  Power {}", enemy.power_level)),
                Span::raw(format!(
                    "  [{}/{}] <- ->",
                    state.current_enemy_index + 1,
                    state.unlocked_enemy_names.len()
                )),
            ]);
            frame.render_widget(Paragraph::new(title), chunks[0]);

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Red))
                .ratio(enemy.hp_fraction())
                .label(format!("{} / {}", enemy.current_hp, enemy.max_hp));
            frame.render_widget(gauge, chunks[1]);
        }
        None => {
            let paragraph = Paragraph::new("No enemy selected or available.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

fn draw_quest_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let mut lines = Vec::new();

    match quests::active_quest(state) {
        Some(quest) => {
            lines.push(Line::from(Span::styled(
                quest.title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("\"{}\"", quest.description),
                Style::default().fg(Color::DarkGray),
            )));

            let (current, target) = match quest.objective.kind {
                ObjectiveKind::Level => (state.player.level, quest.objective.target),
                ObjectiveKind::Power => (
                    TotalStats::calculate(&state.player, &state.equipped_gear).power,
                    quest.objective.target,
                ),
                _ => (state.quest_progress(quest.id), quest.objective.target),
            };
            lines.push(Line::from(format!("Progress: {} / {}", current, target)));

            let mut reward_parts = Vec::new();
            if quest.reward.xp > 0.0 {
                reward_parts.push(format!("{} XP", quest.reward.xp));
            }
            if quest.reward.gold > 0.0 {
                reward_parts.push(format!("{} Gold", quest.reward.gold));
            }
            if let Some(unlock) = quest.reward.unlocks {
                if let Some(sub_action) = catalog::get_sub_action(unlock) {
                    reward_parts.push(format!("Unlocks {}", sub_action.name));
                }
            }
            lines.push(Line::from(format!("Rewards: {}", reward_parts.join(", "))));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No active quests.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let completed = state.quest_completion.values().filter(|done| **done).count();
    lines.push(Line::from(Span::styled(
        format!("Completed: {} / {}", completed, catalog::quests().len()),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Active Quest"));
    frame.render_widget(paragraph, area);
}

fn draw_automations_panel(frame: &mut Frame, area: Rect, state: &GameState, ui_state: &UiState) {
    let mut lines = Vec::new();

    if state.found_entities.is_empty() {
        lines.push(Line::from(Span::styled(
            "You have not discovered any automations yet. Try exploring.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, entity) in state.found_entities.iter().enumerate() {
        let marker = if index == ui_state.selected_entity {
            "> "
        } else {
            "  "
        };
        let task = entity
            .assigned_sub_action_id
            .as_deref()
            .and_then(catalog::get_sub_action)
            .map(|sa| sa.name.to_string())
            .unwrap_or_else(|| "Idle".to_string());
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("[{}] {} Lv{}", index + 1, entity.name, entity.level),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(" - {} {:>3.0}%", task, entity.progress)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "     upgrade {}g · kills {} · xp {}",
                entity_upgrade_cost(entity.level),
                entity.stats.enemies_defeated,
                entity.stats.xp_gained.floor() as u64
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Automations [g upgrade · t task]"),
    );
    frame.render_widget(paragraph, area);
}

fn draw_log_panel(frame: &mut Frame, area: Rect, log: &GameLog, ui_state: &UiState) {
    let filter_label = match ui_state.log_filter {
        None => "All",
        Some(LogCategory::System) => "System",
        Some(LogCategory::Combat) => "Combat",
        Some(LogCategory::Loot) => "Loot",
        Some(LogCategory::Automation) => "Automation",
    };

    let visible_rows = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log
        .filtered(ui_state.log_filter)
        .into_iter()
        .take(visible_rows)
        .map(|entry| {
            let color = match entry.log_type {
                LogType::Story => Color::Cyan,
                LogType::Quest => Color::Yellow,
                LogType::Danger => Color::Red,
                LogType::Success => Color::Green,
                LogType::Loot => Color::Blue,
                LogType::Automation => Color::DarkGray,
            };
            Line::from(Span::styled(
                entry.text.clone(),
                Style::default().fg(color),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Event Log [f: {}]", filter_label)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_gear_panel(frame: &mut Frame, area: Rect, state: &GameState, ui_state: &UiState) {
    let mut lines = Vec::new();

    for slot in GearSlot::all() {
        let text = match state.equipped_gear.get(slot) {
            Some(item) => item.display_name(),
            None => "-".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", slot.label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(text),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!("Inventory ({})", state.inventory.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let visible_rows = (area.height.saturating_sub(2) as usize).saturating_sub(lines.len());
    for (index, item) in state.inventory.iter().take(visible_rows).enumerate() {
        let marker = if index == ui_state.selected_item {
            "> "
        } else {
            "  "
        };
        lines.push(Line::from(format!("{}{}", marker, item.display_name())));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Gear [e equip · s sell · u enhance]"),
    );
    frame.render_widget(paragraph, area);
}

fn draw_help_line(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "q quit · tab category · up/down select · enter start/stop · left/right enemy · \
         [/] item · w/a/c unequip · 1-3 automaton · o offline · f filter",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
