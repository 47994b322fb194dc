//! Renders structured engine events into narrative log lines, and keeps
//! the bounded in-game event log.

use crate::catalog::ActionCategory;
use crate::constants::GAME_LOG_LIMIT;
use crate::tick::TickEvent;
use std::collections::VecDeque;

/// Severity/flavor of a log line, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Story,
    Quest,
    Danger,
    Success,
    Loot,
    Automation,
}

/// Filter buckets the UI offers over the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    System,
    Combat,
    Loot,
    Automation,
}

impl LogType {
    pub fn category(&self) -> LogCategory {
        match self {
            LogType::Story | LogType::Quest => LogCategory::System,
            LogType::Danger | LogType::Success => LogCategory::Combat,
            LogType::Loot => LogCategory::Loot,
            LogType::Automation => LogCategory::Automation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub text: String,
    pub log_type: LogType,
}

/// Newest-first log with a fixed retention limit.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        let mut log = Self::default();
        log.push(
            "A feeling of determination washes over you.".to_string(),
            LogType::Story,
        );
        log
    }

    pub fn push(&mut self, text: String, log_type: LogType) {
        self.entries.push_front(LogEntry { text, log_type });
        self.entries.truncate(GAME_LOG_LIMIT);
    }

    pub fn push_event(&mut self, event: &TickEvent) {
        let entry = render_event(event);
        self.push(entry.text, entry.log_type);
    }

    pub fn push_events(&mut self, events: &[TickEvent]) {
        for event in events {
            self.push_event(event);
        }
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn filtered(&self, category: Option<LogCategory>) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| category.is_none() || Some(e.log_type.category()) == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns a structured event into its narrative line.
pub fn render_event(event: &TickEvent) -> LogEntry {
    let (text, log_type) = match event {
        TickEvent::LevelUp { new_level } => (
            format!("Ding! You reached level {}!", new_level),
            LogType::Quest,
        ),
        TickEvent::ActionUnlocked { category } => match category {
            ActionCategory::Fighting => (
                "The thrill of battle calls to you. You can now Fight!".to_string(),
                LogType::Story,
            ),
            ActionCategory::Exploring => (
                "You feel an urge to see the world. You can now Explore!".to_string(),
                LogType::Story,
            ),
            ActionCategory::Training => (
                "You feel ready to train.".to_string(),
                LogType::Story,
            ),
        },
        TickEvent::SubActionUnlocked { name } => (
            format!("You can now perform: {}!", name),
            LogType::Story,
        ),
        TickEvent::EnemiesUnlocked { names } => (
            format!(
                "You feel strong enough to challenge: {}!",
                names.join(", ")
            ),
            LogType::Story,
        ),
        TickEvent::EnemyAppeared { name } => {
            (format!("A wild {} appears!", name), LogType::Danger)
        }
        TickEvent::EnemyDefeated {
            name,
            gold,
            xp,
            by: None,
        } => (
            format!("You defeated the {}! +{} Gold, +{} XP.", name, gold, xp),
            LogType::Success,
        ),
        TickEvent::EnemyDefeated {
            name,
            by: Some(automaton),
            ..
        } => (
            format!("{} defeated the {}!", automaton, name),
            LogType::Automation,
        ),
        TickEvent::GoldFound { amount } => {
            (format!("You found {} gold.", amount), LogType::Loot)
        }
        TickEvent::ItemLooted { name, .. } => (format!("Looted a {}!", name), LogType::Loot),
        TickEvent::ItemEnhanced { name, new_level } => (
            format!(
                "Used a duplicate to enhance your {} to +{}!",
                name, new_level
            ),
            LogType::Loot,
        ),
        TickEvent::EnhanceAtMaxLevel { name } => (
            format!("{} is already at max level!", name),
            LogType::Automation,
        ),
        TickEvent::EnhanceNoMatch => (
            "You need to have a matching item equipped to upgrade it.".to_string(),
            LogType::Automation,
        ),
        TickEvent::ItemSold { name, gold } => (
            format!("Sold {} for {} gold.", name, gold),
            LogType::Loot,
        ),
        TickEvent::EntityDiscovered {
            name,
            kind,
            by: None,
        } => (
            format!(
                "You've discovered a {}! It can automate {} tasks.",
                name,
                kind.label()
            ),
            LogType::Story,
        ),
        TickEvent::EntityDiscovered {
            name,
            by: Some(finder),
            ..
        } => (
            format!(
                "Your {} discovered a {} while you were away!",
                finder, name
            ),
            LogType::Automation,
        ),
        TickEvent::EntityUpgraded { name, new_level } => (
            format!("Upgraded {} to Level {}!", name, new_level),
            LogType::Automation,
        ),
        TickEvent::UpgradeRefused { name, .. } => (
            format!("Not enough gold to upgrade {}.", name),
            LogType::Automation,
        ),
        TickEvent::QuestCompleted { title } => {
            (format!("Quest Complete: {}!", title), LogType::Quest)
        }
        TickEvent::QuestStarted { title } => (format!("New Quest: {}", title), LogType::Quest),
        TickEvent::AllQuestsComplete => (
            "You've completed all available quests for now!".to_string(),
            LogType::Quest,
        ),
        TickEvent::OfflineSummary { minutes, .. } => (
            format!(
                "While you were away for {} minutes, your automations were busy!",
                minutes
            ),
            LogType::Story,
        ),
        TickEvent::OfflineLevelsGained { levels } => (
            format!("You gained {} level(s)!", levels),
            LogType::Success,
        ),
    };

    LogEntry { text, log_type }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_categories() {
        assert_eq!(LogType::Story.category(), LogCategory::System);
        assert_eq!(LogType::Quest.category(), LogCategory::System);
        assert_eq!(LogType::Danger.category(), LogCategory::Combat);
        assert_eq!(LogType::Success.category(), LogCategory::Combat);
        assert_eq!(LogType::Loot.category(), LogCategory::Loot);
        assert_eq!(LogType::Automation.category(), LogCategory::Automation);
    }

    #[test]
    fn test_game_log_newest_first() {
        let mut log = GameLog::default();
        log.push("first".to_string(), LogType::Story);
        log.push("second".to_string(), LogType::Story);

        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries[0].text, "second");
        assert_eq!(entries[1].text, "first");
    }

    #[test]
    fn test_game_log_caps_retention() {
        let mut log = GameLog::default();
        for i in 0..(GAME_LOG_LIMIT + 50) {
            log.push(format!("line {}", i), LogType::Story);
        }
        assert_eq!(log.len(), GAME_LOG_LIMIT);
        // Oldest lines dropped, newest kept
        assert_eq!(
            log.entries().next().unwrap().text,
            format!("line {}", GAME_LOG_LIMIT + 49)
        );
    }

    #[test]
    fn test_filtered_by_category() {
        let mut log = GameLog::default();
        log.push("combat".to_string(), LogType::Danger);
        log.push("loot".to_string(), LogType::Loot);
        log.push("story".to_string(), LogType::Story);

        assert_eq!(log.filtered(Some(LogCategory::Combat)).len(), 1);
        assert_eq!(log.filtered(Some(LogCategory::Loot)).len(), 1);
        assert_eq!(log.filtered(None).len(), 3);
    }

    #[test]
    fn test_render_level_up() {
        let entry = render_event(&TickEvent::LevelUp { new_level: 4 });
        assert_eq!(entry.text, "Ding! You reached level 4!");
        assert_eq!(entry.log_type, LogType::Quest);
    }

    #[test]
    fn test_render_kill_attribution() {
        let manual = render_event(&TickEvent::EnemyDefeated {
            name: "Slime".to_string(),
            gold: 5,
            xp: 10,
            by: None,
        });
        assert_eq!(manual.text, "You defeated the Slime! +5 Gold, +10 XP.");
        assert_eq!(manual.log_type, LogType::Success);

        let automated = render_event(&TickEvent::EnemyDefeated {
            name: "Slime".to_string(),
            gold: 5,
            xp: 10,
            by: Some("Combat Drone".to_string()),
        });
        assert_eq!(automated.text, "Combat Drone defeated the Slime!");
        assert_eq!(automated.log_type, LogType::Automation);
    }

    #[test]
    fn test_render_offline_summary() {
        let entry = render_event(&TickEvent::OfflineSummary {
            minutes: 42,
            actions_completed: 100,
        });
        assert!(entry.text.contains("42 minutes"));
        assert_eq!(entry.log_type, LogType::Story);
    }
}
