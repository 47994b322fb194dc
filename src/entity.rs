//! Discovered automatons and their lifetime accounting.

use crate::catalog::{ActionCategory, EntityTemplate};
use serde::{Deserialize, Serialize};

/// Totals accumulated over an automaton's lifetime, for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityLifetimeStats {
    pub xp_gained: f64,
    pub power_gained: u32,
    pub gold_gained: f64,
    pub enemies_defeated: u32,
}

/// A discovered automaton. Runs one assigned sub-action of its own
/// category each tick; at most one instance exists per template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub kind: ActionCategory,
    pub level: u32,
    /// 0 <= progress < 100. Overshoot past 100 carries into the next
    /// action rather than being discarded.
    pub progress: f64,
    pub automation_speed: f64,
    pub assigned_sub_action_id: Option<String>,
    pub stats: EntityLifetimeStats,
}

impl Entity {
    /// Instantiates a level-1 automaton from its catalog template.
    pub fn from_template(template: &EntityTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.to_string(),
            kind: template.kind,
            level: 1,
            progress: 0.0,
            automation_speed: template.automation_speed,
            assigned_sub_action_id: None,
            stats: EntityLifetimeStats::default(),
        }
    }

    /// Progress gained per tick: the catalog speed scaled by level, with
    /// a +0.5 floor so level 1 still moves.
    pub fn effective_speed(&self) -> f64 {
        self.automation_speed * (self.level as f64 / 2.0 + 0.5)
    }
}
