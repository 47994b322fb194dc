// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICK_SECONDS: f64 = TICK_INTERVAL_MS as f64 / 1000.0;

// Experience and progression constants
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_FACTOR: f64 = 1.5;
pub const POWER_PER_LEVEL: u32 = 1;

// Action category unlock levels
pub const FIGHTING_UNLOCK_LEVEL: u32 = 2;
pub const EXPLORING_UNLOCK_LEVEL: u32 = 3;

// Automaton constants
pub const ENTITY_FIND_CHANCE: f64 = 0.05;
pub const ENTITY_UPGRADE_COST_BASE: f64 = 50.0;
pub const ENTITY_UPGRADE_COST_FACTOR: f64 = 1.8;
pub const AUTO_DAMAGE_POWER_DIVISOR: f64 = 10.0;

// Gear constants
pub const SELL_VALUE_PER_UPGRADE: f64 = 0.2;

// Offline progression constants
pub const MIN_OFFLINE_SECONDS: i64 = 60;
pub const MAX_OFFLINE_SECONDS: i64 = 7 * 24 * 60 * 60; // 7 days in seconds

// Save system constants
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;
pub const SAVE_VERSION_MAGIC: u64 = 0x4944414D41544100; // "IDAMATA\0" in hex

// Event log retention
pub const GAME_LOG_LIMIT: usize = 200;
