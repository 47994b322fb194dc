//! Derived totals recomputed on demand from base stats plus equipped
//! gear. Never persisted.

use crate::equipment::EquippedGear;
use crate::game_state::PlayerStats;

#[derive(Debug, Clone, PartialEq)]
pub struct TotalStats {
    /// Base power plus floored gear power.
    pub power: u32,
    /// Percentage bonus applied to gold found from sub-actions.
    pub gold_bonus: f64,
    /// Unfloored gear power sum, for display.
    pub gear_power_bonus: f64,
}

impl TotalStats {
    /// Sums gear contributions across occupied slots. The power total is
    /// floored once after summing, not per item, so fractional upgrade
    /// bonuses from several items still add up.
    pub fn calculate(player: &PlayerStats, equipped: &EquippedGear) -> Self {
        let mut gear_power_bonus = 0.0;
        let mut gold_bonus = 0.0;

        for item in equipped.iter_equipped() {
            gear_power_bonus += item.power_bonus();
            gold_bonus += item.gold_bonus();
        }

        Self {
            power: player.power.saturating_add(gear_power_bonus.floor() as u32),
            gold_bonus,
            gear_power_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::InventoryItem;

    #[test]
    fn test_no_gear_equals_base_power() {
        let player = PlayerStats::new();
        let totals = TotalStats::calculate(&player, &EquippedGear::new());

        assert_eq!(totals.power, 1);
        assert_eq!(totals.gold_bonus, 0.0);
        assert_eq!(totals.gear_power_bonus, 0.0);
    }

    #[test]
    fn test_gear_power_sums_across_slots() {
        let player = PlayerStats::new();
        let mut equipped = EquippedGear::new();
        equipped.weapon = Some(InventoryItem::new("goblin_smasher")); // +5
        equipped.armor = Some(InventoryItem::new("leather_vest")); // +3

        let totals = TotalStats::calculate(&player, &equipped);
        assert_eq!(totals.power, 9); // 1 base + 8 gear
        assert_eq!(totals.gear_power_bonus, 8.0);
    }

    #[test]
    fn test_power_floored_after_summing() {
        let player = PlayerStats::new();
        let mut equipped = EquippedGear::new();

        // Rusty sword +3: 1.0 + 3 * 0.2 = 1.6
        let mut sword = InventoryItem::new("rusty_sword");
        sword.upgrade_level = 3;
        // Wooden shield +5: 1.0 + 5 * 0.1 = 1.5
        let mut shield = InventoryItem::new("wooden_shield");
        shield.upgrade_level = 5;

        equipped.weapon = Some(sword);
        equipped.armor = Some(shield);

        let totals = TotalStats::calculate(&player, &equipped);
        // Per-item flooring would give 1 + 1 + 1 = 3; summing first gives
        // floor(3.1) = 3 gear power on top of 1 base.
        assert_eq!(totals.power, 4);
        assert!((totals.gear_power_bonus - 3.1).abs() < 1e-9);
    }

    #[test]
    fn test_gold_bonus_from_accessory() {
        let player = PlayerStats::new();
        let mut equipped = EquippedGear::new();
        let mut coin = InventoryItem::new("lucky_coin");
        coin.upgrade_level = 4; // 10 + 4 * 0.5 = 12
        equipped.accessory = Some(coin);

        let totals = TotalStats::calculate(&player, &equipped);
        assert!((totals.gold_bonus - 12.0).abs() < 1e-9);
        assert_eq!(totals.power, 1); // lucky coin grants no power
    }
}
