//! Effective ship stats derived from base values and carried cards.
//!
//! Nothing here is cached: every call folds the ship's current card list, so
//! the result follows card transfers immediately.

use hex_voyage_core::Stat;
use serde::Serialize;

use crate::Ship;

/// Base value of `stat` plus the modifiers of every card the ship carries.
#[must_use]
pub fn effective_stat(ship: &Ship, stat: Stat) -> i32 {
    ship.cards()
        .iter()
        .fold(ship.base(stat), |total, card| {
            total.saturating_add(card.modifier(stat))
        })
}

/// All effective stats of a ship captured at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EffectiveStats {
    /// Hexes the ship may travel per turn.
    pub speed: i32,
    /// Actions the ship may take per turn.
    pub actions: i32,
    /// Strength in combat.
    pub combat: i32,
}

impl EffectiveStats {
    /// Computes the stats of the provided ship.
    #[must_use]
    pub fn of(ship: &Ship) -> Self {
        Self {
            speed: effective_stat(ship, Stat::Speed),
            actions: effective_stat(ship, Stat::Actions),
            combat: effective_stat(ship, Stat::Combat),
        }
    }

    /// Value of a single stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Actions => self.actions,
            Stat::Combat => self.combat,
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_voyage_core::{Card, CardId, Modifiers, OffsetCoord};

    use super::*;
    use crate::config::ShipConfig;

    fn ship_with(cards: Vec<Card>) -> Ship {
        let config = ShipConfig {
            start: OffsetCoord::new(0, 0),
            speed: 3,
            actions: 2,
            combat: 1,
            deck: Vec::new(),
        };
        let mut ship = Ship::from_config(&config);
        for card in cards {
            ship.cards.push(card);
        }
        ship
    }

    #[test]
    fn base_stats_apply_without_cards() {
        let stats = EffectiveStats::of(&ship_with(Vec::new()));
        assert_eq!(
            stats,
            EffectiveStats {
                speed: 3,
                actions: 2,
                combat: 1
            }
        );
    }

    #[test]
    fn card_modifiers_sum_including_negative_values() {
        let ship = ship_with(vec![
            Card::new(CardId::new(1), "Afterburner", Modifiers::new(2, 0, 0)),
            Card::new(CardId::new(2), "Heavy Plating", Modifiers::new(-1, 0, 3)),
        ]);
        assert_eq!(effective_stat(&ship, Stat::Speed), 4);
        assert_eq!(effective_stat(&ship, Stat::Actions), 2);
        assert_eq!(effective_stat(&ship, Stat::Combat), 4);
    }
}
