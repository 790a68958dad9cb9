//! Quest reward and level-up arithmetic
//!
//! The one piece of game logic this crate owns, kept here rather than in the
//! upstream CRUD layer because projections and their tests need the same
//! numbers. Rewards are applied to the character, then experience rolls over
//! into levels 100 xp at a time.

use crate::source::entity::{character, quest};

/// What a completed quest granted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardOutcome {
    pub gold_gained: i32,
    pub xp_gained: i32,
    pub levels_gained: i32,
}

impl RewardOutcome {
    pub fn level_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Apply a quest's rewards to a character
///
/// Null rewards count as zero. Experience at or above 100 converts into
/// levels until the remainder is below 100.
pub fn apply_quest_rewards(
    character: &mut character::Model,
    quest: &quest::Model,
) -> RewardOutcome {
    let gold_gained = quest.reward_money.unwrap_or(0);
    let xp_gained = quest.reward_xp.unwrap_or(0);

    character.gold += gold_gained;
    character.xp += xp_gained;

    let mut levels_gained = 0;
    while character.xp >= 100 {
        character.level += 1;
        character.xp -= 100;
        levels_gained += 1;
    }

    RewardOutcome {
        gold_gained,
        xp_gained,
        levels_gained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures;

    #[test]
    fn xp_rolls_over_into_levels() {
        let snap = fixtures::world();
        let mut character = snap.character(1).unwrap().clone();
        character.level = 2;
        character.xp = 80;

        // reward_xp = 150: 80 + 150 = 230 -> level +2, 30 remaining
        let outcome = apply_quest_rewards(&mut character, snap.quest(9).unwrap());

        assert_eq!(character.level, 4);
        assert_eq!(character.xp, 30);
        assert_eq!(outcome.xp_gained, 150);
        assert_eq!(outcome.gold_gained, 100);
        assert_eq!(outcome.levels_gained, 2);
        assert!(outcome.level_up());
    }

    #[test]
    fn null_rewards_count_as_zero() {
        let snap = fixtures::world();
        let mut character = snap.character(2).unwrap().clone();
        let gold_before = character.gold;

        // Quest 10 has null reward_money and reward_xp
        let outcome = apply_quest_rewards(&mut character, snap.quest(10).unwrap());

        assert_eq!(character.gold, gold_before);
        assert_eq!(outcome, RewardOutcome { gold_gained: 0, xp_gained: 0, levels_gained: 0 });
        assert!(!outcome.level_up());
    }

    #[test]
    fn xp_below_threshold_keeps_level() {
        let snap = fixtures::world();
        let mut character = snap.character(3).unwrap().clone();
        character.xp = 40;

        let mut quest = snap.quest(9).unwrap().clone();
        quest.reward_xp = Some(59);

        let outcome = apply_quest_rewards(&mut character, &quest);
        assert_eq!(character.level, 1);
        assert_eq!(character.xp, 99);
        assert_eq!(outcome.levels_gained, 0);
    }
}
