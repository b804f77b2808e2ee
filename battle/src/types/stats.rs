//! Stat stage tracking

use hindsight_protocol::Stat;

const MIN_STAGE: i8 = -6;
const MAX_STAGE: i8 = 6;

/// Stat stages (-6 to +6), indexed by [`Stat`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    stages: [i8; 7],
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i8 {
        self.stages[stat.index()]
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        self.stages[stat.index()] = value.clamp(MIN_STAGE, MAX_STAGE);
    }

    /// Apply a boost, returns the change actually applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        self.set(stat, current.saturating_add(amount));
        self.get(stat) - current
    }

    pub fn unboost(&mut self, stat: Stat, amount: i8) -> i8 {
        self.boost(stat, amount.saturating_neg())
    }

    pub fn clear(&mut self) {
        self.stages = [0; 7];
    }

    pub fn clear_positive(&mut self) {
        self.stages.iter_mut().for_each(|s| *s = (*s).min(0));
    }

    pub fn clear_negative(&mut self) {
        self.stages.iter_mut().for_each(|s| *s = (*s).max(0));
    }

    /// Invert all stages (Topsy-Turvy)
    pub fn invert(&mut self) {
        self.stages.iter_mut().for_each(|s| *s = -*s);
    }

    pub fn is_clear(&self) -> bool {
        self.stages.iter().all(|s| *s == 0)
    }

    /// Non-zero stages in stat order
    pub fn nonzero(&self) -> impl Iterator<Item = (Stat, i8)> + '_ {
        Stat::ALL
            .iter()
            .map(|stat| (*stat, self.get(*stat)))
            .filter(|(_, stage)| *stage != 0)
    }
}
