use std::collections::VecDeque;

use spelltree::tree::RandomSource;

/// Deterministic [`RandomSource`] replaying scripted values.
///
/// Once a script runs out, rolls return `0` (always passes any non-zero
/// chance) and picks return `0` (first candidate).
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    rolls: VecDeque<u32>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: &[u32]) -> Self {
        self.rolls.extend(rolls.iter().copied());
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_percent(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(0)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }
}
