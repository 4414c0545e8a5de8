// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are owned by the facade and lent to the engines through the
//! engine context, so every product and lookup made on the facade's behalf
//! is counted in one place.

use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Products requested from the element capability.
    Products,
    /// Position-index lookups made while growing.
    Lookups,
    /// Growth steps run by the facade.
    Batches,
    /// Factorizations that needed a walk of the prefix tree.
    WordSearches,
    /// Factorizations built by extending a cached neighbour by one letter.
    CachedWordExtensions,
    /// Generator extensions delegated to the engine.
    IncrementalClosures,
    /// Generator extensions that discarded every cache and restarted.
    Rebuilds,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use strum::IntoEnumIterator;
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        Ok(())
    }
}
