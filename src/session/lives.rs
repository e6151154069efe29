//! Life counter

/// Remaining lives; zero is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives {
    remaining: u32,
    starting: u32,
}

impl Lives {
    #[must_use]
    pub const fn new(starting: u32) -> Self {
        Self {
            remaining: starting,
            starting,
        }
    }

    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    #[must_use]
    pub const fn starting(&self) -> u32 {
        self.starting
    }

    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Take one life, returning what is left (never below zero)
    pub const fn lose(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub const fn reset(&mut self) {
        self.remaining = self.starting;
    }
}

impl Default for Lives {
    fn default() -> Self {
        Self::new(3)
    }
}
