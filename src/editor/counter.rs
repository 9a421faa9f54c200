// src/editor/counter.rs

/// Index source for new highlight sections. Only ever moves forward, so a
/// removed section's index is never handed out again.
///
/// Seeds arrive as `u32` from the page and are held as `u64`, so advancing
/// from any seed never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightCounter {
    value: u64,
}

impl HighlightCounter {
    /// The capture form ships with one section already rendered at index 0.
    pub const INITIAL: u32 = 1;

    pub fn new() -> Self {
        Self::seeded(Self::INITIAL)
    }

    pub fn seeded(value: u32) -> Self {
        HighlightCounter { value: u64::from(value) }
    }

    /// Defines the counter in `slot` unless it already holds one. Running the
    /// guard again never resets a live counter.
    pub fn init(slot: &mut Option<HighlightCounter>) -> HighlightCounter {
        *slot.get_or_insert_with(HighlightCounter::new)
    }

    pub fn current(&self) -> u64 {
        self.value
    }

    /// Returns the current value and advances past it.
    pub fn next_index(&mut self) -> u64 {
        let index = self.value;
        self.value += 1;
        index
    }
}

impl Default for HighlightCounter {
    fn default() -> Self {
        Self::new()
    }
}
