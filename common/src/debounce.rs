//! Generation counter for debounced inputs.
//!
//! Each keystroke takes a ticket, waits [`SEARCH_DEBOUNCE_MS`], then runs only
//! if no newer ticket was issued in between.

use crate::store_const::SEARCH_DEBOUNCE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
    delay_ms: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self { generation: 0, delay_ms: SEARCH_DEBOUNCE_MS }
    }
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Supersede every earlier ticket.
    pub fn schedule(&mut self) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}
