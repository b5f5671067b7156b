use std::cmp::{Ord, Ordering};

use crate::network::Side;
use crate::packet::Message;

#[derive(Debug, Clone)]
pub enum EventKind {
    /// Application at A hands over a message.
    FromApplication(Message),
    /// Raw packet arrives at the given side.
    FromNetwork(Side, Vec<u8>),
    /// Timer of the side goes off, `generation` identifies the start it belongs to.
    TimerInterrupt(Side, u64),
}

/// Scheduled event of the emulator.
#[derive(Debug, Clone)]
pub struct Event {
    time: f32,
    order: u64,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: f32, order: u64, kind: EventKind) -> Event {
        return Event {
            time,
            order,
            kind,
        };
    }

    pub fn time(&self) -> f32 {
        return self.time;
    }
}

// the heap pops the earliest event first, events at the same time in scheduling order
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        return other.time.partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order));
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        return self.cmp(other) == Ordering::Equal;
    }
}

impl Eq for Event {}
