use crate::loggable::Loggable;
use crate::packet::{Packet, PAYLOAD_SIZE};
use super::{Network, Side};

/// Single outward call made by an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Transmit(Side, Packet),
    Deliver(Side, [u8; PAYLOAD_SIZE]),
    StartTimer(Side, f32),
    StopTimer(Side),
}

/// Network that only records what the entities ask for.
///
/// Handy to drive a single entity step by step, the caller plays the role
/// of the channel and decides what arrives and when timers fire.
pub struct RecordingNetwork {
    pub time: f32,
    pub verbose: bool,
    window_size: u32,
    timeout: f32,
    calls: Vec<Call>,
    timers: [bool; 2],
    misuse: usize,
}

impl RecordingNetwork {
    pub fn new(window_size: u32, timeout: f32) -> Self {
        Self {
            time: 0.0,
            verbose: false,
            window_size,
            timeout,
            calls: Vec::new(),
            timers: [false; 2],
            misuse: 0,
        }
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<Call> {
        return std::mem::take(&mut self.calls);
    }

    pub fn calls(&self) -> &[Call] {
        return &self.calls;
    }

    /// Packets transmitted since the last `take`.
    pub fn transmitted(&self) -> Vec<Packet> {
        return self.calls.iter()
            .filter_map(|call| match call {
                Call::Transmit(_, packet) => Some(*packet),
                _ => None,
            })
            .collect();
    }

    /// Payloads delivered since the last `take`.
    pub fn delivered(&self) -> Vec<[u8; PAYLOAD_SIZE]> {
        return self.calls.iter()
            .filter_map(|call| match call {
                Call::Deliver(_, payload) => Some(*payload),
                _ => None,
            })
            .collect();
    }

    pub fn is_timer_running(&self, side: Side) -> bool {
        return self.timers[side.index()];
    }

    /// Simulates the timer of `side` going off, the caller then invokes the entity.
    pub fn expire_timer(&mut self, side: Side) {
        self.timers[side.index()] = false;
    }

    /// Number of starts of a running timer and stops of an idle one.
    pub fn timer_misuse(&self) -> usize {
        return self.misuse;
    }
}

impl Loggable for RecordingNetwork {
    fn is_verbose(&self) -> bool {
        return self.verbose;
    }
}

impl Network for RecordingNetwork {
    fn transmit(&mut self, side: Side, packet: Packet) {
        self.calls.push(Call::Transmit(side, packet));
    }

    fn deliver(&mut self, side: Side, payload: [u8; PAYLOAD_SIZE]) {
        self.calls.push(Call::Deliver(side, payload));
    }

    fn start_timer(&mut self, side: Side, duration: f32) {
        if self.timers[side.index()] {
            self.misuse += 1;
        }
        self.timers[side.index()] = true;
        self.calls.push(Call::StartTimer(side, duration));
    }

    fn stop_timer(&mut self, side: Side) {
        if !self.timers[side.index()] {
            self.misuse += 1;
        }
        self.timers[side.index()] = false;
        self.calls.push(Call::StopTimer(side));
    }

    fn now(&self) -> f32 {
        return self.time;
    }

    fn window_size(&self) -> u32 {
        return self.window_size;
    }

    fn timeout(&self) -> f32 {
        return self.timeout;
    }
}
