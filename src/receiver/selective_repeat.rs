use std::collections::BTreeMap;

use crate::network::{Network, Receiver, Side};
use crate::packet::Packet;

/// Receiver buffering packets that arrive ahead of the window base.
pub struct SelectiveRepeatReceiver {
    base: u32,
    window_size: u32,
    out_of_order: BTreeMap<u32, Packet>,
}

impl SelectiveRepeatReceiver {
    pub fn new() -> Self {
        Self {
            base: 0,
            window_size: 1,
            out_of_order: BTreeMap::new(),
        }
    }

    pub fn base(&self) -> u32 {
        return self.base;
    }

    /// Sequence numbers waiting for the gap before them to be filled.
    pub fn buffered(&self) -> Vec<u32> {
        return self.out_of_order.keys().cloned().collect();
    }

    pub fn is_within_window(&self, seq: u32) -> bool {
        return seq >= self.base && seq < self.base.saturating_add(self.window_size);
    }
}

impl Default for SelectiveRepeatReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver for SelectiveRepeatReceiver {
    fn init(&mut self, network: &mut dyn Network) {
        *self = Self::new();
        self.window_size = network.window_size().max(1);
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if !packet.is_valid() {
            network.vlog("B: corrupted packet, ignoring");
            return;
        }
        // every valid packet is acknowledged, even outside of the window
        network.transmit(Side::B, Packet::control(packet.seq));

        if !self.is_within_window(packet.seq) {
            network.vlog(&format!("B: seq {} outside of window starting at {}", packet.seq, self.base));
            return;
        }
        if packet.seq != self.base {
            network.vlog(&format!("B: seq {} buffered, waiting for {}", packet.seq, self.base));
            self.out_of_order.insert(packet.seq, packet);
            return;
        }

        network.deliver(Side::B, packet.payload);
        self.base += 1;
        while let Some(buffered) = self.out_of_order.remove(&self.base) {
            network.deliver(Side::B, buffered.payload);
            self.base += 1;
        }
        network.vlog(&format!("B: window moved to {}", self.base));
    }
}
