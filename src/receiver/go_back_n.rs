use crate::network::{Network, Receiver, Side};
use crate::packet::Packet;

/// Strictly in-order receiver.
///
/// Only the expected packet is answered. Corrupted packets, duplicates and
/// packets ahead of the expected one are dropped silently, the sender
/// recovers through its timeout.
pub struct GoBackNReceiver {
    expected: u32,
}

impl GoBackNReceiver {
    pub fn new() -> Self {
        Self {
            expected: 0,
        }
    }

    pub fn expected(&self) -> u32 {
        return self.expected;
    }
}

impl Default for GoBackNReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver for GoBackNReceiver {
    fn init(&mut self, _network: &mut dyn Network) {
        *self = Self::new();
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if !packet.is_valid() {
            network.vlog("B: corrupted packet, ignoring");
            return;
        }
        if packet.seq != self.expected {
            network.vlog(&format!("B: seq {} while expecting {}, ignoring", packet.seq, self.expected));
            return;
        }
        network.vlog(&format!("B: seq {} accepted", packet.seq));
        network.deliver(Side::B, packet.payload);
        network.transmit(Side::B, Packet::control(self.expected));
        self.expected += 1;
    }
}
