use crate::network::{Network, Receiver, Side};
use crate::packet::Packet;

/// Receiving half of the alternating bit protocol.
///
/// A rejected packet is answered with the complement of the expected bit,
/// the sender treats it like any other mismatched ack.
pub struct AlternatingBitReceiver {
    expected: u32,
}

impl AlternatingBitReceiver {
    pub fn new() -> Self {
        Self {
            expected: 0,
        }
    }

    pub fn expected(&self) -> u32 {
        return self.expected;
    }
}

impl Default for AlternatingBitReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver for AlternatingBitReceiver {
    fn init(&mut self, _network: &mut dyn Network) {
        *self = Self::new();
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if packet.is_valid() && packet.seq == self.expected {
            network.vlog(&format!("B: seq {} accepted", packet.seq));
            network.deliver(Side::B, packet.payload);
            network.transmit(Side::B, Packet::control(self.expected));
            self.expected ^= 1;
        } else {
            let nak = self.expected ^ 1;
            network.vlog(&format!("B: rejected packet (valid: {}, seq {}), sending nak {}", packet.is_valid(), packet.seq, nak));
            network.transmit(Side::B, Packet::control(nak));
        }
    }
}
