use crate::network::{Network, Sender, Side};
use crate::packet::{Packet, Message};
use super::message_buffer::MessageBuffer;

/// Go-Back-N sender with cumulative acknowledgments and one timer for the window.
pub struct GoBackNSender {
    buffer: MessageBuffer,
    base: u32,
    next_seq: u32,
    window_size: u32,
    timeout: f32,
}

impl GoBackNSender {
    pub fn new() -> Self {
        Self {
            buffer: MessageBuffer::new(),
            base: 0,
            next_seq: 0,
            window_size: 1,
            timeout: 0.0,
        }
    }

    /// Oldest unacknowledged sequence number.
    pub fn base(&self) -> u32 {
        return self.base;
    }

    pub fn next_seq(&self) -> u32 {
        return self.next_seq;
    }

    pub fn is_acknowledged(&self, seq: u32) -> bool {
        return self.buffer.is_acknowledged(seq);
    }

    /// First sequence number past the window.
    fn window_end(&self) -> u32 {
        return self.base.saturating_add(self.window_size);
    }

    /// Send everything the window and the buffer allow.
    fn send_window(&mut self, network: &mut dyn Network) {
        while self.next_seq < self.window_end() && self.next_seq < self.buffer.len() {
            let message = match self.buffer.message(self.next_seq) {
                Some(message) => message,
                None => break,
            };
            let packet = Packet::data(self.next_seq, 0, message.data());
            network.vlog(&format!("A: sending seq {} payload {}", packet.seq, packet.payload_hex()));
            network.transmit(Side::A, packet);
            if self.base == self.next_seq {
                network.start_timer(Side::A, self.timeout);
            }
            self.next_seq += 1;
        }
    }
}

impl Default for GoBackNSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for GoBackNSender {
    fn init(&mut self, network: &mut dyn Network) {
        *self = Self::new();
        self.window_size = network.window_size().max(1);
        self.timeout = network.timeout();
    }

    fn submit(&mut self, network: &mut dyn Network, message: Message) {
        let seq = self.buffer.push(message);
        network.vlog(&format!("A: message buffered as seq {}", seq));
        self.send_window(network);
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if !packet.is_valid() {
            network.vlog("A: corrupted ack, ignoring");
            return;
        }
        if packet.ack < self.base || packet.ack >= self.next_seq {
            network.vlog(&format!(
                "A: ack {} outside of outstanding range [{}, {}), ignoring",
                packet.ack,
                self.base,
                self.next_seq
            ));
            return;
        }
        let newly = (self.base..=packet.ack)
            .filter(|seq| self.buffer.acknowledge(*seq) == Some(true))
            .count();
        self.base = packet.ack + 1;
        network.vlog(&format!(
            "A: cumulative ack {} covers {} packets, base moved to {}",
            packet.ack,
            newly,
            self.base
        ));
        network.stop_timer(Side::A);
        if self.base != self.next_seq {
            network.start_timer(Side::A, self.timeout);
        }
        // acknowledgment opened the window
        self.send_window(network);
    }

    fn on_timeout(&mut self, network: &mut dyn Network) {
        network.vlog(&format!("A: timeout, going back to seq {}", self.base));
        self.next_seq = self.base;
        self.send_window(network);
    }
}
