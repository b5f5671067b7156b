use std::collections::VecDeque;

use crate::network::{Network, Sender, Side};
use crate::packet::{Packet, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    ReadyToSend,
    WaitingForAck,
}

/// Stop-and-wait sender with a single bit of sequence number.
pub struct AlternatingBitSender {
    bit: u32,
    state: State,
    last_sent: Option<Packet>,
    waiting: VecDeque<Message>,
    timeout: f32,
}

impl AlternatingBitSender {
    pub fn new() -> Self {
        Self {
            bit: 0,
            state: State::ReadyToSend,
            last_sent: None,
            waiting: VecDeque::new(),
            timeout: 0.0,
        }
    }

    pub fn state(&self) -> State {
        return self.state;
    }

    pub fn bit(&self) -> u32 {
        return self.bit;
    }

    /// Messages waiting for the outstanding packet to be acknowledged.
    pub fn queued(&self) -> usize {
        return self.waiting.len();
    }

    fn send(&mut self, network: &mut dyn Network, message: Message) {
        debug_assert_eq!(self.state, State::ReadyToSend);
        let packet = Packet::data(self.bit, 0, message.data());
        network.vlog(&format!("A: sending seq {} payload {}", packet.seq, packet.payload_hex()));
        network.transmit(Side::A, packet);
        network.start_timer(Side::A, self.timeout);
        self.last_sent = Some(packet);
        self.state = State::WaitingForAck;
    }
}

impl Default for AlternatingBitSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for AlternatingBitSender {
    fn init(&mut self, network: &mut dyn Network) {
        *self = Self::new();
        self.timeout = network.timeout();
    }

    fn submit(&mut self, network: &mut dyn Network, message: Message) {
        match self.state {
            State::ReadyToSend => self.send(network, message),
            State::WaitingForAck => {
                self.waiting.push_back(message);
                network.vlog(&format!("A: waiting for ack {}, {} messages queued", self.bit, self.waiting.len()));
            }
        }
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if !packet.is_valid() {
            network.vlog("A: corrupted ack, ignoring");
            return;
        }
        if self.state != State::WaitingForAck || packet.ack != self.bit {
            network.vlog(&format!("A: ack {} does not match bit {}, ignoring", packet.ack, self.bit));
            return;
        }
        network.vlog(&format!("A: ack {} received", packet.ack));
        network.stop_timer(Side::A);
        self.bit ^= 1;
        self.state = State::ReadyToSend;
        if let Some(message) = self.waiting.pop_front() {
            self.send(network, message);
        }
    }

    fn on_timeout(&mut self, network: &mut dyn Network) {
        let packet = match self.last_sent {
            Some(packet) if self.state == State::WaitingForAck => packet,
            _ => {
                network.vlog("A: timeout with nothing outstanding, ignoring");
                return;
            }
        };
        network.vlog(&format!("A: timeout, resending seq {}", packet.seq));
        network.transmit(Side::A, packet);
        network.start_timer(Side::A, self.timeout);
    }
}
