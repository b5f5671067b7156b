//! Boundary between the protocol entities and whatever drives them.
//!
//! The entities never own a socket or a clock. Everything that leaves an
//! entity goes through [`Network`], everything that enters it comes through
//! the [`Sender`] and [`Receiver`] entry points.

mod recording;

use crate::loggable::Loggable;
use crate::packet::{Packet, Message, PAYLOAD_SIZE};

pub use recording::{Call, RecordingNetwork};

/// Entity of the transfer, A sends the data and B receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Services the entities call outwards.
///
/// `side` is always the calling entity. There is a single timer per entity,
/// starting it while it runs is a misuse the entities avoid.
pub trait Network: Loggable {
    /// Hand the packet to the channel leading away from `side`.
    fn transmit(&mut self, side: Side, packet: Packet);

    /// Hand the payload to the application at `side`.
    fn deliver(&mut self, side: Side, payload: [u8; PAYLOAD_SIZE]);

    fn start_timer(&mut self, side: Side, duration: f32);

    fn stop_timer(&mut self, side: Side);

    /// Simulation clock.
    fn now(&self) -> f32;

    /// Window size, read once when the entity is initialized.
    fn window_size(&self) -> u32;

    /// Retransmission interval, read once when the entity is initialized.
    fn timeout(&self) -> f32;
}

/// Sending half of a protocol, it lives at [`Side::A`].
pub trait Sender {
    /// Reset the state, called before anything else.
    fn init(&mut self, network: &mut dyn Network);

    /// Message from the application.
    fn submit(&mut self, network: &mut dyn Network, message: Message);

    /// Acknowledgment from the network.
    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet);

    /// Timer of the sender went off.
    fn on_timeout(&mut self, network: &mut dyn Network);
}

/// Receiving half of a protocol, it lives at [`Side::B`] and never owns a timer.
pub trait Receiver {
    fn init(&mut self, network: &mut dyn Network);

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet);
}
