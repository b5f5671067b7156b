mod enums;
mod packet;
mod checksum;
mod message;

/// Fixed size of the payload carried by every packet.
pub const PAYLOAD_SIZE: usize = 20;

pub use enums::ParsingError;
pub use enums::ToBin;
pub use packet::Packet;
pub use checksum::Checksum;
pub use message::Message;
