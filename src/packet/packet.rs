use byteorder::{NetworkEndian, ByteOrder};
use itertools::Itertools;
use super::{ToBin, ParsingError, Checksum, PAYLOAD_SIZE};

/// Packet exchanged between A and B.
///
/// Data packets carry a message from A, control packets (ACK or NAK) go
/// back from B and only their `ack` field is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub seq: u32,
    pub ack: u32,
    pub checksum: u32,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl ToBin for Packet {
    fn bin_size(&self) -> usize {
        Self::bin_size()
    }

    fn to_bin_buff(&self, buff: &mut [u8]) -> usize {
        debug_assert!(buff.len() >= Self::bin_size());
        NetworkEndian::write_u32(&mut buff[..4], self.seq);
        NetworkEndian::write_u32(&mut buff[4..8], self.ack);
        NetworkEndian::write_u32(&mut buff[8..12], self.checksum);
        buff[12..Self::bin_size()].copy_from_slice(&self.payload);
        return Self::bin_size();
    }

    fn from_bin(memory: &[u8]) -> Result<Self, ParsingError> {
        if memory.len() != Self::bin_size() {
            return Err(ParsingError::InvalidSize(Self::bin_size(), memory.len()));
        }
        let mut payload = [0; PAYLOAD_SIZE];
        payload.copy_from_slice(&memory[12..]);
        Ok(Packet {
            seq: NetworkEndian::read_u32(&memory[..4]),
            ack: NetworkEndian::read_u32(&memory[4..8]),
            checksum: NetworkEndian::read_u32(&memory[8..12]),
            payload,
        })
    }
}

impl Packet {
    pub fn bin_size() -> usize {
        return 12 + PAYLOAD_SIZE;
    }

    /// Build data packet carrying `payload`.
    pub fn data(seq: u32, ack: u32, payload: [u8; PAYLOAD_SIZE]) -> Self {
        let mut packet = Packet {
            seq,
            ack,
            checksum: 0,
            payload,
        };
        packet.checksum = packet.compute_checksum().value();
        return packet;
    }

    /// Build ACK or NAK packet, the payload stays zeroed.
    pub fn control(ack: u32) -> Self {
        return Self::data(0, ack, [0; PAYLOAD_SIZE]);
    }

    pub fn compute_checksum(&self) -> Checksum {
        return Checksum::from_packet_content(self.seq, self.ack, &self.payload);
    }

    /// Whether the stored checksum matches the content.
    pub fn is_valid(&self) -> bool {
        return self.compute_checksum().is_same(&Checksum::from(self.checksum));
    }

    pub fn payload_hex(&self) -> String {
        return self.payload.iter()
            .map(|byte| format!("{:02x}", byte))
            .join("");
    }
}


#[cfg(test)]
mod tests {
    mod checksum {
        use crate::packet::{Packet, ToBin, PAYLOAD_SIZE};

        fn payload() -> [u8; PAYLOAD_SIZE] {
            let mut payload = [0; PAYLOAD_SIZE];
            payload.copy_from_slice(b"aaaaabbbbbcccccddddd");
            payload
        }

        #[test]
        fn built_data_packet_is_valid() {
            let packet = Packet::data(7, 3, payload());
            assert!(packet.is_valid());
            let expected = 7 + 3 + payload().iter().map(|b| *b as u32).sum::<u32>();
            assert_eq!(packet.checksum, expected);
        }

        #[test]
        fn built_control_packet_is_valid() {
            let packet = Packet::control(1);
            assert!(packet.is_valid());
            assert_eq!(packet.ack, 1);
            assert_eq!(packet.seq, 0);
            assert_eq!(packet.payload, [0; PAYLOAD_SIZE]);
        }

        #[test]
        fn any_flipped_byte_is_detected() {
            let original = Packet::data(2, 0, payload()).to_bin();
            for position in 0..original.len() {
                let mut corrupted = original.clone();
                corrupted[position] ^= 0x01;
                let packet = Packet::from_bin(&corrupted).unwrap();
                assert!(!packet.is_valid(), "flip at byte {} not detected", position);
            }
        }

        #[test]
        fn header_change_is_detected() {
            let mut packet = Packet::data(1, 0, payload());
            packet.seq = 999999;
            assert!(!packet.is_valid());
            let mut packet = Packet::control(0);
            packet.ack = 999999;
            assert!(!packet.is_valid());
        }
    }

    mod binary {
        use crate::packet::{Packet, ToBin, ParsingError, PAYLOAD_SIZE};

        #[test]
        fn should_write_network_order() {
            let packet = Packet {
                seq: 1 << 8,
                ack: 5,
                checksum: 0x0102_0304,
                payload: [7; PAYLOAD_SIZE],
            };
            let actual = packet.to_bin();
            let mut expected: Vec<u8> = vec![
                0, 0, 1, 0, //seq
                0, 0, 0, 5, //ack
                1, 2, 3, 4, //checksum
            ];
            expected.extend_from_slice(&[7; PAYLOAD_SIZE]);
            assert_eq!(actual, expected);
        }

        #[test]
        fn should_parse_without_validation() {
            let mut data: Vec<u8> = vec![
                0, 0, 0, 9, //seq
                0, 0, 0, 1, //ack
                0, 0, 0, 0, //checksum, wrong on purpose
            ];
            data.extend_from_slice(&[3; PAYLOAD_SIZE]);
            let packet = Packet::from_bin(&data).unwrap();
            assert_eq!(packet.seq, 9);
            assert_eq!(packet.ack, 1);
            assert_eq!(packet.payload, [3; PAYLOAD_SIZE]);
            assert!(!packet.is_valid());
        }

        #[test]
        fn data_too_short() {
            let data = vec![0; 12 + PAYLOAD_SIZE - 1];
            match Packet::from_bin(&data) {
                Err(ParsingError::InvalidSize(expected, actual)) => {
                    assert_eq!(expected, 32);
                    assert_eq!(actual, 31);
                }
                rest => panic!("{:?}", rest),
            }
        }

        #[test]
        fn hex_payload() {
            let mut payload = [0; PAYLOAD_SIZE];
            payload[0] = 0xab;
            payload[1] = 0x01;
            let packet = Packet::data(0, 0, payload);
            assert!(packet.payload_hex().starts_with("ab0100"));
            assert_eq!(packet.payload_hex().len(), 2 * PAYLOAD_SIZE);
        }
    }
}
