/// Additive fold over the header fields and every payload byte.
///
/// Detects most single-byte changes but corrects nothing, two changes that
/// cancel each other out pass unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    value: u32,
}

impl From<u32> for Checksum {
    fn from(value: u32) -> Self {
        Self { value }
    }
}

impl Checksum {
    pub fn from_packet_content(seq: u32, ack: u32, payload: &[u8]) -> Self {
        let mut sum = seq.wrapping_add(ack);
        for byte in payload {
            sum = sum.wrapping_add(*byte as u32);
        }
        Self { value: sum }
    }

    pub fn value(&self) -> u32 {
        return self.value;
    }

    pub fn is_same(&self, second: &Self) -> bool {
        return self.value == second.value;
    }
}
