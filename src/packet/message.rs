use super::PAYLOAD_SIZE;

/// Opaque message handed over by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    data: [u8; PAYLOAD_SIZE],
}

impl From<&[u8]> for Message {
    /// Longer content is cut to the payload capacity, shorter is zero padded.
    fn from(buffer: &[u8]) -> Self {
        let mut data = [0; PAYLOAD_SIZE];
        let length = buffer.len().min(PAYLOAD_SIZE);
        data[..length].copy_from_slice(&buffer[..length]);
        Self { data }
    }
}

impl From<[u8; PAYLOAD_SIZE]> for Message {
    fn from(data: [u8; PAYLOAD_SIZE]) -> Self {
        Self { data }
    }
}

impl Message {
    pub fn data(&self) -> [u8; PAYLOAD_SIZE] {
        return self.data;
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::{Message, PAYLOAD_SIZE};

    #[test]
    fn should_pad_short_content() {
        let message = Message::from(&b"abc"[..]);
        let mut expected = [0; PAYLOAD_SIZE];
        expected[..3].copy_from_slice(b"abc");
        assert_eq!(message.data(), expected);
    }

    #[test]
    fn should_truncate_long_content() {
        let content = vec![0x41; PAYLOAD_SIZE + 5];
        let message = Message::from(content.as_slice());
        assert_eq!(message.data(), [0x41; PAYLOAD_SIZE]);
    }
}
