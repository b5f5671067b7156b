use crate::packet::Message;

#[derive(Debug, Clone)]
struct BufferEntry {
    message: Message,
    acknowledged: bool,
}

/// Messages of the sender indexed by their sequence number.
///
/// The buffer only grows, the index of an entry is its sequence number on
/// the wire for the whole run.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    entries: Vec<BufferEntry>,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append the message and return its sequence number.
    pub fn push(&mut self, message: Message) -> u32 {
        self.entries.push(BufferEntry {
            message,
            acknowledged: false,
        });
        return (self.entries.len() - 1) as u32;
    }

    pub fn len(&self) -> u32 {
        return self.entries.len() as u32;
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    fn get(&self, seq: u32) -> Option<&BufferEntry> {
        return self.entries.get(seq as usize);
    }

    pub fn message(&self, seq: u32) -> Option<Message> {
        return self.get(seq).map(|entry| entry.message);
    }

    pub fn is_acknowledged(&self, seq: u32) -> bool {
        return self.get(seq).map_or(false, |entry| entry.acknowledged);
    }

    /// Mark the entry as acknowledged.
    ///
    /// Returns `None` for a sequence number never buffered, otherwise whether
    /// the flag has just flipped.
    pub fn acknowledge(&mut self, seq: u32) -> Option<bool> {
        let entry = self.entries.get_mut(seq as usize)?;
        let newly = !entry.acknowledged;
        entry.acknowledged = true;
        return Some(newly);
    }
}
