use std::cmp::{Ord, Ordering};
use std::collections::BinaryHeap;

/// Logical timer of a single transmission.
#[derive(Debug, Clone, Copy)]
pub struct TimerRecord {
    pub seq: u32,
    pub created: f32,
    pub deadline: f32,
    order: u64,
}

impl Ord for TimerRecord {
    // reversed, the heap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> Ordering {
        return other.deadline.partial_cmp(&self.deadline)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order));
    }
}

impl PartialOrd for TimerRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl PartialEq for TimerRecord {
    fn eq(&self, other: &Self) -> bool {
        return self.cmp(other) == Ordering::Equal;
    }
}

impl Eq for TimerRecord {}

/// Logical per-packet timers multiplexed onto the single physical timer.
///
/// Records are kept by deadline, ties broken by insertion order. The
/// physical timer always tracks the front record.
#[derive(Debug, Default)]
pub struct TimerQueue {
    records: BinaryHeap<TimerRecord>,
    pushed: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            records: BinaryHeap::new(),
            pushed: 0,
        }
    }

    pub fn push(&mut self, seq: u32, created: f32, deadline: f32) {
        self.records.push(TimerRecord {
            seq,
            created,
            deadline,
            order: self.pushed,
        });
        self.pushed += 1;
    }

    /// Record with the earliest deadline.
    pub fn front(&self) -> Option<&TimerRecord> {
        return self.records.peek();
    }

    pub fn pop(&mut self) -> Option<TimerRecord> {
        return self.records.pop();
    }

    /// Drop front records whose sequence number is already acknowledged.
    pub fn purge_front<F: Fn(u32) -> bool>(&mut self, is_acknowledged: F) -> usize {
        let mut purged = 0;
        while let Some(record) = self.records.peek() {
            if !is_acknowledged(record.seq) {
                break;
            }
            self.records.pop();
            purged += 1;
        }
        return purged;
    }

    pub fn len(&self) -> usize {
        return self.records.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }
}


#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn pops_earliest_deadline_first() {
        let mut queue = TimerQueue::new();
        queue.push(2, 4.0, 19.0);
        queue.push(0, 0.0, 15.0);
        queue.push(1, 2.0, 17.0);
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop().map(|r| r.seq)).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let mut queue = TimerQueue::new();
        queue.push(5, 1.0, 16.0);
        queue.push(3, 1.0, 16.0);
        queue.push(4, 1.0, 16.0);
        assert_eq!(queue.pop().map(|r| r.seq), Some(5));
        assert_eq!(queue.pop().map(|r| r.seq), Some(3));
        assert_eq!(queue.pop().map(|r| r.seq), Some(4));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn purge_stops_at_pending_record() {
        let mut queue = TimerQueue::new();
        queue.push(0, 0.0, 15.0);
        queue.push(1, 1.0, 16.0);
        queue.push(2, 2.0, 17.0);
        queue.push(3, 3.0, 18.0);
        let purged = queue.purge_front(|seq| seq == 0 || seq == 1 || seq == 3);
        assert_eq!(purged, 2);
        assert_eq!(queue.front().map(|r| r.seq), Some(2));
        assert_eq!(queue.len(), 2);
    }
}
