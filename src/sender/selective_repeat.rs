use crate::network::{Network, Sender, Side};
use crate::packet::{Packet, Message};
use super::message_buffer::MessageBuffer;
use super::timer_queue::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    New,
    Retransmit(u32),
}

/// Selective Repeat sender, every packet is acknowledged and timed on its own.
pub struct SelectiveRepeatSender {
    buffer: MessageBuffer,
    timers: TimerQueue,
    base: u32,
    next_seq: u32,
    window_size: u32,
    timeout: f32,
}

impl SelectiveRepeatSender {
    pub fn new() -> Self {
        Self {
            buffer: MessageBuffer::new(),
            timers: TimerQueue::new(),
            base: 0,
            next_seq: 0,
            window_size: 1,
            timeout: 0.0,
        }
    }

    pub fn base(&self) -> u32 {
        return self.base;
    }

    pub fn next_seq(&self) -> u32 {
        return self.next_seq;
    }

    pub fn is_acknowledged(&self, seq: u32) -> bool {
        return self.buffer.is_acknowledged(seq);
    }

    /// Number of logical timers still pending.
    pub fn pending_timers(&self) -> usize {
        return self.timers.len();
    }

    fn window_end(&self) -> u32 {
        return self.base.saturating_add(self.window_size);
    }

    fn is_within_window(&self, seq: u32) -> bool {
        return seq >= self.base && seq < self.window_end();
    }

    /// Transmit either the next new packet or a retransmission.
    ///
    /// Returns whether anything was sent.
    fn try_send(&mut self, network: &mut dyn Network, attempt: Attempt) -> bool {
        let seq = match attempt {
            Attempt::New => self.next_seq,
            Attempt::Retransmit(seq) => seq,
        };
        if !self.is_within_window(seq) {
            network.vlog(&format!("A: seq {} outside of window starting at {}", seq, self.base));
            return false;
        }
        let message = match self.buffer.message(seq) {
            Some(message) => message,
            None => return false,
        };

        let packet = Packet::data(seq, 0, message.data());
        network.vlog(&format!("A: sending seq {} ({:?}) payload {}", seq, attempt, packet.payload_hex()));
        network.transmit(Side::A, packet);
        if attempt == Attempt::New {
            self.next_seq += 1;
        }

        let now = network.now();
        let was_idle = self.timers.is_empty();
        self.timers.push(seq, now, now + self.timeout);
        if was_idle {
            network.start_timer(Side::A, self.timeout);
        }
        return true;
    }

    /// Drop acknowledged front records and arm the timer for the new front.
    fn rearm_timer(&mut self, network: &mut dyn Network) {
        let buffer = &self.buffer;
        let purged = self.timers.purge_front(|seq| buffer.is_acknowledged(seq));
        if purged > 0 {
            network.vlog(&format!("A: {} timers of acknowledged packets dropped", purged));
        }
        if let Some(front) = self.timers.front() {
            let remaining = (front.deadline - network.now()).max(0.0);
            network.vlog(&format!("A: timer armed for seq {} in {:.3}", front.seq, remaining));
            network.start_timer(Side::A, remaining);
        }
    }
}

impl Default for SelectiveRepeatSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for SelectiveRepeatSender {
    fn init(&mut self, network: &mut dyn Network) {
        *self = Self::new();
        self.window_size = network.window_size().max(1);
        self.timeout = network.timeout();
    }

    fn submit(&mut self, network: &mut dyn Network, message: Message) {
        let seq = self.buffer.push(message);
        network.vlog(&format!("A: message buffered as seq {}", seq));
        self.try_send(network, Attempt::New);
    }

    fn on_packet(&mut self, network: &mut dyn Network, packet: Packet) {
        if !packet.is_valid() {
            network.vlog("A: corrupted ack, ignoring");
            return;
        }
        let ack = packet.ack;
        match self.buffer.acknowledge(ack) {
            None => {
                network.vlog(&format!("A: ack {} for packet never sent, ignoring", ack));
                return;
            }
            Some(false) => network.vlog(&format!("A: duplicate ack {}", ack)),
            Some(true) => network.vlog(&format!("A: ack {} received", ack)),
        };

        if ack == self.base {
            while self.buffer.is_acknowledged(self.base) {
                self.base += 1;
            }
            network.vlog(&format!("A: window moved to {}", self.base));
            while self.next_seq < self.window_end() && self.next_seq < self.buffer.len() {
                if !self.try_send(network, Attempt::New) {
                    break;
                }
            }
        }

        if self.timers.front().map(|record| record.seq) == Some(ack) {
            network.stop_timer(Side::A);
            self.timers.pop();
            self.rearm_timer(network);
        }
    }

    fn on_timeout(&mut self, network: &mut dyn Network) {
        let buffer = &self.buffer;
        self.timers.purge_front(|seq| buffer.is_acknowledged(seq));
        let expired = match self.timers.pop() {
            Some(record) => record,
            None => {
                network.vlog("A: stale timeout, nothing pending");
                return;
            }
        };
        network.vlog(&format!("A: timeout of seq {} sent at {:.3}", expired.seq, expired.created));
        self.rearm_timer(network);
        self.try_send(network, Attempt::Retransmit(expired.seq));
    }
}


#[cfg(test)]
mod tests {
    use crate::network::{Call, RecordingNetwork, Sender, Side};
    use crate::packet::{Packet, Message};
    use super::SelectiveRepeatSender;

    fn setup(window_size: u32) -> (SelectiveRepeatSender, RecordingNetwork) {
        let mut network = RecordingNetwork::new(window_size, 15.0);
        let mut sender = SelectiveRepeatSender::new();
        sender.init(&mut network);
        (sender, network)
    }

    fn message(index: u8) -> Message {
        Message::from(&[b'a' + index; 4][..])
    }

    fn sent_sequences(network: &RecordingNetwork) -> Vec<u32> {
        network.transmitted().iter().map(|packet| packet.seq).collect()
    }

    #[test]
    fn out_of_order_ack_waits_for_base() {
        let (mut sender, mut network) = setup(3);
        for i in 0..4 {
            sender.submit(&mut network, message(i));
        }
        assert_eq!(sent_sequences(&network), vec![0, 1, 2]);
        network.take();

        sender.on_packet(&mut network, Packet::control(1));
        assert!(sender.is_acknowledged(1));
        assert_eq!(sender.base(), 0);
        assert!(network.transmitted().is_empty());

        sender.on_packet(&mut network, Packet::control(0));
        assert_eq!(sender.base(), 2);
        assert_eq!(sent_sequences(&network), vec![3]);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn front_ack_rearms_for_next_pending() {
        let (mut sender, mut network) = setup(3);
        sender.submit(&mut network, message(0));
        network.time = 2.0;
        sender.submit(&mut network, message(1));
        network.time = 5.0;
        network.take();

        sender.on_packet(&mut network, Packet::control(0));
        assert_eq!(network.take(), vec![
            Call::StopTimer(Side::A),
            Call::StartTimer(Side::A, 12.0),
        ]);
        assert_eq!(sender.pending_timers(), 1);
    }

    #[test]
    fn acknowledged_records_are_purged() {
        let (mut sender, mut network) = setup(3);
        for i in 0..3 {
            sender.submit(&mut network, message(i));
        }
        sender.on_packet(&mut network, Packet::control(1));
        sender.on_packet(&mut network, Packet::control(2));
        assert_eq!(sender.pending_timers(), 3);

        sender.on_packet(&mut network, Packet::control(0));
        assert_eq!(sender.pending_timers(), 0);
        assert!(!network.is_timer_running(Side::A));
        assert_eq!(sender.base(), 3);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn timeout_resends_only_expired_packet() {
        let (mut sender, mut network) = setup(3);
        for i in 0..3 {
            sender.submit(&mut network, message(i));
        }
        sender.on_packet(&mut network, Packet::control(1));
        network.take();

        network.time = 15.0;
        network.expire_timer(Side::A);
        sender.on_timeout(&mut network);
        assert_eq!(network.take(), vec![
            Call::StartTimer(Side::A, 0.0),
            Call::Transmit(Side::A, Packet::data(0, 0, message(0).data())),
        ]);
        assert_eq!(sender.next_seq(), 3);
        assert_eq!(sender.pending_timers(), 2);

        network.expire_timer(Side::A);
        sender.on_timeout(&mut network);
        assert_eq!(sent_sequences(&network), vec![2]);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn window_bound_holds() {
        let (mut sender, mut network) = setup(2);
        for i in 0..6 {
            sender.submit(&mut network, message(i));
        }
        network.take();
        for ack in vec![1, 0, 3, 2, 5, 4] {
            sender.on_packet(&mut network, Packet::control(ack));
            for packet in network.transmitted() {
                assert!(packet.seq >= sender.base() && packet.seq < sender.base() + 2);
            }
            network.take();
            assert!(sender.next_seq() - sender.base() <= 2);
        }
        assert_eq!(sender.base(), 6);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn largest_window_does_not_overflow() {
        let (mut sender, mut network) = setup(u32::MAX);
        for i in 0..3 {
            sender.submit(&mut network, message(i));
        }
        for ack in vec![1, 0, 2] {
            sender.on_packet(&mut network, Packet::control(ack));
        }
        assert_eq!(sender.base(), 3);
        sender.submit(&mut network, message(3));
        assert_eq!(sender.next_seq(), 4);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn timeout_with_nothing_pending_is_ignored() {
        let (mut sender, mut network) = setup(2);
        sender.submit(&mut network, message(0));
        sender.on_packet(&mut network, Packet::control(0));
        assert_eq!(sender.pending_timers(), 0);
        network.take();

        sender.on_timeout(&mut network);
        assert!(network.take().is_empty());
        assert_eq!(sender.pending_timers(), 0);
        assert_eq!(sender.base(), 1);
        assert_eq!(network.timer_misuse(), 0);
    }

    #[test]
    fn unknown_and_duplicate_acks() {
        let (mut sender, mut network) = setup(2);
        sender.submit(&mut network, message(0));
        sender.on_packet(&mut network, Packet::control(7));
        assert_eq!(sender.base(), 0);

        sender.on_packet(&mut network, Packet::control(0));
        network.take();
        sender.on_packet(&mut network, Packet::control(0));
        assert!(network.take().is_empty());
        assert_eq!(sender.base(), 1);
    }
}
