use crate::packet::PAYLOAD_SIZE;
use crate::protocol::Protocol;

/// Outcome of a single emulation.
#[derive(Debug, Clone)]
pub struct Report {
    pub protocol: Protocol,
    /// Payloads handed to A, in order.
    pub submitted: Vec<[u8; PAYLOAD_SIZE]>,
    /// Payloads handed to the application at B, in order.
    pub delivered: Vec<[u8; PAYLOAD_SIZE]>,
    pub packets_from_a: usize,
    pub packets_from_b: usize,
    pub lost: usize,
    pub corrupted: usize,
    pub timeouts: usize,
    pub timer_misuse: usize,
    pub finish_time: f32,
    /// Emulation reached the time limit with events still pending.
    pub timed_out: bool,
}

impl Report {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            submitted: Vec::new(),
            delivered: Vec::new(),
            packets_from_a: 0,
            packets_from_b: 0,
            lost: 0,
            corrupted: 0,
            timeouts: 0,
            timer_misuse: 0,
            finish_time: 0.0,
            timed_out: false,
        }
    }

    /// Every submitted message arrived exactly once and in order.
    pub fn is_complete(&self) -> bool {
        return self.submitted == self.delivered;
    }

    /// Delivered messages per unit of simulation time.
    pub fn throughput(&self) -> f32 {
        if self.finish_time <= 0.0 {
            return 0.0;
        }
        return self.delivered.len() as f32 / self.finish_time;
    }

    pub fn summary(&self) -> String {
        return format!(
            "protocol: {}\n\
             messages submitted at A: {}\n\
             messages delivered at B: {}\n\
             delivered in order: {}\n\
             packets sent by A: {}\n\
             packets sent by B: {}\n\
             packets lost: {}\n\
             packets corrupted: {}\n\
             timeouts: {}\n\
             timer misuse: {}\n\
             finished at: {:.3}{}\n\
             throughput: {:.5} messages per time unit",
            self.protocol,
            self.submitted.len(),
            self.delivered.len(),
            self.is_complete(),
            self.packets_from_a,
            self.packets_from_b,
            self.lost,
            self.corrupted,
            self.timeouts,
            self.timer_misuse,
            self.finish_time,
            if self.timed_out { " (time limit reached)" } else { "" },
            self.throughput(),
        );
    }
}


#[cfg(test)]
mod tests {
    use crate::packet::PAYLOAD_SIZE;
    use crate::protocol::Protocol;
    use super::Report;

    #[test]
    fn completeness_needs_order() {
        let mut report = Report::new(Protocol::GoBackN);
        report.submitted = vec![[1; PAYLOAD_SIZE], [2; PAYLOAD_SIZE]];
        report.delivered = vec![[2; PAYLOAD_SIZE], [1; PAYLOAD_SIZE]];
        assert!(!report.is_complete());
        report.delivered.reverse();
        assert!(report.is_complete());
    }

    #[test]
    fn throughput_of_empty_run() {
        let report = Report::new(Protocol::AlternatingBit);
        assert_eq!(report.throughput(), 0.0);
        assert!(report.summary().contains("alternating-bit"));
    }
}
