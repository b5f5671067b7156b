use std::collections::BinaryHeap;

use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

use super::config::Config;
use super::event::{Event, EventKind};
use super::report::Report;
use crate::loggable::Loggable;
use crate::network::{Network, Side};
use crate::packet::{Message, Packet, ToBin, PAYLOAD_SIZE};
use crate::protocol::Protocol;

/// Discrete-event emulator of the channel between A and B.
///
/// Packets are copied to bytes on the way in, may be dropped or have a
/// byte altered, and arrive in the order they were sent within a direction.
pub struct Emulator {
    config: Config,
    protocol: Protocol,
    timeout: f32,
    rng: StdRng,
    unif: Uniform<f32>,
    time: f32,
    events: BinaryHeap<Event>,
    scheduled: u64,
    last_arrival: [f32; 2],
    timers: [Option<u64>; 2],
    generated: u32,
    report: Report,
}

impl Emulator {
    pub fn new(config: Config) -> Result<Self, String> {
        config.validate()?;
        let protocol = config.protocol()?;
        let timeout = config.timeout()?;
        let rng = StdRng::seed_from_u64(config.seed());
        config.vlog(&format!(
            "Emulating {} with window {}, timeout {}, loss {}, corruption {}",
            protocol,
            config.window_size(),
            timeout,
            config.loss_prob(),
            config.corrupt_prob()
        ));
        Ok(Self {
            config,
            protocol,
            timeout,
            rng,
            unif: Uniform::new(0.0, 1.0),
            time: 0.0,
            events: BinaryHeap::new(),
            scheduled: 0,
            last_arrival: [0.0; 2],
            timers: [None; 2],
            generated: 0,
            report: Report::new(protocol),
        })
    }

    pub fn protocol(&self) -> Protocol {
        return self.protocol;
    }

    pub fn report(&self) -> &Report {
        return &self.report;
    }

    fn schedule(&mut self, time: f32, kind: EventKind) -> u64 {
        let order = self.scheduled;
        self.scheduled += 1;
        self.events.push(Event::new(time, order, kind));
        return order;
    }

    /// Plan the next message of the application, if there is any left.
    fn schedule_next_message(&mut self) {
        if self.generated >= self.config.messages() {
            return;
        }
        let delay = self.config.interval() * 2.0 * self.rng.sample(self.unif);
        let message = message_content(self.generated);
        self.generated += 1;
        self.schedule(self.time + delay, EventKind::FromApplication(message));
    }

    /// Alter one byte, most of the time in the payload, otherwise in seq or ack.
    fn corrupt(&mut self, bytes: &mut [u8]) {
        let x = self.rng.sample(self.unif);
        let (start, end) = if x < 0.75 {
            (12, bytes.len())
        } else if x < 0.875 {
            (0, 4)
        } else {
            (4, 8)
        };
        let position = self.rng.gen_range(start, end);
        bytes[position] ^= self.rng.gen_range(1u8, 255u8);
    }
}

impl Loggable for Emulator {
    fn is_verbose(&self) -> bool {
        return self.config.is_verbose();
    }

    fn vlog(&self, text: &str) -> () {
        self.vlog_at(self.time, text);
    }
}

impl Network for Emulator {
    fn transmit(&mut self, side: Side, packet: Packet) {
        match side {
            Side::A => self.report.packets_from_a += 1,
            Side::B => self.report.packets_from_b += 1,
        };
        if self.rng.sample(self.unif) < self.config.loss_prob() {
            self.report.lost += 1;
            self.vlog(&format!("Channel: packet from {:?} lost (seq {}, ack {})", side, packet.seq, packet.ack));
            return;
        }

        let destination = side.other();
        let since = self.time.max(self.last_arrival[destination.index()]);
        let arrival = since + 1.0 + 9.0 * self.rng.sample(self.unif);
        self.last_arrival[destination.index()] = arrival;

        let mut bytes = packet.to_bin();
        if self.rng.sample(self.unif) < self.config.corrupt_prob() {
            self.report.corrupted += 1;
            self.corrupt(&mut bytes);
            self.vlog(&format!("Channel: packet from {:?} corrupted (seq {}, ack {})", side, packet.seq, packet.ack));
        }
        self.schedule(arrival, EventKind::FromNetwork(destination, bytes));
    }

    fn deliver(&mut self, side: Side, payload: [u8; PAYLOAD_SIZE]) {
        self.vlog(&format!("{:?}: delivered {}", side, String::from_utf8_lossy(&payload)));
        if side == Side::B {
            self.report.delivered.push(payload);
        }
    }

    fn start_timer(&mut self, side: Side, duration: f32) {
        if self.timers[side.index()].is_some() {
            self.report.timer_misuse += 1;
            self.vlog(&format!("Warning: {:?} starts a timer that is already running, ignoring", side));
            return;
        }
        let generation = self.schedule(self.time + duration, EventKind::TimerInterrupt(side, self.scheduled));
        self.timers[side.index()] = Some(generation);
    }

    fn stop_timer(&mut self, side: Side) {
        if self.timers[side.index()].take().is_none() {
            self.report.timer_misuse += 1;
            self.vlog(&format!("Warning: {:?} stops a timer that is not running", side));
        }
    }

    fn now(&self) -> f32 {
        return self.time;
    }

    fn window_size(&self) -> u32 {
        return self.config.window_size();
    }

    fn timeout(&self) -> f32 {
        return self.timeout;
    }
}

/// Content of the `index`-th message, unique so reordering shows up.
pub fn message_content(index: u32) -> Message {
    let letter = b'a' + (index % 26) as u8;
    let mut data = [letter; PAYLOAD_SIZE];
    let digits = format!("{:08}", index % 100_000_000);
    data[..8].copy_from_slice(digits.as_bytes());
    return Message::from(data);
}

/// Run one emulation until no event is left or the time limit is reached.
pub fn run(config: Config) -> Result<Report, String> {
    let mut emulator = Emulator::new(config)?;
    let mut sender = emulator.protocol().sender();
    let mut receiver = emulator.protocol().receiver();
    sender.init(&mut emulator);
    receiver.init(&mut emulator);
    emulator.schedule_next_message();

    while let Some(event) = emulator.events.pop() {
        if event.time() > emulator.config.max_time() {
            emulator.report.timed_out = true;
            emulator.vlog("Time limit reached, stopping");
            break;
        }
        emulator.time = event.time();
        match event.kind {
            EventKind::FromApplication(message) => {
                emulator.report.submitted.push(message.data());
                emulator.vlog(&format!("A: application submits {}", String::from_utf8_lossy(&message.data())));
                sender.submit(&mut emulator, message);
                emulator.schedule_next_message();
            }
            EventKind::FromNetwork(side, bytes) => {
                let packet = match Packet::from_bin(&bytes) {
                    Ok(packet) => packet,
                    Err(e) => {
                        emulator.vlog(&format!("Channel: can't parse packet for {:?}: {:?}", side, e));
                        continue;
                    }
                };
                match side {
                    Side::A => sender.on_packet(&mut emulator, packet),
                    Side::B => receiver.on_packet(&mut emulator, packet),
                };
            }
            EventKind::TimerInterrupt(side, generation) => {
                if emulator.timers[side.index()] != Some(generation) {
                    // timer was stopped after this event got scheduled
                    continue;
                }
                emulator.timers[side.index()] = None;
                emulator.report.timeouts += 1;
                if side == Side::A {
                    sender.on_timeout(&mut emulator);
                }
            }
        };
    }

    emulator.report.finish_time = emulator.time;
    emulator.vlog(&format!(
        "Emulation finished, {} of {} messages delivered",
        emulator.report.delivered.len(),
        emulator.report.submitted.len()
    ));
    return Ok(emulator.report);
}
