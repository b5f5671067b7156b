use time::OffsetDateTime;
use crate::DATE_FORMAT_STR;

/// Trait to allow verbose logging for the configs and the emulated network.
pub trait Loggable {
    fn is_verbose(&self) -> bool;

    fn vlog(&self, text: &str) -> () {
        if self.is_verbose() {
            println!("{}: {}", OffsetDateTime::now_utc().format(DATE_FORMAT_STR), text);
        }
    }

    /// Log with the simulation clock next to the wall clock.
    fn vlog_at(&self, sim_time: f32, text: &str) -> () {
        if self.is_verbose() {
            println!(
                "{}: [t={:.3}] {}",
                OffsetDateTime::now_utc().format(DATE_FORMAT_STR),
                sim_time,
                text
            );
        }
    }
}
