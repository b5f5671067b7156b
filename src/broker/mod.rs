pub mod config;
pub mod logic;
mod event;
mod report;

pub use logic::{run, Emulator, message_content};
pub use report::Report;
