const DATE_FORMAT_STR: &'static str = "%Y-%m-%d %H:%M:%S.%N";

mod loggable;
pub use loggable::Loggable;

pub mod packet;
pub mod network;
pub mod protocol;

pub mod sender;
pub mod receiver;
pub mod broker;
