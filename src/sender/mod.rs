mod message_buffer;
mod timer_queue;
mod alternating_bit;
mod go_back_n;
mod selective_repeat;

pub use message_buffer::MessageBuffer;
pub use timer_queue::{TimerQueue, TimerRecord};
pub use alternating_bit::{AlternatingBitSender, State};
pub use go_back_n::GoBackNSender;
pub use selective_repeat::SelectiveRepeatSender;
