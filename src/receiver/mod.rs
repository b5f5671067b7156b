mod alternating_bit;
mod go_back_n;
mod selective_repeat;

pub use alternating_bit::AlternatingBitReceiver;
pub use go_back_n::GoBackNReceiver;
pub use selective_repeat::SelectiveRepeatReceiver;
