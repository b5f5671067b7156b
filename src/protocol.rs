use std::fmt;
use std::str::FromStr;

use crate::network::{Sender, Receiver};
use crate::sender::{AlternatingBitSender, GoBackNSender, SelectiveRepeatSender};
use crate::receiver::{AlternatingBitReceiver, GoBackNReceiver, SelectiveRepeatReceiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    AlternatingBit,
    GoBackN,
    SelectiveRepeat,
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "abt" | "alternating-bit" => Ok(Protocol::AlternatingBit),
            "gbn" | "go-back-n" => Ok(Protocol::GoBackN),
            "sr" | "selective-repeat" => Ok(Protocol::SelectiveRepeat),
            _ => Err(format!("Unknown protocol {}, expected one of abt, gbn, sr", name)),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::AlternatingBit => "alternating-bit",
            Protocol::GoBackN => "go-back-n",
            Protocol::SelectiveRepeat => "selective-repeat",
        };
        write!(f, "{}", name)
    }
}

impl Protocol {
    pub fn sender(&self) -> Box<dyn Sender> {
        match self {
            Protocol::AlternatingBit => Box::new(AlternatingBitSender::new()),
            Protocol::GoBackN => Box::new(GoBackNSender::new()),
            Protocol::SelectiveRepeat => Box::new(SelectiveRepeatSender::new()),
        }
    }

    pub fn receiver(&self) -> Box<dyn Receiver> {
        match self {
            Protocol::AlternatingBit => Box::new(AlternatingBitReceiver::new()),
            Protocol::GoBackN => Box::new(GoBackNReceiver::new()),
            Protocol::SelectiveRepeat => Box::new(SelectiveRepeatReceiver::new()),
        }
    }

    /// Retransmission interval used when none is configured.
    pub fn default_timeout(&self) -> f32 {
        match self {
            Protocol::AlternatingBit => 15.0,
            Protocol::GoBackN => 30.0,
            Protocol::SelectiveRepeat => 15.0,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::Protocol;

    #[test]
    fn parse_short_and_long_names() {
        assert_eq!("abt".parse::<Protocol>(), Ok(Protocol::AlternatingBit));
        assert_eq!("GBN".parse::<Protocol>(), Ok(Protocol::GoBackN));
        assert_eq!("selective-repeat".parse::<Protocol>(), Ok(Protocol::SelectiveRepeat));
        assert!("tcp".parse::<Protocol>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for protocol in vec![Protocol::AlternatingBit, Protocol::GoBackN, Protocol::SelectiveRepeat] {
            assert_eq!(protocol.to_string().parse::<Protocol>(), Ok(protocol));
        }
    }
}
