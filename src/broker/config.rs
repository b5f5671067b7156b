use argparse::{ArgumentParser, StoreTrue, Store};

use crate::loggable::Loggable;
use crate::protocol::Protocol;

#[derive(Clone)]
pub struct Config {
    pub verbose: bool,
    pub protocol: String,
    pub messages: u32,
    pub loss: f32,
    pub corrupt: f32,
    pub interval: f32,
    pub window_size: u32,
    pub timeout: f32,
    pub seed: u64,
    pub max_time: f32,
}

impl Config {
    pub fn new() -> Self {
        return Config {
            verbose: false,
            protocol: String::from("abt"),
            messages: 20,
            loss: 0.0,
            corrupt: 0.0,
            interval: 50.0,
            window_size: 10,
            timeout: 0.0,
            seed: 1234,
            max_time: 1_000_000.0,
        };
    }

    pub fn protocol(&self) -> Result<Protocol, String> {
        return self.protocol.parse();
    }

    pub fn messages(&self) -> u32 {
        return self.messages;
    }

    pub fn loss_prob(&self) -> f32 {
        return self.loss;
    }

    pub fn corrupt_prob(&self) -> f32 {
        return self.corrupt;
    }

    /// Mean time between two messages of the application.
    pub fn interval(&self) -> f32 {
        return self.interval;
    }

    pub fn window_size(&self) -> u32 {
        return self.window_size;
    }

    /// Configured timeout, or the default of the protocol when not set.
    pub fn timeout(&self) -> Result<f32, String> {
        if self.timeout > 0.0 {
            return Ok(self.timeout);
        }
        return Ok(self.protocol()?.default_timeout());
    }

    pub fn seed(&self) -> u64 {
        return self.seed;
    }

    pub fn max_time(&self) -> f32 {
        return self.max_time;
    }

    /// Check the values that can't be expressed by the types.
    pub fn validate(&self) -> Result<(), String> {
        self.protocol()?;
        if !(0.0..=1.0).contains(&self.loss) {
            return Err(format!("Loss probability {} is not between 0 and 1", self.loss));
        }
        if !(0.0..=1.0).contains(&self.corrupt) {
            return Err(format!("Corruption probability {} is not between 0 and 1", self.corrupt));
        }
        if self.window_size == 0 {
            return Err(String::from("Window size must be at least 1"));
        }
        if self.interval <= 0.0 {
            return Err(format!("Message interval {} must be positive", self.interval));
        }
        if self.timeout < 0.0 {
            return Err(format!("Timeout {} can't be negative", self.timeout));
        }
        return Ok(());
    }

    pub fn from_command_line() -> Self {
        let mut config = Config::new();
        {
            let mut parser = ArgumentParser::new();
            parser.set_description("Emulate unidirectional transfer with an ARQ protocol over a lossy channel");
            parser.refer(&mut config.verbose)
                .add_option(&["-v", "--verbose"], StoreTrue, "Verbose output");
            parser.refer(&mut config.protocol)
                .add_option(&["-p", "--protocol"], Store, "Protocol to use: abt, gbn or sr");
            parser.refer(&mut config.messages)
                .add_option(&["-n", "--messages"], Store, "Number of messages to send");
            parser.refer(&mut config.loss)
                .add_option(&["-l", "--loss"], Store, "Probability of packet loss between 0 and 1");
            parser.refer(&mut config.corrupt)
                .add_option(&["-c", "--corrupt"], Store, "Probability of packet corruption between 0 and 1");
            parser.refer(&mut config.interval)
                .add_option(&["-i", "--interval"], Store, "Mean time between messages from the application");
            parser.refer(&mut config.window_size)
                .add_option(&["-w", "--window"], Store, "Size of the window");
            parser.refer(&mut config.timeout)
                .add_option(&["-t", "--timeout"], Store, "Retransmission timeout, 0 for the protocol default");
            parser.refer(&mut config.seed)
                .add_option(&["-s", "--seed"], Store, "Seed of the random generator");
            parser.refer(&mut config.max_time)
                .add_option(&["--max_time"], Store, "Simulation time after which the emulation stops");
            parser.parse_args_or_exit();
        }
        return config;
    }
}

impl Loggable for Config {
    fn is_verbose(&self) -> bool {
        return self.verbose;
    }
}


#[cfg(test)]
mod tests {
    use super::Config;
    use crate::protocol::Protocol;

    #[test]
    fn default_is_valid() {
        let config = Config::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.protocol(), Ok(Protocol::AlternatingBit));
        assert_eq!(config.timeout(), Ok(15.0));
    }

    #[test]
    fn explicit_timeout_wins() {
        let mut config = Config::new();
        config.protocol = String::from("gbn");
        assert_eq!(config.timeout(), Ok(30.0));
        config.timeout = 12.5;
        assert_eq!(config.timeout(), Ok(12.5));
    }

    #[test]
    fn rejects_invalid_values() {
        let mut config = Config::new();
        config.loss = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.window_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.protocol = String::from("udp");
        assert!(config.validate().is_err());
    }
}
