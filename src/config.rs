use std::fmt::Display;
use std::str::FromStr;

/// Which search driver carries out the enumeration.
///
/// `Explicit` keeps one bidomain per active label class and filters for
/// adjacency at selection time (needed to support unconnected search).
/// `Implicit` only ever carries bidomains adjacent to the last-mapped pair,
/// so every partial mapping it grows is connected by construction; it only
/// makes sense when [`Config::connected`] is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Explicit,
    Implicit,
}

impl Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::Explicit
    }
}

impl FromStr for Driver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(Driver::Explicit),
            "implicit" => Ok(Driver::Implicit),
            other => Err(format!("unknown driver {other:?}, expected explicit or implicit")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub driver: Driver,
    /// Restrict the search to connected common induced subgraphs.
    pub connected: bool,
    /// Suppress per-solution output; only the summary line is printed.
    pub quiet: bool,
    /// Emit `debug`-level progress logging.
    pub verbose: bool,
    /// Abort and report whatever was found after this many seconds, `0` for
    /// no limit.
    pub timeout: u64,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "driver: {}, connected: {}, timeout: {}s",
            self.driver, self.connected, self.timeout
        )
    }
}

impl Config {
    pub fn new(driver: Driver, connected: bool, quiet: bool, verbose: bool, timeout: u64) -> Self {
        Config {
            driver,
            connected,
            quiet,
            verbose,
            timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            driver: Driver::default(),
            connected: false,
            quiet: false,
            verbose: false,
            timeout: 0,
        }
    }
}

impl From<Driver> for Config {
    fn from(driver: Driver) -> Self {
        Config {
            driver,
            ..Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_driver_is_explicit() {
        assert_eq!(Config::default().driver, Driver::Explicit);
    }

    #[test]
    fn driver_parses_from_str() {
        assert_eq!("explicit".parse::<Driver>().unwrap(), Driver::Explicit);
        assert_eq!("implicit".parse::<Driver>().unwrap(), Driver::Implicit);
        assert!("fast".parse::<Driver>().is_err());
    }

    #[test]
    fn display_is_stable() {
        let config = Config::new(Driver::Implicit, true, false, false, 30);
        assert_eq!(config.to_string(), "driver: Implicit, connected: true, timeout: 30s");
    }
}
