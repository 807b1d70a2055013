/// How much the store reports through `defmt`. Ignored when the `defmt` feature is disabled.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Nothing at all
    Off,
    /// Failures only
    #[default]
    Error,
    /// Failures and completed saves/erases
    Info,
    /// Every step of the erase/program sequence
    Debug,
    /// Also dumps the checksums computed and read back
    Trace,
}

/// Runtime configuration of a [`BlobStore`](crate::blocking::BlobStore)
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub verbosity: Verbosity,
}

impl Config {
    /// Create a configuration with the given verbosity
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Check if messages of `level` should be emitted
    pub fn logs(&self, level: Verbosity) -> bool {
        level != Verbosity::Off && level <= self.verbosity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_only_logs_errors() {
        let cfg = Config::default();
        assert!(cfg.logs(Verbosity::Error));
        assert!(!cfg.logs(Verbosity::Info));
        assert!(!cfg.logs(Verbosity::Off));
    }

    #[test]
    fn off_logs_nothing() {
        let cfg = Config::new(Verbosity::Off);
        assert!(!cfg.logs(Verbosity::Error));
        assert!(!cfg.logs(Verbosity::Trace));
    }

    #[test]
    fn trace_logs_everything() {
        let cfg = Config::new(Verbosity::Trace);
        assert!(cfg.logs(Verbosity::Error));
        assert!(cfg.logs(Verbosity::Debug));
        assert!(cfg.logs(Verbosity::Trace));
    }
}
