//! Logging macros. They forward to `defmt` when the feature is enabled and the runtime
//! [`Config`](crate::config::Config) allows the level, and compile to nothing otherwise.
#![allow(unused_macros)]

macro_rules! log_at {
    ($defmt:ident, $level:ident, $cfg:expr, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        if $cfg.logs($crate::config::Verbosity::$level) {
            ::defmt::$defmt!($s $(, $x)*);
        };
        #[cfg(not(feature = "defmt"))]
        let _ = (&$cfg, $( & $x ),*);
    }};
}

macro_rules! trace {
    ($cfg:expr, $s:literal $(, $x:expr)* $(,)?) => {
        log_at!(trace, Trace, $cfg, $s $(, $x)*)
    };
}

macro_rules! debug {
    ($cfg:expr, $s:literal $(, $x:expr)* $(,)?) => {
        log_at!(debug, Debug, $cfg, $s $(, $x)*)
    };
}

macro_rules! info {
    ($cfg:expr, $s:literal $(, $x:expr)* $(,)?) => {
        log_at!(info, Info, $cfg, $s $(, $x)*)
    };
}

macro_rules! error {
    ($cfg:expr, $s:literal $(, $x:expr)* $(,)?) => {
        log_at!(error, Error, $cfg, $s $(, $x)*)
    };
}
