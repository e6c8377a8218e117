//! Logging utilities.
//!
//! Centralizes logger initialization. The engine itself only uses the `log`
//! facade; `env_logger` is installed by [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
