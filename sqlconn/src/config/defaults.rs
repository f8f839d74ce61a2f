//! Default configuration values - single source of truth

/// Command timeout in seconds. `0` means no limit.
pub const COMMAND_TIMEOUT: u32 = 120;

/// Settings file looked up in the working directory (any format `config` knows).
pub const CONFIG_FILE: &str = "sqlconn";

/// Prefix of the environment variables that override the settings file.
pub const ENV_PREFIX: &str = "SQLCONN";
