//! Connection settings loaded from file and environment

pub mod defaults;
mod settings;

pub use settings::ConnectionSettings;
