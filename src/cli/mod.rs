// CLI surface

pub mod commands;
pub mod converter;
pub mod service;

pub use self::commands::CliArgs;
