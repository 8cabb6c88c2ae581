//! Startup options. They are fixed for the lifetime of a session.

use clap::Parser;
use log::LevelFilter;

use crate::simulator::MEMORY_SIZE;

/// First-fit variable-partition memory allocator simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "rmemsim")]
#[command(about = "Interactive first-fit memory allocation simulator")]
pub struct Config {
  /// Number of addressable units in the simulated memory
  #[arg(long, default_value_t = MEMORY_SIZE)]
  pub memory_size: usize,

  /// Diagnostics written to stderr: off, error, warn, info, debug, trace
  #[arg(long, default_value_t = LevelFilter::Warn)]
  pub log_level: LevelFilter,

  /// Do not print the "> " prompt (useful when piping a script)
  #[arg(long)]
  pub no_prompt: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      memory_size: MEMORY_SIZE,
      log_level: LevelFilter::Warn,
      no_prompt: false,
    }
  }
}

impl Config {
  pub fn validate(&self) -> Result<(), String> {
    if self.memory_size == 0 {
      return Err("--memory-size must be greater than zero".to_string());
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::parse_from(["rmemsim"]);
    assert_eq!(config.memory_size, 65536);
    assert_eq!(config.log_level, LevelFilter::Warn);
    assert!(!config.no_prompt);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_overrides() {
    let config = Config::parse_from(["rmemsim", "--memory-size", "100", "--log-level", "debug", "--no-prompt"]);
    assert_eq!(config.memory_size, 100);
    assert_eq!(config.log_level, LevelFilter::Debug);
    assert!(config.no_prompt);
  }

  #[test]
  fn test_zero_memory_rejected() {
    let config = Config::parse_from(["rmemsim", "--memory-size", "0"]);
    assert!(config.validate().is_err());
  }
}
