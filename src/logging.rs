//! A minimal `log` backend: one line per record on stderr, so diagnostics
//! never mix with the simulator's own output on stdout.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger {
  level: LevelFilter,
}

impl Log for StderrLogger {
  fn enabled(
    &self,
    metadata: &Metadata<'_>,
  ) -> bool {
    metadata.level() <= self.level
  }

  fn log(
    &self,
    record: &Record<'_>,
  ) {
    if !self.enabled(record.metadata()) {
      return;
    }
    let _ = writeln!(
      std::io::stderr().lock(),
      "[{} {}] {}",
      record.level(),
      record.target(),
      record.args()
    );
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}

/// Installs the stderr logger. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_boxed_logger(Box::new(StderrLogger { level }))?;
  log::set_max_level(level);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use log::Level;

  #[test]
  fn test_enabled_respects_level() {
    let logger = StderrLogger {
      level: LevelFilter::Info,
    };

    let info = Metadata::builder().level(Level::Info).build();
    let debug = Metadata::builder().level(Level::Debug).build();

    assert!(logger.enabled(&info));
    assert!(!logger.enabled(&debug));
  }
}
