use std::fmt;

use crate::block::{Address, Pid};

/// A decoded shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Create(Pid),
  Terminate(Pid),
  Allocate { pid: Pid, size: i64 },
  Free { pid: Pid, address: Address },
  ShowMemory,
  ShowQueue,
  Help,
  Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  UnknownCommand(String),
  MissingArgument { command: &'static str, argument: &'static str },
  InvalidNumber { argument: &'static str, value: String },
  UnexpectedArgument(String),
}

impl fmt::Display for ParseError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ParseError::UnknownCommand(word) => write!(f, "Unknown command '{}'. Type 'help' for a list.", word),
      ParseError::MissingArgument { command, argument } => {
        write!(f, "Missing <{}> for '{}'.", argument, command)
      }
      ParseError::InvalidNumber { argument, value } => {
        write!(f, "Invalid <{}>: '{}' is not a valid integer.", argument, value)
      }
      ParseError::UnexpectedArgument(word) => write!(f, "Unexpected argument '{}'.", word),
    }
  }
}

impl std::error::Error for ParseError {}

pub const USAGE: &str = "\
create <process_id>: Create a new process
terminate <process_id>: Terminate an existing process
allocate <process_id> <size>: Allocate memory for a process
free <process_id> <address>: Free memory allocated to a process
show memory: Display memory status
show queue: Display the waiting queue
help: Show this list
exit: Exit the simulator";

impl Command {
  /// Parses one input line. Blank lines yield `Ok(None)`.
  pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
      return Ok(None);
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
      "create" => Command::Create(number(&mut words, "create", "process_id")?),
      "terminate" => Command::Terminate(number(&mut words, "terminate", "process_id")?),
      "allocate" => Command::Allocate {
        pid: number(&mut words, "allocate", "process_id")?,
        size: number(&mut words, "allocate", "size")?,
      },
      "free" => Command::Free {
        pid: number(&mut words, "free", "process_id")?,
        address: number(&mut words, "free", "address")?,
      },
      "show" => match words.next().map(str::to_ascii_lowercase).as_deref() {
        Some("memory") => Command::ShowMemory,
        Some("queue") => Command::ShowQueue,
        Some(other) => return Err(ParseError::UnexpectedArgument(other.to_string())),
        None => {
          return Err(ParseError::MissingArgument {
            command: "show",
            argument: "memory|queue",
          });
        }
      },
      "help" => Command::Help,
      "exit" | "quit" => Command::Exit,
      _ => return Err(ParseError::UnknownCommand(keyword.to_string())),
    };

    match words.next() {
      Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
      None => Ok(Some(command)),
    }
  }
}

fn number<'a, T: std::str::FromStr>(
  words: &mut impl Iterator<Item = &'a str>,
  command: &'static str,
  argument: &'static str,
) -> Result<T, ParseError> {
  let word = words.next().ok_or(ParseError::MissingArgument { command, argument })?;
  word.parse().map_err(|_| ParseError::InvalidNumber {
    argument,
    value: word.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_commands() {
    assert_eq!(Command::parse("create 5"), Ok(Some(Command::Create(5))));
    assert_eq!(Command::parse("  TERMINATE 5 "), Ok(Some(Command::Terminate(5))));
    assert_eq!(
      Command::parse("allocate 1 -5"),
      Ok(Some(Command::Allocate { pid: 1, size: -5 }))
    );
    assert_eq!(
      Command::parse("free 3 10"),
      Ok(Some(Command::Free { pid: 3, address: 10 }))
    );
    assert_eq!(Command::parse("show memory"), Ok(Some(Command::ShowMemory)));
    assert_eq!(Command::parse("show Queue"), Ok(Some(Command::ShowQueue)));
    assert_eq!(Command::parse("quit"), Ok(Some(Command::Exit)));
    assert_eq!(Command::parse("   "), Ok(None));
  }

  #[test]
  fn test_parse_errors() {
    assert_eq!(
      Command::parse("reboot"),
      Err(ParseError::UnknownCommand("reboot".to_string()))
    );
    assert_eq!(
      Command::parse("allocate 1"),
      Err(ParseError::MissingArgument {
        command: "allocate",
        argument: "size",
      })
    );
    assert_eq!(
      Command::parse("free 1 -4"),
      Err(ParseError::InvalidNumber {
        argument: "address",
        value: "-4".to_string(),
      })
    );
    assert_eq!(
      Command::parse("create 1 2"),
      Err(ParseError::UnexpectedArgument("2".to_string()))
    );
    assert_eq!(
      Command::parse("show disk"),
      Err(ParseError::UnexpectedArgument("disk".to_string()))
    );
  }
}
