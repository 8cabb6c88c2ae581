use std::io::{self, BufRead, Write};

use log::debug;

use crate::{
  block::Pid,
  command::{Command, USAGE},
  report::{MemoryReport, QueueReport},
  simulator::{Allocation, FreeReport, Retry, Simulator},
};

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  Continue,
  Exit,
}

/// Line-oriented front end: reads commands, drives the simulator and
/// prints what happened.
#[derive(Debug, Clone, Default)]
pub struct Shell {
  prompt: bool,
}

impl Shell {
  pub fn new(prompt: bool) -> Self {
    Self { prompt }
  }

  /// Runs until `exit` or end of input. Command errors are printed and the
  /// loop goes on; only I/O errors end it early.
  pub fn run<R: BufRead, W: Write>(
    &self,
    sim: &mut Simulator,
    input: R,
    mut output: W,
  ) -> io::Result<()> {
    writeln!(output, "Welcome to Memory Management Simulator!")?;
    writeln!(output, "Available commands:")?;
    writeln!(output, "{}", USAGE)?;

    let mut lines = input.lines();
    loop {
      if self.prompt {
        write!(output, "> ")?;
        output.flush()?;
      }
      let Some(line) = lines.next() else {
        break;
      };
      let line = line?;

      let command = match Command::parse(&line) {
        Ok(Some(command)) => command,
        Ok(None) => continue,
        Err(err) => {
          writeln!(output, "{}", err)?;
          continue;
        }
      };
      debug!("command: {:?}", command);

      if self.execute(sim, command, &mut output)? == Flow::Exit {
        break;
      }
    }
    output.flush()
  }

  pub fn execute<W: Write>(
    &self,
    sim: &mut Simulator,
    command: Command,
    output: &mut W,
  ) -> io::Result<Flow> {
    match command {
      Command::Create(pid) => {
        sim.create_process(pid);
        writeln!(output, "Process {} created.", pid)?;
      }
      Command::Terminate(pid) => match sim.terminate_process(pid) {
        Ok(report) => {
          for freed in &report.freed {
            print_retry(output, freed)?;
          }
          writeln!(output, "Process {} terminated.", pid)?;
        }
        Err(err) => writeln!(output, "{}", err)?,
      },
      Command::Allocate { pid, size } => match sim.allocate(pid, size) {
        Ok(allocation) => print_allocation(output, pid, size, allocation)?,
        Err(err) => writeln!(output, "{}", err)?,
      },
      Command::Free { pid, address } => match sim.free(pid, address) {
        Ok(report) => {
          writeln!(
            output,
            "Freed {} bytes at address {} from process {}.",
            report.size, report.address, report.pid
          )?;
          print_retry(output, &report)?;
        }
        Err(err) => writeln!(output, "{}", err)?,
      },
      Command::ShowMemory => write!(output, "{}", MemoryReport::new(sim))?,
      Command::ShowQueue => write!(output, "{}", QueueReport::new(sim))?,
      Command::Help => writeln!(output, "{}", USAGE)?,
      Command::Exit => {
        writeln!(output, "Exiting simulator.")?;
        return Ok(Flow::Exit);
      }
    }
    Ok(Flow::Continue)
  }
}

fn print_allocation<W: Write>(
  output: &mut W,
  pid: Pid,
  size: impl std::fmt::Display,
  allocation: Allocation,
) -> io::Result<()> {
  match allocation {
    Allocation::Granted(address) => {
      writeln!(output, "Allocated {} bytes to process {} at address {}.", size, pid, address)
    }
    Allocation::Pending => writeln!(
      output,
      "Insufficient memory: process {} ({} bytes) added to the waiting queue.",
      pid, size
    ),
  }
}

fn print_retry<W: Write>(
  output: &mut W,
  report: &FreeReport,
) -> io::Result<()> {
  let Some(Retry { request, outcome }) = report.retry else {
    return Ok(());
  };
  if let Allocation::Granted(_) = outcome {
    writeln!(
      output,
      "Process {} is no longer waiting and is being allocated memory.",
      request.pid
    )?;
  }
  print_allocation(output, request.pid, request.size, outcome)
}
