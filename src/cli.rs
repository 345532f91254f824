//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::program::Source;

/// Run a GPRX 3000 program
#[derive(Parser, Debug)]
#[command(name = "gprx3000", version)]
pub struct Cli {
  /// Program file to run; standard input when omitted or `-`
  pub program: Option<PathBuf>,
}

impl Cli {
  pub fn source(&self) -> Source {
    Source::from_arg(self.program.as_deref())
  }
}
