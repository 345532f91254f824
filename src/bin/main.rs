use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use gprx::cli::Cli;
use gprx::vm::{self, Machine};

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
  let cli = Cli::parse();
  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      debug!("run failed: {e:?}");
      eprintln!("error: {e}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> vm::Result<()> {
  let source = cli.source();
  debug!("reading program from {source:?}");
  let program = source.read_program()?;

  // a program read from stdin leaves nothing for `r`, which then sees EOF
  let stdin = io::stdin();
  let mut input = stdin.lock();
  let stdout = io::stdout();
  let mut output = stdout.lock();

  let mut machine = Machine::new(program);
  let result = machine.run(&mut input, &mut output);
  output.flush()?;
  result
}
