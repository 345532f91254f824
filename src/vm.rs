use std::io::{Read, Write};
use std::mem;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::operator::Operator;
use crate::program::Program;

/// The type of a single register in our virtual machine
pub type Register = BigUint;

pub type Result<T> = std::result::Result<T, Error>;

/// A GPRX 3000 machine bound to a single program.
///
/// Execution is a loop of [`Machine::step`]s, each of which scans an optional
/// decimal literal into `a` and then executes one operator. The machine halts
/// once the program counter walks off the end of the program; there is no
/// halt instruction.
#[derive(Debug)]
pub struct Machine {
  program: Program,
  // index of the next character to decode
  position: usize,
  a: Register,
  b: Register,
  c: Register,
  steps: u64,
}

impl Machine {
  /// Create a machine with zeroed registers, positioned at the start of
  /// `program`
  pub fn new(program: impl Into<Program>) -> Self {
    Self {
      program: program.into(),
      position: 0,
      a: Register::zero(),
      b: Register::zero(),
      c: Register::zero(),
      steps: 0,
    }
  }

  pub fn program(&self) -> &Program {
    &self.program
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn a(&self) -> &Register {
    &self.a
  }

  pub fn b(&self) -> &Register {
    &self.b
  }

  pub fn c(&self) -> &Register {
    &self.c
  }

  /// Number of operators executed so far
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn is_halted(&self) -> bool {
    self.position >= self.program.len()
  }

  /// Decode and execute a single literal-plus-operator instruction
  pub fn step<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<()>
  where
    I: Read,
    O: Write,
  {
    if self.is_halted() {
      return Err(Error::MachineHalted);
    }
    let mut task = Task::new(self, input, output);
    task.run()
  }

  /// Step until the program counter runs past the end of the program.
  ///
  /// Programs that jump backwards forever never return.
  pub fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<()>
  where
    I: Read,
    O: Write,
  {
    debug!("running program of {} characters", self.program.len());
    while !self.is_halted() {
      self.step(input, output)?;
    }
    debug!("halted at {} after {} steps", self.position, self.steps);
    Ok(())
  }
}

/// An error that aborts a run. None of these can be caught by the program.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("subtraction would make register `a` negative")]
  Underflow,

  #[error("division by zero")]
  DivisionByZero,

  #[error("cannot jump to {target}, program is only {length} characters long")]
  InvalidJump { target: Register, length: usize },

  #[error("unknown operator {operator:?} at position {position}")]
  UnknownOperator { operator: char, position: usize },

  #[error("program ended at position {position} while looking for an operator")]
  PrematureEnd { position: usize },

  #[error("{0} is not a printable code point")]
  InvalidCodePoint(Register),

  #[error("input is not valid UTF-8")]
  InvalidInput,

  #[error("machine is halted")]
  MachineHalted,

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// What the program counter does once an operator has executed
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
  Next,
  Jump(usize),
}

struct Task<'vm, 'io, I, O> {
  vm: &'vm mut Machine,
  input: &'io mut I,
  output: &'io mut O,
}

impl<'vm, 'io, I, O> Task<'vm, 'io, I, O>
where
  I: Read,
  O: Write,
{
  fn new(vm: &'vm mut Machine, input: &'io mut I, output: &'io mut O) -> Self {
    Self { vm, input, output }
  }

  #[inline]
  fn peek(&self) -> Result<char> {
    let position = self.vm.position;
    self
      .vm
      .program
      .get(position)
      .ok_or(Error::PrematureEnd { position })
  }

  // a run of ascii digits, read as a decimal natural
  fn eat_literal(&mut self) -> Result<Option<Register>> {
    let mut literal: Option<Register> = None;
    loop {
      let c = self.peek()?;
      if !c.is_ascii_digit() {
        break;
      }
      let digit = c as u32 - '0' as u32;
      literal = Some(literal.unwrap_or_default() * 10u32 + digit);
      self.vm.position += 1;
    }
    Ok(literal)
  }

  fn run(&mut self) -> Result<()> {
    if let Some(literal) = self.eat_literal()? {
      self.vm.a = literal;
    }
    let position = self.vm.position;
    let operator = self.peek()?;
    let op = Operator::from_char(operator).ok_or(Error::UnknownOperator { operator, position })?;
    trace!(
      "{position:>5} {op} a={} b={} c={}",
      self.vm.a,
      self.vm.b,
      self.vm.c
    );
    let flow = match op {
      Operator::Add => add(self)?,
      Operator::Subtract => subtract(self)?,
      Operator::Multiply => multiply(self)?,
      Operator::Divide => divide(self)?,
      Operator::Modulo => modulo(self)?,
      Operator::Goto => goto(self)?,
      Operator::Print => print(self)?,
      Operator::Read => read(self)?,
      Operator::Rotate => rotate(self)?,
    };
    self.vm.position = match flow {
      Flow::Next => position + 1,
      Flow::Jump(target) => target,
    };
    self.vm.steps = self.vm.steps.wrapping_add(1);
    Ok(())
  }
}

// a ← a + b
fn add<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  vm.a += &vm.b;
  Ok(Flow::Next)
}

// a ← a − b
fn subtract<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  // `a` stays as it was; the run is over anyway
  if vm.b > vm.a {
    return Err(Error::Underflow);
  }
  vm.a -= &vm.b;
  Ok(Flow::Next)
}

// a ← a × b
fn multiply<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  vm.a *= &vm.b;
  Ok(Flow::Next)
}

// a ← ⌊a ÷ b⌋
fn divide<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  if vm.b.is_zero() {
    return Err(Error::DivisionByZero);
  }
  vm.a /= &vm.b;
  Ok(Flow::Next)
}

// a ← a mod b
fn modulo<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  if vm.b.is_zero() {
    return Err(Error::DivisionByZero);
  }
  vm.a %= &vm.b;
  Ok(Flow::Next)
}

// pc ← a, where a ≤ len(program)
fn goto<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let length = task.vm.program.len();
  match task.vm.a.to_usize() {
    // landing exactly on the end halts the run
    Some(target) if target <= length => Ok(Flow::Jump(target)),
    _ => Err(Error::InvalidJump {
      target: task.vm.a.clone(),
      length,
    }),
  }
}

// out ← char(a)
fn print<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow>
where
  O: Write,
{
  let c = task
    .vm
    .a
    .to_u32()
    .and_then(char::from_u32)
    .ok_or_else(|| Error::InvalidCodePoint(task.vm.a.clone()))?;
  let mut buf = [0; 4];
  task.output.write_all(c.encode_utf8(&mut buf).as_bytes())?;
  Ok(Flow::Next)
}

// a ← ord(in) + 1, or 0 once input is exhausted
fn read<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow>
where
  I: Read,
{
  task.vm.a = match read_char(&mut *task.input)? {
    Some(c) => Register::from(c as u32 + 1),
    None => Register::zero(),
  };
  Ok(Flow::Next)
}

// (a, b, c) ← (c, a, b)
fn rotate<I, O>(task: &mut Task<'_, '_, I, O>) -> Result<Flow> {
  let vm = &mut *task.vm;
  let a = mem::take(&mut vm.a);
  let b = mem::take(&mut vm.b);
  let c = mem::take(&mut vm.c);
  vm.a = c;
  vm.b = a;
  vm.c = b;
  Ok(Flow::Next)
}

/// Pull one UTF-8 encoded character off `input`, or `None` at end of input
fn read_char<I>(input: &mut I) -> Result<Option<char>>
where
  I: Read,
{
  let mut bytes = input.by_ref().bytes();
  let first = match bytes.next() {
    Some(byte) => byte?,
    None => return Ok(None),
  };
  let width = match first {
    0x00..=0x7F => 1,
    0xC2..=0xDF => 2,
    0xE0..=0xEF => 3,
    0xF0..=0xF4 => 4,
    _ => return Err(Error::InvalidInput),
  };
  let mut buf = [first, 0, 0, 0];
  for slot in &mut buf[1..width] {
    *slot = bytes.next().ok_or(Error::InvalidInput)??;
  }
  let decoded = std::str::from_utf8(&buf[..width]).map_err(|_| Error::InvalidInput)?;
  decoded.chars().next().map(Some).ok_or(Error::InvalidInput)
}
