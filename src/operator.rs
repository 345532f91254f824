use std::fmt;

/// The closed set of operator characters the machine understands.
///
/// Every operator reads `a` and `b` and writes its result to `a`, except
/// where noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  /// | Operation | Semantics/RTL | Source |
  /// |-----------|---------------|--------|
  /// | Add       | `a ← a + b`   | `+`    |
  Add,

  /// Fails if `b` is greater than `a`, since registers cannot go negative.
  ///
  /// | Operation | Semantics/RTL | Source |
  /// |-----------|---------------|--------|
  /// | Subtract  | `a ← a − b`   | `-`    |
  Subtract,

  /// | Operation | Semantics/RTL | Source |
  /// |-----------|---------------|--------|
  /// | Multiply  | `a ← a × b`   | `*`    |
  Multiply,

  /// Fails if `b` is zero.
  ///
  /// | Operation | Semantics/RTL     | Source |
  /// |-----------|-------------------|--------|
  /// | Divide    | `a ← ⌊a ÷ b⌋`     | `/`    |
  Divide,

  /// Fails if `b` is zero.
  ///
  /// | Operation | Semantics/RTL   | Source |
  /// |-----------|-----------------|--------|
  /// | Modulo    | `a ← a mod b`   | `%`    |
  Modulo,

  /// Resumes execution at index `a`. Jumping to exactly the end of the
  /// program halts it; anything further is an error.
  ///
  /// | Operation | Semantics/RTL | Source |
  /// |-----------|---------------|--------|
  /// | Goto      | `pc ← a`      | `g`    |
  Goto,

  /// | Operation | Semantics/RTL      | Source |
  /// |-----------|--------------------|--------|
  /// | Print     | `out ← char(a)`    | `p`    |
  Print,

  /// Stores the code point plus one, so that end of input (`0`) is
  /// distinguishable from a NUL character.
  ///
  /// | Operation | Semantics/RTL                    | Source |
  /// |-----------|----------------------------------|--------|
  /// | Read      | `a ← ord(in) + 1`, or `0` at EOF | `r`    |
  Read,

  /// | Operation | Semantics/RTL             | Source |
  /// |-----------|---------------------------|--------|
  /// | Rotate    | `(a, b, c) ← (c, a, b)`   | `x`    |
  Rotate,
}

impl Operator {
  /// Decode an operator character, if it is one
  pub fn from_char(c: char) -> Option<Self> {
    let op = match c {
      '+' => Self::Add,
      '-' => Self::Subtract,
      '*' => Self::Multiply,
      '/' => Self::Divide,
      '%' => Self::Modulo,
      'g' => Self::Goto,
      'p' => Self::Print,
      'r' => Self::Read,
      'x' => Self::Rotate,
      _ => return None,
    };
    Some(op)
  }

  pub fn as_char(self) -> char {
    match self {
      Self::Add => '+',
      Self::Subtract => '-',
      Self::Multiply => '*',
      Self::Divide => '/',
      Self::Modulo => '%',
      Self::Goto => 'g',
      Self::Print => 'p',
      Self::Read => 'r',
      Self::Rotate => 'x',
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_char())
  }
}
