use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// The text of a program, indexed by character rather than by byte
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
  text: Vec<char>,
}

impl Program {
  pub fn get(&self, position: usize) -> Option<char> {
    self.text.get(position).copied()
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }
}

impl From<&str> for Program {
  fn from(text: &str) -> Self {
    Self {
      text: text.chars().collect(),
    }
  }
}

impl From<String> for Program {
  fn from(text: String) -> Self {
    text.as_str().into()
  }
}

/// Where the program text is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
  Stdin,
  File(PathBuf),
}

impl Source {
  /// `None` and `-` both mean standard input
  pub fn from_arg(arg: Option<&Path>) -> Self {
    match arg {
      None => Self::Stdin,
      Some(path) if path == Path::new("-") => Self::Stdin,
      Some(path) => Self::File(path.to_path_buf()),
    }
  }

  /// Read the whole program into memory
  pub fn read_program(&self) -> io::Result<Program> {
    let text = match self {
      Self::Stdin => {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text)?;
        text
      }
      Self::File(path) => fs::read_to_string(path)?,
    };
    Ok(text.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::io::Write;

  #[test]
  fn indexes_by_character() {
    let program = Program::from("é1p");
    assert_eq!(program.len(), 3);
    assert_eq!(program.get(0), Some('é'));
    assert_eq!(program.get(2), Some('p'));
    assert_eq!(program.get(3), None);
  }

  #[test]
  fn empty_program() {
    let program = Program::from(String::new());
    assert!(program.is_empty());
    assert_eq!(program.get(0), None);
  }

  #[test]
  fn dash_means_stdin() {
    assert_eq!(Source::from_arg(None), Source::Stdin);
    assert_eq!(Source::from_arg(Some(Path::new("-"))), Source::Stdin);
    assert_eq!(
      Source::from_arg(Some(Path::new("hello.gprx"))),
      Source::File(PathBuf::from("hello.gprx"))
    );
  }

  #[test]
  fn reads_program_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "72p105p").unwrap();
    let source = Source::File(file.path().to_path_buf());
    assert_eq!(source.read_program().unwrap(), Program::from("72p105p"));
  }

  #[test]
  fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = Source::File(dir.path().join("nope.gprx"));
    assert!(source.read_program().is_err());
  }
}
