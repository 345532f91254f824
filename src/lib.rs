//! A tiny three-register machine for the GPRX 3000 esoteric language
//!
//! Programs are strings of decimal literals and single-character operators,
//! decoded and executed in one pass. Registers hold natural numbers only;
//! anything that would go negative is an error.

pub mod cli;
pub mod operator;
pub mod program;
pub mod vm;
