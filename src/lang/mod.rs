/*!
# Rust Language Module

This Rust module splits program text into statements and classifies
each statement into the small set of forms the compiler understands.

*/

#[macro_use]
mod error;
mod lex;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;

pub mod ast;

/// Byte range into the program text.
pub type Column = std::ops::Range<usize>;

#[cfg(test)]
mod tests;
