//! Argument accumulation for one tool invocation.

mod builder;
mod lexer;

pub use builder::*;
pub use lexer::*;
