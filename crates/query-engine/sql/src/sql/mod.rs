//! Build SQL fragments: an AST for the clauses that follow a FROM, a low-level
//! string and parameter accumulator, and the dialect-specific rendering rules.

pub mod ast;
pub mod convert;
pub mod dialect;
pub mod helpers;
pub mod rebind;
pub mod string;
