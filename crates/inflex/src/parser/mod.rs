//! Inflection pattern scanner.
//!
//! Locates patterns inside arbitrary strings and splits them into kinds,
//! clauses, token groups and values. The resulting AST is consumed by the
//! interpreter and by the linter.

pub mod ast;
mod scanner;

pub use ast::*;
pub use scanner::scan;
