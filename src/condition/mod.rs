//! Condition trees: parsing and name extraction
//!
//! This module turns raw JSON conditions like `{"age": {"greater": 10}}`
//! into typed trees and walks them for field and predicate names.

mod ast;
pub mod parser;
pub mod walker;


pub use ast::*;
pub use parser::*;
pub use walker::*;
