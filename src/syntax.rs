mod builder;
pub mod document;
mod token;
pub mod traverse;
mod tree;

pub use builder::AstBuilder;
pub use document::{load_program, DocumentError};
pub use token::*;
pub use traverse::{traverse, Visitor};
pub use tree::*;
