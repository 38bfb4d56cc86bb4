#![warn(unused, nonstandard_style, rust_2018_idioms)]

pub mod arena;
pub mod compiler;
pub mod semantic;
pub mod syntax;
