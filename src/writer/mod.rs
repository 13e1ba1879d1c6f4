//! Output side: everything that turns processed results into text.
pub mod bytecode;
pub mod text;
