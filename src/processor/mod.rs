//! The functional core: pattern text -> AST -> bytecode -> words.
pub mod ast;
pub mod codec;
pub mod compiler;
pub mod generator;
pub mod lexer;
pub mod opcode;
pub mod pattern_parser;
pub mod vm;

pub use ast::{Ast, RefMap};
pub use compiler::compile;
pub use generator::{Generator, compile_pattern};
pub use pattern_parser::parse;
pub use vm::{RandomSource, Vm};

use anyhow::Result;

use crate::model::{GenerateOptions, Pattern};

/// Output of one input file, ready for the writers.
pub enum Processed {
    Words(Vec<String>),
    Bytecode(Vec<u8>),
}

/// Generate words for `pattern`, or only compile it when `bytecode_only`.
pub fn run<R: RandomSource>(
    generator: &mut Generator<R>,
    pattern: &Pattern,
    options: &GenerateOptions,
    bytecode_only: bool,
) -> Result<Processed> {
    if bytecode_only {
        return Ok(Processed::Bytecode(compile_pattern(pattern)?));
    }
    Ok(Processed::Words(generator.generate(pattern, options)?))
}
