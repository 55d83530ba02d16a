//! The Compiler module is in charge of taking an SCL source string
//! and producing a complete NASM program from it.
//!
//! It does this with a single-pass pipeline: the lexer produces a
//! positioned keyword token stream, the parser groups it into command
//! invocations and resolves each against the command table, and the
//! codegen wrapper closes the fragments into a runnable program.

pub mod codegen;
pub mod command;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{CompileError, CompileResult};

/// Compile SCL source text into NASM assembly.
pub fn compile(source: &str, table: &command::CommandTable) -> CompileResult<String> {
    let tokens = lexer::scan(source)?;
    let fragments = parser::Parser::new(tokens, table).run()?;
    Ok(codegen::assemble(&fragments))
}
