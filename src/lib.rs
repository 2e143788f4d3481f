//! luz — a lossless, source-preserving transpiler for a Luau-style
//! scripting language with optional static type annotations.
//!
//! This crate provides:
//! - A lexer and recursive-descent parser producing an arena-backed AST
//!   plus a concrete-syntax side-table of lexical detail
//! - A position-threaded printer that reproduces source text byte-for-byte
//!   where lexical detail was recorded, and well-formed equivalent source
//!   where it was not
//! - A typed mode that emits static annotations alongside executable
//!   constructs, and an untyped mode that strips them
//!
//! ```
//! let source = "local greeting: string = 'hello'";
//! let output = luz::transpile(source, luz::ParseOptions::default(), true)
//!     .expect("source parses");
//! assert_eq!(output, source);
//! ```

pub mod arena;
pub mod ast;
pub mod cst;
pub mod emitter;
pub mod escape;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod source_writer;
pub mod transpile;

pub use arena::{Arena, ExprId, PackId, StatId, TypeId};
pub use ast::NodeRef;
pub use cst::{CstNodeMap, QuoteStyle};
pub use parser::{parse, ParseError, ParseOptions, ParseResult};
pub use position::{Location, Position};
pub use source_writer::{StringWriter, Writer};
pub use transpile::{
    to_string, transpile, transpile_block, transpile_block_with_types, TranspileError,
};
