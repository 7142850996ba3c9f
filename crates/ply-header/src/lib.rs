//! Pure-Rust PLY header parser.
//!
//! Reads the ASCII header of a `.ply` file from any buffered reader and
//! returns the elements and properties it declares, leaving the reader
//! positioned at the start of the body. Three kinds of header problems are
//! reported:
//!
//! * **unexpected token** — the header breaks the grammar (wrong magic,
//!   misplaced `format`, missing element count, truncated header, …);
//! * **invalid format** — the `format` line names an unknown encoding;
//! * **unsupported format** — the encoding is one of the binary ones, whose
//!   bodies this crate does not read.

pub mod parser;
pub mod reader;
pub mod scanner;
pub mod types;

pub use parser::{HeaderParser, ParsedHeader};
pub use reader::PlyFile;
pub use scanner::{Keyword, Scanner, Token, TokenKind};
pub use types::{PlyElement, PlyError, PlyFormat, PlyProperty, PropertyType, Result};
