//! Yamlex Scanner Library
//!
//! An indentation-aware lexical scanner for a YAML-like block syntax. It
//! produces a typed token stream, including synthesized block start and end
//! tokens, for consumption by an external grammar-driven parser.

pub mod config;
pub mod error;
pub mod lexer;
pub mod session;

// Re-export commonly used types
pub use config::ScannerConfig;
pub use error::{DiagnosticError, ScanError, YamlexError, YamlexResult};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use session::ScanSession;
