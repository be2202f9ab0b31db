//! Lexical analysis for a YAML-like block syntax.
//!
//! The scanner turns source text into a flat token stream for a grammar-driven
//! parser. Besides tokens for literal text (scalars, colons, list markers,
//! comments, document markers), it synthesizes structural tokens from
//! indentation: `MAP_START` and `LIST_START` when a deeper block opens and
//! `BLOCK_END` when the indentation falls back out of it, much like
//! INDENT/DEDENT in an offside-rule language.
//!
//! ```
//! use yamlex::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("parent:\n  child: value\n").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Scalar,
//!         TokenKind::Colon,
//!         TokenKind::MapStart,
//!         TokenKind::Scalar,
//!         TokenKind::Colon,
//!         TokenKind::Scalar,
//!         TokenKind::BlockEnd,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! ```

mod indent;
#[allow(clippy::module_inception)]
mod lexer;
mod lookahead;
mod scanner;
mod token;

pub use indent::IndentStack;
pub use lexer::{format_tokens, tokenize, tokenize_with_config, Lexer};
pub use lookahead::Lookahead;
pub use token::{Span, Token, TokenKind};
