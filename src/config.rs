//! スキャナ設定
//!
//! Options that change how the scanner shapes its token stream. Every field
//! has a default, so a configuration file only needs to name what it changes.

use crate::error::{YamlexError, YamlexResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// スキャナの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Extra indentation, beyond the innermost open level, that continuation
    /// lines after `^` or `|` must carry.
    pub indent_width: usize,

    /// Keys at column 0 belong to the document's top-level mapping and do not
    /// open a block of their own.
    pub implicit_root_map: bool,

    /// Queue comment tokens. When off, comments are still scanned but dropped.
    pub emit_comments: bool,

    /// Fail instead of producing an empty scalar when the first continuation
    /// line is not indented far enough.
    pub strict_continuation: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            implicit_root_map: true,
            emit_comments: true,
            strict_continuation: false,
        }
    }
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_implicit_root_map(mut self, implicit_root_map: bool) -> Self {
        self.implicit_root_map = implicit_root_map;
        self
    }

    pub fn with_emit_comments(mut self, emit_comments: bool) -> Self {
        self.emit_comments = emit_comments;
        self
    }

    pub fn with_strict_continuation(mut self, strict_continuation: bool) -> Self {
        self.strict_continuation = strict_continuation;
        self
    }

    /// JSON文字列から設定を読み込む
    pub fn from_json_str(json: &str) -> YamlexResult<Self> {
        serde_json::from_str(json).map_err(|e| YamlexError::Config(e.to_string()))
    }

    /// JSONファイルから設定を読み込む
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> YamlexResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            YamlexError::Io(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}
