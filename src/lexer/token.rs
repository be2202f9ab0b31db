//! トークン定義

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// バイトオフセットの半開区間（診断表示用）
pub type Span = Range<usize>;

/// トークンの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Comment,
    Scalar,
    Element,
    MapStart,
    ListStart,
    BlockEnd,
    Colon,
    StartDocument,
    EndDocument,
    EndOfInput,
}

impl TokenKind {
    /// 文法ドライバ向けの数値コード
    ///
    /// Matches the token type table expected by generated grammars:
    /// end of input is `-1`, everything else counts up from `1`.
    pub fn type_code(self) -> i32 {
        match self {
            TokenKind::Comment => 1,
            TokenKind::Scalar => 2,
            TokenKind::Element => 3,
            TokenKind::MapStart => 4,
            TokenKind::ListStart => 5,
            TokenKind::BlockEnd => 6,
            TokenKind::Colon => 7,
            TokenKind::StartDocument => 8,
            TokenKind::EndDocument => 9,
            TokenKind::EndOfInput => -1,
        }
    }

    /// 対応するソース文字列を持たない構造トークンかどうか
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::MapStart | TokenKind::ListStart | TokenKind::BlockEnd
        )
    }

    /// 幅ゼロのトークンかどうか
    pub fn is_zero_width(self) -> bool {
        self.is_structural() || self == TokenKind::EndOfInput
    }

    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::Scalar => "SCALAR",
            TokenKind::Element => "ELEMENT",
            TokenKind::MapStart => "MAP_START",
            TokenKind::ListStart => "LIST_START",
            TokenKind::BlockEnd => "BLOCK_END",
            TokenKind::Colon => "COLON",
            TokenKind::StartDocument => "START_DOCUMENT",
            TokenKind::EndDocument => "END_DOCUMENT",
            TokenKind::EndOfInput => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 位置情報付きトークン
///
/// `start` and `stop` are inclusive byte offsets into the source. Zero-width
/// tokens have `start == stop`. `line` and `column` are 0-based; `column`
/// counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub stop: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        start: usize,
        stop: usize,
        line: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start,
            stop,
            line,
            column,
            text: text.into(),
        }
    }

    /// 構造トークンなど、ラベルだけを持つ幅ゼロのトークンを作成
    pub fn synthetic(kind: TokenKind, offset: usize, line: usize, column: usize) -> Self {
        Self::new(kind, offset, offset, line, column, kind.label())
    }

    /// 診断表示に使う半開区間
    pub fn span(&self) -> Span {
        if self.kind.is_zero_width() {
            self.start..self.start
        } else {
            self.start..self.stop + 1
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {}..={} @{}:{}",
            self.kind, self.text, self.start, self.stop, self.line, self.column
        )
    }
}
