//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、スキャナとその周辺で使用されるエラー型と
//! 診断情報への変換を提供します。

use crate::lexer::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// クレート全体の統一エラー型
#[derive(Error, Debug, Clone)]
pub enum YamlexError {
    /// スキャナエラー
    #[error("字句解析エラー: {0}")]
    Scanner(#[from] ScanError),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),

    /// 設定エラー
    #[error("不正な設定: {0}")]
    Config(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// スキャナが呼び出し元へ返す致命的なエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("未終了のクォートスカラー: 閉じる{quote:?}がありません")]
    UnterminatedScalar { quote: char, span: Span },

    #[error("継続行のインデント不足: {expected}以上を期待しましたが、{found}でした")]
    ContinuationIndent {
        expected: usize,
        found: usize,
        span: Span,
    },
}

impl ScanError {
    pub fn span(&self) -> &Span {
        match self {
            ScanError::UnterminatedScalar { span, .. } => span,
            ScanError::ContinuationIndent { span, .. } => span,
        }
    }
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: YamlexError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: YamlexError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            YamlexError::Scanner(e) => match e {
                ScanError::UnterminatedScalar { quote, span } => (
                    e.to_string(),
                    vec![Label::primary(self.file_id, span.clone())
                        .with_message(format!("{:?}で始まるスカラーが閉じられていません", quote))],
                ),
                ScanError::ContinuationIndent { expected, span, .. } => (
                    e.to_string(),
                    vec![Label::primary(self.file_id, span.clone())
                        .with_message(format!("この行を{}スペース以上インデントしてください", expected))],
                ),
            },
            YamlexError::Io(_) | YamlexError::Config(_) | YamlexError::Other(_) => {
                (self.error.to_string(), vec![])
            }
        };

        Diagnostic::error().with_message(message).with_labels(labels)
    }
}

/// Result型のエイリアス
pub type YamlexResult<T> = Result<T, YamlexError>;

impl From<std::io::Error> for YamlexError {
    fn from(e: std::io::Error) -> Self {
        YamlexError::Io(e.to_string())
    }
}
