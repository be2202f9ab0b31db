//! レキサーのメイン実装

use super::scanner::Scanner;
use super::token::Token;
use crate::config::ScannerConfig;
use crate::error::ScanError;

/// プル型のレキサー
///
/// Tokens are produced on demand. A scan error is returned once, after which
/// the lexer reports the end of the stream.
#[derive(Debug)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ScannerConfig::default())
    }

    /// 設定を指定してレキサーを作成
    pub fn with_config(input: &'a str, config: ScannerConfig) -> Self {
        Self {
            scanner: Scanner::new(input, config),
            failed: false,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        self.scanner.config()
    }

    /// 次のトークンを取得
    pub fn next_token(&mut self) -> Option<Result<Token, ScanError>> {
        if self.failed {
            return None;
        }

        while self.scanner.needs_more_tokens() {
            if let Err(e) = self.scanner.fetch_more_tokens() {
                self.failed = true;
                return Some(Err(e));
            }
        }

        self.scanner.next_queued().map(Ok)
    }

    /// すべてのトークンを収集
    pub fn collect_tokens(self) -> Result<Vec<Token>, ScanError> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// ソースコードをトークン化
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScanError> {
    Lexer::new(input).collect_tokens()
}

/// 設定を指定してトークン化
pub fn tokenize_with_config(input: &str, config: ScannerConfig) -> Result<Vec<Token>, ScanError> {
    Lexer::with_config(input, config).collect_tokens()
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{:4}: {}", i, t))
        .collect::<Vec<_>>()
        .join("\n")
}
