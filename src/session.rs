//! スキャンセッション管理モジュール
//!
//! このモジュールは、ソースの読み込みからトークン化、
//! 診断情報の報告までの一連の処理を管理します。

use crate::config::ScannerConfig;
use crate::error::{DiagnosticError, YamlexError, YamlexResult};
use crate::lexer::{Lexer, Token};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::fs;
use std::io::Read;
use std::path::Path;

/// スキャン状態を管理する構造体
pub struct ScanSession {
    pub source_name: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
}

impl ScanSession {
    /// ファイルからセッションを作成
    pub fn new<P: AsRef<Path>>(source_file: P) -> YamlexResult<Self> {
        let source_name = source_file.as_ref().display().to_string();
        let source = fs::read_to_string(source_file.as_ref())
            .map_err(|e| YamlexError::Io(format!("Failed to read source file {}: {}", source_name, e)))?;

        Ok(Self::new_from_string(&source_name, source))
    }

    /// 文字列からセッションを作成（テスト・標準入力用）
    pub fn new_from_string(name: &str, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(name.to_string(), source.clone());

        Self {
            source_name: name.to_string(),
            source,
            files,
            file_id,
        }
    }

    /// リーダーから全体を読み込んでセッションを作成
    pub fn from_reader<R: Read>(name: &str, mut reader: R) -> YamlexResult<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::new_from_string(name, source))
    }

    /// ソース全体をトークン化
    pub fn tokenize(&self, config: &ScannerConfig) -> YamlexResult<Vec<Token>> {
        log::info!("Scanning {}", self.source_name);

        let tokens = Lexer::with_config(&self.source, config.clone()).collect_tokens()?;

        log::debug!("{} tokens from {} bytes", tokens.len(), self.source.len());
        Ok(tokens)
    }

    /// エラーを診断情報に変換
    pub fn diagnostic(&self, error: &YamlexError) -> Diagnostic<usize> {
        DiagnosticError::new(error.clone(), self.file_id).to_diagnostic()
    }

    /// 診断情報を標準エラー出力へ報告
    pub fn report_error(&self, error: &YamlexError) -> YamlexResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &self.diagnostic(error))
            .map_err(|e| YamlexError::Io(format!("Failed to emit diagnostic: {}", e)))?;
        Ok(())
    }
}
