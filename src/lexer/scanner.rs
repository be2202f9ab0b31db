//! The token-production engine.
//!
//! Each call to [`Scanner::fetch_more_tokens`] skips inter-token whitespace,
//! closes any blocks the current column has fallen out of, and then scans
//! exactly one construct. Most constructs append to the queue; the one
//! exception is the map start, which is decided only when a key's colon has
//! been seen and is then inserted in front of the key's already queued
//! scalar.

use std::collections::VecDeque;

use super::indent::IndentStack;
use super::lookahead::Lookahead;
use super::token::{Token, TokenKind};
use crate::config::ScannerConfig;
use crate::error::ScanError;

/// How continuation lines after a colon are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    /// `^`
    Folded,
    /// `|`
    Literal,
}

impl Continuation {
    fn separator(self) -> &'static str {
        match self {
            Continuation::Folded => " ",
            Continuation::Literal => "\n",
        }
    }
}

/// A queued scalar that is followed by a colon and may introduce a mapping.
#[derive(Debug, Clone, Copy)]
struct PendingKey {
    /// Absolute token number of the key scalar.
    slot: usize,
    offset: usize,
    line: usize,
    column: usize,
    /// Set once the key's colon has been scanned.
    settled: bool,
}

#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    source: &'a str,
    look: Lookahead<'a>,
    config: ScannerConfig,
    pos: usize,
    line: usize,
    column: usize,
    indents: IndentStack,
    tokens: VecDeque<Token>,
    tokens_taken: usize,
    pending_key: Option<PendingKey>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, config: ScannerConfig) -> Self {
        Self {
            source,
            look: Lookahead::new(source),
            config,
            pos: 0,
            line: 0,
            column: 0,
            indents: IndentStack::new(),
            tokens: VecDeque::new(),
            tokens_taken: 0,
            pending_key: None,
            done: false,
        }
    }

    pub(crate) fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// True while the head of the queue cannot be handed out yet: either
    /// nothing is queued, or a key is still waiting for its colon and a map
    /// start may have to go in front of it.
    pub(crate) fn needs_more_tokens(&self) -> bool {
        if self.done {
            return false;
        }

        self.tokens.is_empty() || self.pending_key.is_some_and(|key| !key.settled)
    }

    pub(crate) fn next_queued(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.tokens_taken += 1;
        Some(token)
    }

    pub(crate) fn fetch_more_tokens(&mut self) -> Result<(), ScanError> {
        self.skip_to_next_token();
        self.unroll_indent();

        if self.look.is_end_of_input(self.pos) {
            self.fetch_end_of_input();
            return Ok(());
        }

        if self.look.is_document_start(self.pos, self.column) {
            self.fetch_document_marker(TokenKind::StartDocument);
        } else if self.look.is_document_end(self.pos, self.column) {
            self.fetch_document_marker(TokenKind::EndDocument);
        } else if self.look.is_colon_boundary(self.pos) {
            self.fetch_colon()?;
        } else if self.look.is_list_element_marker(self.pos) {
            self.fetch_element();
        } else if self.look.is_comment_start(self.pos) {
            self.fetch_comment();
        } else {
            match self.look.at(self.pos) {
                Some(quote @ (b'\'' | b'"')) => self.fetch_quoted_scalar(quote)?,
                _ => self.fetch_plain_scalar(),
            }
        }

        Ok(())
    }

    fn consume(&mut self, count: usize) {
        for _ in 0..count {
            let Some(b) = self.look.at(self.pos) else {
                return;
            };

            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
            } else if b & 0xC0 != 0x80 {
                // UTF-8 continuation bytes do not start a new character
                self.column += 1;
            }
        }
    }

    fn skip_to_next_token(&mut self) {
        while matches!(self.look.at(self.pos), Some(b' ' | b'\n')) {
            self.consume(1);
        }
    }

    fn unroll_indent(&mut self) {
        let closed = self.indents.close_while(self.column);
        for _ in 0..closed {
            self.push_token(Token::synthetic(
                TokenKind::BlockEnd,
                self.pos,
                self.line,
                self.column,
            ));
        }
    }

    fn push_token(&mut self, token: Token) -> usize {
        let slot = self.tokens_taken + self.tokens.len();
        log::trace!("token #{}: {}", slot, token);
        self.tokens.push_back(token);
        slot
    }

    fn insert_token(&mut self, slot: usize, token: Token) {
        debug_assert!(slot >= self.tokens_taken, "token #{} already delivered", slot);
        let index = slot.saturating_sub(self.tokens_taken);
        log::trace!("token #{} (inserted): {}", slot, token);
        self.tokens.insert(index, token);
    }

    fn fetch_end_of_input(&mut self) {
        let closed = self.indents.flush_all();
        for _ in 0..closed {
            self.push_token(Token::synthetic(
                TokenKind::BlockEnd,
                self.pos,
                self.line,
                self.column,
            ));
        }

        log::debug!(
            "end of input at line {}, {} blocks opened",
            self.line,
            self.indents.opened_count()
        );

        self.push_token(Token::synthetic(
            TokenKind::EndOfInput,
            self.pos,
            self.line,
            self.column,
        ));
        self.pending_key = None;
        self.done = true;
    }

    fn fetch_document_marker(&mut self, kind: TokenKind) {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        let token = Token::new(kind, start, start + 2, line, column, &self.source[start..start + 3]);

        self.consume(3);
        if self.look.is_newline(self.pos) {
            self.consume(1);
        }

        self.push_token(token);
    }

    fn fetch_colon(&mut self) -> Result<(), ScanError> {
        self.push_token(Token::new(
            TokenKind::Colon,
            self.pos,
            self.pos,
            self.line,
            self.column,
            ":",
        ));
        self.consume(1);

        let mut continuation = None;
        loop {
            match self.look.at(self.pos) {
                Some(b' ') => self.consume(1),
                Some(b'^') => {
                    self.consume(1);
                    continuation = Some(Continuation::Folded);
                }
                Some(b'|') => {
                    self.consume(1);
                    continuation = Some(Continuation::Literal);
                }
                Some(b'\n') => {
                    self.consume(1);
                    break;
                }
                _ => break,
            }
        }
        // a single blank line may follow the colon line
        if self.look.is_newline(self.pos) {
            self.consume(1);
        }

        self.open_pending_map();

        if let Some(style) = continuation {
            self.fetch_continuation(style)?;
        }

        Ok(())
    }

    /// Inserts a map start in front of the pending key when the key's column
    /// opens a deeper level. A key is considered once, at its first colon.
    fn open_pending_map(&mut self) {
        let Some(key) = self.pending_key.as_mut() else {
            return;
        };
        if key.settled {
            return;
        }
        key.settled = true;
        let key = *key;

        if self.config.implicit_root_map && key.column == 0 {
            return;
        }

        if self.indents.try_open(key.column) {
            log::debug!(
                "map start at line {}, column {} (depth {})",
                key.line,
                key.column,
                self.indents.depth()
            );
            self.insert_token(
                key.slot,
                Token::synthetic(TokenKind::MapStart, key.offset, key.line, key.column),
            );
            if let Some(pending) = self.pending_key.as_mut() {
                pending.slot += 1;
            }
        }
    }

    /// Reads the indented lines following a `^` or `|` marker into a single
    /// scalar. Each line must carry the innermost indent plus the configured
    /// width; that prefix is stripped and the first shorter line ends the
    /// value.
    fn fetch_continuation(&mut self, style: Continuation) -> Result<(), ScanError> {
        let start = self.pos;
        let line = self.line;
        let required = self.indents.innermost() + self.config.indent_width;
        let mut lines: Vec<&'a str> = Vec::new();
        let mut first = true;

        while !self.look.is_end_of_input(self.pos) {
            let spaces = self.look.count_spaces(self.pos);
            if spaces < required {
                if first {
                    if self.config.strict_continuation {
                        return Err(ScanError::ContinuationIndent {
                            expected: required,
                            found: spaces,
                            span: self.pos..self.line_end(self.pos),
                        });
                    }
                    log::debug!(
                        "no continuation data at line {}: indent {} < {}",
                        self.line,
                        spaces,
                        required
                    );
                }
                break;
            }

            self.consume(required);
            let text = self.read_line();
            if !text.is_empty() {
                lines.push(text);
            }
            first = false;
        }

        let stop = self.pos.saturating_sub(1).max(start);
        self.push_token(Token::new(
            TokenKind::Scalar,
            start,
            stop,
            line,
            required,
            lines.join(style.separator()),
        ));

        Ok(())
    }

    /// Returns the rest of the current line and consumes its newline.
    fn read_line(&mut self) -> &'a str {
        let source = self.source;
        let start = self.pos;

        while matches!(self.look.at(self.pos), Some(b) if b != b'\n') {
            self.consume(1);
        }
        let text = &source[start..self.pos];
        self.consume(1);

        text
    }

    fn line_end(&self, from: usize) -> usize {
        self.source[from..]
            .find('\n')
            .map_or(self.source.len(), |offset| from + offset)
    }

    fn fetch_element(&mut self) {
        if self.indents.try_open(self.column) {
            self.push_token(Token::synthetic(
                TokenKind::ListStart,
                self.pos,
                self.line,
                self.column,
            ));
        }

        self.push_token(Token::new(
            TokenKind::Element,
            self.pos,
            self.pos,
            self.line,
            self.column,
            "-",
        ));
        self.consume(1);
    }

    fn fetch_comment(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.column);

        while matches!(self.look.at(self.pos), Some(b) if b != b'\n') {
            self.consume(1);
        }

        if self.config.emit_comments {
            let token = Token::new(
                TokenKind::Comment,
                start,
                self.pos - 1,
                line,
                column,
                &self.source[start..self.pos],
            );
            self.push_token(token);
        }
    }

    /// Quoted scalars keep their raw text, quotes included. A doubled `''`
    /// inside single quotes and any backslash pair inside double quotes do
    /// not close the scalar.
    fn fetch_quoted_scalar(&mut self, quote: u8) -> Result<(), ScanError> {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        self.consume(1);

        loop {
            match self.look.at(self.pos) {
                None => {
                    return Err(ScanError::UnterminatedScalar {
                        quote: char::from(quote),
                        span: start..self.pos,
                    });
                }
                Some(b) if b == quote => {
                    if quote == b'\'' && self.look.at(self.pos + 1) == Some(b'\'') {
                        self.consume(2);
                    } else {
                        self.consume(1);
                        break;
                    }
                }
                Some(b'\\') if quote == b'"' => self.consume(2),
                Some(_) => self.consume(1),
            }
        }

        let token = Token::new(
            TokenKind::Scalar,
            start,
            self.pos - 1,
            line,
            column,
            &self.source[start..self.pos],
        );
        self.push_scalar(token);

        Ok(())
    }

    /// A plain scalar is a sequence of runs separated by single-line space
    /// gaps. Trailing spaces are left for the whitespace skipper.
    fn fetch_plain_scalar(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        let mut spaces = 0;

        loop {
            let run = self.look.count_run(self.pos + spaces);
            if run == 0 {
                break;
            }
            self.consume(spaces + run);
            spaces = self.look.count_spaces(self.pos);
        }
        debug_assert!(self.pos > start, "empty plain scalar at {}", start);

        let token = Token::new(
            TokenKind::Scalar,
            start,
            self.pos.saturating_sub(1).max(start),
            line,
            column,
            &self.source[start..self.pos],
        );
        self.push_scalar(token);
    }

    fn push_scalar(&mut self, token: Token) {
        let (offset, line, column) = (token.start, token.line, token.column);
        let slot = self.push_token(token);

        if self.look.colon_follows(self.pos) {
            if self.look.colon_follows_with_newline(self.pos) {
                log::trace!("key at line {} takes a block value", line);
            }
            self.pending_key = Some(PendingKey {
                slot,
                offset,
                line,
                column,
                settled: false,
            });
        } else {
            self.pending_key = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &str, config: ScannerConfig) -> Result<Vec<Token>, ScanError> {
        let mut scanner = Scanner::new(source, config);
        while !scanner.done {
            scanner.fetch_more_tokens()?;
        }
        Ok(std::iter::from_fn(|| scanner.next_queued()).collect())
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        drain(source, ScannerConfig::default())
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_pending_key_holds_back_delivery() {
        let mut scanner = Scanner::new("  key: value\n", ScannerConfig::default());

        scanner.fetch_more_tokens().unwrap();
        assert_eq!(scanner.tokens.len(), 1);
        assert!(scanner.needs_more_tokens());

        scanner.fetch_more_tokens().unwrap();
        assert!(!scanner.needs_more_tokens());
        assert_eq!(scanner.next_queued().unwrap().kind, TokenKind::MapStart);
        assert_eq!(scanner.next_queued().unwrap().text, "key");
        assert_eq!(scanner.next_queued().unwrap().kind, TokenKind::Colon);
    }

    #[test]
    fn test_map_start_inserted_after_partial_delivery() {
        let mut scanner = Scanner::new("- a\n  b: c\n", ScannerConfig::default());
        let mut delivered = Vec::new();

        while !scanner.done {
            while scanner.needs_more_tokens() {
                scanner.fetch_more_tokens().unwrap();
            }
            if let Some(token) = scanner.next_queued() {
                delivered.push(token);
            }
        }
        delivered.extend(std::iter::from_fn(|| scanner.next_queued()));

        let kinds: Vec<_> = delivered.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ListStart,
                TokenKind::Element,
                TokenKind::Scalar,
                TokenKind::MapStart,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::BlockEnd,
                TokenKind::BlockEnd,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_key_candidate_cleared_by_plain_value() {
        let mut scanner = Scanner::new("a: b\n", ScannerConfig::default());

        scanner.fetch_more_tokens().unwrap();
        assert!(matches!(
            scanner.pending_key,
            Some(PendingKey { settled: false, slot: 0, .. })
        ));

        scanner.fetch_more_tokens().unwrap();
        assert!(matches!(
            scanner.pending_key,
            Some(PendingKey { settled: true, .. })
        ));

        scanner.fetch_more_tokens().unwrap();
        assert_eq!(scanner.tokens.back().unwrap().text, "b");
        assert!(scanner.pending_key.is_none());
    }

    #[test]
    fn test_map_start_takes_key_position() {
        let tokens = drain("a:\n  b: c\n", ScannerConfig::default()).unwrap();
        let map_start = tokens.iter().find(|t| t.kind == TokenKind::MapStart).unwrap();

        assert_eq!(map_start.start, 5);
        assert_eq!(map_start.stop, 5);
        assert_eq!(map_start.line, 1);
        assert_eq!(map_start.column, 2);
    }

    #[test]
    fn test_explicit_root_map() {
        let config = ScannerConfig::default().with_implicit_root_map(false);
        let kinds: Vec<_> = drain("k: v\n", config)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::MapStart,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::BlockEnd,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_column_counts_characters() {
        let tokens = drain("  ключ: значение\n", ScannerConfig::default()).unwrap();
        let colon = tokens.iter().find(|t| t.kind == TokenKind::Colon).unwrap();

        assert_eq!(colon.column, 6);
        assert_eq!(colon.start, 10);
    }

    #[test]
    fn test_dedent_closes_exactly_the_needed_levels() {
        assert_eq!(
            kinds("a:\n  b:\n    c: 1\n  d: 2\ne: 3\n"),
            vec![
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::MapStart,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::MapStart,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::BlockEnd,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::BlockEnd,
                TokenKind::Scalar,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let tokens = drain("# only", ScannerConfig::default()).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "# only");
        assert_eq!(tokens[0].stop, 5);
        assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_strict_continuation() {
        let config = ScannerConfig::default().with_strict_continuation(true);
        let err = drain("k: |\nx\n", config).unwrap_err();

        assert_eq!(
            err,
            ScanError::ContinuationIndent {
                expected: 2,
                found: 0,
                span: 5..6,
            }
        );
    }
}
