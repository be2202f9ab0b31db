//! Lookahead predicates over the raw source bytes.
//!
//! Every query takes an absolute byte position and never moves the scanner's
//! cursor. All structural characters are ASCII, so probing individual bytes
//! is safe on UTF-8 input: continuation bytes never compare equal to them.

/// 先読み専用のビュー
#[derive(Debug, Clone, Copy)]
pub struct Lookahead<'a> {
    input: &'a [u8],
}

impl<'a> Lookahead<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
        }
    }

    /// 指定位置のバイト（入力終端では `None`）
    pub fn at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    pub fn is_end_of_input(&self, pos: usize) -> bool {
        pos >= self.input.len()
    }

    pub fn is_newline(&self, pos: usize) -> bool {
        self.at(pos) == Some(b'\n')
    }

    pub fn is_comment_start(&self, pos: usize) -> bool {
        self.at(pos) == Some(b'#')
    }

    /// `:` followed by a space, a newline, or the end of input.
    pub fn is_colon_boundary(&self, pos: usize) -> bool {
        self.at(pos) == Some(b':') && matches!(self.at(pos + 1), None | Some(b' ' | b'\n'))
    }

    /// `-` followed by a space.
    pub fn is_list_element_marker(&self, pos: usize) -> bool {
        self.at(pos) == Some(b'-') && self.at(pos + 1) == Some(b' ')
    }

    pub fn is_document_start(&self, pos: usize, column: usize) -> bool {
        self.is_document_marker(pos, column, b'-')
    }

    pub fn is_document_end(&self, pos: usize, column: usize) -> bool {
        self.is_document_marker(pos, column, b'.')
    }

    /// Three marker characters at column 0, terminated by a space, a newline,
    /// or the end of input. Anything shorter or longer is not a marker.
    fn is_document_marker(&self, pos: usize, column: usize, marker: u8) -> bool {
        if column != 0 {
            return false;
        }

        (pos..pos + 3).all(|p| self.at(p) == Some(marker))
            && matches!(self.at(pos + 3), None | Some(b' ' | b'\n'))
    }

    /// 連続する空白の数
    pub fn count_spaces(&self, pos: usize) -> usize {
        self.input
            .get(pos..)
            .map_or(0, |rest| rest.iter().take_while(|&&b| b == b' ').count())
    }

    /// Length of the run starting at `pos` that contains no space, newline,
    /// colon boundary, comment start, or end of input.
    pub fn count_run(&self, pos: usize) -> usize {
        let mut end = pos;

        while let Some(b) = self.at(end) {
            if b == b' ' || b == b'\n' || b == b'#' || self.is_colon_boundary(end) {
                break;
            }
            end += 1;
        }

        end - pos
    }

    /// コロン境界が（空白を挟んで）続くかどうか
    pub fn colon_follows(&self, pos: usize) -> bool {
        self.is_colon_boundary(pos + self.count_spaces(pos))
    }

    /// Like [`colon_follows`](Self::colon_follows), but the colon must also
    /// end its line, so the value lives on the lines below.
    pub fn colon_follows_with_newline(&self, pos: usize) -> bool {
        let colon = pos + self.count_spaces(pos);
        if !self.is_colon_boundary(colon) {
            return false;
        }

        let after = colon + 1;
        let rest = after + self.count_spaces(after);
        self.is_newline(rest) || self.is_end_of_input(rest)
    }
}
