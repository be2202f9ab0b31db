//! インデントスタック

/// Columns of the currently open blocks, strictly increasing from the
/// outermost level at the bottom to the innermost at the top.
#[derive(Debug, Clone, Default)]
pub struct IndentStack {
    levels: Vec<usize>,
    opened: usize,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<usize> {
        self.levels.last().copied()
    }

    /// 最も内側のインデント（ブロックが無ければ 0）
    pub fn innermost(&self) -> usize {
        self.top().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of successful [`try_open`](Self::try_open) calls so far.
    pub fn opened_count(&self) -> usize {
        self.opened
    }

    /// Opens a new level when the stack is empty or `column` is deeper than
    /// the innermost level. Returns whether a level was opened.
    pub fn try_open(&mut self, column: usize) -> bool {
        match self.top() {
            Some(top) if column <= top => false,
            _ => {
                log::trace!("indent push {} (depth {})", column, self.levels.len() + 1);
                self.levels.push(column);
                self.opened += 1;
                true
            }
        }
    }

    /// Pops the innermost level if `column` is shallower than it.
    pub fn close_one(&mut self, column: usize) -> bool {
        match self.top() {
            Some(top) if column < top => {
                log::trace!("indent pop {} for column {}", top, column);
                self.levels.pop();
                true
            }
            _ => false,
        }
    }

    /// Pops every level deeper than `column` and returns how many were
    /// popped. One block end is owed per popped level.
    pub fn close_while(&mut self, column: usize) -> usize {
        let mut closed = 0;
        while self.close_one(column) {
            closed += 1;
        }
        closed
    }

    /// Pops all remaining levels, innermost first.
    pub fn flush_all(&mut self) -> usize {
        let closed = self.levels.len();
        while let Some(top) = self.levels.pop() {
            log::trace!("indent pop {} at end of input", top);
        }
        closed
    }
}
