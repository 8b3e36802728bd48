/// Append-only text viewport for the server log stream.
///
/// Nothing is ever evicted. After every append the viewport is scrolled so
/// the last line is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogViewport {
    text: String,
    /// Byte offset of the start of every complete line in `text`.
    line_starts: Vec<usize>,
    height: usize,
    scroll_top: usize,
}

pub const DEFAULT_LOG_HEIGHT: usize = 12;

impl Default for LogViewport {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_HEIGHT)
    }
}

impl LogViewport {
    pub fn new(height: usize) -> Self {
        Self {
            text: String::new(),
            line_starts: Vec::new(),
            height: height.max(1),
            scroll_top: 0,
        }
    }

    /// Appends `line` verbatim followed by a newline, then scrolls to the bottom.
    pub fn append(&mut self, line: &str) {
        let base = self.text.len();
        self.line_starts.push(base);
        self.text.push_str(line);
        self.text.push('\n');
        // Multi-line payloads contribute one visual line per embedded newline.
        for (offset, _) in line.match_indices('\n') {
            self.line_starts.push(base + offset + 1);
        }
        self.scroll_to_bottom();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.line_starts.len().saturating_sub(self.height);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Index of the first visible line.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + self.height >= self.line_starts.len()
    }

    pub fn visible_lines(&self) -> Vec<String> {
        self.line_starts[self.scroll_top..]
            .iter()
            .map(|&start| {
                let rest = &self.text[start..];
                let end = rest.find('\n').unwrap_or(rest.len());
                rest[..end].to_string()
            })
            .collect()
    }
}
