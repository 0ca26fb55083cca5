use serde::{Deserialize, Serialize};

/// One emitted (Key, Value, Comments) row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Comments", default)]
    pub comments: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Record {
            key: key.into(),
            value: value.into(),
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Append a line of free text, newline-joined onto existing comments.
    pub fn push_comment(&mut self, line: &str) {
        if !self.comments.is_empty() {
            self.comments.push('\n');
        }
        self.comments.push_str(line);
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty() && self.comments.is_empty()
    }
}

/// What a single source line contributes to the record stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Close the open record and start a new one.
    Open { key: String, value: String },
    /// Same as `Open`, from an all-caps heading plus the line below it.
    Heading { key: String, value: String },
    /// Continue the open record's comments.
    Append(String),
    /// Paragraph break.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    /// 1-based line number in the normalized source text.
    pub line: usize,
    pub kind: LineKind,
}

/// Counters collected while parsing, reported by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub pages: usize,
    pub characters: usize,
    pub lines: usize,
    pub key_lines: usize,
    pub headings: usize,
    pub comment_lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub records: Vec<Record>,
    pub stats: ParseStats,
}
