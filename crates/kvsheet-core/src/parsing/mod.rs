pub mod assembler;
pub mod classifier;
pub mod matchers;

use serde::{Deserialize, Serialize};

use crate::model::{LineKind, ParseStats, Record};
use assembler::{assemble, DEFAULT_PROMOTE_MAX_CHARS};
use classifier::{collect_records, normalize_line_breaks, Classifier};
use matchers::DEFAULT_MAX_LABEL_CHARS;

/// Tunables for the classifier and the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Longest label a colon or dash line may carry to count as a key.
    pub max_label_chars: usize,
    /// Value backfill only promotes first comment lines shorter than this.
    pub promote_max_chars: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
            promote_max_chars: DEFAULT_PROMOTE_MAX_CHARS,
        }
    }
}

/// Parse document text into finalized records.
///
/// Empty or all-blank text yields an empty vector; nothing here fails.
pub fn parse_text(text: &str, options: &ParseOptions) -> Vec<Record> {
    parse_text_with_stats(text, options).0
}

/// Like [`parse_text`], also returning line counters.
pub fn parse_text_with_stats(text: &str, options: &ParseOptions) -> (Vec<Record>, ParseStats) {
    let classifier = Classifier::new(options.max_label_chars);
    let events = classifier.classify(text);

    let mut stats = ParseStats {
        characters: text.chars().count(),
        lines: normalize_line_breaks(text).lines().count(),
        ..Default::default()
    };
    for event in &events {
        match event.kind {
            LineKind::Open { .. } => stats.key_lines += 1,
            LineKind::Heading { .. } => stats.headings += 1,
            LineKind::Append(_) => stats.comment_lines += 1,
            LineKind::Blank => {}
        }
    }

    let records = assemble(collect_records(events), options.promote_max_chars);
    log::debug!(
        "parsed {} record(s) from {} line(s)",
        records.len(),
        stats.lines
    );
    (records, stats)
}
