use crate::model::{LineEvent, LineKind, Record};
use crate::parsing::matchers::{default_matchers, is_all_caps, title_case, KeyLine, KeyMatcher};

/// Key given to text that appears before any key-bearing line.
pub const BOOTSTRAP_KEY: &str = "Unstructured";

/// Single left-to-right pass over document lines with one line of lookahead.
pub struct Classifier {
    matchers: Vec<Box<dyn KeyMatcher>>,
}

impl Classifier {
    pub fn new(max_label_chars: usize) -> Self {
        Classifier {
            matchers: default_matchers(max_label_chars),
        }
    }

    pub fn with_matchers(matchers: Vec<Box<dyn KeyMatcher>>) -> Self {
        Classifier { matchers }
    }

    fn match_key(&self, line: &str) -> Option<KeyLine> {
        self.matchers.iter().find_map(|m| {
            let hit = m.match_line(line);
            if hit.is_some() {
                log::debug!("{} matcher hit: {line:?}", m.name());
            }
            hit
        })
    }

    /// Classify every line of `text`, in order.
    pub fn classify(&self, text: &str) -> Vec<LineEvent> {
        let normalized = normalize_line_breaks(text);
        let lines: Vec<&str> = normalized.split('\n').map(str::trim).collect();
        let mut events = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let number = i + 1;
            i += 1;

            if line.is_empty() {
                events.push(LineEvent {
                    line: number,
                    kind: LineKind::Blank,
                });
                continue;
            }

            if let Some(kl) = self.match_key(line) {
                events.push(LineEvent {
                    line: number,
                    kind: LineKind::Open {
                        key: kl.label,
                        value: kl.value,
                    },
                });
                continue;
            }

            if is_all_caps(line) {
                if let Some(&next) = lines.get(i) {
                    if !next.is_empty() && self.match_key(next).is_none() {
                        log::debug!("heading {line:?} takes value {next:?}");
                        events.push(LineEvent {
                            line: number,
                            kind: LineKind::Heading {
                                key: title_case(line),
                                value: next.to_string(),
                            },
                        });
                        i += 1;
                        continue;
                    }
                }
            }

            events.push(LineEvent {
                line: number,
                kind: LineKind::Append(line.to_string()),
            });
        }

        events
    }
}

/// Convert "\r\n" and lone '\r' to '\n'.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Current record plus the records already closed.
#[derive(Debug, Default)]
pub struct ParseState {
    current: Option<Record>,
    finished: Vec<Record>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    pub fn apply(&mut self, event: LineEvent) {
        match event.kind {
            LineKind::Open { key, value } | LineKind::Heading { key, value } => {
                self.close();
                self.current = Some(Record::new(key, value));
            }
            LineKind::Append(text) => match self.current.as_mut() {
                Some(record) => record.push_comment(&text),
                None => {
                    self.current = Some(Record::new(BOOTSTRAP_KEY, "").with_comments(text));
                }
            },
            LineKind::Blank => {
                if let Some(record) = self.current.as_mut() {
                    record.comments.push('\n');
                }
            }
        }
    }

    fn close(&mut self) {
        if let Some(mut record) = self.current.take() {
            record.comments.truncate(record.comments.trim_end().len());
            self.finished.push(record);
        }
    }

    /// Close the open record and hand back the ordered sequence.
    pub fn finish(mut self) -> Vec<Record> {
        self.close();
        self.finished
    }
}

/// Fold classifier events into raw records (no post-processing).
pub fn collect_records(events: impl IntoIterator<Item = LineEvent>) -> Vec<Record> {
    let mut state = ParseState::new();
    for event in events {
        state.apply(event);
    }
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::matchers::DEFAULT_MAX_LABEL_CHARS;

    fn records(text: &str) -> Vec<Record> {
        collect_records(Classifier::new(DEFAULT_MAX_LABEL_CHARS).classify(text))
    }

    #[test]
    fn test_line_breaks_normalized() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc\n"), "a\nb\nc\n");
        let recs = records("Name: Alice\r\n  Pune based  \r\nAge: 34");
        assert_eq!(recs[0].comments, "Pune based");
        assert_eq!(recs[1], Record::new("Age", "34"));
    }

    #[test]
    fn test_adjacent_key_lines_never_merge() {
        let recs = records("Name: Alice\nAge - 34\nCity: Pune");
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1], Record::new("Age", "34"));
    }

    #[test]
    fn test_comment_lines_attach_to_open_record() {
        let recs = records("Salary: 2800000\nA strong raise.\nSecond sentence.");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].comments, "A strong raise.\nSecond sentence.");
    }

    #[test]
    fn test_blank_line_keeps_paragraph_break() {
        let recs = records("Skills: Rust\nFirst para.\n\nSecond para.");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].comments, "First para.\n\nSecond para.");
    }

    #[test]
    fn test_break_after_key_line_survives_close() {
        let recs = records("Name: X\n\nText\n\n");
        assert_eq!(recs[0].comments, "\n\nText");

        let recs = records("Name: Alice Rao\n\nAge: 34");
        assert_eq!(recs[0].comments, "");
    }

    #[test]
    fn test_custom_matcher_table() {
        struct EqualsMatcher;

        impl KeyMatcher for EqualsMatcher {
            fn match_line(&self, line: &str) -> Option<KeyLine> {
                let (label, value) = line.split_once('=')?;
                Some(KeyLine {
                    label: label.trim().to_string(),
                    value: value.trim().to_string(),
                })
            }

            fn name(&self) -> &str {
                "equals"
            }
        }

        let classifier = Classifier::with_matchers(vec![Box::new(EqualsMatcher)]);
        let recs = collect_records(classifier.classify("city = Pune\nName: Alice"));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].key, "city");
        assert_eq!(recs[0].value, "Pune");
        assert_eq!(recs[0].comments, "Name: Alice");
    }

    #[test]
    fn test_bootstrap_record() {
        let recs = records("Profile summary\nName: Alice");
        assert_eq!(recs[0].key, BOOTSTRAP_KEY);
        assert_eq!(recs[0].value, "");
        assert_eq!(recs[0].comments, "Profile summary");
        assert_eq!(recs[1].key, "Name");
    }

    #[test]
    fn test_leading_and_trailing_blanks_are_ignored() {
        let recs = records("\n\n\nName: Alice\n\n\n");
        assert_eq!(recs, vec![Record::new("Name", "Alice")]);
    }

    #[test]
    fn test_heading_consumes_next_line() {
        let events = Classifier::new(DEFAULT_MAX_LABEL_CHARS)
            .classify("EDUCATION\nIIT Delhi\nRanked 15th.");
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].kind,
            LineKind::Heading {
                key: "Education".into(),
                value: "IIT Delhi".into()
            }
        );
        assert_eq!(events[1].line, 3);
    }

    #[test]
    fn test_heading_falls_through_when_next_is_key_line() {
        let recs = records("Name: Alice\nEDUCATION\nDegree: B.Tech");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].comments, "EDUCATION");
        assert_eq!(recs[1], Record::new("Degree", "B.Tech"));
    }

    #[test]
    fn test_heading_falls_through_before_blank_or_end() {
        let recs = records("SUMMARY\n\nText");
        assert_eq!(recs[0].key, BOOTSTRAP_KEY);
        assert_eq!(recs[0].comments, "SUMMARY\n\nText");

        let recs = records("Name: Alice\nSUMMARY");
        assert_eq!(recs[0].comments, "SUMMARY");
    }

    #[test]
    fn test_event_lines_are_strictly_increasing() {
        let text = "Intro\nName: A\n\nHEADING\nvalue\nmore\nKey - V";
        let events = Classifier::new(DEFAULT_MAX_LABEL_CHARS).classify(text);
        assert!(events.windows(2).all(|w| w[0].line < w[1].line));
    }

    #[test]
    fn test_blank_input() {
        assert!(records("").is_empty());
        assert!(records("   \n\n \t\n").is_empty());
    }
}
