use regex::Regex;
use std::sync::LazyLock;

/// Longest key label accepted by the default matchers.
pub const DEFAULT_MAX_LABEL_CHARS: usize = 81;

/// `<label>: <rest>`. The label class excludes ':' so the split is always at
/// the first colon.
static COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\p{L}\p{N} .&()/\-]+):(.*)$").unwrap());

/// `<label> <dash> <rest>` with hyphen, en-dash or em-dash. Lazy label so the
/// first separator wins.
static DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\p{L}\p{N} .&()/\-]+?)\s+[-\x{2013}\x{2014}]\s+(.*)$").unwrap()
});

/// A line recognized as carrying a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine {
    pub label: String,
    pub value: String,
}

/// A pure line → key/value detector. Matchers are tried in order and the first
/// hit wins.
pub trait KeyMatcher: Send + Sync {
    fn match_line(&self, line: &str) -> Option<KeyLine>;

    /// Short name used in debug logs.
    fn name(&self) -> &str;
}

pub struct ColonMatcher {
    pub max_label_chars: usize,
}

impl KeyMatcher for ColonMatcher {
    fn match_line(&self, line: &str) -> Option<KeyLine> {
        let caps = COLON_RE.captures(line)?;
        key_line(&caps[1], &caps[2], self.max_label_chars)
    }

    fn name(&self) -> &str {
        "colon"
    }
}

pub struct DashMatcher {
    pub max_label_chars: usize,
}

impl KeyMatcher for DashMatcher {
    fn match_line(&self, line: &str) -> Option<KeyLine> {
        let caps = DASH_RE.captures(line)?;
        key_line(&caps[1], &caps[2], self.max_label_chars)
    }

    fn name(&self) -> &str {
        "dash"
    }
}

fn key_line(label: &str, rest: &str, max_label_chars: usize) -> Option<KeyLine> {
    if label.chars().count() > max_label_chars {
        return None;
    }
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(KeyLine {
        label: label.to_string(),
        value: rest.trim().to_string(),
    })
}

/// The default rule table: colon form, then dash form.
pub fn default_matchers(max_label_chars: usize) -> Vec<Box<dyn KeyMatcher>> {
    vec![
        Box::new(ColonMatcher { max_label_chars }),
        Box::new(DashMatcher { max_label_chars }),
    ]
}

/// True when the line has at least one cased letter and none in lower case.
pub fn is_all_caps(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Upper-case the first letter of every word, lower-case the rest.
/// A word starts at any letter that follows a non-letter, so `B.TECH` becomes
/// `B.Tech`.
pub fn title_case(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_letter = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
