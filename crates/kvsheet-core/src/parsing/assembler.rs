use std::collections::HashMap;

use crate::model::Record;

/// First comment lines shorter than this are promoted into an empty value.
pub const DEFAULT_PROMOTE_MAX_CHARS: usize = 120;

/// Run both post-processing passes, in order.
pub fn assemble(mut records: Vec<Record>, promote_max_chars: usize) -> Vec<Record> {
    backfill_values(&mut records, promote_max_chars);
    disambiguate_keys(&mut records);
    records
}

/// Promote a short leading comment line into an empty `value`.
pub fn backfill_values(records: &mut [Record], promote_max_chars: usize) {
    for record in records.iter_mut() {
        if !record.value.is_empty() {
            continue;
        }
        let comments = record.comments.trim();
        if comments.is_empty() {
            continue;
        }

        let (first, rest) = comments.split_once('\n').unwrap_or((comments, ""));
        if first.chars().count() >= promote_max_chars {
            continue;
        }

        log::debug!("promoting {first:?} to value of {:?}", record.key);
        let value = first.trim().to_string();
        let rest = rest.trim().to_string();
        record.value = value;
        record.comments = rest;
    }
}

/// Rename the 2nd, 3rd, ... occurrence of a key to `"<key> <n>"`.
pub fn disambiguate_keys(records: &mut [Record]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records.iter_mut() {
        let count = seen.entry(record.key.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            record.key = format!("{} {}", record.key, count);
        }
    }
}
