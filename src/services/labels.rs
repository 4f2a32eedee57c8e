//! Row-label dispatch
//!
//! Tables on the portal are label/value rows. A label is normalized (case,
//! whitespace, trailing colon) and looked up exactly. Failing that, the
//! longest key the label starts with wins: the portal appends notes to some
//! labels, e.g. "CNR Number (Note the CNR number for future reference)".

/// Lowercase, single-spaced, without trailing `:`
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
        .to_lowercase()
}

pub fn lookup<T: Copy>(map: &phf::Map<&'static str, T>, raw: &str) -> Option<T> {
    let label = normalize_label(raw);
    if label.is_empty() {
        return None;
    }
    if let Some(value) = map.get(label.as_str()) {
        return Some(*value);
    }
    map.entries()
        .filter(|(key, _)| label.starts_with(**key))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, value)| *value)
}
