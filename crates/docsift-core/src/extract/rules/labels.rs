//! Form-field label resolution.

use std::collections::BTreeMap;

/// Normalize a label for comparison: trim, lower-case, drop a trailing
/// colon.
pub fn normalize_label(label: &str) -> String {
    label.trim().trim_end_matches(':').trim_end().to_lowercase()
}

/// Look up a form-field value by alias list.
///
/// Exact matches on the normalized label win; with `fuzzy` enabled, a
/// second pass accepts containment in either direction ("Account Number"
/// resolves "Checking Account Number:"). Aliases are tried in order. Empty
/// values never match, since the engine maps unresolved labels to empty
/// strings.
pub fn lookup<'a>(
    fields: &'a BTreeMap<String, String>,
    aliases: &[&str],
    fuzzy: bool,
) -> Option<&'a str> {
    let normalized: Vec<(String, &str)> = fields
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (normalize_label(key), value.as_str()))
        .collect();

    for alias in aliases {
        if let Some((_, value)) = normalized.iter().find(|(key, _)| key == alias) {
            return Some(value);
        }
    }

    if fuzzy {
        for alias in aliases {
            if let Some((_, value)) = normalized
                .iter()
                .find(|(key, _)| key.contains(alias) || (alias.len() >= 6 && alias.contains(key.as_str())))
            {
                return Some(value);
            }
        }
    }

    None
}
