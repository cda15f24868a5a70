use crate::normalize::normalize_city_name;

/// Builds a deterministic, dash-separated id from a sequence of name parts
/// (e.g. city name + role, such as `"stable_id(&[\"Якутск\"])"` for a virtual
/// stop). Each part is normalized the way city names are, then whitespace and
/// any non-word character (Cyrillic preserved) is replaced with `-`, runs of
/// `-` are collapsed, and leading/trailing `-` trimmed.
///
/// Never returns an empty string: if every part normalizes away to nothing,
/// a fallback is derived from the raw byte values of the original input so
/// the id is still unique and stable across re-runs.
pub fn generate_stable_id(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .map(|part| normalize_city_name(part))
        .collect::<Vec<_>>()
        .join("-");

    let replaced: String = joined
        .chars()
        .map(|c| if c.is_whitespace() || !is_word_char(c) { '-' } else { c })
        .collect();

    let collapsed = collapse_dashes(&replaced);
    let trimmed = collapsed.trim_matches('-').to_lowercase();

    if !trimmed.is_empty() {
        return trimmed;
    }

    fallback_id(parts)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || is_cyrillic(c)
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

fn collapse_dashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_dash = false;
    for c in s.chars() {
        if c == '-' {
            if !last_was_dash {
                out.push('-');
            }
            last_was_dash = true;
        } else {
            out.push(c);
            last_was_dash = false;
        }
    }
    out
}

/// Synthesizes a stable, non-empty id from the raw input when every part
/// normalizes away to nothing (e.g. input made entirely of punctuation).
fn fallback_id(parts: &[&str]) -> String {
    let joined = parts.concat();
    if joined.is_empty() {
        return "id".to_owned();
    }
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in joined.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    format!("id-{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_returns_empty() {
        for input in [vec!["Якутск"], vec!["!!!"], vec![""], vec![" - - "]] {
            let id = generate_stable_id(&input);
            assert!(!id.is_empty(), "empty id for {input:?}");
        }
    }

    #[test]
    fn stable_across_calls() {
        let a = generate_stable_id(&["Новосибирск"]);
        let b = generate_stable_id(&["Новосибирск"]);
        assert_eq!(a, b);
    }

    #[test]
    fn matches_expected_virtual_stop_id() {
        assert_eq!(generate_stable_id(&["Новосибирск"]), "новосибирск");
    }

    #[test]
    fn collapses_repeated_dashes() {
        let id = generate_stable_id(&["Санкт -  Петербург"]);
        assert!(!id.contains("--"));
    }
}
