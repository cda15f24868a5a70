use model::classify_stop;
use reference::is_city_in_reference;

const FERRY_KEYWORDS: &[&str] = &["паром", "ferry", "переправа", "пристань"];

/// Whether a stop is admissible into the graph (§3.2, §4.F step 2, §4.G
/// step 1). Applied to both real and virtual stops: non-empty name,
/// non-empty cityId present in the unified reference, no malformed
/// placeholder id, and ferry-keyword ids must be confirmed by metadata.
pub fn is_admissible_stop(
    id: &str,
    name: &str,
    city_id: Option<&str>,
    is_airport: bool,
    metadata_type: Option<&str>,
) -> bool {
    if name.trim().is_empty() {
        return false;
    }

    let Some(city_id) = city_id.filter(|c| !c.trim().is_empty()) else {
        return false;
    };

    if !is_city_in_reference(city_id) {
        return false;
    }

    if has_malformed_id(id) {
        return false;
    }

    let haystack = format!("{id} {name}").to_lowercase();
    let looks_like_ferry = FERRY_KEYWORDS.iter().any(|kw| haystack.contains(kw));
    if looks_like_ferry && classify_stop(id, name, is_airport, metadata_type) != model::StopType::FerryTerminal {
        return false;
    }

    true
}

/// Rejects `virtual-stop-` followed only by dashes (a stable-id generation
/// failure collapsed to nothing) or any id with 3+ consecutive dashes.
fn has_malformed_id(id: &str) -> bool {
    if let Some(suffix) = id.strip_prefix("virtual-stop-") {
        if !suffix.is_empty() && suffix.chars().all(|c| c == '-') {
            return true;
        }
    }

    let mut run = 0;
    for c in id.chars() {
        if c == '-' {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_city_id() {
        assert!(!is_admissible_stop("stop-1", "Name", None, false, None));
    }

    #[test]
    fn rejects_triple_dash_id() {
        assert!(!is_admissible_stop("stop---1", "Name", Some("якутск"), false, None));
    }

    #[test]
    fn rejects_malformed_virtual_stop_id() {
        assert!(!is_admissible_stop("virtual-stop---", "Name", Some("якутск"), false, None));
    }

    #[test]
    fn rejects_unconfirmed_ferry_keyword() {
        assert!(!is_admissible_stop("stop-2", "Паромная переправа", Some("якутск"), false, None));
    }

    #[test]
    fn accepts_confirmed_ferry_keyword() {
        assert!(is_admissible_stop(
            "stop-3",
            "Паромная переправа",
            Some("якутск"),
            false,
            Some("ferry_terminal")
        ));
    }
}
