#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopType {
    Airport,
    FerryTerminal,
    Ground,
}

const FERRY_KEYWORDS: &[&str] = &["паром", "ferry", "переправа", "пристань"];

/// Hardcoded exception list for stops that are ferry terminals in substance
/// but whose id/name carries none of `FERRY_KEYWORDS` and whose metadata was
/// never tagged `type = "ferry_terminal"` at ingestion time.
const FERRY_EXCEPTIONS: &[&str] = &[];

/// Classifies a stop for transfer/ferry weighting (§4.D, §4.G step 5).
/// `is_airport` wins over ferry classification; a stop is never both.
pub fn classify_stop(
    id: &str,
    name: &str,
    is_airport: bool,
    metadata_type: Option<&str>,
) -> StopType {
    if is_airport {
        return StopType::Airport;
    }

    if metadata_type == Some("ferry_terminal") {
        return StopType::FerryTerminal;
    }

    let haystack = format!("{id} {name}").to_lowercase();
    if FERRY_KEYWORDS.iter().any(|keyword| haystack.contains(keyword)) {
        return StopType::FerryTerminal;
    }

    if FERRY_EXCEPTIONS.contains(&id) {
        return StopType::FerryTerminal;
    }

    StopType::Ground
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airport_wins_over_keyword() {
        assert_eq!(classify_stop("stop-1", "паром airport", true, None), StopType::Airport);
    }

    #[test]
    fn keyword_match_classifies_ferry() {
        assert_eq!(classify_stop("stop-2", "Паромная переправа", false, None), StopType::FerryTerminal);
    }

    #[test]
    fn metadata_tag_classifies_ferry() {
        assert_eq!(classify_stop("stop-3", "Пристань", false, Some("ferry_terminal")), StopType::FerryTerminal);
    }

    #[test]
    fn defaults_to_ground() {
        assert_eq!(classify_stop("stop-4", "Автовокзал", false, None), StopType::Ground);
    }
}
