/// Canonicalizes a city name so that every comparison and id-generation step
/// in the system agrees on what "the same city" means: lowercase, trimmed,
/// the `"г."` ("city of") abbreviation stripped, `ё` folded to `е`,
/// whitespace collapsed, and anything that isn't a word character (Cyrillic
/// included) or hyphen removed.
pub fn normalize_city_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();

    let stripped = lower
        .strip_prefix("г.")
        .or_else(|| lower.strip_prefix("г "))
        .unwrap_or(&lower)
        .trim_start();

    let folded: String = stripped.chars().map(|c| if c == 'ё' { 'е' } else { c }).collect();

    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || is_cyrillic(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_idempotent() {
        for input in ["Якутск", "г. Москва", "  Новосибирск  ", "Ёлочный", "Moscow!"] {
            let once = normalize_city_name(input);
            let twice = normalize_city_name(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn folds_yo_to_ye() {
        assert_eq!(normalize_city_name("Ёлочный"), "елочный".to_lowercase());
    }

    #[test]
    fn strips_city_prefix() {
        assert_eq!(normalize_city_name("г. Москва"), "москва");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_city_name("  Якутск   "), "якутск");
    }
}
