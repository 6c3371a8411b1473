/// Trim tags, drop empty ones and repeats, keep first-seen order.
pub fn normalize_tags(raw: &[String], lowercase: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let tag = if lowercase {
            tag.to_lowercase()
        } else {
            tag.to_string()
        };
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Up to two uppercase initials from a display name ("Priya M." -> "PM").
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trims_and_drops_empty() {
        let tags = normalize_tags(&strings(&[" work ", "", "  ", "self-care"]), false);
        assert_eq!(tags, strings(&["work", "self-care"]));
    }

    #[test]
    fn lowercases_and_dedupes_when_asked() {
        let tags = normalize_tags(&strings(&["Anxiety", "anxiety ", "Help"]), true);
        assert_eq!(tags, strings(&["anxiety", "help"]));
    }

    #[test]
    fn keeps_case_otherwise() {
        let tags = normalize_tags(&strings(&["Gratitude", "gratitude"]), false);
        assert_eq!(tags, strings(&["Gratitude", "gratitude"]));
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Aryan S."), "AS");
        assert_eq!(initials("raj kumar singh"), "RK");
        assert_eq!(initials("You"), "Y");
        assert_eq!(initials("   "), "");
    }
}
