/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input and collapses every maximal run of characters
/// outside `[a-z0-9]` into a single hyphen, then strips leading and
/// trailing hyphens. Lossy and not uniqueness-guaranteed; callers that
/// persist slugs must disambiguate collisions themselves.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(slugify("Acme & Co."), "acme-co");
        assert_eq!(slugify("  Broker   CRM  "), "broker-crm");
        assert_eq!(slugify("--already--slugged--"), "already-slugged");
    }

    #[test]
    fn is_deterministic_and_ascii_only() {
        let first = slugify("Acme & Co.");
        let second = slugify("Acme & Co.");
        assert_eq!(first, second);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn non_alphanumeric_only_input_yields_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn preserves_digits() {
        assert_eq!(slugify("Top 10 CRMs, 2024 Edition"), "top-10-crms-2024-edition");
    }
}
