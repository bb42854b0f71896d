//! Normalisation of free-text form fields before they reach the store.
//!
//! Optional columns are never persisted as empty strings: a blank or
//! whitespace-only value becomes `None` (SQL `NULL`).

use crate::error::CoreError;

/// Coerce a blank optional value to `None`, keeping non-blank input verbatim.
///
/// Long-form text such as markdown descriptions keeps its original
/// whitespace; only the emptiness test is done on the trimmed value.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => None,
    }
}

/// Like [`blank_to_none`] but trims the kept value.
///
/// Used for short single-line fields (affiliation, role, team description).
pub fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate a required single-line field and return it trimmed.
///
/// `label` names the field in the error message, e.g. `"Project title"`.
pub fn require_non_blank(value: &str, label: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

/// Normalise a submitted tag list.
///
/// Tags are trimmed, blanks are dropped and duplicates keep only their first
/// occurrence, so the stored set matches what the tag input displayed.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_become_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("")), None);
        assert_eq!(blank_to_none(Some("   \t\n")), None);
    }

    #[test]
    fn non_blank_values_are_kept_verbatim() {
        assert_eq!(
            blank_to_none(Some("  # Heading\n")),
            Some("  # Heading\n".to_string())
        );
    }

    #[test]
    fn trimmed_or_none_trims() {
        assert_eq!(trimmed_or_none(Some("  Seoul  ")), Some("Seoul".to_string()));
        assert_eq!(trimmed_or_none(Some("  ")), None);
    }

    #[test]
    fn require_non_blank_rejects_whitespace() {
        let err = require_non_blank("   ", "Project title").unwrap_err();
        assert!(err.to_string().contains("Project title is required"));
        assert_eq!(require_non_blank(" Demo ", "Project title").unwrap(), "Demo");
    }

    #[test]
    fn normalize_tags_drops_blanks_and_duplicates() {
        let tags = normalize_tags(["AI", " Web ", "", "AI", "  "]);
        assert_eq!(tags, vec!["AI".to_string(), "Web".to_string()]);
    }
}
