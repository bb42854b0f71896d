//! Case-insensitive substring matching used by the admin list filters.

/// True when `term` is blank or occurs (case-insensitively) in any field.
pub fn matches_term(term: Option<&str>, fields: &[Option<&str>]) -> bool {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// True when no filter value is given or it equals the candidate.
pub fn matches_filter<T: PartialEq>(filter: Option<&T>, candidate: Option<&T>) -> bool {
    match filter {
        None => true,
        Some(wanted) => candidate == Some(wanted),
    }
}
