//! Team roster ordering for project detail pages.

/// Marker identifying a team leader in a member's role or name ("team lead").
pub const LEADER_MARKER: &str = "팀장";

/// Whether a member is shown as team leader.
pub fn is_team_leader(name: &str, role: Option<&str>) -> bool {
    role.is_some_and(|r| r.contains(LEADER_MARKER)) || name.contains(LEADER_MARKER)
}

/// Stable-sort so leaders come first; relative order is otherwise kept.
pub fn leaders_first<T>(members: &mut [T], is_leader: impl Fn(&T) -> bool) {
    members.sort_by_key(|m| !is_leader(m));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_detected_from_role_or_name() {
        assert!(is_team_leader("Kim", Some("팀장 / backend")));
        assert!(is_team_leader("Lee 팀장", None));
        assert!(!is_team_leader("Park", Some("designer")));
    }

    #[test]
    fn leaders_move_to_front_stably() {
        let mut members = vec![("Ahn", false), ("Cho", true), ("Han", false), ("Yoo", true)];
        leaders_first(&mut members, |m| m.1);
        let names: Vec<_> = members.iter().map(|m| m.0).collect();
        assert_eq!(names, ["Cho", "Yoo", "Ahn", "Han"]);
    }
}
