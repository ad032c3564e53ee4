use crate::schema::Member;

/// Finds the counterpart of `target` among `candidates`.
///
/// Matches the target's rename, or its own name, exactly. Candidates are
/// expected to have unique names; the first match is returned.
pub fn find_source_member<'a>(candidates: &[&'a Member], target: &Member) -> Option<&'a Member> {
    let name = target.lookup_name();
    candidates.iter().copied().find(|member| member.name == name)
}

/// Finds the target member that maps from `source`, honoring renames
pub fn find_target_member<'a>(targets: &[&'a Member], source: &Member) -> Option<&'a Member> {
    targets
        .iter()
        .copied()
        .find(|member| member.lookup_name() == source.name)
}
