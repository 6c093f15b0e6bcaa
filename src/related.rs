use std::collections::HashSet;

use crate::content::Post;
use crate::text_utils::normalize_tag;

fn tag_set(post: &Post) -> HashSet<String> {
    post.tags
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Ranks `candidates` by how many normalized tags they share with `post`,
/// newest first on equal overlap. Candidates sharing nothing, and `post`
/// itself, are left out.
pub fn select_related<'a>(post: &Post, candidates: &[&'a Post], limit: usize) -> Vec<&'a Post> {
    let base_tags = tag_set(post);
    if base_tags.is_empty() {
        return vec![];
    }

    let mut scored: Vec<(usize, &'a Post)> = candidates
        .iter()
        .filter(|candidate| candidate.slug != post.slug)
        .map(|candidate| (tag_set(candidate).intersection(&base_tags).count(), *candidate))
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    scored.sort_by(|(overlap_a, a), (overlap_b, b)| {
        overlap_b
            .cmp(overlap_a)
            .then_with(|| b.datetime.cmp(&a.datetime))
    });

    scored.into_iter().take(limit).map(|(_, candidate)| candidate).collect()
}
