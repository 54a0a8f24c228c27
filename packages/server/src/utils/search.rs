use crate::entity::video;

/// Case-insensitive substring match of `query` against title, slug and tags.
pub fn matches(query: &str, title: &str, slug: &str, tags: &[String]) -> bool {
    let query = query.to_lowercase();
    title.to_lowercase().contains(&query)
        || slug.to_lowercase().contains(&query)
        || tags.iter().any(|tag| tag.to_lowercase().contains(&query))
}

/// Keep the videos matching `query`, preserving their order.
pub fn filter_videos(videos: Vec<video::Model>, query: &str) -> Vec<video::Model> {
    videos
        .into_iter()
        .filter(|v| matches(query, &v.title, &v.slug, &v.tags.0))
        .collect()
}
