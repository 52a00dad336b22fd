use super::thumbnails::thumbnail_for;
use crate::backend::VideoCard;
use serde::Serialize;

/// Number of stories featured on the home surface.
pub const FEATURED_STORIES: usize = 3;

/// Video card ready for display, with its thumbnail resolved.
#[derive(Debug, Clone, Serialize)]
pub struct StoryCard {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub thumbnail: &'static str,
}

impl From<&VideoCard> for StoryCard {
    fn from(video: &VideoCard) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            short_description: video.short_description.clone(),
            thumbnail: thumbnail_for(&video.id),
        }
    }
}

pub fn featured(videos: &[VideoCard]) -> Vec<StoryCard> {
    videos
        .iter()
        .take(FEATURED_STORIES)
        .map(StoryCard::from)
        .collect()
}

/// Case-insensitive filter on title or short description. A blank term keeps everything.
pub fn filter_videos(videos: &[VideoCard], term: &str) -> Vec<StoryCard> {
    let term = term.trim().to_lowercase();
    videos
        .iter()
        .filter(|video| {
            term.is_empty()
                || video.title.to_lowercase().contains(&term)
                || video.short_description.to_lowercase().contains(&term)
        })
        .map(StoryCard::from)
        .collect()
}
