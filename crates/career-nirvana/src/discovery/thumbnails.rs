/// Asset used for any job id without a dedicated thumbnail.
pub const FALLBACK_THUMBNAIL: &str = "/assets/creator-story.jpg";

const THUMBNAILS: [(&str, &str); 10] = [
    ("golgappa_seller", "/assets/golgappa-seller.jpg"),
    ("makeup_artist", "/assets/makeup-artist.jpg"),
    ("street_food_seller", "/assets/vendor-story.jpg"),
    ("data_analyst", "/assets/data-analyst.jpg"),
    ("carpenter", "/assets/carpenter.jpg"),
    ("rickshaw_driver", "/assets/rickshaw-driver.jpg"),
    ("graphic_designer", "/assets/graphic-designer.jpg"),
    ("student_youtuber", "/assets/student-youtuber.jpg"),
    ("mechanic", "/assets/mechanic.jpg"),
    ("baker", "/assets/homemaker-baker.jpg"),
];

/// Resolves the thumbnail for a backend job id. Home, stories, and detail surfaces all go
/// through here so they agree on the image.
pub fn thumbnail_for(job_id: &str) -> &'static str {
    THUMBNAILS
        .iter()
        .find(|(id, _)| *id == job_id)
        .map(|(_, asset)| *asset)
        .unwrap_or(FALLBACK_THUMBNAIL)
}

/// Every known job id, in table order.
pub fn known_job_ids() -> impl Iterator<Item = &'static str> {
    THUMBNAILS.iter().map(|(id, _)| *id)
}
