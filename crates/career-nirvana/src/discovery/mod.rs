//! Career story discovery: the in-memory story catalog, the as-you-type search engine with
//! match highlighting, and the static content surfaces (roadmaps, thumbnails, story lists).

pub mod catalog;
mod highlight;
mod import;
pub mod roadmaps;
mod search;
pub mod stories;
pub mod thumbnails;


pub use catalog::{CareerRecord, StoryCatalog};
pub use highlight::{highlight, Segment};
pub use import::{CatalogImportError, CatalogImporter};
pub use roadmaps::{CareerRoadmap, RoadmapGallery};
pub use search::{
    result_summary, search, PanelState, SearchOutcome, MAX_RESULTS, NO_RESULT_HINTS,
    POPULAR_SEARCHES,
};
pub use stories::{featured, filter_videos, StoryCard};
pub use thumbnails::thumbnail_for;
