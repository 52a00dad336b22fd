use super::import::CatalogImportError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One career story that the search bar can surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub id: u32,
    #[serde(rename = "name")]
    pub display_name: String,
    pub title: String,
    pub location: String,
    #[serde(rename = "income")]
    pub income_range: String,
    pub tags: Vec<String>,
    #[serde(rename = "image")]
    pub image_ref: String,
    pub quote: String,
    #[serde(rename = "duration")]
    pub duration_label: String,
    pub category: String,
}

/// Read-only set of career stories, kept in insertion order.
#[derive(Debug, Clone)]
pub struct StoryCatalog {
    records: Vec<CareerRecord>,
}

impl StoryCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(records: Vec<CareerRecord>) -> Result<Self, CatalogImportError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogImportError::DuplicateId(record.id));
            }
        }
        Ok(Self { records })
    }

    pub fn standard() -> Self {
        Self {
            records: standard_records(),
        }
    }

    pub fn records(&self) -> &[CareerRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&CareerRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for StoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: u32,
    display_name: &str,
    title: &str,
    location: &str,
    income_range: &str,
    tags: &[&str],
    image_ref: &str,
    quote: &str,
    duration_label: &str,
    category: &str,
) -> CareerRecord {
    CareerRecord {
        id,
        display_name: display_name.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        income_range: income_range.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        image_ref: image_ref.to_string(),
        quote: quote.to_string(),
        duration_label: duration_label.to_string(),
        category: category.to_string(),
    }
}

fn standard_records() -> Vec<CareerRecord> {
    vec![
        record(
            1,
            "Rajesh Kumar",
            "Street Food Vendor",
            "Surat, Gujarat",
            "₹30K–₹80K/month",
            &["food", "business", "vendor", "entrepreneur", "street food", "cooking"],
            "/assets/vendor-story.jpg",
            "Started with ₹5000, now I employ 3 people and my cart is the most popular in the area.",
            "4:32",
            "Food & Hospitality",
        ),
        record(
            2,
            "Priya Sharma",
            "Content Creator",
            "Mumbai, Maharashtra",
            "₹40K–₹2L/month",
            &["youtube", "instagram", "content", "creator", "social media", "influencer", "video"],
            "/assets/creator-story.jpg",
            "What started as making videos for fun became my full-time career in 2 years.",
            "6:15",
            "Digital Media",
        ),
        record(
            3,
            "Arjun Patel",
            "Software Developer",
            "Bangalore, Karnataka",
            "₹60K–₹3L/month",
            &["programming", "coding", "software", "developer", "tech", "computer", "website", "app"],
            "/assets/developer-story.jpg",
            "Self-taught coding during lockdown, got my first job within 8 months.",
            "5:48",
            "Technology",
        ),
        record(
            4,
            "Meera Singh",
            "Wedding Photographer",
            "Jaipur, Rajasthan",
            "₹50K–₹1.5L/month",
            &["photography", "wedding", "photographer", "camera", "photos", "creative"],
            "https://images.unsplash.com/photo-1606800052052-a08af7148866",
            "Turned my passion for photography into a thriving wedding photography business.",
            "7:20",
            "Creative Arts",
        ),
        record(
            5,
            "Vikram Rao",
            "Digital Marketing Specialist",
            "Pune, Maharashtra",
            "₹35K–₹1.2L/month",
            &["digital marketing", "marketing", "social media", "advertising", "online", "campaigns"],
            "https://images.unsplash.com/photo-1460925895917-afdab827c52f",
            "Helped 100+ local businesses grow online. Started with just ₹10K investment.",
            "5:30",
            "Marketing",
        ),
        record(
            6,
            "Anita Verma",
            "Home Chef & Catering",
            "Delhi",
            "₹25K–₹90K/month",
            &["chef", "cooking", "catering", "food", "home chef", "kitchen", "recipes"],
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136",
            "Started cooking for neighbors, now I cater for 20+ events monthly.",
            "4:45",
            "Food & Hospitality",
        ),
        record(
            7,
            "Rohit Gupta",
            "Freelance Graphic Designer",
            "Hyderabad, Telangana",
            "₹30K–₹1L/month",
            &["graphic design", "designer", "freelance", "creative", "logo", "branding", "visual"],
            "https://images.unsplash.com/photo-1561070791-2526d30994b5",
            "Design logos and branding for startups. Work from home with global clients.",
            "6:10",
            "Creative Arts",
        ),
        record(
            8,
            "Sneha Joshi",
            "Online Tutor",
            "Nashik, Maharashtra",
            "₹20K–₹70K/month",
            &["tutor", "teaching", "online", "education", "teacher", "math", "science"],
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b",
            "Teach math to 50+ students online. Flexible schedule and great income.",
            "5:00",
            "Education",
        ),
    ]
}
