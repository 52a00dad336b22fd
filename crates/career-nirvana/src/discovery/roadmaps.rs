use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Coral,
    Teal,
    Mustard,
}

/// A four-step path into a career, shown in the roadmap gallery.
#[derive(Debug, Clone, Serialize)]
pub struct CareerRoadmap {
    pub id: u32,
    pub title: &'static str,
    pub accent: Accent,
    pub time_to_start: &'static str,
    pub initial_cost: &'static str,
    pub average_income: &'static str,
    pub steps: [&'static str; 4],
    pub skills: [&'static str; 4],
}

#[derive(Debug)]
pub struct RoadmapGallery {
    roadmaps: Vec<CareerRoadmap>,
}

impl RoadmapGallery {
    pub fn standard() -> Self {
        Self {
            roadmaps: standard_roadmaps(),
        }
    }

    pub fn roadmaps(&self) -> &[CareerRoadmap] {
        &self.roadmaps
    }

    pub fn find(&self, title: &str) -> Option<&CareerRoadmap> {
        let title = title.trim();
        self.roadmaps
            .iter()
            .find(|roadmap| roadmap.title.eq_ignore_ascii_case(title))
    }
}

fn standard_roadmaps() -> Vec<CareerRoadmap> {
    vec![
        CareerRoadmap {
            id: 1,
            title: "Photography",
            accent: Accent::Coral,
            time_to_start: "1-3 months",
            initial_cost: "₹15K-₹50K",
            average_income: "₹25K-₹1L/month",
            steps: [
                "Learn camera basics",
                "Practice daily",
                "Build portfolio",
                "Find clients",
            ],
            skills: ["Composition", "Lighting", "Editing", "Client management"],
        },
        CareerRoadmap {
            id: 2,
            title: "Makeup Artist",
            accent: Accent::Teal,
            time_to_start: "2-4 months",
            initial_cost: "₹10K-₹30K",
            average_income: "₹20K-₹80K/month",
            steps: [
                "Take basic course",
                "Practice on friends",
                "Create portfolio",
                "Network with vendors",
            ],
            skills: ["Color theory", "Face shapes", "Product knowledge", "Hygiene"],
        },
        CareerRoadmap {
            id: 3,
            title: "Electrician",
            accent: Accent::Mustard,
            time_to_start: "3-6 months",
            initial_cost: "₹5K-₹20K",
            average_income: "₹30K-₹70K/month",
            steps: [
                "Learn basics",
                "Get apprenticeship",
                "Practice safety",
                "Get certified",
            ],
            skills: ["Wiring", "Safety protocols", "Problem solving", "Tool usage"],
        },
        CareerRoadmap {
            id: 4,
            title: "Web Developer",
            accent: Accent::Coral,
            time_to_start: "4-8 months",
            initial_cost: "₹5K-₹15K",
            average_income: "₹40K-₹2L/month",
            steps: [
                "Learn HTML/CSS",
                "JavaScript basics",
                "Build projects",
                "Apply for jobs",
            ],
            skills: [
                "Programming",
                "Problem solving",
                "Design sense",
                "Communication",
            ],
        },
        CareerRoadmap {
            id: 5,
            title: "Chef",
            accent: Accent::Teal,
            time_to_start: "2-6 months",
            initial_cost: "₹10K-₹40K",
            average_income: "₹25K-₹1L/month",
            steps: [
                "Learn basics",
                "Work in kitchen",
                "Master techniques",
                "Start own venture",
            ],
            skills: [
                "Cooking techniques",
                "Menu planning",
                "Food safety",
                "Creativity",
            ],
        },
        CareerRoadmap {
            id: 6,
            title: "Digital Marketer",
            accent: Accent::Mustard,
            time_to_start: "2-4 months",
            initial_cost: "₹5K-₹25K",
            average_income: "₹30K-₹1.5L/month",
            steps: [
                "Learn platforms",
                "Run test campaigns",
                "Build portfolio",
                "Find clients",
            ],
            skills: ["Analytics", "Content creation", "Strategy", "Communication"],
        },
    ]
}
