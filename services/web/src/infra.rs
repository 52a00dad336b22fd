use async_trait::async_trait;
use career_nirvana::backend::{
    AiAnswer, AskRequest, BackendError, CareerBackend, JobDetail, NewUserProfile, UserId,
    UserProfile, VideoCard,
};
use career_nirvana::discovery::{RoadmapGallery, StoryCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Content served by the frontend tier: the search catalog, the roadmap gallery, the
/// backend collaborator, and the static asset directory.
pub(crate) struct Frontend<B> {
    pub(crate) backend: Arc<B>,
    pub(crate) catalog: StoryCatalog,
    pub(crate) roadmaps: RoadmapGallery,
    pub(crate) assets_dir: PathBuf,
}

impl<B> Frontend<B> {
    pub(crate) fn new(backend: Arc<B>, catalog: StoryCatalog, assets_dir: PathBuf) -> Self {
        Self {
            backend,
            catalog,
            roadmaps: RoadmapGallery::standard(),
            assets_dir,
        }
    }
}

/// Stand-in backend for demos and local runs without the career API.
#[derive(Clone)]
pub(crate) struct InMemoryBackend {
    videos: Arc<Vec<VideoCard>>,
    jobs: Arc<HashMap<String, JobDetail>>,
    users: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    next_user: Arc<AtomicU64>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        let jobs = sample_jobs();
        let videos = jobs
            .iter()
            .map(|job| VideoCard {
                id: job.id.clone(),
                title: job.title.clone(),
                short_description: job.description.clone(),
                thumbnail: None,
            })
            .collect();

        Self {
            videos: Arc::new(videos),
            jobs: Arc::new(jobs.into_iter().map(|job| (job.id.clone(), job)).collect()),
            users: Arc::default(),
            next_user: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[async_trait]
impl CareerBackend for InMemoryBackend {
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
        Ok(self.videos.as_ref().clone())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError> {
        self.jobs
            .get(job_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("job {job_id}")))
    }

    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError> {
        let sequence = self.next_user.fetch_add(1, Ordering::Relaxed);
        let user = UserProfile::from_new(UserId(format!("user-{sequence:04}")), profile);
        let mut guard = self
            .users
            .lock()
            .map_err(|_| BackendError::Network("user store unavailable".to_string()))?;
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
        let guard = self
            .users
            .lock()
            .map_err(|_| BackendError::Network("user store unavailable".to_string()))?;
        guard
            .get(user_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("user {user_id}")))
    }

    async fn ask_ai(&self, request: AskRequest) -> Result<AiAnswer, BackendError> {
        let job = self.get_job(&request.job_id).await?;
        let question = request
            .question
            .unwrap_or_else(|| "Tell me about this career".to_string());
        let response = format!(
            "You asked: {question}. A {} typically earns {} after investing {}. \
             Skills to start with: {}.",
            job.title,
            job.earning,
            job.investment,
            job.skills.join(", ")
        );

        Ok(AiAnswer {
            response,
            career_title: job.title,
        })
    }
}

fn job(
    id: &str,
    title: &str,
    earning: &str,
    investment: &str,
    skills: &[&str],
    description: &str,
) -> JobDetail {
    JobDetail {
        id: id.to_string(),
        title: title.to_string(),
        qualification: "No formal degree required".to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        earning: earning.to_string(),
        investment: investment.to_string(),
        pros: vec!["Be your own boss".to_string()],
        cons: vec!["Income varies by season".to_string()],
        growth: "Grows with reputation and repeat customers".to_string(),
        description: description.to_string(),
    }
}

fn sample_jobs() -> Vec<JobDetail> {
    vec![
        job(
            "golgappa_seller",
            "Golgappa Seller",
            "₹15K-₹40K/month",
            "₹5K-₹15K",
            &["Food hygiene", "Pricing", "Customer service"],
            "Run a street stall serving pani puri to daily regulars",
        ),
        job(
            "makeup_artist",
            "Makeup Artist",
            "₹20K-₹80K/month",
            "₹10K-₹30K",
            &["Color theory", "Client management", "Hygiene"],
            "Bridal and party looks booked through social media",
        ),
        job(
            "data_analyst",
            "Data Analyst",
            "₹35K-₹1L/month",
            "₹0-₹20K",
            &["Spreadsheets", "SQL", "Storytelling with data"],
            "Turn business numbers into decisions",
        ),
        job(
            "baker",
            "Home Baker",
            "₹20K-₹60K/month",
            "₹15K-₹40K",
            &["Baking", "Packaging", "Instagram marketing"],
            "Custom cakes and cookies from a home kitchen",
        ),
    ]
}
