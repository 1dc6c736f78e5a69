use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::job::JobPosting;
use crate::models::profile::{FreelancerProfile, ProfileUpdate};
use crate::store::{MarketplaceStore, StoreError, WriteError};

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, FreelancerProfile>>,
    jobs: RwLock<HashMap<String, JobPosting>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<FreelancerProfile>, StoreError> {
        Ok(self.profiles.read().await.get(owner_id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        Ok(self.jobs.read().await.values().cloned().collect())
    }

    async fn get_job(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError> {
        Ok(self.jobs.read().await.get(job_id).cloned())
    }

    async fn merge_profile(
        &self,
        owner_id: &str,
        update: ProfileUpdate,
    ) -> Result<FreelancerProfile, WriteError> {
        // One write guard covers the read, the merge and the store.
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(owner_id.to_string())
            .or_insert_with(|| FreelancerProfile::new_onboarding(owner_id));
        update.apply(profile);
        Ok(profile.clone())
    }

    async fn upsert_job(&self, job: JobPosting) -> Result<(), WriteError> {
        self.jobs.write().await.insert(job.id.clone(), job);
        Ok(())
    }
}
