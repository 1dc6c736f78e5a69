//! Profile and job data access.
//!
//! `AppState` carries an `Arc<dyn MarketplaceStore>`; the backend is picked at startup
//! (`PgStore` when `DATABASE_URL` is set, `MemoryStore` otherwise).

pub mod memory;
pub mod postgres;
pub mod seed;
pub mod writes;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::JobPosting;
use crate::models::profile::{FreelancerProfile, ProfileUpdate};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A read against the document store failed. Not retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed document '{id}': {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A write against the document store failed.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Database error while writing {path}: {source}")]
    Database {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Could not serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document {path} is malformed after writing: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WriteError {
    /// Document path the failed write targeted, e.g. `freelancers/uid_1`.
    pub fn path(&self) -> &str {
        match self {
            WriteError::Database { path, .. }
            | WriteError::Serialize { path, .. }
            | WriteError::Malformed { path, .. } => path,
        }
    }
}

pub fn profile_path(owner_id: &str) -> String {
    format!("freelancers/{owner_id}")
}

pub fn job_path(job_id: &str) -> String {
    format!("jobPostings/{job_id}")
}

#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    /// Returns the owner's profile, or `None` if onboarding has not happened yet.
    async fn get_profile(&self, owner_id: &str) -> Result<Option<FreelancerProfile>, StoreError>;

    /// Returns every posting in the collection, in no particular order.
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;

    async fn get_job(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError>;

    /// Merges `update` into the owner's stored profile in one atomic step, creating the
    /// profile if it does not exist yet. Fields the update leaves out keep their stored
    /// value even when other updates to the same profile run concurrently.
    async fn merge_profile(
        &self,
        owner_id: &str,
        update: ProfileUpdate,
    ) -> Result<FreelancerProfile, WriteError>;

    async fn upsert_job(&self, job: JobPosting) -> Result<(), WriteError>;
}
