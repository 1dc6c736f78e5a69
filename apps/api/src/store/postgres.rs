use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::models::job::JobPosting;
use crate::models::profile::{
    FreelancerProfile, ProfilePatch, ProfileUpdate, StoredFreelancer, DEFAULT_AVAILABILITY,
};
use crate::store::{job_path, profile_path, MarketplaceStore, StoreError, WriteError};

/// Document store on PostgreSQL. Each collection is a table of `(id, doc JSONB)` rows.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketplaceStore for PgStore {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<FreelancerProfile>, StoreError> {
        let doc: Option<Value> = sqlx::query_scalar("SELECT doc FROM freelancers WHERE id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        doc.map(|doc| {
            serde_json::from_value::<StoredFreelancer>(doc)
                .map(|stored| stored.into_profile(owner_id))
                .map_err(|source| StoreError::Malformed {
                    id: profile_path(owner_id),
                    source,
                })
        })
        .transpose()
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let rows: Vec<(String, Value)> = sqlx::query_as("SELECT id, doc FROM job_postings")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(id, doc)| decode_job(&id, doc))
            .collect()
    }

    async fn get_job(&self, job_id: &str) -> Result<Option<JobPosting>, StoreError> {
        let doc: Option<Value> = sqlx::query_scalar("SELECT doc FROM job_postings WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        doc.map(|doc| decode_job(job_id, doc)).transpose()
    }

    async fn merge_profile(
        &self,
        owner_id: &str,
        update: ProfileUpdate,
    ) -> Result<FreelancerProfile, WriteError> {
        let path = profile_path(owner_id);
        let patch = update.to_patch();

        // Postgres merges under the row lock; only the submitted fields are sent.
        let doc: Value = sqlx::query_scalar(
            r#"
            INSERT INTO freelancers (id, doc, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE
                SET doc = (freelancers.doc - $4::text[]) || $3, updated_at = NOW()
            RETURNING doc
            "#,
        )
        .bind(owner_id)
        .bind(Value::Object(onboarding_doc(owner_id, &patch)))
        .bind(Value::Object(patch.fields))
        .bind(patch.superseded)
        .fetch_one(&self.pool)
        .await
        .map_err(|source| WriteError::Database {
            path: path.clone(),
            source,
        })?;

        serde_json::from_value::<StoredFreelancer>(doc)
            .map(|stored| stored.into_profile(owner_id))
            .map_err(|source| WriteError::Malformed { path, source })
    }

    async fn upsert_job(&self, job: JobPosting) -> Result<(), WriteError> {
        let path = job_path(&job.id);
        let doc = serde_json::to_value(&job).map_err(|source| WriteError::Serialize {
            path: path.clone(),
            source,
        })?;

        sqlx::query(
            r#"
            INSERT INTO job_postings (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(&job.id)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .map_err(|source| WriteError::Database { path, source })?;

        Ok(())
    }
}

/// Document written when the first update for `owner_id` creates the profile.
fn onboarding_doc(owner_id: &str, patch: &ProfilePatch) -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert("id".to_string(), Value::from(owner_id));
    doc.insert(
        "availabilityStatus".to_string(),
        Value::from(DEFAULT_AVAILABILITY),
    );
    patch.merge_into(&mut doc);
    doc
}

/// The row key is authoritative; documents seeded without an `id` field still decode.
fn decode_job(id: &str, mut doc: Value) -> Result<JobPosting, StoreError> {
    if let Value::Object(map) = &mut doc {
        map.insert("id".to_string(), Value::String(id.to_string()));
    }
    serde_json::from_value(doc).map_err(|source| StoreError::Malformed {
        id: job_path(id),
        source,
    })
}
