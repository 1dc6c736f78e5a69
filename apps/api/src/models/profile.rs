use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Availability given to a profile created by its first update.
pub const DEFAULT_AVAILABILITY: &str = "Available";

/// A marketplace participant seeking work.
///
/// This is the canonical shape used everywhere inside the service. Stored documents
/// written by older form revisions are adapted through [`StoredFreelancer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,
    /// Display order is preserved; matching ignores it.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Single-paragraph narrative summary.
    #[serde(default)]
    pub experience: String,
}

impl FreelancerProfile {
    /// Empty profile for an owner completing onboarding.
    pub fn new_onboarding(owner_id: &str) -> Self {
        Self {
            id: owner_id.to_string(),
            availability_status: Some(DEFAULT_AVAILABILITY.to_string()),
            ..Default::default()
        }
    }
}

/// Profile document as it may appear in the store.
///
/// Form revisions disagree on naming: some write `skillIds`/`bio`/`firstName`+`lastName`,
/// others `skills`/`experience`/`name`. Canonical fields win when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFreelancer {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub linked_in_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub hourly_rate: Option<f64>,
    pub availability_status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub skill_ids: Option<Vec<String>>,
    pub experience: Option<String>,
    pub bio: Option<String>,
}

impl StoredFreelancer {
    /// Adapts a stored document to the canonical profile. `owner_id` is the document key
    /// and overrides whatever `id` the document body carries.
    pub fn into_profile(self, owner_id: &str) -> FreelancerProfile {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                let first = self.first_name.unwrap_or_default();
                let last = self.last_name.unwrap_or_default();
                format!("{} {}", first.trim(), last.trim()).trim().to_string()
            });

        FreelancerProfile {
            id: owner_id.to_string(),
            name,
            email: non_blank(self.email),
            headline: non_blank(self.headline),
            location: non_blank(self.location),
            website_url: non_blank(self.website_url),
            linkedin_url: non_blank(self.linkedin_url.or(self.linked_in_url)),
            hourly_rate: self.hourly_rate,
            availability_status: non_blank(self.availability_status),
            skills: self.skills.or(self.skill_ids).unwrap_or_default(),
            experience: self.experience.or(self.bio).unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Skills as submitted by a form: either a JSON array or the comma-separated text box.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    /// Trims every skill and drops empties, keeping submission order.
    pub fn into_skills(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            SkillsInput::List(items) => items,
            SkillsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Partial profile update from onboarding or the profile-edit form.
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub hourly_rate: Option<f64>,
    pub availability_status: Option<String>,
    pub skills: Option<SkillsInput>,
    #[serde(alias = "bio")]
    pub experience: Option<String>,
}

impl ProfileUpdate {
    /// Merges this update into `profile`.
    pub fn apply(self, profile: &mut FreelancerProfile) {
        if let Some(name) = self.name {
            profile.name = name.trim().to_string();
        } else if self.first_name.is_some() || self.last_name.is_some() {
            let first = self.first_name.unwrap_or_default();
            let last = self.last_name.unwrap_or_default();
            profile.name = format!("{} {}", first.trim(), last.trim()).trim().to_string();
        }
        if self.email.is_some() {
            profile.email = non_blank(self.email);
        }
        if self.headline.is_some() {
            profile.headline = non_blank(self.headline);
        }
        if self.location.is_some() {
            profile.location = non_blank(self.location);
        }
        if self.website_url.is_some() {
            profile.website_url = non_blank(self.website_url);
        }
        if self.linkedin_url.is_some() {
            profile.linkedin_url = non_blank(self.linkedin_url);
        }
        if let Some(rate) = self.hourly_rate {
            profile.hourly_rate = Some(rate.max(0.0));
        }
        if self.availability_status.is_some() {
            profile.availability_status = non_blank(self.availability_status);
        }
        if let Some(skills) = self.skills {
            profile.skills = skills.into_skills();
        }
        if let Some(experience) = self.experience {
            profile.experience = experience.trim().to_string();
        }
    }
}

/// Field-level changes an update makes to a stored profile document.
///
/// Stores merge it into the document they already hold, so fields the update leaves
/// out are never rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    /// Canonical camelCase fields to overwrite. `null` clears an optional field.
    pub fields: Map<String, Value>,
    /// Legacy keys the canonical fields replace; removed before merging.
    pub superseded: Vec<String>,
}

impl ProfilePatch {
    pub fn merge_into(&self, doc: &mut Map<String, Value>) {
        for key in &self.superseded {
            doc.remove(key);
        }
        doc.extend(self.fields.clone());
    }

    fn set(&mut self, key: &str, value: Value, superseded: &[&str]) {
        self.fields.insert(key.to_string(), value);
        self.superseded
            .extend(superseded.iter().map(|legacy| legacy.to_string()));
    }
}

impl ProfileUpdate {
    /// The document-level form of [`ProfileUpdate::apply`].
    pub fn to_patch(&self) -> ProfilePatch {
        let mut patch = ProfilePatch::default();

        if let Some(name) = &self.name {
            patch.set("name", Value::from(name.trim()), &["firstName", "lastName"]);
        } else if self.first_name.is_some() || self.last_name.is_some() {
            let first = self.first_name.as_deref().unwrap_or_default().trim();
            let last = self.last_name.as_deref().unwrap_or_default().trim();
            let name = format!("{first} {last}").trim().to_string();
            patch.set("name", Value::from(name), &["firstName", "lastName"]);
        }

        let optional_text = [
            ("email", &self.email, &[][..]),
            ("headline", &self.headline, &[][..]),
            ("location", &self.location, &[][..]),
            ("websiteUrl", &self.website_url, &[][..]),
            ("linkedinUrl", &self.linkedin_url, &["linkedInUrl"][..]),
            ("availabilityStatus", &self.availability_status, &[][..]),
        ];
        for (key, value, superseded) in optional_text {
            if value.is_some() {
                let value = non_blank(value.clone()).map_or(Value::Null, Value::from);
                patch.set(key, value, superseded);
            }
        }

        if let Some(rate) = self.hourly_rate {
            patch.set("hourlyRate", Value::from(rate.max(0.0)), &[]);
        }
        if let Some(skills) = &self.skills {
            let skills = skills.clone().into_skills();
            patch.set("skills", Value::from(skills), &["skillIds"]);
        }
        if let Some(experience) = &self.experience {
            patch.set("experience", Value::from(experience.trim()), &["bio"]);
        }

        patch
    }
}
