use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::profile::models::Education;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::ProfileView;

pub mod account;
pub mod education;
pub mod experience;
pub mod read;
pub mod upsert;

/// Profile as served over HTTP, joined with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub user: OwnerData,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Vec<ExperienceData>,
    pub education: Vec<EducationData>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerData {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceData {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationData {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl From<&ProfileView> for ProfileData {
    fn from(view: &ProfileView) -> Self {
        let profile = &view.profile;
        Self {
            user: OwnerData {
                id: profile.user_id.to_string(),
                name: view.owner_name.clone(),
            },
            company: profile.company.clone(),
            website: profile.website.as_ref().map(|w| w.as_str().to_string()),
            location: profile.location.clone(),
            status: profile.status.clone(),
            skills: profile.skills.as_slice().to_vec(),
            bio: profile.bio.clone(),
            githubusername: profile.github_username.clone(),
            experience: profile.experience.iter().map(ExperienceData::from).collect(),
            education: profile.education.iter().map(EducationData::from).collect(),
            updated_at: profile.updated_at,
        }
    }
}

impl From<&Experience> for ExperienceData {
    fn from(entry: &Experience) -> Self {
        Self {
            id: entry.id.0.to_string(),
            title: entry.title.clone(),
            company: entry.company.clone(),
            location: entry.location.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

impl From<&Education> for EducationData {
    fn from(entry: &Education) -> Self {
        Self {
            id: entry.id.0.to_string(),
            school: entry.school.clone(),
            degree: entry.degree.clone(),
            fieldofstudy: entry.field_of_study.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

/// Skills arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}
