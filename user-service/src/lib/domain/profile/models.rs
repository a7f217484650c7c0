use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::profile::errors::FieldError;
use crate::user::models::UserId;

/// Developer profile owned by exactly one account.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: UserId,
    pub company: Option<String>,
    pub location: Option<String>,
    pub website: Option<Website>,
    pub bio: Option<String>,
    pub skills: Skills,
    pub status: String,
    pub github_username: Option<String>,
    /// Newest first
    pub experience: Vec<Experience>,
    /// Newest first
    pub education: Vec<Education>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a fresh profile from an upsert command.
    pub fn new(user_id: UserId, command: UpsertProfileCommand) -> Self {
        let mut profile = Self {
            user_id,
            company: None,
            location: None,
            website: None,
            bio: None,
            skills: command.skills.clone(),
            status: command.status.clone(),
            github_username: None,
            experience: Vec::new(),
            education: Vec::new(),
            updated_at: Utc::now(),
        };
        profile.apply(command);
        profile
    }

    /// Replace the editable fields, keeping experience and education.
    pub fn apply(&mut self, command: UpsertProfileCommand) {
        self.company = command.company;
        self.location = command.location;
        self.website = command.website;
        self.bio = command.bio;
        self.skills = command.skills;
        self.status = command.status;
        self.github_username = command.github_username;
        self.updated_at = Utc::now();
    }

    pub fn add_experience(&mut self, experience: NewExperience) -> &Experience {
        self.experience.insert(0, experience.into_entry());
        self.updated_at = Utc::now();
        &self.experience[0]
    }

    /// Unknown ids leave the profile unchanged.
    pub fn remove_experience(&mut self, id: &EntryId) {
        self.experience.retain(|entry| entry.id != *id);
        self.updated_at = Utc::now();
    }

    pub fn add_education(&mut self, education: NewEducation) -> &Education {
        self.education.insert(0, education.into_entry());
        self.updated_at = Utc::now();
        &self.education[0]
    }

    /// Unknown ids leave the profile unchanged.
    pub fn remove_education(&mut self, id: &EntryId) {
        self.education.retain(|entry| entry.id != *id);
        self.updated_at = Utc::now();
    }
}

/// Edit to a stored profile, applied by the repository in one atomic step
#[derive(Debug, Clone)]
pub enum ProfileChange {
    Replace(UpsertProfileCommand),
    AddExperience(NewExperience),
    RemoveExperience(EntryId),
    AddEducation(NewEducation),
    RemoveEducation(EntryId),
}

impl Profile {
    pub fn change(&mut self, change: ProfileChange) {
        match change {
            ProfileChange::Replace(command) => self.apply(command),
            ProfileChange::AddExperience(experience) => {
                self.add_experience(experience);
            }
            ProfileChange::RemoveExperience(id) => self.remove_experience(&id),
            ProfileChange::AddEducation(education) => {
                self.add_education(education);
            }
            ProfileChange::RemoveEducation(id) => self.remove_education(&id),
        }
    }
}

/// Profile joined with the display name of its owner.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub profile: Profile,
    /// None when the owning account no longer exists
    pub owner_name: Option<String>,
}

/// Identifier of an experience or education entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an entry ID; anything that is not a UUID yields None.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(EntryId)
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Work experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Non-empty list of skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skills(Vec<String>);

impl Skills {
    /// Accept a list of skills, trimming entries and dropping blanks.
    ///
    /// # Errors
    /// * `Required` - No non-blank skill was given
    pub fn from_list(skills: Vec<String>) -> Result<Self, FieldError> {
        let skills: Vec<String> = skills
            .into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();

        if skills.is_empty() {
            return Err(FieldError::Required("skills"));
        }
        Ok(Self(skills))
    }

    /// Accept a comma-separated list of skills.
    pub fn parse(csv: &str) -> Result<Self, FieldError> {
        Self::from_list(csv.split(',').map(str::to_string).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Website URL, always served over https.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Website(String);

impl Website {
    /// Normalize a website address. Blank input means no website.
    pub fn new(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let without_scheme = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"))
            .unwrap_or(raw);

        Some(Self(format!("https://{}", without_scheme)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim a required text field.
///
/// # Errors
/// * `Required` - Field is missing or blank
pub fn required(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    optional(value).ok_or(FieldError::Required(field))
}

/// Trim an optional text field, treating blank as absent.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` date field.
///
/// # Errors
/// * `InvalidDate` - Value is not a calendar date
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FieldError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Command to create or replace the editable profile fields
#[derive(Debug, Clone)]
pub struct UpsertProfileCommand {
    pub company: Option<String>,
    pub location: Option<String>,
    pub website: Option<Website>,
    pub bio: Option<String>,
    pub skills: Skills,
    pub status: String,
    pub github_username: Option<String>,
}

/// Validated experience entry to add
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl NewExperience {
    fn into_entry(self) -> Experience {
        Experience {
            id: EntryId::new(),
            title: self.title,
            company: self.company,
            location: self.location,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

/// Validated education entry to add
#[derive(Debug, Clone)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl NewEducation {
    fn into_entry(self) -> Education {
        Education {
            id: EntryId::new(),
            school: self.school,
            degree: self.degree,
            field_of_study: self.field_of_study,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}
