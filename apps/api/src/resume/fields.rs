//! Form fields for building a resume from scratch.

use serde::Deserialize;

use crate::errors::AppError;

/// Required fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "email",
    "phone",
    "skills",
    "experience",
    "education",
    "projects",
    "job_description",
];

/// Request body for `POST /build_resume`, as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildResumeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub projects: Option<String>,
    pub job_description: Option<String>,
}

/// A fully validated build request. Every field is present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
    pub job_description: String,
}

impl ResumeFields {
    /// Looks a field up by its wire name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "skills" => &self.skills,
            "experience" => &self.experience,
            "education" => &self.education,
            "projects" => &self.projects,
            "job_description" => &self.job_description,
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl BuildResumeRequest {
    fn field(&self, field: &str) -> Option<&String> {
        match field {
            "name" => self.name.as_ref(),
            "email" => self.email.as_ref(),
            "phone" => self.phone.as_ref(),
            "skills" => self.skills.as_ref(),
            "experience" => self.experience.as_ref(),
            "education" => self.education.as_ref(),
            "projects" => self.projects.as_ref(),
            "job_description" => self.job_description.as_ref(),
            _ => None,
        }
    }

    /// Returns the first required field that is missing or empty.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|field| self.field(field).map_or(true, |value| value.is_empty()))
    }

    pub fn validate(self) -> Result<ResumeFields, AppError> {
        if let Some(field) = self.first_missing_field() {
            tracing::error!("Missing or empty required field: {field}");
            return Err(AppError::Validation(format!(
                "Missing or empty required field: {field}"
            )));
        }

        // first_missing_field() guarantees every field is Some.
        Ok(ResumeFields {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
            education: self.education.unwrap_or_default(),
            projects: self.projects.unwrap_or_default(),
            job_description: self.job_description.unwrap_or_default(),
        })
    }
}
