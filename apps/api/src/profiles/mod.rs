// Profile CRUD: signup creates the document, edit replaces sections of it.
// Storage goes through the `ProfileStore` trait in `store`.

pub mod handlers;
pub mod store;

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{lines_or_list, Education, Internship, Profile};

/// Signup payload. List sections accept arrays or newline-separated text.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub internships: Vec<Internship>,
    #[serde(default, deserialize_with = "lines_or_list")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "lines_or_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lines_or_list")]
    pub extra_activities: Vec<String>,
}

impl NewProfileRequest {
    pub fn into_profile(self) -> Result<Profile, AppError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }

        Ok(Profile {
            name,
            email,
            phone: self.phone,
            location: self.location,
            linkedin: self.linkedin,
            github: self.github,
            education: self.education,
            internships: self.internships,
            achievements: self.achievements,
            responsibilities: self.responsibilities,
            extra_activities: self.extra_activities,
        })
    }
}

/// Profile edit payload. Absent fields keep their stored value; supplied
/// list sections replace the stored section wholesale. Name and email are
/// not editable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub education: Option<Vec<Education>>,
    pub internships: Option<Vec<Internship>>,
    pub achievements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub extra_activities: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(location) = self.location {
            profile.location = location;
        }
        if let Some(linkedin) = self.linkedin {
            profile.linkedin = linkedin;
        }
        if let Some(github) = self.github {
            profile.github = github;
        }
        if let Some(education) = self.education {
            profile.education = education;
        }
        if let Some(internships) = self.internships {
            profile.internships = internships;
        }
        if let Some(achievements) = self.achievements {
            profile.achievements = achievements;
        }
        if let Some(responsibilities) = self.responsibilities {
            profile.responsibilities = responsibilities;
        }
        if let Some(extra_activities) = self.extra_activities {
            profile.extra_activities = extra_activities;
        }
    }
}
