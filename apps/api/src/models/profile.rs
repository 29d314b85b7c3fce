use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub score: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Internship {
    pub company: String,
    pub field: String,
    pub title: String,
    pub skills: String,
    pub desc: String,
}

/// A user's persisted resume input. `email` is the identity; see [`user_key`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
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
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub extra_activities: Vec<String>,
}

impl Profile {
    pub fn user_key(&self) -> String {
        user_key(&self.email)
    }
}

/// Store key for a user: the email with every `.` replaced by `_`.
pub fn user_key(email: &str) -> String {
    email.replace('.', "_")
}

/// Deserializes a list field that clients may send either as a JSON array
/// or as newline-separated text (the shape of a textarea).
/// Lines are trimmed and blank lines dropped.
pub fn lines_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LinesOrList {
        Lines(String),
        List(Vec<String>),
    }

    let items = match Option::<LinesOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(LinesOrList::Lines(text)) => text.lines().map(str::to_string).collect(),
        Some(LinesOrList::List(items)) => items,
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
