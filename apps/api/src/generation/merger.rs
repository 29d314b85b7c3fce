//! Content Merger — combines generated fields with profile pass-through fields.
//!
//! `merge_resume` never fails: a failed generation is replaced by static
//! fallback content so every record carries summary, skills and projects.

use tracing::warn;

use crate::generation::prompt_builder::PromptVariant;
use crate::llm_client::GenerationError;
use crate::models::profile::Profile;
use crate::models::resume::{GeneratedContent, ResumeRecord};

pub const STANDARD_FALLBACK_SUMMARY: &str = "Enthusiastic and adaptive learner looking to contribute skills and grow in a professional environment.";
pub const STANDARD_FALLBACK_SKILLS: &[&str] = &["Teamwork", "Communication", "Problem Solving"];

pub const EXTENDED_FALLBACK_SUMMARY: &str =
    "Enthusiastic and quick learner seeking opportunities to grow.";
pub const EXTENDED_FALLBACK_SKILLS: &[&str] =
    &["Problem Solving", "Teamwork", "Python", "Communication"];
pub const FALLBACK_SUGGESTION: &str = "AI enhancement failed. Fallback data used.";

/// Static content substituted when generation fails.
pub fn fallback_content(variant: PromptVariant) -> GeneratedContent {
    let (summary, skills) = match variant {
        PromptVariant::Standard => (STANDARD_FALLBACK_SUMMARY, STANDARD_FALLBACK_SKILLS),
        PromptVariant::Extended => (EXTENDED_FALLBACK_SUMMARY, EXTENDED_FALLBACK_SKILLS),
    };
    let suggestions = match variant {
        PromptVariant::Standard => vec![],
        PromptVariant::Extended => vec![FALLBACK_SUGGESTION.to_string()],
    };

    GeneratedContent {
        summary: summary.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        projects: vec![],
        suggestions,
    }
}

/// Builds the record from a profile snapshot and resume content.
/// Suggestions are carried only by the extended variant.
pub fn assemble_record(
    profile: &Profile,
    content: GeneratedContent,
    variant: PromptVariant,
) -> ResumeRecord {
    let suggestions = match variant {
        PromptVariant::Standard => None,
        PromptVariant::Extended => Some(content.suggestions),
    };

    ResumeRecord {
        name: profile.name.clone(),
        email: profile.email.clone(),
        phone: profile.phone.clone(),
        location: profile.location.clone(),
        linkedin: profile.linkedin.clone(),
        github: profile.github.clone(),
        summary: content.summary,
        skills: content.skills,
        projects: content.projects,
        education: profile.education.clone(),
        internships: profile.internships.clone(),
        achievements: profile.achievements.clone(),
        responsibilities: profile.responsibilities.clone(),
        extra_activities: profile.extra_activities.clone(),
        suggestions,
    }
}

/// Merges a generation outcome into a `ResumeRecord`, falling back to static
/// content on any failure.
pub fn merge_resume(
    profile: &Profile,
    outcome: Result<GeneratedContent, GenerationError>,
    variant: PromptVariant,
) -> ResumeRecord {
    let content = match outcome {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "Resume generation failed ({}), using fallback content: {e}",
                e.kind()
            );
            fallback_content(variant)
        }
    };

    assemble_record(profile, content, variant)
}
