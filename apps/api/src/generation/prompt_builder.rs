//! Prompt Builder — turns a profile and a job description into one
//! instruction document for the completion service.
//!
//! Pure and deterministic. Empty list sections still produce their heading
//! with an empty block so the document shape never changes.

use crate::generation::prompts::{
    EDUCATION_ITEM, EXTENDED_OUTPUT_CONTRACT, EXTENDED_TASKS, INTERNSHIP_ITEM, LIST_ITEM,
    RESUME_PROMPT_TEMPLATE, STANDARD_OUTPUT_CONTRACT, STANDARD_TASKS,
};
use crate::llm_client::prompts::{fill_template, ATS_EXPERT_SYSTEM, RESUME_WRITER_SYSTEM};
use crate::models::profile::{Education, Internship, Profile};

/// Selects the prompt, system instruction and fallback set.
/// `Extended` additionally asks for resume-improvement suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptVariant {
    #[default]
    Standard,
    Extended,
}

impl PromptVariant {
    pub fn from_extended(extended: bool) -> Self {
        if extended {
            PromptVariant::Extended
        } else {
            PromptVariant::Standard
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            PromptVariant::Standard => RESUME_WRITER_SYSTEM,
            PromptVariant::Extended => ATS_EXPERT_SYSTEM,
        }
    }

    fn tasks(self) -> &'static str {
        match self {
            PromptVariant::Standard => STANDARD_TASKS,
            PromptVariant::Extended => EXTENDED_TASKS,
        }
    }

    fn output_contract(self) -> &'static str {
        match self {
            PromptVariant::Standard => STANDARD_OUTPUT_CONTRACT,
            PromptVariant::Extended => EXTENDED_OUTPUT_CONTRACT,
        }
    }
}

/// Builds the resume-generation prompt.
///
/// `job_description` is embedded verbatim; callers reject blank descriptions
/// before getting here.
pub fn build_resume_prompt(
    profile: &Profile,
    job_description: &str,
    variant: PromptVariant,
) -> String {
    let education = education_block(&profile.education);
    let internships = internship_block(&profile.internships);
    let achievements = list_block(&profile.achievements);
    let responsibilities = list_block(&profile.responsibilities);
    let extra_activities = list_block(&profile.extra_activities);

    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("tasks", variant.tasks()),
            ("name", profile.name.as_str()),
            ("phone", profile.phone.as_str()),
            ("location", profile.location.as_str()),
            ("linkedin", profile.linkedin.as_str()),
            ("github", profile.github.as_str()),
            ("education", education.as_str()),
            ("internships", internships.as_str()),
            ("achievements", achievements.as_str()),
            ("responsibilities", responsibilities.as_str()),
            ("extra_activities", extra_activities.as_str()),
            ("job_description", job_description),
            ("output_contract", variant.output_contract()),
        ],
    )
}

fn education_block(education: &[Education]) -> String {
    education
        .iter()
        .map(|e| {
            fill_template(
                EDUCATION_ITEM,
                &[
                    ("degree", e.degree.as_str()),
                    ("institution", e.institution.as_str()),
                    ("year", e.year.as_str()),
                    ("score", e.score.as_str()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn internship_block(internships: &[Internship]) -> String {
    internships
        .iter()
        .map(|i| {
            fill_template(
                INTERNSHIP_ITEM,
                &[
                    ("title", i.title.as_str()),
                    ("company", i.company.as_str()),
                    ("field", i.field.as_str()),
                    ("desc", i.desc.as_str()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_block(items: &[String]) -> String {
    items
        .iter()
        .map(|item| fill_template(LIST_ITEM, &[("item", item.as_str())]))
        .collect::<Vec<_>>()
        .join("\n")
}
