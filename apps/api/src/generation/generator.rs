//! Resume Generation — orchestrates the AI content pipeline.
//!
//! Flow: build prompt → one completion call → parse reply → merge with
//! profile (static fallback on any failure) → ResumeRecord.

use std::sync::Arc;

use tracing::info;

use crate::generation::email_advisor::{build_email_prompt, verdict_from_reply, EmailVerdict};
use crate::generation::merger::merge_resume;
use crate::generation::parser::parse_generated_content;
use crate::generation::prompt_builder::{build_resume_prompt, PromptVariant};
use crate::llm_client::prompts::ATS_EXPERT_SYSTEM;
use crate::llm_client::{
    CompletionClient, CompletionRequest, GenerationError, ADVISOR_MODEL, GENERATION_MODEL,
};
use crate::models::profile::Profile;
use crate::models::resume::{ContentSource, GeneratedContent, ResumeRecord};

/// Model identifiers used for each kind of call.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub generation: String,
    pub advisor: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            generation: GENERATION_MODEL.to_string(),
            advisor: ADVISOR_MODEL.to_string(),
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub record: ResumeRecord,
    pub source: ContentSource,
}

/// Runs resume generation and email analysis against an injected completion client.
#[derive(Clone)]
pub struct ResumeGenerator {
    completion: Arc<dyn CompletionClient>,
    models: ModelSelection,
}

impl ResumeGenerator {
    pub fn new(completion: Arc<dyn CompletionClient>, models: ModelSelection) -> Self {
        Self { completion, models }
    }

    /// Produces a fully populated record. Generation failures are absorbed
    /// into fallback content and reported through `source`.
    pub async fn generate(
        &self,
        profile: &Profile,
        job_description: &str,
        variant: PromptVariant,
    ) -> GeneratedResume {
        let outcome = self.request_content(profile, job_description, variant).await;
        let source = if outcome.is_ok() {
            ContentSource::Generated
        } else {
            ContentSource::Fallback
        };

        let record = merge_resume(profile, outcome, variant);
        info!(
            "Generated resume for {} ({:?} variant, source={:?}, {} skills, {} projects)",
            profile.user_key(),
            variant,
            source,
            record.skills.len(),
            record.projects.len()
        );

        GeneratedResume { record, source }
    }

    async fn request_content(
        &self,
        profile: &Profile,
        job_description: &str,
        variant: PromptVariant,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = build_resume_prompt(profile, job_description, variant);
        let text = self
            .completion
            .complete(CompletionRequest {
                model: &self.models.generation,
                system: variant.system_prompt(),
                prompt: &prompt,
            })
            .await?;
        parse_generated_content(&text)
    }

    /// Asks whether `email` is resume-appropriate. Never fails.
    pub async fn analyze_email(&self, email: &str, name: &str) -> EmailVerdict {
        let prompt = build_email_prompt(email, name);
        let reply = self
            .completion
            .complete(CompletionRequest {
                model: &self.models.advisor,
                system: ATS_EXPERT_SYSTEM,
                prompt: &prompt,
            })
            .await;
        verdict_from_reply(email, reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::email_advisor::EMAIL_FALLBACK_REASON;
    use crate::generation::merger::STANDARD_FALLBACK_SUMMARY;

    /// Completion double that replays one scripted reply and records every call.
    struct ScriptedCompletion {
        reply: Option<String>,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    impl ScriptedCompletion {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                calls: Mutex::new(vec![]),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedCompletion {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push((
                request.model.to_string(),
                request.system.to_string(),
                request.prompt.to_string(),
            ));
            self.reply
                .clone()
                .ok_or_else(|| GenerationError::Transport("connection refused".to_string()))
        }
    }

    fn jane() -> Profile {
        Profile {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            achievements: vec!["Won hackathon".to_string()],
            ..Default::default()
        }
    }

    const JD: &str = "Backend engineer, Python, distributed systems";

    #[tokio::test]
    async fn test_success_uses_generated_skills_exactly() {
        let completion = ScriptedCompletion::replying(
            r#"{"summary":"Backend-focused engineer.","skills":["Python","SQL","Kafka","Docker","gRPC","Redis","Linux","AWS"],"projects":[{"title":"X","desc":"Y"}]}"#,
        );
        let generator = ResumeGenerator::new(completion.clone(), ModelSelection::default());

        let result = generator.generate(&jane(), JD, PromptVariant::Standard).await;

        assert_eq!(result.source, ContentSource::Generated);
        assert_eq!(
            result.record.skills,
            vec!["Python", "SQL", "Kafka", "Docker", "gRPC", "Redis", "Linux", "AWS"]
        );
        assert_eq!(result.record.projects.len(), 1);
        assert_eq!(result.record.achievements, vec!["Won hackathon"]);

        let calls = completion.calls();
        assert_eq!(calls.len(), 1, "exactly one completion call per generation");
        let (model, system, prompt) = &calls[0];
        assert_eq!(model, GENERATION_MODEL);
        assert_eq!(system, "You are a professional resume writer.");
        assert!(prompt.contains(JD));
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback() {
        let completion = ScriptedCompletion::failing();
        let generator = ResumeGenerator::new(completion.clone(), ModelSelection::default());

        let result = generator.generate(&jane(), JD, PromptVariant::Standard).await;

        assert_eq!(result.source, ContentSource::Fallback);
        assert_eq!(result.record.summary, STANDARD_FALLBACK_SUMMARY);
        assert!(result.record.projects.is_empty());
        assert_eq!(result.record.name, "Jane Doe");
        assert_eq!(completion.calls().len(), 1, "no retries");
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_fallback() {
        let completion = ScriptedCompletion::replying("I cannot produce JSON today.");
        let generator = ResumeGenerator::new(completion, ModelSelection::default());

        let result = generator.generate(&jane(), JD, PromptVariant::Extended).await;

        assert_eq!(result.source, ContentSource::Fallback);
        assert_eq!(
            result.record.suggestions,
            Some(vec!["AI enhancement failed. Fallback data used.".to_string()])
        );
    }

    #[tokio::test]
    async fn test_extended_variant_uses_ats_system_prompt() {
        let completion = ScriptedCompletion::replying(r#"{"summary":"S","suggestions":["Add a GitHub link"]}"#);
        let generator = ResumeGenerator::new(completion.clone(), ModelSelection::default());

        let result = generator.generate(&jane(), JD, PromptVariant::Extended).await;

        assert_eq!(result.record.suggestions, Some(vec!["Add a GitHub link".to_string()]));
        assert_eq!(completion.calls()[0].1, ATS_EXPERT_SYSTEM);
    }

    #[tokio::test]
    async fn test_email_advisor_passes_reply_through() {
        let completion = ScriptedCompletion::replying(
            r#"{"is_professional":false,"suggested_email":"john.smith@example.com","reason":"too informal"}"#,
        );
        let generator = ResumeGenerator::new(completion.clone(), ModelSelection::default());

        let verdict = generator.analyze_email("john123@gmail.com", "John Smith").await;

        assert!(!verdict.is_professional);
        assert_eq!(verdict.suggested_email, "john.smith@example.com");
        assert_eq!(verdict.reason, "too informal");
        assert_eq!(completion.calls()[0].0, ADVISOR_MODEL);
    }

    #[tokio::test]
    async fn test_email_advisor_transport_error_falls_back() {
        let generator = ResumeGenerator::new(ScriptedCompletion::failing(), ModelSelection::default());

        let verdict = generator.analyze_email("john123@gmail.com", "John Smith").await;

        assert_eq!(
            verdict,
            EmailVerdict {
                is_professional: true,
                suggested_email: "john123@gmail.com".to_string(),
                reason: EMAIL_FALLBACK_REASON.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_custom_models_are_used() {
        let completion = ScriptedCompletion::replying("{}");
        let models = ModelSelection {
            generation: "llama-3.3-70b-versatile".to_string(),
            advisor: "mixtral-custom".to_string(),
        };
        let generator = ResumeGenerator::new(completion.clone(), models);

        generator.generate(&jane(), JD, PromptVariant::Standard).await;
        generator.analyze_email("a@b.com", "A B").await;

        let calls = completion.calls();
        assert_eq!(calls[0].0, "llama-3.3-70b-versatile");
        assert_eq!(calls[1].0, "mixtral-custom");
    }
}
