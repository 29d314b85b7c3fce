// Shared system prompts and prompt-filling utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt for the standard resume variant.
pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer.";

/// System prompt for the extended variant and the email advisor.
pub const ATS_EXPERT_SYSTEM: &str = "You're an expert in resume building and ATS optimization.";

/// Replaces `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text that happens to look
/// like a placeholder is emitted verbatim. Braces that do not form a known
/// placeholder (JSON examples in the template) are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let replacement = tail[1..].find('}').and_then(|end| {
            let key = &tail[1..=end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end + 2))
        });

        match replacement {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
