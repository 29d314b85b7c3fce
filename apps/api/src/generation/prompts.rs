// All LLM prompt templates for the Generation module.
// Placeholders are filled with `llm_client::prompts::fill_template`.

/// Per-item line templates for the profile blocks.
pub const EDUCATION_ITEM: &str = "- {degree} from {institution} ({year}) with score {score}";
pub const INTERNSHIP_ITEM: &str = "- {title} at {company} in {field}:\n  {desc}";
pub const LIST_ITEM: &str = "- {item}";

/// Resume generation prompt.
/// Replace: {tasks}, {name}, {phone}, {location}, {linkedin}, {github},
///          {education}, {internships}, {achievements}, {responsibilities},
///          {extra_activities}, {job_description}, {output_contract}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Given the following user profile and job description, generate a resume with:

{tasks}

User Profile:
Name: {name}
Phone: {phone}
Location: {location}
LinkedIn: {linkedin}
GitHub: {github}

Education:
{education}

Internships:
{internships}

Achievements:
{achievements}

Responsibilities:
{responsibilities}

Extra Activities:
{extra_activities}

Job Description:
{job_description}

{output_contract}"#;

pub const STANDARD_TASKS: &str = "\
1. A 3-line professional summary.
2. A list of 8-10 skills tailored to the job.
3. Exactly two projects with title and description (each in max 3 lines), aligned with the job description.";

pub const EXTENDED_TASKS: &str = "\
1. A 3-line professional summary.
2. A list of 8-10 skills tailored to the job.
3. Exactly two projects with title and description (each in max 3 lines), aligned with the job description.
4. Suggestions for improving resume quality (email, LinkedIn, project titles, etc.).";

pub const STANDARD_OUTPUT_CONTRACT: &str = r#"Respond ONLY with a single JSON object in this format, with no text before or after it:
{
  "summary": "...",
  "skills": ["...", "..."],
  "projects": [
    {"title": "...", "desc": "..."},
    {"title": "...", "desc": "..."}
  ]
}"#;

pub const EXTENDED_OUTPUT_CONTRACT: &str = r#"Respond ONLY with a single JSON object in this format, with no text before or after it:
{
  "summary": "...",
  "skills": ["...", "..."],
  "projects": [
    {"title": "...", "desc": "..."},
    {"title": "...", "desc": "..."}
  ],
  "suggestions": ["...", "..."]
}"#;

/// Email advisor prompt. Replace: {email}, {name}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Analyze the email address: {email}
- Is it professional enough to be used in a resume?
- If not, suggest a better alternative using the name: "{name}" (e.g., first.last@example.com).
- Explain briefly why it's not appropriate.

Respond strictly in this JSON format:
{
    "is_professional": true/false,
    "suggested_email": "example@example.com",
    "reason": "short explanation here"
}"#;
