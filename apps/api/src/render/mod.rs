// Rendering/Delivery: ResumeRecord → HTML (askama) → PDF (wkhtmltopdf).
// The converter is an external binary; its path comes from configuration.

pub mod handlers;

use std::path::{Path, PathBuf};

use askama::Template;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

use crate::models::resume::ResumeRecord;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch converter '{}': {source}", .converter.display())]
    ConverterLaunch {
        converter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Converter exited with {status}: {stderr}")]
    ConverterFailed { status: String, stderr: String },
}

/// Resume layouts available for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeTemplate {
    #[default]
    Classic,
    Compact,
}

impl ResumeTemplate {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Some(ResumeTemplate::Classic),
            "compact" => Some(ResumeTemplate::Compact),
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "resume_classic.html")]
struct ClassicResume<'a> {
    r: &'a ResumeRecord,
}

#[derive(Template)]
#[template(path = "resume_compact.html")]
struct CompactResume<'a> {
    r: &'a ResumeRecord,
}

/// Renders a record to a standalone HTML document. Values are HTML-escaped.
pub fn render_html(record: &ResumeRecord, template: ResumeTemplate) -> Result<String, RenderError> {
    let html = match template {
        ResumeTemplate::Classic => ClassicResume { r: record }.render()?,
        ResumeTemplate::Compact => CompactResume { r: record }.render()?,
    };
    Ok(html)
}

/// Encodes a user key as a file stem. ASCII alphanumerics, `@`, `-` and `_`
/// are kept; every other byte becomes `%XX`, so distinct keys never share a stem.
fn encode_file_stem(input: &str) -> String {
    let mut stem = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'@' | b'-' | b'_') {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{byte:02X}"));
        }
    }
    stem
}

/// Writes the HTML and PDF for a user into the output directory.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    converter: PathBuf,
    output_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(converter: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            converter,
            output_dir,
        }
    }

    pub fn html_path(&self, user_key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_resume.html", encode_file_stem(user_key)))
    }

    pub fn pdf_path(&self, user_key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_resume.pdf", encode_file_stem(user_key)))
    }

    /// Renders `record`, converts it and returns the PDF bytes.
    ///
    /// Each call works on its own temporary HTML and PDF files inside the
    /// output directory; the returned bytes are read from that call's PDF.
    /// On success both files are renamed onto `html_path` / `pdf_path`,
    /// replacing the previous copy. On failure they are removed.
    pub async fn render_pdf(
        &self,
        user_key: &str,
        record: &ResumeRecord,
        template: ResumeTemplate,
    ) -> Result<Bytes, RenderError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let html = render_html(record, template)?;
        let html_file = self.scratch_file(user_key, ".html")?;
        let pdf_file = self.scratch_file(user_key, ".pdf")?;
        tokio::fs::write(html_file.path(), html).await?;

        self.convert(html_file.path(), pdf_file.path()).await?;
        let pdf = Bytes::from(tokio::fs::read(pdf_file.path()).await?);

        let pdf_path = self.pdf_path(user_key);
        html_file
            .persist(self.html_path(user_key))
            .map_err(std::io::Error::from)?;
        pdf_file.persist(&pdf_path).map_err(std::io::Error::from)?;

        info!(
            "Rendered {:?} resume for {} to {} ({} bytes)",
            template,
            user_key,
            pdf_path.display(),
            pdf.len()
        );
        Ok(pdf)
    }

    fn scratch_file(&self, user_key: &str, suffix: &str) -> Result<NamedTempFile, RenderError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}_", encode_file_stem(user_key)))
            .suffix(suffix)
            .tempfile_in(&self.output_dir)?;
        Ok(file)
    }

    async fn convert(&self, html_path: &Path, pdf_path: &Path) -> Result<(), RenderError> {
        let output = Command::new(&self.converter)
            .args(["--quiet", "--page-size", "A4", "--encoding", "UTF-8"])
            .arg(html_path)
            .arg(pdf_path)
            .output()
            .await
            .map_err(|source| RenderError::ConverterLaunch {
                converter: self.converter.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::ConverterFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Education, Internship};
    use crate::models::resume::Project;

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555".to_string(),
            location: "Berlin".to_string(),
            linkedin: "linkedin.com/in/jane".to_string(),
            github: String::new(),
            summary: "Backend engineer <script>alert(1)</script>".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string()],
            projects: vec![Project {
                title: "Rate Limiter".to_string(),
                desc: "Token bucket in Redis".to_string(),
            }],
            education: vec![Education {
                degree: "BSc CS".to_string(),
                institution: "TU Berlin".to_string(),
                year: "2024".to_string(),
                score: "1.7".to_string(),
            }],
            internships: vec![Internship {
                company: "Acme".to_string(),
                field: "Payments".to_string(),
                title: "Backend Intern".to_string(),
                skills: "Go".to_string(),
                desc: "Built reconciliation jobs".to_string(),
            }],
            achievements: vec!["Won hackathon".to_string()],
            responsibilities: vec![],
            extra_activities: vec!["Chess club".to_string()],
            suggestions: None,
        }
    }

    #[test]
    fn test_template_names() {
        assert_eq!(ResumeTemplate::from_name("classic"), Some(ResumeTemplate::Classic));
        assert_eq!(ResumeTemplate::from_name(" Compact "), Some(ResumeTemplate::Compact));
        assert_eq!(ResumeTemplate::from_name("fancy"), None);
    }

    #[test]
    fn test_render_html_includes_record_fields() {
        for template in [ResumeTemplate::Classic, ResumeTemplate::Compact] {
            let html = render_html(&record(), template).unwrap();
            assert!(html.contains("Jane Doe"));
            assert!(html.contains("Rate Limiter"));
            assert!(html.contains("TU Berlin"));
            assert!(html.contains("Backend Intern"));
            assert!(html.contains("Won hackathon"));
            assert!(html.contains("Python"));
        }
    }

    #[test]
    fn test_render_html_escapes_values() {
        let html = render_html(&record(), ResumeTemplate::Classic).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_html_with_fallback_record() {
        let record = ResumeRecord {
            name: "Sam".to_string(),
            summary: "Enthusiastic learner.".to_string(),
            skills: vec!["Teamwork".to_string()],
            ..Default::default()
        };
        let html = render_html(&record, ResumeTemplate::Classic).unwrap();
        assert!(html.contains("Enthusiastic learner."));
        assert!(!html.contains("Projects"), "empty sections are omitted");
    }

    #[test]
    fn test_output_paths_encode_user_key() {
        let renderer = PdfRenderer::new(PathBuf::from("wkhtmltopdf"), PathBuf::from("outputs"));
        assert_eq!(
            renderer.pdf_path("jane@example_com"),
            PathBuf::from("outputs/jane@example_com_resume.pdf")
        );
        assert_eq!(
            renderer.html_path("../etc/passwd"),
            PathBuf::from("outputs/%2E%2E%2Fetc%2Fpasswd_resume.html")
        );
    }

    #[test]
    fn test_distinct_user_keys_get_distinct_paths() {
        let renderer = PdfRenderer::new(PathBuf::from("wkhtmltopdf"), PathBuf::from("outputs"));
        assert_ne!(
            renderer.pdf_path("jürgen@mail_de"),
            renderer.pdf_path("jörgen@mail_de")
        );
        assert_ne!(renderer.pdf_path("a.b@x_com"), renderer.pdf_path("a_b@x_com"));
        assert_ne!(renderer.html_path("a%2Eb"), renderer.html_path("a.b"));
    }

    #[tokio::test]
    async fn test_missing_converter_is_launch_error_and_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let renderer = PdfRenderer::new(dir.path().join("no-such-converter"), out.clone());

        let err = renderer
            .render_pdf("jane@example_com", &record(), ResumeTemplate::Classic)
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::ConverterLaunch { .. }));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
        assert!(!renderer.pdf_path("jane@example_com").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_each_render_reads_back_its_own_pdf() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in converter: copies the HTML input to the PDF output.
        let dir = tempfile::tempdir().unwrap();
        let converter = dir.path().join("fake-converter.sh");
        std::fs::write(&converter, "#!/bin/sh\ncp \"$6\" \"$7\"\n").unwrap();
        std::fs::set_permissions(&converter, std::fs::Permissions::from_mode(0o755)).unwrap();
        let renderer = PdfRenderer::new(converter, dir.path().join("out"));

        let jurgen = ResumeRecord {
            name: "Jürgen".to_string(),
            ..Default::default()
        };
        let jorgen = ResumeRecord {
            name: "Jörgen".to_string(),
            ..Default::default()
        };

        let (a, b) = tokio::join!(
            renderer.render_pdf("jürgen@mail_de", &jurgen, ResumeTemplate::Classic),
            renderer.render_pdf("jörgen@mail_de", &jorgen, ResumeTemplate::Compact),
        );
        let a = String::from_utf8(a.unwrap().to_vec()).unwrap();
        let b = String::from_utf8(b.unwrap().to_vec()).unwrap();

        assert!(a.contains("Jürgen") && !a.contains("Jörgen"));
        assert!(b.contains("Jörgen") && !b.contains("Jürgen"));
        let stored = std::fs::read_to_string(renderer.pdf_path("jürgen@mail_de")).unwrap();
        assert_eq!(stored, a);
    }
}
