//! Report email: HTML rendering of an `AnalysisResult` and optional SMTP delivery.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::effective_role;

pub mod mailer;

pub use mailer::{ReportMailer, SmtpMailer};

const REPORT_TEMPLATE_NAME: &str = "resume_report";
const REPORT_TEMPLATE: &str = include_str!("../../templates/resume_report.hbs");

/// Renders the HTML report. Handlebars escapes every interpolated value.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn render(
        &self,
        email: &str,
        result: &AnalysisResult,
        job_role: Option<&str>,
    ) -> Result<String, RenderError> {
        let data = json!({
            "user_name": user_name(email),
            "role": effective_role(job_role),
            "analysis": result,
        });
        self.handlebars.render(REPORT_TEMPLATE_NAME, &data)
    }
}

pub fn report_subject(ats_score: i32) -> String {
    format!("Your Resume ATS Report – {ats_score}/100")
}

fn user_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
