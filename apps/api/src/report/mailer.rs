use std::sync::Arc;

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, error, info, warn};

use super::{report_subject, ReportRenderer};
use crate::analysis::email_resolver::UNKNOWN_EMAIL;
use crate::analysis::models::AnalysisResult;
use crate::config::SmtpSettings;

const SENDER_NAME: &str = "ResumyZer";

/// Delivers the report email. Delivery is fire-and-forget: failures are logged, never returned.
pub trait ReportMailer: Send + Sync {
    /// Returns true when a delivery was queued.
    fn queue_report(&self, email: &str, result: &AnalysisResult, job_role: Option<&str>) -> bool;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    renderer: Arc<ReportRenderer>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings, renderer: Arc<ReportRenderer>) -> Result<Self> {
        let transport = SmtpTransport::starttls_relay(&settings.host)
            .with_context(|| format!("Invalid SMTP host '{}'", settings.host))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.email.clone(),
                settings.password.clone(),
            ))
            .build();

        let from = format!("{SENDER_NAME} <{}>", settings.email)
            .parse::<Mailbox>()
            .context("SMTP_EMAIL is not a valid address")?;

        Ok(Self {
            transport,
            from,
            renderer,
        })
    }

    fn build_message(
        &self,
        email: &str,
        result: &AnalysisResult,
        job_role: Option<&str>,
    ) -> Result<Message> {
        let to = email
            .parse::<Mailbox>()
            .with_context(|| format!("'{email}' is not a deliverable address"))?;
        let html = self.renderer.render(email, result, job_role)?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(report_subject(result.ats_score))
            .header(ContentType::TEXT_HTML)
            .body(html)
            .context("Failed to build report email")
    }
}

impl ReportMailer for SmtpMailer {
    fn queue_report(&self, email: &str, result: &AnalysisResult, job_role: Option<&str>) -> bool {
        if email == UNKNOWN_EMAIL {
            info!("No contact address resolved, skipping report email");
            return false;
        }

        let message = match self.build_message(email, result, job_role) {
            Ok(message) => message,
            Err(e) => {
                warn!("Report email not sent: {e:#}");
                return false;
            }
        };

        let transport = self.transport.clone();
        let recipient = email.to_string();
        debug!(%recipient, "Queueing report email");

        tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || transport.send(&message)).await;
            match outcome {
                Ok(Ok(_)) => info!(%recipient, "Report email sent"),
                Ok(Err(e)) => error!(%recipient, "Could not send report email: {e}"),
                Err(e) => error!(%recipient, "Report email task failed: {e}"),
            }
        });

        true
    }
}
