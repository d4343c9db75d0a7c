use anyhow::{bail, Context, Result};

/// Origins the hosted frontends are served from.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "https://resumyzer-ui.vercel.app",
    "https://resumyzer-24.vercel.app",
];

const DEFAULT_SMTP_PORT: u16 = 587;

/// Who is responsible for delivering the report email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailDelivery {
    /// The frontend dispatches the email itself (EmailJS). The backend only reports a status.
    Frontend,
    /// The backend sends the report over SMTP.
    Backend,
}

impl EmailDelivery {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => bail!("EMAIL_DELIVERY must be 'frontend' or 'backend', got '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub email: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// Keys the frontend uses for the EmailJS widget. Not used server-side beyond being accepted.
#[derive(Debug, Clone, Default)]
pub struct EmailJsSettings {
    pub public_key: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
}

impl EmailJsSettings {
    pub fn is_configured(&self) -> bool {
        self.public_key.is_some() && self.service_id.is_some() && self.template_id.is_some()
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    /// Direct Postgres connection. When set, analyses are written with sqlx instead of the REST API.
    pub database_url: Option<String>,
    pub email_delivery: EmailDelivery,
    pub smtp: Option<SmtpSettings>,
    pub emailjs: EmailJsSettings,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let email_delivery = match optional_env("EMAIL_DELIVERY") {
            Some(value) => EmailDelivery::parse(&value)?,
            None => EmailDelivery::Frontend,
        };

        let smtp = smtp_from_env()?;
        if email_delivery == EmailDelivery::Backend && smtp.is_none() {
            bail!("EMAIL_DELIVERY=backend requires SMTP_EMAIL, SMTP_PASSWORD and SMTP_HOST");
        }

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_service_role_key: require_env("SUPABASE_SERVICE_ROLE_KEY")?,
            database_url: optional_env("DATABASE_URL"),
            email_delivery,
            smtp,
            emailjs: EmailJsSettings {
                public_key: optional_env("EMAILJS_PUBLIC_KEY"),
                service_id: optional_env("EMAILJS_SERVICE_ID"),
                template_id: optional_env("EMAILJS_TEMPLATE_ID"),
            },
            allowed_origins: optional_env("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|| {
                    DEFAULT_ALLOWED_ORIGINS
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// SMTP settings are all-or-nothing; a partial set is treated as absent.
fn smtp_from_env() -> Result<Option<SmtpSettings>> {
    let (Some(email), Some(password), Some(host)) = (
        optional_env("SMTP_EMAIL"),
        optional_env("SMTP_PASSWORD"),
        optional_env("SMTP_HOST"),
    ) else {
        return Ok(None);
    };

    let port = match optional_env("SMTP_PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .context("SMTP_PORT must be a valid port number")?,
        None => DEFAULT_SMTP_PORT,
    };

    Ok(Some(SmtpSettings {
        email,
        password,
        host,
        port,
    }))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
