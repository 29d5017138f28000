use anyhow::{bail, Context, Result};

/// Grade-average scale for the whole deployment. Fixed at configuration
/// time; posting validation and grade-band statistics derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeScale {
    /// CGPA on 0.0–10.0.
    TenPoint,
    /// Percentage on 0–100.
    Percent,
}

impl GradeScale {
    pub fn max(self) -> f64 {
        match self {
            GradeScale::TenPoint => 10.0,
            GradeScale::Percent => 100.0,
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "ten" => Ok(GradeScale::TenPoint),
            "percent" => Ok(GradeScale::Percent),
            other => bail!("GRADE_SCALE must be 'ten' or 'percent', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub grade_scale: GradeScale,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            grade_scale: GradeScale::parse(
                &std::env::var("GRADE_SCALE").unwrap_or_else(|_| "ten".to_string()),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
