use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL that uploaded objects are publicly reachable under.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    pub session_ttl_secs: u64,
    pub require_email_confirmation: bool,
    pub max_image_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_public_url = std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| {
            format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket)
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket,
            s3_endpoint,
            s3_public_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 86_400)
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            require_email_confirmation: parse_env("REQUIRE_EMAIL_CONFIRMATION", false)
                .context("REQUIRE_EMAIL_CONFIRMATION must be true or false")?,
            max_image_bytes: parse_env("MAX_IMAGE_BYTES", 5 * 1024 * 1024)
                .context("MAX_IMAGE_BYTES must be a number of bytes")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for '{key}': {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Values for router tests; nothing here is dialed.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/resumes_test".to_string(),
            database_max_connections: 1,
            redis_url: "redis://localhost".to_string(),
            s3_bucket: "resumes".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_public_url: "http://localhost:9000/resumes".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            session_ttl_secs: 60,
            require_email_confirmation: false,
            max_image_bytes: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_and_value() {
        assert_eq!(
            parse_env::<u16>("RESUME_API_TEST_UNSET_PORT", 8080).unwrap(),
            8080
        );
        std::env::set_var("RESUME_API_TEST_FLAG", "true");
        assert!(parse_env::<bool>("RESUME_API_TEST_FLAG", false).unwrap());
        std::env::set_var("RESUME_API_TEST_BAD", "abc");
        assert!(parse_env::<u64>("RESUME_API_TEST_BAD", 1).is_err());
    }
}
