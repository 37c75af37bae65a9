//! Configuration module
//!
//! [`Config`] is built once at process start and handed to the services that need it.
//! Nothing else in the workspace reads the environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const MAX_UPLOAD_SIZE_MB: usize = 25;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSans.ttf";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DB_MAX_CONNECTIONS: u32 = 10;
const SENDER_DISPLAY_NAME: &str = "חתימה דיגיטלית";

/// HTTP server settings and the two public base URLs.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    /// Base URL of the client application; signing links point here.
    pub client_base_url: String,
    /// Public base URL of this service; download links point here.
    pub server_base_url: String,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Where blobs and metadata records live.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    pub metadata_backend: MetadataBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataBackend {
    /// JSON records stored next to the blobs.
    Storage,
    /// `submissions` table in Postgres.
    Postgres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailTransportKind {
    Smtp,
    /// Log messages instead of sending them. Local development only.
    Log,
}

/// Outbound mail settings (`mailCredentials`).
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub transport: MailTransportKind,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
}

#[derive(Clone, Debug)]
pub struct SigningConfig {
    pub font_path: PathBuf,
    /// Email the stamped document back to the recipient after signing.
    pub send_signed_copy: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub signing: SigningConfig,
}

impl Config {
    /// Load `.env` (if present) and read configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, fallback: &str| var(key).or_else(|| var(fallback));

        let environment = var_or("ENVIRONMENT", "APP_ENV")
            .unwrap_or_else(|| "development".to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let client_base_url = var("CLIENT_URL")
            .unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let server_base_url = var("SERVER_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| client_base_url.clone())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS)
            .max(1);

        let max_upload_size_mb = var("MAX_UPLOAD_SIZE_MB")
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))
            })
            .transpose()?
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let metadata_backend = match var("METADATA_BACKEND")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("storage") => MetadataBackend::Storage,
            Some("postgres") | Some("postgresql") => MetadataBackend::Postgres,
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "METADATA_BACKEND must be 'storage' or 'postgres', got '{}'",
                    other
                ))
            }
        };

        let transport = match var("MAIL_TRANSPORT")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("smtp") => MailTransportKind::Smtp,
            Some("log") => MailTransportKind::Log,
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "MAIL_TRANSPORT must be 'smtp' or 'log', got '{}'",
                    other
                ))
            }
        };

        let smtp_user = var_or("SMTP_USER", "EMAIL_USER");
        let smtp_from = var("SMTP_FROM").or_else(|| {
            smtp_user
                .as_ref()
                .map(|user| format!("\"{}\" <{}>", SENDER_DISPLAY_NAME, user))
        });

        let config = Config {
            server: ServerConfig {
                port,
                environment,
                client_base_url,
                server_base_url,
                cors_origins,
                request_timeout_secs,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from(
                    var("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
                ),
                max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
                metadata_backend,
                database_url: var("DATABASE_URL"),
                db_max_connections: var("DB_MAX_CONNECTIONS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DB_MAX_CONNECTIONS),
            },
            mail: MailConfig {
                transport,
                smtp_host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: var("SMTP_PORT")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                smtp_user,
                smtp_password: var_or("SMTP_PASSWORD", "EMAIL_PASS"),
                smtp_from,
                smtp_tls: var("SMTP_TLS")
                    .map(|s| parse_bool(&s))
                    .unwrap_or(true),
            },
            signing: SigningConfig {
                font_path: PathBuf::from(
                    var("SIGNATURE_FONT_PATH").unwrap_or_else(|| DEFAULT_FONT_PATH.to_string()),
                ),
                send_signed_copy: var("SEND_SIGNED_COPY")
                    .map(|s| parse_bool(&s))
                    .unwrap_or(true),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.server.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.storage.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
        }

        if self.storage.metadata_backend == MetadataBackend::Postgres
            && self.storage.database_url.is_none()
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be set when METADATA_BACKEND=postgres"
            ));
        }

        if self.mail.transport == MailTransportKind::Smtp && self.mail.smtp_from.is_none() {
            return Err(anyhow::anyhow!(
                "SMTP_FROM or SMTP_USER/EMAIL_USER must be set when MAIL_TRANSPORT=smtp"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.server.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Link the recipient follows to reach the signing form.
    pub fn signing_link(&self, id: &uuid::Uuid) -> String {
        format!("{}/sign/{}", self.server.client_base_url, id)
    }

    /// Public URL under which a stored blob is served.
    pub fn download_url(&self, storage_key: &str) -> String {
        format!("{}/uploads/{}", self.server.server_base_url, storage_key)
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = config_from(&[("EMAIL_USER", "sender@example.com")]).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.client_base_url, "http://localhost:3000");
        assert_eq!(config.server.server_base_url, "http://localhost:5000");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.storage.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.storage.metadata_backend, MetadataBackend::Storage);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(
            config.mail.smtp_from.as_deref(),
            Some("\"חתימה דיגיטלית\" <sender@example.com>")
        );
        assert!(config.signing.send_signed_copy);
    }

    #[test]
    fn base_urls_drop_trailing_slash() {
        let config = config_from(&[
            ("MAIL_TRANSPORT", "log"),
            ("CLIENT_URL", "https://sign.example.com/"),
            ("SERVER_URL", "https://api.example.com/"),
        ])
        .unwrap();
        let id = uuid::Uuid::nil();
        assert_eq!(
            config.signing_link(&id),
            format!("https://sign.example.com/sign/{}", id)
        );
        assert_eq!(
            config.download_url("abc_signed.pdf"),
            "https://api.example.com/uploads/abc_signed.pdf"
        );
    }

    #[test]
    fn smtp_transport_requires_sender() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("SMTP_FROM"));
        assert!(config_from(&[("MAIL_TRANSPORT", "log")]).is_ok());
    }

    #[test]
    fn rejects_invalid_port() {
        let err = config_from(&[("MAIL_TRANSPORT", "log"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = config_from(&[("MAIL_TRANSPORT", "log"), ("METADATA_BACKEND", "postgres")])
            .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = config_from(&[
            ("MAIL_TRANSPORT", "log"),
            ("METADATA_BACKEND", "postgres"),
            ("DATABASE_URL", "postgresql://localhost/docsign"),
        ])
        .unwrap();
        assert_eq!(config.storage.metadata_backend, MetadataBackend::Postgres);
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let err = config_from(&[
            ("MAIL_TRANSPORT", "log"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "*"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));
    }

    #[test]
    fn unknown_mail_transport_rejected() {
        assert!(config_from(&[("MAIL_TRANSPORT", "carrier-pigeon")]).is_err());
    }

    #[test]
    fn signed_copy_can_be_disabled() {
        let config =
            config_from(&[("MAIL_TRANSPORT", "log"), ("SEND_SIGNED_COPY", "false")]).unwrap();
        assert!(!config.signing.send_signed_copy);
    }
}
