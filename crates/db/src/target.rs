use crate::error::ConnectionError;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

const PORT: u16 = 5432;
const DATABASE: &str = "postgres";
const APPLICATION_NAME: &str = "slipway";

/// Where a migration runs. Secrets stay wrapped until the connect options are built.
#[derive(Debug)]
pub enum DatabaseTarget {
    Url(SecretString),
    /// A hosted project addressed by its reference. With a region the regional
    /// pooler is used, otherwise the project's direct host.
    Project {
        project_ref: String,
        password: SecretString,
        region: Option<String>,
    },
}

impl DatabaseTarget {
    pub fn url(url: impl Into<String>) -> Self {
        DatabaseTarget::Url(SecretString::from(url.into()))
    }

    pub fn project(
        project_ref: impl Into<String>,
        password: SecretString,
        region: Option<String>,
    ) -> Self {
        DatabaseTarget::Project {
            project_ref: project_ref.into(),
            password,
            region,
        }
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConnectionError> {
        match self {
            DatabaseTarget::Url(url) => {
                let url = url.expose_secret();
                if url.trim().is_empty() {
                    return Err(invalid("database URL is empty"));
                }
                let options: PgConnectOptions = url.parse().map_err(|e: sqlx::Error| {
                    invalid(format!("cannot parse database URL {}: {e}", mask_url(url)))
                })?;
                Ok(options.application_name(APPLICATION_NAME))
            }
            DatabaseTarget::Project {
                project_ref,
                password,
                region,
            } => {
                check_project_ref(project_ref)?;
                let (host, username) = match region.as_deref() {
                    Some(region) => {
                        check_region(region)?;
                        (
                            format!("aws-1-{region}.pooler.supabase.com"),
                            format!("postgres.{project_ref}"),
                        )
                    }
                    None => (format!("db.{project_ref}.supabase.co"), "postgres".to_string()),
                };

                Ok(PgConnectOptions::new()
                    .host(&host)
                    .port(PORT)
                    .username(&username)
                    .password(password.expose_secret())
                    .database(DATABASE)
                    .ssl_mode(PgSslMode::Require)
                    .application_name(APPLICATION_NAME))
            }
        }
    }

    /// A loggable description with no password in it.
    pub fn display_name(&self) -> String {
        match self {
            DatabaseTarget::Url(url) => mask_url(url.expose_secret()),
            DatabaseTarget::Project {
                project_ref,
                region: Some(region),
                ..
            } => format!("postgres.{project_ref}@aws-1-{region}.pooler.supabase.com:{PORT}/{DATABASE}"),
            DatabaseTarget::Project {
                project_ref,
                region: None,
                ..
            } => format!("postgres@db.{project_ref}.supabase.co:{PORT}/{DATABASE}"),
        }
    }
}

fn invalid(message: impl Into<String>) -> ConnectionError {
    ConnectionError::InvalidTarget {
        message: message.into(),
    }
}

fn check_project_ref(project_ref: &str) -> Result<(), ConnectionError> {
    if project_ref.is_empty() || !project_ref.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(format!(
            "project ref must be non-empty ASCII alphanumerics, got {project_ref:?}"
        )));
    }
    Ok(())
}

fn check_region(region: &str) -> Result<(), ConnectionError> {
    if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(format!("invalid region {region:?}")));
    }
    Ok(())
}

const MASKED: &str = "****";

/// Replaces the password in a connection URL's user info with `****`.
///
/// User info ends at the last `@`, so passwords holding `/`, `?` or `@` are
/// still covered. Text that is not a `scheme://` URL is masked entirely.
pub fn mask_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return MASKED.to_string();
    };
    let rest_start = scheme_end + 3;
    let rest = &url[rest_start..];

    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let Some(colon) = rest[..at].find(':') else {
        return url.to_string();
    };

    format!("{}{MASKED}{}", &url[..rest_start + colon + 1], &rest[at..])
}
