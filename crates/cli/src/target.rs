use crate::args::ConnectionArgs;
use crate::error::CliError;
use secrecy::SecretString;
use slipway_core::DatabaseTarget;

pub fn resolve(args: &ConnectionArgs) -> Result<DatabaseTarget, CliError> {
    if let Some(project_ref) = non_empty(args.project_ref.as_deref()) {
        // Passwords are taken verbatim; surrounding spaces can be part of them.
        let Some(password) = args.db_password.as_deref().filter(|p| !p.is_empty()) else {
            return Err(CliError::user_error("Database password is required")
                .with_reason("--project-ref was given without --db-password")
                .with_action("Pass --db-password or set SLIPWAY_DB_PASSWORD."));
        };

        return Ok(DatabaseTarget::project(
            project_ref,
            SecretString::from(password.to_string()),
            non_empty(args.region.as_deref()).map(str::to_string),
        ));
    }

    match non_empty(args.database_url.as_deref()) {
        Some(url) => Ok(DatabaseTarget::url(url)),
        None => Err(CliError::user_error("DATABASE_URL is required")
            .with_action("Pass --database-url, set DATABASE_URL, or use --project-ref.")),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn url_is_used_when_no_project_ref() {
        let args = ConnectionArgs {
            database_url: Some("postgres://u:p@localhost/db".to_string()),
            ..ConnectionArgs::default()
        };
        assert!(matches!(resolve(&args), Ok(DatabaseTarget::Url(_))));
    }

    #[test]
    fn project_ref_wins_over_url() {
        let args = ConnectionArgs {
            database_url: Some("postgres://u:p@localhost/db".to_string()),
            project_ref: Some("abcdef".to_string()),
            db_password: Some("pw".to_string()),
            region: Some("  ".to_string()),
        };
        match resolve(&args) {
            Ok(DatabaseTarget::Project {
                project_ref,
                region,
                ..
            }) => {
                assert_eq!(project_ref, "abcdef");
                assert_eq!(region, None);
            }
            other => panic!("unexpected target: {other:?}"),
        }
    }

    #[test]
    fn password_is_not_trimmed() {
        let args = ConnectionArgs {
            project_ref: Some("abcdef".to_string()),
            db_password: Some("  pw with spaces  ".to_string()),
            ..ConnectionArgs::default()
        };
        match resolve(&args) {
            Ok(DatabaseTarget::Project { password, .. }) => {
                assert_eq!(password.expose_secret(), "  pw with spaces  ");
            }
            other => panic!("unexpected target: {other:?}"),
        }
    }

    #[test]
    fn project_ref_needs_password() {
        let args = ConnectionArgs {
            project_ref: Some("abcdef".to_string()),
            ..ConnectionArgs::default()
        };
        let err = resolve(&args).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn nothing_configured_is_a_user_error() {
        let err = resolve(&ConnectionArgs::default()).unwrap_err();
        assert_eq!(err.title(), "DATABASE_URL is required");
    }
}
