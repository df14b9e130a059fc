// src/cli/session_commands.rs
use crate::cli::args::SessionCommands;
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use chrono::Duration;
use tracing::instrument;

/// Tokens never reach the span fields
#[instrument(skip_all)]
pub fn execute(command: SessionCommands, services: &ServiceContainer) -> CliResult<()> {
    match command {
        SessionCommands::Issue { user_id, ttl_hours } => issue(services, user_id, ttl_hours),
        SessionCommands::Revoke { token } => revoke(services, &token),
    }
}

fn issue(
    services: &ServiceContainer,
    user_id: Option<String>,
    ttl_hours: Option<u32>,
) -> CliResult<()> {
    let ttl = match ttl_hours {
        Some(0) => {
            return Err(CliError::InvalidInput(
                "--ttl-hours must be greater than zero".to_string(),
            ))
        }
        Some(hours) => Some(Duration::hours(i64::from(hours))),
        None => None,
    };

    let session = services.session_service.issue(user_id.as_deref(), ttl)?;

    // token on stdout so it can be captured: export LINKSHELF_SESSION=$(linkshelf session issue)
    println!("{}", session.token);
    eprintln!("user: {}", session.user_id);
    match session.expires_at {
        Some(expires) => eprintln!("expires: {}", expires.to_rfc3339()),
        None => eprintln!("expires: never"),
    }
    Ok(())
}

fn revoke(services: &ServiceContainer, token: &str) -> CliResult<()> {
    if services.session_service.revoke(token)? {
        eprintln!("Session revoked");
        Ok(())
    } else {
        Err(CliError::CommandFailed("No such session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_service_container::TestServiceContainer;
    use serial_test::serial;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    /// Collects formatted log lines for inspection
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    #[serial]
    fn given_revoke_when_logged_at_trace_then_token_absent() {
        let container = TestServiceContainer::new();
        let session = container
            .services
            .session_service
            .issue(Some("alice"), None)
            .unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::FULL)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            execute(
                SessionCommands::Revoke {
                    token: session.token.clone(),
                },
                &container.services,
            )
            .unwrap();
        });

        let out = logs.text();
        assert!(out.contains("execute"), "span was not recorded: {out}");
        assert!(!out.contains(&session.token));
    }
}
