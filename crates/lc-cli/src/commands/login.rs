use lc_core::session::{FileSession, Session, StaticSession};

use super::{friendly_error, Api};

/// Run the `login` subcommand: exchange credentials for a token and persist
/// it to the session file.
pub async fn run<S: Session>(
    api: &Api<S>,
    store: &FileSession,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }
    let login = api.login(email.trim(), password).await.map_err(friendly_error)?;
    if login.token.trim().is_empty() {
        anyhow::bail!("Login succeeded but the backend returned no token");
    }

    let username = if login.user.username.is_empty() {
        email.trim().to_string()
    } else {
        login.user.username.clone()
    };
    store.store(&StaticSession::new(login.token).with_username(&username))?;
    tracing::info!(user = %username, path = %store.path().display(), "session stored");

    match login.user.role.as_str() {
        "" => println!("Logged in as {username}"),
        role => println!("Logged in as {username} ({role})"),
    }
    Ok(())
}
