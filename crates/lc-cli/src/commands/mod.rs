pub mod agents;
pub mod assign;
pub mod collect;
pub mod customers;
pub mod loans;
pub mod login;
pub mod logout;
pub mod schedules;
pub mod upload;

use std::time::Duration;

use lc_core::session::Session;
use lc_core::{ApiClient, ApiError};

use crate::transport::ReqwestTransport;

pub type Api<S> = ApiClient<ReqwestTransport, S>;

/// Build an API client over the reqwest transport.
pub fn api_client<S: Session>(
    api_url: &str,
    session: S,
    timeout: Option<Duration>,
) -> anyhow::Result<Api<S>> {
    Ok(ApiClient::new(ReqwestTransport::new(timeout)?, session, api_url))
}

/// Map client errors to user-friendly messages.
pub fn friendly_error(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::NotAuthenticated => {
            anyhow::anyhow!("Not logged in.\n  (hint: run `lc login --email <email> --password <password>`)")
        }
        ApiError::Transport(msg) => anyhow::anyhow!(msg),
        ApiError::Status {
            status,
            reason: Some(reason),
        } => anyhow::anyhow!("{reason} (HTTP {status})"),
        ApiError::Status { status, reason: None } => {
            anyhow::anyhow!("Request rejected by the backend (HTTP {status})")
        }
        ApiError::Decode(msg) => anyhow::anyhow!("Unexpected response from the backend: {msg}"),
    }
}

/// Left-aligned plain-text table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use lc_core::session::StaticSession;

    use super::{api_client, Api};

    /// Serve `app` on an ephemeral port and return its base URL.
    pub async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub fn authed(api_url: &str) -> Api<StaticSession> {
        api_client(api_url, StaticSession::new("t0k3n"), None).unwrap()
    }

    pub fn anonymous(api_url: &str) -> Api<StaticSession> {
        api_client(api_url, StaticSession::anonymous(), None).unwrap()
    }
}
