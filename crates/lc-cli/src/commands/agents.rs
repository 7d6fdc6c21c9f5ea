use lc_core::session::Session;

use super::{friendly_error, render_table, Api};

/// Run the `agents` subcommand: list collection agents.
pub async fn run<S: Session>(api: &Api<S>) -> anyhow::Result<()> {
    let agents = api.list_agents().await.map_err(friendly_error)?;
    if agents.is_empty() {
        println!("No agents found.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = agents
        .iter()
        .map(|a| vec![a.id.to_string(), a.username.clone()])
        .collect();
    println!("{}", render_table(&["ID", "Username"], &rows));
    Ok(())
}
