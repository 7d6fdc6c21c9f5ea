use lc_api_types::CustomerId;
use lc_core::format::or_placeholder;
use lc_core::session::Session;
use lc_core::widgets::customers::{CustomerDirectory, NO_CUSTOMERS};

use super::{friendly_error, render_table, Api};

/// Run the `customers` subcommand: list customers, or one customer's profile.
pub async fn run<S: Session>(api: &Api<S>, id: Option<CustomerId>) -> anyhow::Result<()> {
    let customers = api.list_customers().await.map_err(friendly_error)?;
    let mut directory = CustomerDirectory::new();
    let ticket = directory.activate();
    directory.settle(ticket, Ok(customers.clone()));

    if let Some(id) = id {
        directory.select(Some(id));
        let Some(profile) = directory.profile() else {
            anyhow::bail!("Customer #{id} not found");
        };
        println!("Customer Profile");
        println!("  name:               {}", profile.name);
        println!("  contact:            {}", profile.contact);
        println!("  segment:            {}", profile.segment);
        println!("  relationship score: {}", profile.relationship_score);
        if let Some(c) = directory.selected() {
            if !c.tags.is_empty() {
                println!("  tags:               {}", c.tags.join(", "));
            }
        }
        return Ok(());
    }

    if customers.is_empty() {
        println!("{NO_CUSTOMERS}");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = customers
        .iter()
        .map(|c| {
            vec![
                c.customer_id.to_string(),
                or_placeholder(Some(&c.customer_code)),
                or_placeholder(Some(&c.full_name)),
                or_placeholder(Some(&c.phone)),
                or_placeholder(c.email.as_deref()),
            ]
        })
        .collect();
    println!("{}", render_table(&["ID", "Code", "Name", "Phone", "Email"], &rows));
    Ok(())
}
