//! Minimal console shell over the meterdesk access layer.
//!
//! ```bash
//! MD_BASE_URL=https://console.example.org meterdesk login alice secret
//! MD_ADMIN_TOKEN=... meterdesk nodes
//! meterdesk route /admin/board
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};

use meterdesk_auth::{RouteGuard, SessionStore};
use meterdesk_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    meterdesk_observability::init();

    let base_url = std::env::var("MD_BASE_URL").unwrap_or_else(|_| {
        tracing::warn!("MD_BASE_URL not set; defaulting to http://127.0.0.1:8080");
        "http://127.0.0.1:8080".to_string()
    });

    let client = match std::env::var("MD_ADMIN_TOKEN") {
        Ok(token) => ApiClient::with_admin_token(&base_url, &token),
        Err(_) => ApiClient::new(&base_url),
    }
    .context("failed to construct the API client")?;
    let client = Arc::new(client);
    let store = Arc::new(SessionStore::new(client.clone()));

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "me".to_string());

    match command.as_str() {
        "health" => print_json(&client.healthz().await?)?,
        "me" => print_json(&client.auth_me().await?)?,
        "login" => {
            let username = args.next().context("usage: meterdesk login <username> <password>")?;
            let password = args.next().context("usage: meterdesk login <username> <password>")?;
            store.login(&username, &password).await?;
            println!("{:#?}", store.snapshot().await);
        }
        "logout" => {
            store.logout().await?;
            println!("{:#?}", store.snapshot().await);
        }
        "balance" => print_json(&client.user_my_balance().await?)?,
        "announcements" => print_json(&client.announcements(20).await?)?,
        "nodes" => print_json(&client.admin_nodes(200).await?)?,
        "requests" => print_json(&client.admin_requests("pending", 200).await?)?,
        "route" => {
            let path = args.next().context("usage: meterdesk route <path>")?;
            let guard = RouteGuard::new(store);
            println!("{:?}", guard.before_navigate(&path).await);
        }
        other => bail!("unknown command: {other}"),
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
