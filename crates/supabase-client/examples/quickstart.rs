//! Query a table, list storage buckets and call an edge function.
//!
//! ```sh
//! SUPABASE_URL=https://xyz.supabase.co SUPABASE_KEY=... \
//!     cargo run -p supabase-client --example quickstart
//! ```

use serde_json::json;
use supabase_client::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let url = std::env::var("SUPABASE_URL")?;
    let key = std::env::var("SUPABASE_KEY")?;
    let mut client = create_client(&url, &key, ClientOptions::default())?;

    if let (Ok(email), Ok(password)) = (
        std::env::var("SUPABASE_EMAIL"),
        std::env::var("SUPABASE_PASSWORD"),
    ) {
        let session = client
            .auth_mut()
            .sign_in_with_password_email(&email, &password)
            .await?;
        client
            .set_session(&session.access_token, &session.refresh_token)
            .await?;
        tracing::info!(user = %session.user.id, "Signed in");
    }

    let countries = client
        .table("countries")
        .select("id, name")
        .order("name", OrderDirection::Ascending)
        .limit(5)
        .count(CountOption::Exact)
        .execute()
        .await?;
    tracing::info!(count = ?countries.count, data = %countries.data, "Countries");

    for bucket in client.storage().list_buckets().await? {
        tracing::info!(id = %bucket.id, public = bucket.public, "Bucket");
    }

    match client
        .functions()?
        .invoke("hello", InvokeOptions::new().body(json!({ "name": "Rust" })))
        .await
    {
        Ok(response) => tracing::info!(status = response.status(), body = %response.text(), "Function"),
        Err(e) => tracing::warn!(error = %e, "Function call failed"),
    }

    if let Err(e) = client.realtime() {
        tracing::info!("{e}");
    }

    Ok(())
}
