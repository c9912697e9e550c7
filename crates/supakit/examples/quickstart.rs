//! Sign in, edit the profile and work with a `todos` table.
//!
//! Run with: cargo run --example quickstart -p supakit
//!
//! Reads SUPABASE_URL, SUPABASE_ANON_KEY, SUPAKIT_EMAIL and SUPAKIT_PASSWORD.
//! Set RUST_LOG=supakit=debug to see each request.

use supakit::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://127.0.0.1:54321";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let url = std::env::var("SUPABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let anon = std::env::var("SUPABASE_ANON_KEY")?;
    let email = std::env::var("SUPAKIT_EMAIL")?;
    let password = std::env::var("SUPAKIT_PASSWORD")?;

    let kit = Supakit::new(FacadeConfig::new(url, anon))?;

    // ── Sign in ──
    println!("=== Sign in ===");
    let signed_in = match kit.sign_in(&email, &password).await {
        Ok(signed_in) => signed_in,
        Err(e) => {
            println!("  Sign in failed: {}", e.message());
            return Ok(());
        }
    };
    println!("  User: {} ({})", signed_in.user.id, signed_in.user.email);
    println!("  Session expires at: {}", signed_in.session.expires_at);

    // ── Profile ──
    println!("\n=== Profile ===");
    match kit
        .update_profile(ProfileUpdate::new().first_name("Ada").last_name("Lovelace"))
        .await
    {
        Ok(user) => println!("  Name: {:?} {:?}", user.first_name, user.last_name),
        Err(e) => println!("  Update failed: {}", e.message()),
    }

    // ── Records ──
    println!("\n=== Records ===");
    let created = kit
        .create("todos", record![("title", "Try supakit"), ("done", false)])
        .await;
    match created {
        Ok(row) => {
            let id = row.id().unwrap_or_default();
            println!("  Created: {}", id);

            let updated = kit.update("todos", &id, record![("done", true)]).await;
            println!("  Updated: {:?}", updated.map(|r| r.get_value("done").cloned()));

            let open = kit.list("todos", Some(&record![("done", false)])).await;
            println!("  Open todos: {:?}", open.map(|rows| rows.len()));

            kit.delete("todos", &id).await.ok();
            println!("  Still there after delete: {:?}", kit.read("todos", &id).await.map(|r| r.is_some()));
        }
        Err(e) => println!("  Create failed: {}", e.message()),
    }

    // ── Sign out ──
    kit.sign_out().await.ok();
    println!("\nSigned out: {:?}", kit.get_current_user().await.map(|u| u.is_none()));
    Ok(())
}
