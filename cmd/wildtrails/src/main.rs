//! Wildtrails server binary: wires the SQLite repository, local media store,
//! and in-process identity provider into the axum router.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use api_adapters::AppState;
use auth_adapters::{AdminAccount, AllowListPolicy, SimpleIdentityProvider};
use domains::ports::MediaStore;
use services::{ContentService, DESTINATIONS_BUCKET, GALLERY_BUCKET};
use storage_adapters::{LocalMediaStore, SqliteContentRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = configs::load().context("loading configuration")?;

    let repo = SqliteContentRepo::connect(&settings.database.url)
        .await
        .context("opening database")?;

    let media = Arc::new(LocalMediaStore::new(
        settings.storage.root.clone(),
        settings.storage.public_base.clone(),
    ));
    for bucket in [GALLERY_BUCKET, DESTINATIONS_BUCKET] {
        media
            .ensure_bucket(bucket)
            .await
            .with_context(|| format!("creating media bucket {bucket}"))?;
    }

    let accounts = settings
        .admin
        .accounts
        .iter()
        .map(|account| AdminAccount {
            email: account.email.clone(),
            password_hash: account.password_hash.expose_secret().to_string(),
        })
        .collect();
    let identity = Arc::new(SimpleIdentityProvider::new(accounts));
    let policy = Arc::new(AllowListPolicy::new(settings.admin.allowed_emails.clone()));

    let content = Arc::new(ContentService::new(Arc::new(repo), media));
    let state = AppState::new(content, identity, policy);

    let app = api_adapters::router(state, &settings.storage.root);

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "wildtrails listening");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
