use stockroom_hex::auth::TokenSigner;
use stockroom_hex::config::{BootstrapAdmin, Config};
use stockroom_hex::domain::user::{Role, User};
use stockroom_hex::inbound::http::{HttpServer, HttpServerConfig};
use stockroom_hex::ports::UserRepository;
use stockroom_repo::{build_store, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / JWT_SECRET / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let store: Store = build_store(config.database_url.as_deref()).await?;

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(&store, admin).await?;
    }

    let signer = TokenSigner::new(&config.jwt_secret);
    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        upload_dir: config.upload_dir.clone(),
        public_url: config.public_url.clone(),
    };

    let http = HttpServer::new(store, signer, server_cfg).await?;
    http.run().await
}

/// The register endpoint needs an admin token, so the first admin has to come
/// from somewhere else; env-configured seeding covers that. Idempotent: an
/// existing account with the same email is left alone.
async fn bootstrap_admin(store: &Store, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    if store.find_user_by_email(&admin.email).await?.is_some() {
        return Ok(());
    }
    let user = User::new(
        admin.name.clone(),
        admin.email.clone(),
        admin.password.clone(),
        Role::Admin,
    )?;
    store.create_user(user).await?;
    tracing::info!("bootstrapped admin account {}", admin.email);
    Ok(())
}
