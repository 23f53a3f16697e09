use anyhow::Context;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    /// Base URL used when building public image links; derived from the port
    /// when unset.
    pub public_url: Option<String>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "3000".into());
        let database_url = env::var("DATABASE_URL").ok();
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));
        let public_url = env::var("PUBLIC_URL").ok();

        let bootstrap_admin = match (env::var("ADMIN_EMAIL").ok(), env::var("ADMIN_PASSWORD").ok())
        {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            upload_dir,
            public_url,
            bootstrap_admin,
        })
    }
}
