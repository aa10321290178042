use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, bail};

use super::config_model::{Auth, Database, DotEnvyConfig, Server, Uploads};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_UPLOAD_DIR: &str = "public/uploads";
const DEFAULT_UPLOAD_URL_PREFIX: &str = "/uploads";
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} is required"))
}

fn parsed<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(key)?
        .parse()
        .with_context(|| format!("{key} is invalid"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is invalid")),
        _ => Ok(default),
    }
}

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: parsed("SERVER_PORT")?,
        body_limit: parsed("SERVER_BODY_LIMIT")?,
        timeout: parsed("SERVER_TIMEOUT")?,
    };

    let database = load_database()?;

    let uploads = Uploads {
        dir: env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
        url_prefix: url_prefix(
            &env::var("UPLOAD_URL_PREFIX").unwrap_or_else(|_| DEFAULT_UPLOAD_URL_PREFIX.to_string()),
        )?,
    };

    let auth = Auth {
        jwt_secret: required("AUTH_JWT_SECRET")?,
        token_ttl_seconds: parsed_or("AUTH_TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        uploads,
        auth,
    })
}

/// Normalizes to a leading slash without a trailing one. The root path cannot host uploads.
fn url_prefix(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        bail!("UPLOAD_URL_PREFIX is invalid: uploads cannot be served from the root path");
    }
    Ok(format!("/{trimmed}"))
}

/// The seed binary only needs the database section.
pub fn load_database() -> Result<Database> {
    dotenvy::dotenv().ok();

    Ok(Database {
        url: required("DATABASE_URL")?,
        max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
    })
}
