use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub uploads: Uploads,
    pub auth: Auth,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Uploads {
    pub dir: PathBuf,
    pub url_prefix: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
}
