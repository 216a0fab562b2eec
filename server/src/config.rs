//! Server configuration: bind address and CORS allow-list.
//!
//! Every option can come from the command line or the environment.

use clap::Parser;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "In-memory todo CRUD service", long_about = None)]
pub struct ServerConfig {
    /// Address to bind to.
    #[arg(long, env = "TODO_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "TODO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Origins allowed to make cross-origin requests, comma separated.
    #[arg(
        long,
        env = "TODO_CORS_ORIGINS",
        value_delimiter = ',',
        default_values_t = default_cors_origins()
    )]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
