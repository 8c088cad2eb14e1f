//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or an environment variable; the
//! defaults describe a local single-node deployment.

use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use todo_core::{MemoryStore, MongoConfig, MongoStore, StoreError, TodoStore};

/// Which store gateway backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Mongo,
    /// Process-local map; contents are lost on exit.
    Memory,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Todo list HTTP service")]
pub struct Config {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "TODO_LISTEN_ADDR", default_value = "0.0.0.0:9000")]
    pub listen_addr: SocketAddr,

    #[arg(long, env = "TODO_STORE", value_enum, default_value_t = StoreBackend::Mongo)]
    pub store: StoreBackend,

    /// MongoDB `host:port`.
    #[arg(long, env = "TODO_MONGO_HOST", default_value = "localhost:27017")]
    pub mongo_host: String,

    #[arg(long, env = "TODO_DB_NAME", default_value = "demo_todo")]
    pub db_name: String,

    #[arg(long, env = "TODO_COLLECTION", default_value = "todo")]
    pub collection: String,

    /// Directory containing `home.tpl`. A relative path is resolved against
    /// the working directory, so `static` only works when started from the
    /// `server/` crate directory; pass an absolute path otherwise.
    #[arg(long, env = "TODO_TEMPLATE_DIR", default_value = "static")]
    pub template_dir: PathBuf,

    #[arg(long, env = "TODO_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// How long in-flight requests may run after a shutdown signal.
    #[arg(long, env = "TODO_SHUTDOWN_GRACE_SECS", default_value_t = 5)]
    pub shutdown_grace_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn mongo(&self) -> MongoConfig {
        MongoConfig {
            host: self.mongo_host.clone(),
            database: self.db_name.clone(),
            collection: self.collection.clone(),
        }
    }

    /// Path of the home page template under `template_dir`.
    pub fn home_template(&self) -> PathBuf {
        self.template_dir.join(crate::handlers::HOME_TEMPLATE)
    }

    /// Logs a warning and returns `false` when the home page template is
    /// missing.
    pub fn check_templates(&self) -> bool {
        let path = self.home_template();
        let found = path.is_file();
        if !found {
            tracing::warn!(
                path = %path.display(),
                "home page template not found; GET / will answer 500 \
                 (set --template-dir or TODO_TEMPLATE_DIR)"
            );
        }
        found
    }

    /// Open the configured store gateway. Called once at startup.
    pub async fn open_store(&self) -> Result<Arc<dyn TodoStore>, StoreError> {
        match self.store {
            StoreBackend::Mongo => Ok(Arc::new(MongoStore::connect(&self.mongo()).await?)),
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; todos will not survive a restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
