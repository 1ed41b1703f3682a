//! Runtime configuration types.

use std::fmt;
use std::path::PathBuf;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 10000;

pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Properties file read when `PROPERTIES_PATH` is not set.
pub const DEFAULT_PROPERTIES_PATH: &str = "conf/db.properties";

pub const DEFAULT_STATIC_DIR: &str = "static/images";

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Collections reachable over HTTP unless `COLLECTIONS` overrides them.
pub const DEFAULT_COLLECTIONS: &[&str] = &["products", "courses", "lessons", "orders", "UserData"];

/// Collection holding course records (inventory endpoint and `GET /courses`).
pub const COURSES_COLLECTION: &str = "courses";

/// Collection written by `POST /UserData`.
pub const USER_DATA_COLLECTION: &str = "UserData";

/// Connection-string components from the `db.*` properties.
#[derive(Clone, PartialEq, Eq)]
pub struct DbProperties {
    /// Scheme plus separator, e.g. `mongodb+srv://`.
    pub prefix: String,
    pub user: String,
    pub password: String,
    /// Database name the service operates on.
    pub name: String,
    /// Host part starting with `@`, e.g. `@cluster0.example.net/`.
    pub url: String,
    /// Trailing query string, e.g. `?retryWrites=true&w=majority`.
    pub params: String,
}

impl fmt::Debug for DbProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbProperties")
            .field("prefix", &self.prefix)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("params", &self.params)
            .finish()
    }
}

/// Where records live.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Mongo { uri: String, database: String },
    Memory,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Mongo { database, .. } => f
                .debug_struct("Mongo")
                .field("uri", &"<redacted>")
                .field("database", database)
                .finish(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    /// Allow-list of collection names reachable through `/collections/:name`.
    pub collections: Vec<String>,
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
