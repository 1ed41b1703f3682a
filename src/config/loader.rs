//! Load service config from a `db.*` properties file and environment variables.
//!
//! Environment wins over the properties file. `MONGODB_URI` replaces the assembled connection
//! string entirely; `STORE=memory` skips the database altogether.

use crate::config::types::*;
use crate::config::validate_collections;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read a `key=value` properties file. Keys may contain dots (`db.user`); lines starting with
/// `#` or `!` are comments. Values are taken literally after trimming, so `$`, `#` and quotes
/// inside a password survive.
pub fn read_properties(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let to_err = |reason: String| ConfigError::Properties {
        path: path.display().to_string(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| to_err(e.to_string()))?;
    parse_properties(&text).map_err(to_err)
}

fn parse_properties(text: &str) -> Result<HashMap<String, String>, String> {
    let mut out = HashMap::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("line {}: expected key=value", n + 1))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("line {}: empty key", n + 1));
        }
        out.insert(key.to_string(), value.trim().to_string());
    }
    Ok(out)
}

fn first_of<'a>(props: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| props.get(*k)).map(String::as_str)
}

impl DbProperties {
    /// `db.password` and `db.dbname` also accept the older `db.pwd` and `db.name` spellings.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |keys: &[&str], name: &'static str| {
            first_of(props, keys)
                .map(str::to_string)
                .ok_or(ConfigError::MissingProperty(name))
        };
        Ok(DbProperties {
            prefix: required(&["db.prefix"], "db.prefix")?,
            user: required(&["db.user"], "db.user")?,
            password: required(&["db.password", "db.pwd"], "db.password")?,
            name: required(&["db.dbname", "db.name"], "db.dbname")?,
            url: required(&["db.dbUrl"], "db.dbUrl")?,
            params: first_of(props, &["db.params"]).unwrap_or_default().to_string(),
        })
    }

    /// `prefix + user + ":" + urlencode(password) + url + params`.
    pub fn connection_uri(&self) -> String {
        let password: String = url::form_urlencoded::byte_serialize(self.password.as_bytes()).collect();
        // The form encoder writes spaces as '+'; a literal '+' is already %2B.
        let password = password.replace('+', "%20");
        format!("{}{}:{}{}{}", self.prefix, self.user, password, self.url, self.params)
    }
}

fn parse_env<T: std::str::FromStr>(
    env: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env.get(key).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
        None => Ok(default),
    }
}

fn non_empty<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Build the config from an environment snapshot and (optionally) parsed properties.
pub fn resolve(
    env: &HashMap<String, String>,
    props: Option<&HashMap<String, String>>,
) -> Result<ServiceConfig, ConfigError> {
    let port = parse_env(env, "PORT", DEFAULT_PORT)?;
    let host = non_empty(env, "HOST").unwrap_or(DEFAULT_HOST).to_string();
    let max_body_bytes = parse_env(env, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;
    let static_dir = non_empty(env, "STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

    let store = match non_empty(env, "STORE") {
        Some(kind) if kind.eq_ignore_ascii_case("memory") => StoreConfig::Memory,
        Some(kind) if !kind.eq_ignore_ascii_case("mongo") && !kind.eq_ignore_ascii_case("mongodb") => {
            return Err(ConfigError::InvalidValue {
                key: "STORE",
                value: kind.to_string(),
            });
        }
        _ => mongo_store(env, props)?,
    };

    let collections: Vec<String> = match non_empty(env, "COLLECTIONS") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => DEFAULT_COLLECTIONS.iter().map(|s| s.to_string()).collect(),
    };
    validate_collections(&collections)?;

    Ok(ServiceConfig {
        host,
        port,
        store,
        collections,
        static_dir,
        max_body_bytes,
    })
}

fn mongo_store(
    env: &HashMap<String, String>,
    props: Option<&HashMap<String, String>>,
) -> Result<StoreConfig, ConfigError> {
    if let Some(uri) = non_empty(env, "MONGODB_URI") {
        let database = non_empty(env, "DATABASE_NAME")
            .or_else(|| props.and_then(|p| first_of(p, &["db.dbname", "db.name"])))
            .ok_or(ConfigError::MissingProperty("DATABASE_NAME"))?;
        return Ok(StoreConfig::Mongo {
            uri: uri.to_string(),
            database: database.to_string(),
        });
    }
    let props = props.ok_or(ConfigError::MissingProperty("db.prefix"))?;
    let db = DbProperties::from_properties(props)?;
    let database = non_empty(env, "DATABASE_NAME").unwrap_or(db.name.as_str()).to_string();
    Ok(StoreConfig::Mongo {
        uri: db.connection_uri(),
        database,
    })
}

/// Load `.env`, the properties file (`PROPERTIES_PATH`, default `conf/db.properties`) when it
/// exists, and the process environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let env: HashMap<String, String> = std::env::vars().collect();
    let path = non_empty(&env, "PROPERTIES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPERTIES_PATH));
    let props = if path.exists() {
        tracing::info!(path = %path.display(), "reading database properties");
        Some(read_properties(&path)?)
    } else {
        None
    };
    resolve(&env, props.as_ref())
}
