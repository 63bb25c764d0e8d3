//! Dotted-key configuration store.
//!
//! ```ignore
//! let mut config = Config::load("fluentql.toml")?;
//! config.set("database.file", "app.db");
//! assert_eq!(config.database_file(), "app.db");
//! ```

use crate::error::{SqlError, SqlResult};
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::path::Path;
use std::str::FromStr;

/// Naming convention for derived table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableCase {
    /// `user_profile`
    #[default]
    Snake,
    /// `userProfile`
    Camel,
    /// `UserProfile`
    Pascal,
    /// `user-profile`
    Kebab,
    /// `userprofile`
    Lower,
}

impl TableCase {
    /// Convert `name` to this case.
    pub fn apply(&self, name: &str) -> String {
        match self {
            TableCase::Snake => name.to_snake_case(),
            TableCase::Camel => name.to_lower_camel_case(),
            TableCase::Pascal => name.to_upper_camel_case(),
            TableCase::Kebab => name.to_kebab_case(),
            TableCase::Lower => name.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableCase::Snake => "snake",
            TableCase::Camel => "camel",
            TableCase::Pascal => "pascal",
            TableCase::Kebab => "kebab",
            TableCase::Lower => "lower",
        }
    }
}

impl FromStr for TableCase {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" => Ok(TableCase::Snake),
            "camel" => Ok(TableCase::Camel),
            "pascal" => Ok(TableCase::Pascal),
            "kebab" => Ok(TableCase::Kebab),
            "lower" => Ok(TableCase::Lower),
            _ => Err(SqlError::config(format!("unknown table case `{s}`"))),
        }
    }
}

/// In-memory configuration tree addressed by dotted keys (`database.file`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: json!({
                "database": { "file": ":memory:" },
                "model": { "table_case": "snake" },
            }),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML and merge it over the defaults.
    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        let parsed: Value = toml::from_str(raw)?;
        if !parsed.is_object() {
            return Err(SqlError::config("config root must be a table"));
        }
        let mut config = Self::default();
        merge(&mut config.root, parsed);
        Ok(config)
    }

    /// Read a TOML file and merge it over the defaults.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlError::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw).map_err(|e| {
            SqlError::config(format!(
                "failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.root, |node, part| node.as_object()?.get(part))
    }

    /// Look up a dotted key and deserialize it.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> SqlResult<Option<T>> {
        match self.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| SqlError::config(format!("`{key}`: {e}"))),
            None => Ok(None),
        }
    }

    /// Set a dotted key, creating intermediate tables and replacing any
    /// non-table value in the way.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut node = &mut self.root;
        for part in key.split('.') {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                node = map.entry(part).or_insert(Value::Null);
            }
        }
        *node = value.into();
    }

    /// The whole tree.
    pub fn all(&self) -> &Value {
        &self.root
    }

    /// Remove every key, defaults included.
    pub fn clear(&mut self) {
        self.root = Value::Object(Map::new());
    }

    pub fn database_file(&self) -> &str {
        self.get("database.file")
            .and_then(Value::as_str)
            .unwrap_or(":memory:")
    }

    /// The configured table case; unset means snake case.
    pub fn table_case(&self) -> SqlResult<TableCase> {
        match self.get("model.table_case") {
            None | Some(Value::Null) => Ok(TableCase::default()),
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(SqlError::config(format!(
                "`model.table_case` must be a string, got {other}"
            ))),
        }
    }
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_file(), ":memory:");
        assert_eq!(config.table_case().unwrap(), TableCase::Snake);
        assert_eq!(config.get("database.file"), Some(&json!(":memory:")));
        assert_eq!(config.get("database.missing"), None);
        assert_eq!(config.get("database.file.deeper"), None);
    }

    #[test]
    fn test_from_toml_merges_over_defaults() {
        let config = Config::from_toml_str(
            r#"
            [database]
            pool_size = 4

            [model]
            table_case = "Kebab"
            "#,
        )
        .unwrap();
        assert_eq!(config.database_file(), ":memory:");
        assert_eq!(config.get_as::<u32>("database.pool_size").unwrap(), Some(4));
        assert_eq!(config.table_case().unwrap(), TableCase::Kebab);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("database = [").unwrap_err();
        assert!(matches!(err, SqlError::Config(_)));
    }

    #[test]
    fn test_set_creates_and_replaces() {
        let mut config = Config::default();
        config.set("database.file", "app.db");
        config.set("cache.ttl.seconds", 30);
        assert_eq!(config.database_file(), "app.db");
        assert_eq!(config.get("cache.ttl.seconds"), Some(&json!(30)));

        // A scalar on the path is replaced by a table.
        config.set("database.file.name", "x");
        assert_eq!(config.get("database.file.name"), Some(&json!("x")));
        assert_eq!(config.database_file(), ":memory:");
    }

    #[test]
    fn test_clear_and_all() {
        let mut config = Config::default();
        assert!(config.all()["model"].is_object());
        config.clear();
        assert_eq!(config.all(), &json!({}));
        assert_eq!(config.table_case().unwrap(), TableCase::Snake);
    }

    #[test]
    fn test_unknown_table_case() {
        let mut config = Config::default();
        config.set("model.table_case", "screaming");
        assert!(matches!(config.table_case(), Err(SqlError::Config(_))));
    }

    #[test]
    fn test_get_as_type_mismatch() {
        let config = Config::default();
        assert!(config.get_as::<u32>("database.file").is_err());
        assert_eq!(config.get_as::<String>("nope").unwrap(), None);
    }
}
