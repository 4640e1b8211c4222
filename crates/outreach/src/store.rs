//! Teacher configuration access.
//!
//! The pipeline reads three parameter tables per teacher and writes back a
//! single key (the last sent message). Writes are plain overwrites; the
//! last writer wins.

use std::collections::HashMap;

use async_trait::async_trait;
use class_gateway::ParamMap;
use database::{params, Database, ParamScope};
use tokio::sync::RwLock;

use crate::error::ConfigError;

/// Source of per-teacher parameter tables.
///
/// This trait is object-safe and can be used with `Arc<dyn ConfigResolver>`.
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    /// All parameters of one scope. Unknown teachers yield an empty map.
    async fn get(&self, teacher_id: &str, scope: ParamScope) -> Result<ParamMap, ConfigError>;

    /// Overwrite one parameter.
    async fn put(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError>;

    /// Replace a whole scope.
    async fn replace(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        table: &ParamMap,
    ) -> Result<(), ConfigError>;
}

#[async_trait]
impl ConfigResolver for Database {
    async fn get(&self, teacher_id: &str, scope: ParamScope) -> Result<ParamMap, ConfigError> {
        Ok(params::get_params(self.pool(), teacher_id, scope).await?)
    }

    async fn put(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        Ok(params::upsert_param(self.pool(), teacher_id, scope, key, value).await?)
    }

    async fn replace(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        table: &ParamMap,
    ) -> Result<(), ConfigError> {
        Ok(params::replace_params(self.pool(), teacher_id, scope, table).await?)
    }
}

/// In-process store, for tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    tables: RwLock<HashMap<(String, ParamScope), ParamMap>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigResolver for MemoryConfigStore {
    async fn get(&self, teacher_id: &str, scope: ParamScope) -> Result<ParamMap, ConfigError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&(teacher_id.to_string(), scope))
            .cloned()
            .unwrap_or_default())
    }

    async fn put(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut tables = self.tables.write().await;
        tables
            .entry((teacher_id.to_string(), scope))
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn replace(
        &self,
        teacher_id: &str,
        scope: ParamScope,
        table: &ParamMap,
    ) -> Result<(), ConfigError> {
        let mut tables = self.tables.write().await;
        tables.insert((teacher_id.to_string(), scope), table.clone());
        Ok(())
    }
}
