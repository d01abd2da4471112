use crate::config::DatabaseConfig;
use crate::error::{CoreError, CoreResult};
use crate::logging::log_error;
use crate::query_builder::{Dialect, QueryParam, SelectQuery};
use async_trait::async_trait;
use sqlx::any::{install_default_drivers, AnyConnectOptions, AnyPoolOptions};
use sqlx::{Any, AnyPool, ConnectOptions, Transaction};
use std::str::FromStr;
use tracing::{debug, info};

/// Access to a pooled connection plus the dialect its queries render for
#[async_trait]
pub trait Handler: Send + Sync {
    fn pool(&self) -> &AnyPool;

    fn dialect(&self) -> Dialect;

    /// Start an unfiltered query over `name`
    fn table(&self, name: &str) -> SelectQuery {
        SelectQuery::new(name, self.dialect())
    }

    /// Start a query over `table` with `param`'s clauses applied
    fn query(&self, table: &str, param: &dyn QueryParam) -> SelectQuery {
        param.apply(self.table(table))
    }

    async fn begin(&self) -> CoreResult<Transaction<'static, Any>> {
        Ok(self.pool().begin().await?)
    }

    async fn health_check(&self) -> CoreResult<bool> {
        let health = sqlx::query_scalar::<Any, i64>("SELECT 1")
            .fetch_one(self.pool())
            .await?;
        Ok(health == 1)
    }

    async fn close(&self) {
        self.pool().close().await;
    }
}

/// The default [`Handler`]: one `sqlx` pool whose backend was detected at connect
#[derive(Debug, Clone)]
pub struct DatabaseHandler {
    pool: AnyPool,
    dialect: Dialect,
}

impl DatabaseHandler {
    /// Open a pool sized and configured from `config`; failures are logged
    pub async fn connect(config: &DatabaseConfig) -> CoreResult<Self> {
        Self::open(config).await.map_err(|error| {
            let context = format!("driver={:?} host={}", config.driver, config.host);
            log_error("database", "connect", &error.to_string(), Some(context.as_str()));
            error
        })
    }

    async fn open(config: &DatabaseConfig) -> CoreResult<Self> {
        install_default_drivers();

        let url = config.database_url();
        let options = AnyConnectOptions::from_str(&url)?
            .log_statements(config.statement_log_level());

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_open_conns)
            .min_connections(config.max_idle_conns)
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await?;

        let handler = Self::from_pool(pool).await?;
        info!(
            driver = ?config.driver,
            dialect = %handler.dialect,
            max_open_conns = config.max_open_conns,
            max_idle_conns = config.max_idle_conns,
            "💾 DATABASE: Connection pool established"
        );
        Ok(handler)
    }

    /// Wrap an existing pool, asking a live connection which backend it speaks
    pub async fn from_pool(pool: AnyPool) -> CoreResult<Self> {
        let connection = pool.acquire().await?;
        let backend = connection.backend_name().to_string();
        drop(connection);

        let dialect = Dialect::from_backend_name(&backend).ok_or_else(|| {
            CoreError::DatabaseError(format!("Unsupported database backend: {backend}"))
        })?;
        debug!(backend = %backend, dialect = %dialect, "Detected database dialect");

        Ok(Self { pool, dialect })
    }
}

#[async_trait]
impl Handler for DatabaseHandler {
    fn pool(&self) -> &AnyPool {
        &self.pool
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }
}
