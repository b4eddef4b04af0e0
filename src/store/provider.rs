//! Lazily built, memoized PostgreSQL pool.

use crate::config::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

/// Owns the one pool of the process. Built on first `get`; concurrent first callers share one build.
pub struct ConnectionProvider {
    settings: DatabaseSettings,
    pool: OnceCell<PgPool>,
}

impl ConnectionProvider {
    pub fn new(settings: DatabaseSettings) -> Self {
        ConnectionProvider {
            settings,
            pool: OnceCell::new(),
        }
    }

    /// The memoized pool. Construction does not connect; an unreachable store fails on first query.
    pub async fn get(&self) -> Result<&PgPool, sqlx::Error> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!(max_connections = self.settings.max_connections, "creating connection pool");
                PgPoolOptions::new()
                    .max_connections(self.settings.max_connections)
                    .acquire_timeout(self.settings.acquire_timeout)
                    .connect_lazy(&self.settings.url)
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn settings(url: &str) -> DatabaseSettings {
        DatabaseSettings {
            url: url.into(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn builds_once_and_returns_the_same_pool() {
        let provider = Arc::new(ConnectionProvider::new(settings("postgres://localhost:1/none")));
        assert!(!provider.is_initialized());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let p = provider.clone();
                tokio::spawn(async move { p.get().await.map(|pool| pool as *const PgPool as usize) })
            })
            .collect();
        let mut addrs = Vec::new();
        for h in handles {
            addrs.push(h.await.unwrap().unwrap());
        }
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert!(provider.is_initialized());
    }

    #[tokio::test]
    async fn malformed_url_surfaces_as_store_error() {
        let provider = ConnectionProvider::new(settings("not a url"));
        assert!(provider.get().await.is_err());
        assert!(!provider.is_initialized());
    }
}
