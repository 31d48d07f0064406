#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the main database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub main_url: String,
    pub main_max_connections: u32,
    pub main_min_connections: u32,
    pub secondary_databases: Vec<SecondaryDbConfig>,
}

/// Configuration for a secondary database.
#[derive(Debug, Clone)]
pub struct SecondaryDbConfig {
    pub name: String,
    pub url: String,
    pub max_connections: u32,
}

/// A named connection to a secondary database.
#[cfg(feature = "postgres")]
pub struct NamedConnection {
    pub name: String,
    pub conn: DbConn,
}

/// Database pools: the main database that holds accounts, plus any named
/// secondary databases (reporting replicas and the like).
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
    pub secondary: Vec<NamedConnection>,
}

/// Placeholder when the server is built without database support.
#[cfg(not(feature = "postgres"))]
pub struct DatabaseConnections;

#[cfg(feature = "postgres")]
fn pool_options(url: &str, max: u32, min: u32) -> ConnectOptions {
    ConnectOptions::new(url)
        .max_connections(max)
        .min_connections(min.min(max))
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false)
        .to_owned()
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect every configured database. Any failure aborts the whole init.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connections...");

        let main = Database::connect(pool_options(
            &config.main_url,
            config.main_max_connections,
            config.main_min_connections,
        ))
        .await?;
        tracing::info!(pool = config.main_max_connections, "Main database connected");

        let mut secondary = Vec::with_capacity(config.secondary_databases.len());
        for db_config in &config.secondary_databases {
            let conn =
                Database::connect(pool_options(&db_config.url, db_config.max_connections, 2))
                    .await?;
            tracing::info!(
                name = %db_config.name,
                pool = db_config.max_connections,
                "Secondary database connected"
            );

            secondary.push(NamedConnection {
                name: db_config.name.clone(),
                conn,
            });
        }

        Ok(Self { main, secondary })
    }

    /// Get a secondary database connection by name.
    pub fn get(&self, name: &str) -> Option<&DbConn> {
        self.secondary
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.conn)
    }

    pub fn secondary_names(&self) -> Vec<&str> {
        self.secondary.iter().map(|c| c.name.as_str()).collect()
    }

    /// Round-trip a trivial query on the main pool.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }
}

