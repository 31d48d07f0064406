//! Application state - shared across all handlers.

use std::sync::Arc;

use replysmith_core::ports::{ChatCompletion, PasswordService, TokenService, UserRepository};
use replysmith_core::service::GenerationService;
use replysmith_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryUserRepository};
use replysmith_infra::{Argon2PasswordService, JwtTokenService, OpenAiChatClient};

#[cfg(feature = "postgres")]
use replysmith_infra::database::PostgresUserRepository;

use crate::config::{AccountSettings, AppConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub generation: GenerationService,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub accounts: AccountSettings,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let (db, users) = connect_users(config.database.as_ref()).await;

        let completion = OpenAiChatClient::new(config.openai.clone()).map_err(std::io::Error::other)?;
        if !completion.is_configured() {
            tracing::warn!("OPENAI_API_KEY not set. Generation endpoints will return 500.");
        }

        tracing::info!("Application state initialized");

        Ok(Self {
            users,
            generation: GenerationService::new(Arc::new(completion)),
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            accounts: config.accounts.clone(),
            db,
        })
    }

    /// Assemble state from explicit parts, without touching the environment.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        completion: Arc<dyn ChatCompletion>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        accounts: AccountSettings,
    ) -> Self {
        Self {
            users,
            generation: GenerationService::new(completion),
            tokens,
            passwords,
            accounts,
            db: None,
        }
    }
}

type UserStore = (Option<Arc<DatabaseConnections>>, Arc<dyn UserRepository>);

#[cfg(feature = "postgres")]
async fn connect_users(config: Option<&DatabaseConfig>) -> UserStore {
    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (None, Arc::new(InMemoryUserRepository::new()));
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let conn = Arc::new(connections);
            let repo = Arc::new(PostgresUserRepository::new(conn.main.clone()));
            (Some(conn), repo)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
            (None, Arc::new(InMemoryUserRepository::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect_users(_config: Option<&DatabaseConfig>) -> UserStore {
    tracing::info!("Running without postgres feature - using in-memory repository");
    (None, Arc::new(InMemoryUserRepository::new()))
}
