//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use replysmith_core::domain::{Role, User};
use replysmith_core::ports::{
    BaseRepository, ChatCompletion, CompletionError, PasswordService, TokenService,
};
use replysmith_core::prompts::Prompt;
use replysmith_infra::{Argon2PasswordService, InMemoryUserRepository, JwtConfig, JwtTokenService};

use crate::config::AccountSettings;
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

pub const TEST_PASSWORD: &str = "hunter22";

/// Chat completion that answers every prompt the same way and counts calls.
pub struct ScriptedCompletion {
    reply: Result<String, CompletionError>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: CompletionError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }
}

/// State wired to in-memory adapters plus handles to inspect them.
pub struct TestApp {
    pub state: AppState,
    pub completion: Arc<ScriptedCompletion>,
}

impl TestApp {
    pub fn new(completion: Arc<ScriptedCompletion>) -> Self {
        Self::with_settings(completion, AccountSettings::default())
    }

    pub fn with_settings(completion: Arc<ScriptedCompletion>, accounts: AccountSettings) -> Self {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        });

        let state = AppState::from_parts(
            Arc::new(InMemoryUserRepository::new()),
            completion.clone(),
            Arc::new(tokens),
            Arc::new(Argon2PasswordService::new()),
            accounts,
        );

        Self { state, completion }
    }

    /// Full application as the server builds it, minus tracing and rate limiting.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(self.state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, None))
    }

    /// Store an account with `role` and return it with an access token.
    pub async fn seed_user(&self, email: &str, role: Role) -> (User, String) {
        let hash = self.state.passwords.hash(TEST_PASSWORD).unwrap();
        let user = self
            .state
            .users
            .save(User::new(email.to_string(), hash, role))
            .await
            .unwrap();
        let token = self.token_for(&user);
        (user, token)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .tokens
            .generate_token(user.id, &user.email, vec![user.role.to_string()])
            .unwrap()
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
