//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use replysmith_core::ports::{AuthError, TokenClaims, TokenPurpose, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub reset_expiration_minutes: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            reset_expiration_minutes: 30,
            issuer: "replysmith-api".to_string(),
        }
    }
}

/// Wire form of the claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default)]
    roles: Vec<String>,
    pur: String,
    exp: i64,
    iat: i64,
    iss: String,
}

fn purpose_tag(purpose: TokenPurpose) -> &'static str {
    match purpose {
        TokenPurpose::Access => "access",
        TokenPurpose::PasswordReset => "password_reset",
    }
}

/// JWT-based token service.
///
/// Access and password-reset tokens share the signing key but carry a
/// purpose claim; each validator only accepts its own purpose.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let defaults = JwtConfig::default();
        let config = JwtConfig {
            secret,
            expiration_hours: env_parse("JWT_EXPIRATION_HOURS", defaults.expiration_hours),
            reset_expiration_minutes: env_parse(
                "JWT_RESET_EXPIRATION_MINUTES",
                defaults.reset_expiration_minutes,
            ),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };
        Self::new(config)
    }

    fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        roles: Vec<String>,
        purpose: TokenPurpose,
        lifetime: TimeDelta,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            roles,
            pur: purpose_tag(purpose).to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode_as(&self, token: &str, purpose: TokenPurpose) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if token_data.claims.pur != purpose_tag(purpose) {
            return Err(AuthError::InvalidToken(format!(
                "expected {} token",
                purpose_tag(purpose)
            )));
        }

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            roles: token_data.claims.roles,
            purpose,
            exp: token_data.claims.exp,
        })
    }
}

fn env_parse(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        user_id: Uuid,
        email: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError> {
        self.issue(
            user_id,
            email,
            roles,
            TokenPurpose::Access,
            TimeDelta::hours(self.config.expiration_hours),
        )
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_as(token, TokenPurpose::Access)
    }

    fn generate_reset_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        self.issue(
            user_id,
            email,
            Vec::new(),
            TokenPurpose::PasswordReset,
            TimeDelta::minutes(self.config.reset_expiration_minutes),
        )
    }

    fn validate_reset_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_as(token, TokenPurpose::PasswordReset)
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}
