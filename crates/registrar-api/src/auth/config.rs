// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: Config is read once at startup and shared read-only; rotating the
// signing secret requires a restart and invalidates all outstanding tokens

use std::time::Duration;

/// Bootstrap administrator account (created at startup if absent)
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Session token lifetime
    pub token_lifetime: Duration,
    /// Issuer string embedded in every token
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_lifetime: Duration::from_secs(24 * 60 * 60), // 24 hours
            issuer: "registrar".to_string(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Whether session cookies carry the Secure attribute.
    /// Disable only when serving plain HTTP in development.
    pub cookie_secure: bool,
    /// Bootstrap administrator (optional)
    pub admin: Option<AdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie_secure: true,
            admin: None,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| {
            // Generate a random secret so a dev instance still starts; every
            // restart then invalidates previously issued tokens
            use rand::Rng;
            let bytes: [u8; 32] = rand::thread_rng().gen();
            tracing::warn!("AUTH_JWT_SECRET not set, generated a random secret for this process");
            hex::encode(bytes)
        });

        let token_lifetime = std::env::var("AUTH_TOKEN_LIFETIME_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(24 * 60 * 60));

        let issuer =
            std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "registrar".to_string());

        let cookie_secure = std::env::var("AUTH_COOKIE_SECURE")
            .map(|s| !(s.to_lowercase() == "false" || s == "0"))
            .unwrap_or(true);

        let admin = match (
            std::env::var("AUTH_ADMIN_EMAIL"),
            std::env::var("AUTH_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminConfig { email, password })
            }
            _ => None,
        };

        Self {
            jwt: JwtConfig {
                secret,
                token_lifetime,
                issuer,
            },
            cookie_secure,
            admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert!(config.cookie_secure);
        assert!(config.admin.is_none());
        assert_eq!(config.jwt.token_lifetime, Duration::from_secs(86400));
        assert_eq!(config.jwt.issuer, "registrar");
    }

    #[test]
    fn test_admin_config_credentials() {
        let admin = AdminConfig {
            email: "admin@example.com".to_string(),
            password: "secret123".to_string(),
        };

        assert_eq!(admin.email, "admin@example.com");
        assert_eq!(admin.password, "secret123");
    }
}
