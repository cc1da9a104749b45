use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 168;
const DEFAULT_SERVER_PORT: u16 = 5000;
const DEFAULT_DB_POOL_SIZE: u32 = 5;
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Détecte automatiquement l'environnement
    pub fn detect() -> Self {
        Self::from_vars(
            env::var("AWS_LAMBDA_FUNCTION_NAME").ok().as_deref(),
            env::var("APP_ENV").ok().as_deref(),
        )
    }

    fn from_vars(lambda_function: Option<&str>, app_env: Option<&str>) -> Self {
        // Méthode 1: on tourne dans AWS Lambda
        if lambda_function.is_some() {
            return Self::Production;
        }

        // Méthode 2: la variable APP_ENV
        match app_env {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub frontend_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub db_pool_size: u32,
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    /// avec détection automatique de l'environnement
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        let database_url = Self::get_database_url(&environment)?;
        let jwt_secret = Self::get_jwt_secret(&environment)?;
        let jwt_expiration_hours =
            Self::parse_var("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        let frontend_url = Self::get_frontend_url(&environment);
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = Self::parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?;
        let db_pool_size = Self::parse_var("DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?;

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Database: {}", Self::mask_credentials(&database_url));
        tracing::debug!("   Frontend: {}", frontend_url);
        tracing::debug!("   Server: {}:{}", server_host, server_port);

        Ok(Self {
            environment,
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            frontend_url,
            server_host,
            server_port,
            db_pool_size,
        })
    }

    /// Lit une variable optionnelle; une valeur présente mais invalide est une erreur
    fn parse_var<T>(name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match env::var(name) {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{name} has an invalid value: {raw}")),
            Err(_) => Ok(default),
        }
    }

    /// Récupère DATABASE_URL avec logique intelligente
    fn get_database_url(environment: &Environment) -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        // Si en prod et DATABASE_URL manque, erreur critique
        if environment.is_production() {
            anyhow::bail!(
                "DATABASE_URL must be set in production! \
                 Configure it in Lambda environment variables."
            );
        }

        // En dev, construire l'URL depuis les composants
        let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
        let password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".to_string());
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "campus_share".to_string());

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, database
        ))
    }

    /// Récupère JWT_SECRET avec validation
    fn get_jwt_secret(environment: &Environment) -> Result<String> {
        let secret = match env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) if environment.is_production() => {
                tracing::error!("❌ JWT_SECRET not set in production!");
                anyhow::bail!("JWT_SECRET is required in production");
            }
            Err(_) => {
                tracing::warn!("⚠️  JWT_SECRET not set, using default (DEVELOPMENT ONLY!)");
                "dev_secret_key_change_in_production".to_string()
            }
        };

        Self::check_secret(environment, &secret)?;
        Ok(secret)
    }

    fn check_secret(environment: &Environment, secret: &str) -> Result<()> {
        if environment.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            anyhow::bail!(
                "JWT_SECRET must be at least {} characters in production (current: {})",
                MIN_PRODUCTION_SECRET_LEN,
                secret.len()
            );
        }
        Ok(())
    }

    /// Récupère FRONTEND_URL avec fallback
    fn get_frontend_url(environment: &Environment) -> String {
        env::var("FRONTEND_URL").unwrap_or_else(|_| {
            if environment.is_production() {
                "https://campus-share.app".to_string()
            } else {
                "http://localhost:3000".to_string()
            }
        })
    }

    /// Masque les credentials dans les logs
    fn mask_credentials(url: &str) -> String {
        if let Some(at_pos) = url.find('@')
            && let Some(scheme_end) = url.find("://")
        {
            let scheme = &url[..scheme_end + 3];
            let after_at = &url[at_pos..];
            return format!("{}***:***{}", scheme, after_at);
        }
        url.to_string()
    }

    /// Retourne true si on est en mode production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
