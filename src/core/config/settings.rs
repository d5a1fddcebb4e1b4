use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
    parse_optional_u64, parse_session_backend, parse_u16, parse_u64,
};
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DatabaseSettings, RandomPlaySettings, RedisSettings,
    RuntimeSettings, ServerHost, ServerPort, ServerSettings, SessionSettings, Settings,
    TelemetrySettings,
};

/// Ten years. Longer lifetimes overflow clock arithmetic and cookie `Max-Age`.
const MAX_SESSION_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("QUIZ_HOST", "0.0.0.0");
        let port = env_or_default("QUIZ_PORT", "8000");

        let environment =
            parse_environment(env_optional("QUIZ_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("QUIZ_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Quiz");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "quiz");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "quiz_db");
        let database_url = env_optional("DATABASE_URL");

        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = parse_u16("REDIS_PORT", env_or_default("REDIS_PORT", "6379"))?;
        let redis_db = parse_u16("REDIS_DB", env_or_default("REDIS_DB", "0"))?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");

        let session_backend = parse_session_backend(env_optional("SESSION_BACKEND"))?;
        let session_cookie_name = env_or_default("SESSION_COOKIE_NAME", "quiz_session");
        let session_ttl_seconds =
            parse_u64("SESSION_TTL_SECONDS", env_or_default("SESSION_TTL_SECONDS", "86400"))?;

        let random_play_seed =
            parse_optional_u64("RANDOM_PLAY_SEED", env_optional("RANDOM_PLAY_SEED"))?;

        let log_level = env_or_default("QUIZ_LOG_LEVEL", "info");
        let json = env_optional("QUIZ_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            redis: RedisSettings {
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
            },
            session: SessionSettings {
                backend: session_backend,
                cookie_name: session_cookie_name,
                ttl_seconds: session_ttl_seconds,
            },
            random_play: RandomPlaySettings { seed: random_play_seed },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn redis(&self) -> &RedisSettings {
        &self.redis
    }

    pub(crate) fn session(&self) -> &SessionSettings {
        &self.session
    }

    pub(crate) fn random_play(&self) -> &RandomPlaySettings {
        &self.random_play
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.ttl_seconds == 0 || self.session.ttl_seconds > MAX_SESSION_TTL_SECONDS {
            return Err(ConfigError::InvalidValue {
                field: "SESSION_TTL_SECONDS",
                value: self.session.ttl_seconds.to_string(),
            });
        }

        let cookie_name_ok = self
            .session
            .cookie_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !cookie_name_ok {
            return Err(ConfigError::InvalidValue {
                field: "SESSION_COOKIE_NAME",
                value: self.session.cookie_name.clone(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }

        Ok(())
    }
}
