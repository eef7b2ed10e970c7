use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
        };
        // 初期アカウントのパスワードは未指定なら既定値を使う
        let seed = SeedConfig {
            admin_password: std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin123!".into()),
            staff_password: std::env::var("SEED_STAFF_PASSWORD")
                .unwrap_or_else(|_| "Staff123!".into()),
        };
        let server = ServerConfig {
            port: match std::env::var("SERVER_PORT") {
                Ok(port) => port.parse::<u16>()?,
                Err(_) => 8080,
            },
        };
        Ok(Self {
            database,
            redis,
            auth,
            seed,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

pub struct SeedConfig {
    pub admin_password: String,
    pub staff_password: String,
}

pub struct ServerConfig {
    pub port: u16,
}
