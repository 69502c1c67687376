use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub token_ttl_minutes: i64,
    pub superadmin_email: Option<String>,
    pub superadmin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER")
                .unwrap_or_else(|_| "https://api.conference.local".to_string()),
            token_ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "480".to_string())
                .parse()
                .expect("TOKEN_TTL_MINUTES must be a number"),
            superadmin_email: env::var("SUPERADMIN_EMAIL").ok(),
            superadmin_password: env::var("SUPERADMIN_PASSWORD").ok(),
        }
    }
}
