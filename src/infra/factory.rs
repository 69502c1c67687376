use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use rand::rngs::OsRng;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    ConnectOptions, PgPool, SqlitePool,
};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::user::{NewUser, Role};
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_favorite_repo::PostgresFavoriteRepo, postgres_room_repo::PostgresRoomRepo,
    postgres_speaker_request_repo::PostgresSpeakerRequestRepo, postgres_talk_repo::PostgresTalkRepo,
    postgres_user_repo::PostgresUserRepo, sqlite_favorite_repo::SqliteFavoriteRepo,
    sqlite_room_repo::SqliteRoomRepo, sqlite_speaker_request_repo::SqliteSpeakerRequestRepo,
    sqlite_talk_repo::SqliteTalkRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            room_repo: Arc::new(PostgresRoomRepo::new(pool.clone())),
            talk_repo: Arc::new(PostgresTalkRepo::new(pool.clone())),
            favorite_repo: Arc::new(PostgresFavoriteRepo::new(pool.clone())),
            speaker_request_repo: Arc::new(PostgresSpeakerRequestRepo::new(pool.clone())),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            talk_repo: Arc::new(SqliteTalkRepo::new(pool.clone())),
            favorite_repo: Arc::new(SqliteFavoriteRepo::new(pool.clone())),
            speaker_request_repo: Arc::new(SqliteSpeakerRequestRepo::new(pool.clone())),
        }
    };

    seed_superadmin(&state, config).await;

    state
}

/// Deployments without any organizer account would be unable to accept or
/// schedule anything, so an initial superadmin can be provisioned from env.
async fn seed_superadmin(state: &AppState, config: &Config) {
    let (Some(email), Some(password)) = (&config.superadmin_email, &config.superadmin_password)
    else {
        return;
    };

    let existing = state
        .user_repo
        .find_by_email(email)
        .await
        .expect("Failed to check for existing superadmin");
    if existing.is_some() {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash superadmin password")
        .to_string();

    state
        .user_repo
        .create(&NewUser {
            name: "Superadmin".to_string(),
            email: email.clone(),
            password_hash,
            role: Role::Superadmin,
        })
        .await
        .expect("Failed to seed superadmin");

    info!("Seeded superadmin account: {}", email);
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
