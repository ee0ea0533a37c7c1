use sqlx::PgPool;

use crate::config;
use crate::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config, mailer: Mailer) -> Self {
        Self { db, env, mailer }
    }
}
