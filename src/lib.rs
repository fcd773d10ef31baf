use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

pub mod access;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod repo;
pub mod rest;
pub mod session;
pub mod validate;

use config::Config;
use mailer::Mailer;
use repo::{BudgetRepo, ExpenseRepo, UserRepo};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(&self.db)
    }

    pub fn budgets(&self) -> BudgetRepo {
        BudgetRepo::new(&self.db)
    }

    pub fn expenses(&self) -> ExpenseRepo {
        ExpenseRepo::new(&self.db)
    }
}
