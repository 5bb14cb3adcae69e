use bindery_core::prelude::*;
use std::fmt;
use std::sync::Arc;

pub trait Repository: Send + Sync {
    fn url(&self) -> String;
}

#[derive(Debug, Injectable)]
pub struct SqlRepository {
    #[inject(named = "db.url")]
    pub url: Arc<String>,
}

impl Repository for SqlRepository {
    fn url(&self) -> String {
        self.url.to_string()
    }
}

implements!(SqlRepository => dyn Repository);

pub trait Service: Send + Sync {
    fn describe(&self) -> String;
}

#[derive(Injectable)]
pub struct UserService {
    pub repository: Arc<dyn Repository>,
    pub audit: Option<Arc<AuditLog>>,
}

impl Service for UserService {
    fn describe(&self) -> String {
        format!("users@{}", self.repository.url())
    }
}

implements!(UserService => dyn Service);

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("repository", &self.repository.url())
            .field("audit", &self.audit)
            .finish()
    }
}

#[derive(Debug, Injectable, Default)]
pub struct AuditLog;

#[derive(Debug, Injectable)]
pub struct Chicken {
    pub egg: Arc<Egg>,
}

#[derive(Debug, Injectable)]
pub struct Egg {
    pub chicken: Arc<Chicken>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Free,
    Pro,
}
