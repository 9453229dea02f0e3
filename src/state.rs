//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::AuthService;
use crate::application::use_cases::{
    DeleteShortUrlUseCase, ListUserUrlsUseCase, RedirectByAliasUseCase, ShortenUrlUseCase,
    UpdateShortUrlUseCase,
};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::infrastructure::memory::{InMemoryLinkRepository, InMemoryUserRepository};
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Backing store, kept for health checks.
#[derive(Clone)]
pub enum Storage {
    Postgres(Arc<PgPool>),
    Memory,
}

impl Storage {
    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns the driver error message if PostgreSQL cannot be reached.
    pub async fn ping(&self) -> Result<(), String> {
        match self {
            Storage::Postgres(pool) => sqlx::query("SELECT 1")
                .execute(pool.as_ref())
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Storage::Memory => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Storage::Postgres(_) => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Composition root: every use case wired to the same repositories.
#[derive(Clone)]
pub struct AppState {
    pub shorten_url: Arc<ShortenUrlUseCase>,
    pub redirect_by_alias: Arc<RedirectByAliasUseCase>,
    pub list_user_urls: Arc<ListUserUrlsUseCase>,
    pub update_short_url: Arc<UpdateShortUrlUseCase>,
    pub delete_short_url: Arc<DeleteShortUrlUseCase>,
    pub auth_service: Arc<AuthService>,
    pub storage: Storage,
    /// Prefix of presented short URLs, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires the use cases over the given collaborators.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        auth_service: AuthService,
        storage: Storage,
        base_url: impl Into<String>,
        short_code_length: usize,
    ) -> Self {
        Self {
            shorten_url: Arc::new(
                ShortenUrlUseCase::new(link_repository.clone(), user_repository, code_generator)
                    .with_code_length(short_code_length),
            ),
            redirect_by_alias: Arc::new(RedirectByAliasUseCase::new(link_repository.clone())),
            list_user_urls: Arc::new(ListUserUrlsUseCase::new(link_repository.clone())),
            update_short_url: Arc::new(UpdateShortUrlUseCase::new(link_repository.clone())),
            delete_short_url: Arc::new(DeleteShortUrlUseCase::new(link_repository)),
            auth_service: Arc::new(auth_service),
            storage,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// State backed by PostgreSQL repositories.
    pub fn postgres(
        pool: Arc<PgPool>,
        auth_service: AuthService,
        base_url: impl Into<String>,
        short_code_length: usize,
    ) -> Self {
        Self::new(
            Arc::new(PgLinkRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(RandomCodeGenerator),
            auth_service,
            Storage::Postgres(pool),
            base_url,
            short_code_length,
        )
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(
        user_repository: Arc<InMemoryUserRepository>,
        auth_service: AuthService,
        base_url: impl Into<String>,
        short_code_length: usize,
    ) -> Self {
        Self::new(
            Arc::new(InMemoryLinkRepository::new()),
            user_repository,
            Arc::new(RandomCodeGenerator),
            auth_service,
            Storage::Memory,
            base_url,
            short_code_length,
        )
    }
}
