//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use yamdb_auth::confirmation::ConfirmationCodes;
use yamdb_auth::jwt::{JwtDecoder, JwtEncoder};
use yamdb_auth::policy::PolicyEnforcer;
use yamdb_core::config::AppConfig;
use yamdb_core::error::AppError;
use yamdb_core::traits::Notifier;
use yamdb_database::Repositories;
use yamdb_service::{
    AdminUserService, AuthService, CommentService, ReviewService, TaxonomyService, TitleService,
    UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Repository bundle (PostgreSQL or in-memory).
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Verifies bearer tokens on every authenticated request.
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub admin_user_service: Arc<AdminUserService>,
    pub taxonomy_service: Arc<TaxonomyService>,
    pub title_service: Arc<TitleService>,
    pub review_service: Arc<ReviewService>,
    pub comment_service: Arc<CommentService>,
}

impl AppState {
    /// Wires the auth components and services over a repository bundle.
    ///
    /// Fails when the auth configuration is out of range.
    pub fn build(
        config: AppConfig,
        repos: Repositories,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let policy = Arc::new(PolicyEnforcer::new());

        let auth_service = AuthService::new(
            Arc::clone(&repos.users),
            ConfirmationCodes::new(&config.auth)?,
            JwtEncoder::new(&config.auth)?,
            notifier,
            config.mail.subject.clone(),
        );
        let user_service = UserService::new(Arc::clone(&repos.users), Arc::clone(&policy));
        let admin_user_service =
            AdminUserService::new(Arc::clone(&repos.users), Arc::clone(&policy));
        let taxonomy_service =
            TaxonomyService::new(Arc::clone(&repos.taxonomy), Arc::clone(&policy));
        let title_service = TitleService::new(
            Arc::clone(&repos.titles),
            Arc::clone(&repos.taxonomy),
            Arc::clone(&repos.reviews),
            Arc::clone(&policy),
        );
        let review_service = ReviewService::new(
            Arc::clone(&repos.titles),
            Arc::clone(&repos.reviews),
            Arc::clone(&policy),
        );
        let comment_service = CommentService::new(
            Arc::clone(&repos.reviews),
            Arc::clone(&repos.comments),
            policy,
        );

        Ok(Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            repos,
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            admin_user_service: Arc::new(admin_user_service),
            taxonomy_service: Arc::new(taxonomy_service),
            title_service: Arc::new(title_service),
            review_service: Arc::new(review_service),
            comment_service: Arc::new(comment_service),
        })
    }
}
