//! HTTP surface

mod error;
mod handlers;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::Router;
use casebook_core::Casebook;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Services every handler reaches through
    pub casebook: Casebook,
}

impl AppState {
    /// State over `casebook`
    #[must_use]
    pub fn new(casebook: Casebook) -> Self {
        Self { casebook }
    }
}

/// Every casebook route
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/profile/:email", get(handlers::profile))
        .route("/submit-case-study", post(handlers::submit_case_study))
        .route("/case-studies", get(handlers::list_case_studies))
        .route(
            "/case-studies/:id",
            get(handlers::get_case_study)
                .put(handlers::update_case_study)
                .delete(handlers::delete_case_study),
        )
        .route("/submit-focus-group", post(handlers::submit_focus_group))
        .route(
            "/focus-group-submissions",
            get(handlers::list_focus_group_submissions),
        )
        .route("/group-submissions", get(handlers::group_submissions))
        .route("/edit-submission-endpoint", post(handlers::edit_submission))
        .route(
            "/user-value-history/:email",
            get(handlers::user_value_history),
        )
        .route(
            "/user-tension-history/:email",
            get(handlers::user_tension_history),
        )
        .with_state(state)
}
