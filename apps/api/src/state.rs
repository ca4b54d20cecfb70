use crate::ashby::AshbyClient;
use crate::config::Config;
use crate::notify::Notifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub ashby: AshbyClient,
    /// Mailer reserved for stage-change notification emails; constructed from
    /// config but not called on the active webhook path.
    #[allow(dead_code)]
    pub notifier: Notifier,
    pub config: Config,
}
