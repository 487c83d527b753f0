use std::path::PathBuf;
use std::sync::Arc;

use crate::services::auth::AuthService;
use crate::services::clicks::ClickTracker;
use crate::services::links::LinkService;
use crate::services::session::SessionStore;
use crate::store::KvStore;

/// Shared application state, injected into handlers via `web::Data`.
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub sessions: SessionStore,
    pub links: LinkService,
    pub clicks: ClickTracker,
    pub auth: AuthService,
    /// Directory the redirect handler falls back to for static content.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, static_dir: PathBuf) -> Self {
        let sessions = SessionStore::new();
        Self {
            links: LinkService::new(store.clone()),
            clicks: ClickTracker::new(store.clone()),
            auth: AuthService::new(store.clone(), sessions.clone()),
            sessions,
            store,
            static_dir,
        }
    }
}
