use std::sync::Arc;

use profile_core::services::{AuthService, GroupService, RoleService};
use profile_infrastructure::Mailer;
use profile_security::JwtService;
use profile_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<GroupService>,
    pub role_service: Arc<RoleService>,
    pub auth_service: Arc<AuthService>,
    pub jwt: Arc<JwtService>,
    pub mailer: Arc<Mailer>,
    pub config: AppConfig,
}
