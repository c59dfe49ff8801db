use auth::{AccountService, RoleService, UserService};
use sqlx::SqlitePool;
use store::{RoleRepo, UserRepo};

/// Application state shared across all handlers
pub struct AppState {
    pub accounts: AccountService,
    pub users: UserService,
    pub roles: RoleService,
    pub jwt_secret: String,
    pub token_expiry_seconds: i64,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: String, token_expiry_seconds: i64) -> Self {
        let user_repo = UserRepo::new(pool.clone());
        let role_repo = RoleRepo::new(pool);

        Self {
            accounts: AccountService::new(user_repo.clone()),
            users: UserService::new(user_repo, role_repo.clone()),
            roles: RoleService::new(role_repo),
            jwt_secret,
            token_expiry_seconds,
        }
    }
}
