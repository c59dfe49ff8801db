use auth::RoleService;
use sqlx::SqlitePool;
use store::RoleRepo;

/// Seed the database with initial data
///
/// The delete-user route is guarded by the `admin` role, so make sure the
/// role itself exists on a fresh database. Assigning it to a user is left
/// to an operator.
pub async fn seed_database(pool: &SqlitePool) -> auth::Result<()> {
    let roles = RoleRepo::new(pool.clone());

    if roles.find_by_name("admin").await?.is_none() {
        let service = RoleService::new(roles);
        let role = service.create_role("admin", Vec::new()).await?;
        tracing::info!(role_id = role.id, "created default admin role");
    }

    Ok(())
}
