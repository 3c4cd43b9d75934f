use async_trait::async_trait;

use super::query::Loader;
use crate::auth::{AuthClient, AuthError, PermissionCheck};

/// Which team controls the signed-in user may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_create: true,
            can_update: true,
            can_delete: true,
        }
    }
}

/// Resolves the three team permissions with concurrent checks.
#[derive(Debug, Clone)]
pub struct TeamPermissions {
    pub organization_id: String,
}

#[async_trait]
impl Loader<Permissions> for TeamPermissions {
    fn describe(&self) -> String {
        format!("team permissions in {}", self.organization_id)
    }

    async fn load(&self, client: &dyn AuthClient) -> Result<Permissions, AuthError> {
        let create = PermissionCheck::team("create");
        let update = PermissionCheck::team("update");
        let delete = PermissionCheck::team("delete");
        let (can_create, can_update, can_delete) = tokio::try_join!(
            client.has_permission(&self.organization_id, &create),
            client.has_permission(&self.organization_id, &update),
            client.has_permission(&self.organization_id, &delete),
        )?;
        Ok(Permissions {
            can_create,
            can_update,
            can_delete,
        })
    }
}
