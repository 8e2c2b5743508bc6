use crate::entities::package_entity as packages;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::records::{list_records, search_records};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait};

/// Looks up the package a card or subscriber references by `typeid`.
pub async fn find_package<C: ConnectionTrait>(
    db: &C,
    type_id: &str,
) -> AppResult<packages::Model> {
    packages::Entity::find_by_id(type_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::PackageNotFound(format!("Package {type_id} does not exist")))
}

#[derive(Clone)]
pub struct PackageService {
    pool: DatabaseConnection,
}

impl PackageService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_by_type_id(&self, type_id: &str) -> AppResult<packages::Model> {
        find_package(&self.pool, type_id).await
    }

    pub async fn list(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<packages::Model>> {
        list_records::<packages::Entity, _>(&self.pool, params, None).await
    }

    pub async fn search(&self, keyword: &str) -> AppResult<Vec<packages::Model>> {
        search_records::<packages::Entity, _>(&self.pool, keyword, None).await
    }

    pub async fn create(&self, form: PackageForm) -> AppResult<packages::Model> {
        form.validate()?;
        let type_id = form.type_id.trim().to_string();
        let model = form.into_active_model().insert(&self.pool).await.map_err(|e| {
            AppError::from_unique_violation(e, format!("Package {type_id} already exists"))
        })?;
        log::info!("Package created: TypeID={}", model.type_id);
        Ok(model)
    }

    /// Replaces the package stored under `type_id`; the key itself cannot change.
    pub async fn update(&self, type_id: &str, mut form: PackageForm) -> AppResult<packages::Model> {
        self.get_by_type_id(type_id).await?;
        form.type_id = type_id.to_string();
        form.validate()?;
        let model = form.into_active_model().update(&self.pool).await?;
        log::info!("Package updated: TypeID={type_id}");
        Ok(model)
    }

    pub async fn delete(&self, type_id: &str) -> AppResult<AffectedRows> {
        let res = packages::Entity::delete_by_id(type_id.to_string())
            .exec(&self.pool)
            .await?;
        log::info!(
            "Package delete TypeID={type_id}: {} row(s) removed",
            res.rows_affected
        );
        Ok(AffectedRows {
            affected: res.rows_affected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn form(type_id: &str, months: i32) -> PackageForm {
        PackageForm {
            type_id: type_id.to_string(),
            bill_period: Some(months),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_by_type_id() {
        let service = PackageService::new(test_pool().await);
        service.create(form("P1", 1)).await.unwrap();

        let pkg = service.get_by_type_id("P1").await.unwrap();
        assert_eq!(pkg.bill_period, Some(1));
        assert!(matches!(
            service.get_by_type_id("P9").await,
            Err(AppError::PackageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_type_id_conflicts() {
        let service = PackageService::new(test_pool().await);
        service.create(form("P1", 1)).await.unwrap();
        assert!(matches!(
            service.create(form("P1", 3)).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_key_and_delete() {
        let service = PackageService::new(test_pool().await);
        service.create(form("P1", 1)).await.unwrap();

        let updated = service.update("P1", form("ignored", 6)).await.unwrap();
        assert_eq!(updated.type_id, "P1");
        assert_eq!(updated.bill_period, Some(6));

        assert_eq!(service.delete("P1").await.unwrap().affected, 1);
        assert_eq!(service.delete("P1").await.unwrap().affected, 0);
    }
}
