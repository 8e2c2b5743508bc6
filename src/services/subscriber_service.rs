use crate::entities::{AccountType, subscriber_entity as subscribers};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::records::{list_records, search_records};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

/// Which `AuthTable` rows a request may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberScope {
    All,
    /// Rows with `accounttype = cafe`.
    CafeCards,
}

impl SubscriberScope {
    pub fn condition(self) -> Option<Condition> {
        match self {
            SubscriberScope::All => None,
            SubscriberScope::CafeCards => Some(
                Condition::all().add(subscribers::Column::AccountType.eq(AccountType::Cafe)),
            ),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            SubscriberScope::All => "Subscriber",
            SubscriberScope::CafeCards => "Cafe card",
        }
    }
}

#[derive(Clone)]
pub struct SubscriberService {
    pool: DatabaseConnection,
}

impl SubscriberService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        params: &PaginationParams,
        scope: SubscriberScope,
    ) -> AppResult<PaginatedResponse<subscribers::Model>> {
        list_records::<subscribers::Entity, _>(&self.pool, params, scope.condition()).await
    }

    pub async fn search(
        &self,
        keyword: &str,
        scope: SubscriberScope,
    ) -> AppResult<Vec<subscribers::Model>> {
        search_records::<subscribers::Entity, _>(&self.pool, keyword, scope.condition()).await
    }

    pub async fn get(&self, id: i64, scope: SubscriberScope) -> AppResult<subscribers::Model> {
        let mut query = subscribers::Entity::find_by_id(id);
        if let Some(cond) = scope.condition() {
            query = query.filter(cond);
        }
        query
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id={id} not found", scope.noun())))
    }

    pub async fn create(
        &self,
        form: SubscriberForm,
        scope: SubscriberScope,
    ) -> AppResult<subscribers::Model> {
        form.validate()?;
        let login = form.user_login.trim().to_string();
        let mut am = form.into_active_model();
        if scope == SubscriberScope::CafeCards {
            am.account_type = Set(Some(AccountType::Cafe));
        }
        let model = am.insert(&self.pool).await.map_err(|e| {
            AppError::from_unique_violation(e, format!("userlogin {login} already exists"))
        })?;
        log::info!(
            "{} created: id={}, userlogin={}",
            scope.noun(),
            model.id,
            model.user_login
        );
        Ok(model)
    }

    /// Replaces every editable column of an existing row.
    pub async fn update(
        &self,
        id: i64,
        form: SubscriberForm,
        scope: SubscriberScope,
    ) -> AppResult<subscribers::Model> {
        form.validate()?;
        self.get(id, scope).await?;

        let login = form.user_login.trim().to_string();
        let mut am = form.into_active_model();
        am.id = Set(id);
        if scope == SubscriberScope::CafeCards {
            am.account_type = Set(Some(AccountType::Cafe));
        }
        let model = am.update(&self.pool).await.map_err(|e| {
            AppError::from_unique_violation(e, format!("userlogin {login} already exists"))
        })?;
        log::info!("{} updated: id={id}", scope.noun());
        Ok(model)
    }

    /// Deletes by id; zero affected rows is not an error.
    pub async fn delete(&self, id: i64, scope: SubscriberScope) -> AppResult<AffectedRows> {
        let mut query = subscribers::Entity::delete_many().filter(subscribers::Column::Id.eq(id));
        if let Some(cond) = scope.condition() {
            query = query.filter(cond);
        }
        let res = query.exec(&self.pool).await?;
        log::info!(
            "{} delete id={id}: {} row(s) removed",
            scope.noun(),
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

    fn form(login: &str) -> SubscriberForm {
        SubscriberForm {
            user_login: login.to_string(),
            account_type: Some(AccountType::Prepaid),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_login_conflicts() {
        let service = SubscriberService::new(test_pool().await);
        service.create(form("user1"), SubscriberScope::All).await.unwrap();

        let err = service
            .create(form("user1"), SubscriberScope::All)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cafe_scope_forces_and_filters_account_type() {
        let service = SubscriberService::new(test_pool().await);
        let prepaid = service.create(form("user1"), SubscriberScope::All).await.unwrap();
        let cafe = service
            .create(form("cafe1"), SubscriberScope::CafeCards)
            .await
            .unwrap();
        assert_eq!(cafe.account_type, Some(AccountType::Cafe));

        assert!(matches!(
            service.get(prepaid.id, SubscriberScope::CafeCards).await,
            Err(AppError::NotFound(_))
        ));
        let page = service
            .list(&PaginationParams::default(), SubscriberScope::CafeCards)
            .await
            .unwrap();
        assert_eq!(page.total, 1);

        let removed = service
            .delete(prepaid.id, SubscriberScope::CafeCards)
            .await
            .unwrap();
        assert_eq!(removed.affected, 0);
        assert!(service.get(prepaid.id, SubscriberScope::All).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = SubscriberService::new(test_pool().await);
        let mut f = form("user1");
        f.mobile = Some("0500".into());
        let created = service.create(f, SubscriberScope::All).await.unwrap();

        let mut f = form("user1-renamed");
        f.speed = Some("8M".into());
        let updated = service
            .update(created.id, f, SubscriberScope::All)
            .await
            .unwrap();
        assert_eq!(updated.user_login, "user1-renamed");
        assert_eq!(updated.speed.as_deref(), Some("8M"));
        assert_eq!(updated.mobile, None);

        assert!(matches!(
            service.update(999, form("x"), SubscriberScope::All).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let service = SubscriberService::new(test_pool().await);
        let removed = service.delete(42, SubscriberScope::All).await.unwrap();
        assert_eq!(removed.affected, 0);
    }
}
