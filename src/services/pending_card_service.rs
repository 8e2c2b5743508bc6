//! CRUD over the three staging tables, selected at runtime by [`PendingTable`].

use crate::entities::{
    nullspeed_cafe_entity as nullspeed_cafe, nullspeed_regular_entity as nullspeed_regular,
    prepaid_card_entity as prepaid_cards,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::records::{list_records, search_records};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse_form<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::ValidationError(format!("Invalid body: {e}")))
}

fn login_conflict(err: DbErr, table: PendingTable) -> AppError {
    AppError::from_unique_violation(
        err,
        format!("userlogin already exists in {}", table.table_name()),
    )
}

#[derive(Clone)]
pub struct PendingCardService {
    pool: DatabaseConnection,
}

impl PendingCardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        table: PendingTable,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PendingRecord>> {
        let page = match table {
            PendingTable::Prepaid => {
                list_records::<prepaid_cards::Entity, _>(&self.pool, params, None)
                    .await?
                    .map(PendingRecord::Prepaid)
            }
            PendingTable::NullspeedRegular => {
                list_records::<nullspeed_regular::Entity, _>(&self.pool, params, None)
                    .await?
                    .map(PendingRecord::NullspeedRegular)
            }
            PendingTable::NullspeedCafe => {
                list_records::<nullspeed_cafe::Entity, _>(&self.pool, params, None)
                    .await?
                    .map(PendingRecord::NullspeedCafe)
            }
        };
        Ok(page)
    }

    pub async fn search(&self, table: PendingTable, keyword: &str) -> AppResult<Vec<PendingRecord>> {
        let rows = match table {
            PendingTable::Prepaid => {
                search_records::<prepaid_cards::Entity, _>(&self.pool, keyword, None)
                    .await?
                    .into_iter()
                    .map(PendingRecord::Prepaid)
                    .collect()
            }
            PendingTable::NullspeedRegular => {
                search_records::<nullspeed_regular::Entity, _>(&self.pool, keyword, None)
                    .await?
                    .into_iter()
                    .map(PendingRecord::NullspeedRegular)
                    .collect()
            }
            PendingTable::NullspeedCafe => {
                search_records::<nullspeed_cafe::Entity, _>(&self.pool, keyword, None)
                    .await?
                    .into_iter()
                    .map(PendingRecord::NullspeedCafe)
                    .collect()
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, table: PendingTable, id: i64) -> AppResult<PendingRecord> {
        let record = match table {
            PendingTable::Prepaid => prepaid_cards::Entity::find_by_id(id)
                .one(&self.pool)
                .await?
                .map(PendingRecord::Prepaid),
            PendingTable::NullspeedRegular => nullspeed_regular::Entity::find_by_id(id)
                .one(&self.pool)
                .await?
                .map(PendingRecord::NullspeedRegular),
            PendingTable::NullspeedCafe => nullspeed_cafe::Entity::find_by_id(id)
                .one(&self.pool)
                .await?
                .map(PendingRecord::NullspeedCafe),
        };
        record.ok_or_else(|| AppError::NotFound(format!("{} with id={id} not found", table.label())))
    }

    /// Inserts a row parsed from `body` into the selected table.
    pub async fn create(&self, table: PendingTable, body: Value) -> AppResult<PendingRecord> {
        let record = match table {
            PendingTable::Prepaid => {
                let form: PrepaidCardForm = parse_form(body)?;
                form.validate()?;
                PendingRecord::Prepaid(form.into_active_model().insert(&self.pool).await?)
            }
            PendingTable::NullspeedRegular => {
                let form: NullSpeedForm = parse_form(body)?;
                form.validate(table)?;
                let model = form
                    .into_regular_active_model()
                    .insert(&self.pool)
                    .await
                    .map_err(|e| login_conflict(e, table))?;
                PendingRecord::NullspeedRegular(model)
            }
            PendingTable::NullspeedCafe => {
                let form: NullSpeedForm = parse_form(body)?;
                form.validate(table)?;
                let model = form
                    .into_cafe_active_model()
                    .insert(&self.pool)
                    .await
                    .map_err(|e| login_conflict(e, table))?;
                PendingRecord::NullspeedCafe(model)
            }
        };
        log::info!("{} created: id={}", table.label(), record.id());
        Ok(record)
    }

    /// Replaces every editable column of an existing row.
    pub async fn update(&self, table: PendingTable, id: i64, body: Value) -> AppResult<PendingRecord> {
        self.get(table, id).await?;
        let record = match table {
            PendingTable::Prepaid => {
                let form: PrepaidCardForm = parse_form(body)?;
                form.validate()?;
                let mut am = form.into_active_model();
                am.id = Set(id);
                PendingRecord::Prepaid(am.update(&self.pool).await?)
            }
            PendingTable::NullspeedRegular => {
                let form: NullSpeedForm = parse_form(body)?;
                form.validate(table)?;
                let mut am = form.into_regular_active_model();
                am.id = Set(id);
                let model = am.update(&self.pool).await.map_err(|e| login_conflict(e, table))?;
                PendingRecord::NullspeedRegular(model)
            }
            PendingTable::NullspeedCafe => {
                let form: NullSpeedForm = parse_form(body)?;
                form.validate(table)?;
                let mut am = form.into_cafe_active_model();
                am.id = Set(id);
                let model = am.update(&self.pool).await.map_err(|e| login_conflict(e, table))?;
                PendingRecord::NullspeedCafe(model)
            }
        };
        log::info!("{} updated: id={id}", table.label());
        Ok(record)
    }

    /// Deletes by id; zero affected rows is not an error.
    pub async fn delete(&self, table: PendingTable, id: i64) -> AppResult<AffectedRows> {
        let res = match table {
            PendingTable::Prepaid => {
                prepaid_cards::Entity::delete_by_id(id).exec(&self.pool).await?
            }
            PendingTable::NullspeedRegular => {
                nullspeed_regular::Entity::delete_by_id(id)
                    .exec(&self.pool)
                    .await?
            }
            PendingTable::NullspeedCafe => {
                nullspeed_cafe::Entity::delete_by_id(id)
                    .exec(&self.pool)
                    .await?
            }
        };
        log::info!(
            "{} delete id={id}: {} row(s) removed",
            table.label(),
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
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_each_table() {
        let service = PendingCardService::new(test_pool().await);
        let body = json!({
            "user_login": "user7",
            "type_id": "P1",
            "speed": "4M",
            "package": "Monthly"
        });
        for table in PendingTable::ALL {
            let created = service.create(table, body.clone()).await.unwrap();
            let fetched = service.get(table, created.id()).await.unwrap();
            assert_eq!(fetched.id(), created.id());
        }

        let rows = service.search(PendingTable::NullspeedCafe, "USER7").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], PendingRecord::NullspeedCafe(_)));
    }

    #[tokio::test]
    async fn test_invalid_bodies_rejected() {
        let service = PendingCardService::new(test_pool().await);
        let err = service
            .create(PendingTable::NullspeedCafe, json!({"user_login": "cafe1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service
            .create(PendingTable::Prepaid, json!({"code": 12}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_null_speed_login_unique() {
        let service = PendingCardService::new(test_pool().await);
        let body = json!({"user_login": "user1"});
        service
            .create(PendingTable::NullspeedRegular, body.clone())
            .await
            .unwrap();
        assert!(matches!(
            service.create(PendingTable::NullspeedRegular, body).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = PendingCardService::new(test_pool().await);
        let created = service
            .create(PendingTable::Prepaid, json!({"code": "A1", "type_id": "P1"}))
            .await
            .unwrap();
        let updated = service
            .update(
                PendingTable::Prepaid,
                created.id(),
                json!({"code": "A2", "type_id": "P3"}),
            )
            .await
            .unwrap();
        let PendingRecord::Prepaid(card) = updated else {
            panic!("expected a prepaid card");
        };
        assert_eq!(card.code.as_deref(), Some("A2"));
        assert_eq!(card.type_id.as_deref(), Some("P3"));

        assert!(matches!(
            service.update(PendingTable::Prepaid, 999, json!({})).await,
            Err(AppError::NotFound(_))
        ));
        let removed = service.delete(PendingTable::Prepaid, created.id()).await.unwrap();
        assert_eq!(removed.affected, 1);
        let removed = service.delete(PendingTable::Prepaid, created.id()).await.unwrap();
        assert_eq!(removed.affected, 0);
    }
}
