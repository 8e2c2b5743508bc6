//! Moves accounts between the staging tables and `AuthTable`.

use crate::entities::{
    AccountType, SubscriberStatus, nullspeed_cafe_entity as nullspeed_cafe,
    nullspeed_regular_entity as nullspeed_regular, prepaid_card_entity as prepaid_cards,
    subscriber_entity as subscribers,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::SubscriberScope;
use crate::services::package_service::find_package;
use chrono::{DateTime, Months, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};
use std::collections::HashMap;

/// A staging table whose rows can be activated into `AuthTable`.
pub trait PendingSource: EntityTrait {
    const TABLE: PendingTable;

    fn id_column() -> Self::Column;
    fn user_login(model: &Self::Model) -> Option<&str>;
    fn type_id(model: &Self::Model) -> Option<&str>;
}

impl PendingSource for prepaid_cards::Entity {
    const TABLE: PendingTable = PendingTable::Prepaid;

    fn id_column() -> prepaid_cards::Column {
        prepaid_cards::Column::Id
    }
    fn user_login(model: &prepaid_cards::Model) -> Option<&str> {
        model.user_login.as_deref()
    }
    fn type_id(model: &prepaid_cards::Model) -> Option<&str> {
        model.type_id.as_deref()
    }
}

impl PendingSource for nullspeed_regular::Entity {
    const TABLE: PendingTable = PendingTable::NullspeedRegular;

    fn id_column() -> nullspeed_regular::Column {
        nullspeed_regular::Column::Id
    }
    fn user_login(model: &nullspeed_regular::Model) -> Option<&str> {
        Some(model.user_login.as_str())
    }
    fn type_id(model: &nullspeed_regular::Model) -> Option<&str> {
        model.type_id.as_deref()
    }
}

impl PendingSource for nullspeed_cafe::Entity {
    const TABLE: PendingTable = PendingTable::NullspeedCafe;

    fn id_column() -> nullspeed_cafe::Column {
        nullspeed_cafe::Column::Id
    }
    fn user_login(model: &nullspeed_cafe::Model) -> Option<&str> {
        Some(model.user_login.as_str())
    }
    fn type_id(model: &nullspeed_cafe::Model) -> Option<&str> {
        model.type_id.as_deref()
    }
}

/// `start` truncated to whole seconds plus `bill_period` calendar months.
///
/// Days past the end of the target month are clamped to its last day.
pub fn subscription_end(start: DateTime<Utc>, bill_period: Option<i32>) -> AppResult<DateTime<Utc>> {
    let months = bill_period
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "Package billperiod must be a non-negative number of months, got {bill_period:?}"
            ))
        })?;
    start
        .trunc_subsecs(0)
        .checked_add_months(Months::new(months))
        .ok_or_else(|| AppError::ValidationError(format!("billperiod {months} is out of range")))
}

#[derive(Clone)]
pub struct LifecycleService {
    pool: DatabaseConnection,
}

impl LifecycleService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Moves a pending card into `AuthTable` and removes it from its staging table.
    pub async fn activate(&self, table: PendingTable, id: i64) -> AppResult<ActivationOutcome> {
        let outcome = match table {
            PendingTable::Prepaid => self.activate_from::<prepaid_cards::Entity>(id).await,
            PendingTable::NullspeedRegular => {
                self.activate_from::<nullspeed_regular::Entity>(id).await
            }
            PendingTable::NullspeedCafe => self.activate_from::<nullspeed_cafe::Entity>(id).await,
        };
        match &outcome {
            Ok(o) => log::info!("{}", o.message()),
            Err(e) => log::warn!("Activation of {table} id={id} rejected: {e}"),
        }
        outcome
    }

    async fn activate_from<E: PendingSource>(&self, id: i64) -> AppResult<ActivationOutcome> {
        let table = E::TABLE;
        let pending = E::find()
            .filter(E::id_column().eq(id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id={id} not found", table.label())))?;
        self.move_to_subscribers::<E>(&pending, id).await
    }

    /// Inserts the `AuthTable` row for an already fetched pending card and deletes the card.
    ///
    /// If the card is gone by the time of the delete the insert is rolled back.
    async fn move_to_subscribers<E: PendingSource>(
        &self,
        pending: &E::Model,
        id: i64,
    ) -> AppResult<ActivationOutcome> {
        let table = E::TABLE;
        let login = E::user_login(pending)
            .map(str::trim)
            .filter(|login| !login.is_empty())
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "{} with id={id} has no userlogin",
                    table.label()
                ))
            })?
            .to_string();
        let type_id = E::type_id(pending)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::PackageNotFound(format!(
                    "{} with id={id} does not reference a package",
                    table.label()
                ))
            })?;
        let package = find_package(&self.pool, type_id).await?;
        let end = subscription_end(Utc::now(), package.bill_period)?;

        let txn = self.pool.begin().await?;
        let subscriber = subscribers::ActiveModel {
            user_login: Set(login.clone()),
            account_type: Set(Some(table.account_type())),
            status: Set(Some(SubscriberStatus::Active)),
            end_of_subscription: Set(Some(end)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(
                e,
                format!("A subscriber with userlogin {login} already exists"),
            )
        })?;

        let removed = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&txn)
            .await?;
        if removed.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound(format!(
                "{} with id={id} not found",
                table.label()
            )));
        }
        txn.commit().await?;

        Ok(ActivationOutcome {
            source: table,
            consumed_id: id,
            subscriber,
        })
    }

    /// Marks a subscriber inactive with its subscription ending now.
    ///
    /// An id that matches nothing leaves the table untouched and reports zero rows.
    pub async fn cancel(&self, id: i64, scope: SubscriberScope) -> AppResult<AffectedRows> {
        let mut query = subscribers::Entity::update_many()
            .set(subscribers::ActiveModel {
                status: Set(Some(SubscriberStatus::Inactive)),
                end_of_subscription: Set(Some(Utc::now().trunc_subsecs(0))),
                ..Default::default()
            })
            .filter(subscribers::Column::Id.eq(id));
        if let Some(cond) = scope.condition() {
            query = query.filter(cond);
        }
        let res = query.exec(&self.pool).await?;
        log::info!(
            "Cancel subscriber id={id}: {} row(s) updated",
            res.rows_affected
        );
        Ok(AffectedRows {
            affected: res.rows_affected,
        })
    }

    /// Starts the subscription of every cafe card sold under `username`.
    pub async fn activate_cafe_card(&self, username: &str) -> AppResult<CafeCardActivationResponse> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError("username is required".to_string()));
        }
        let cards = subscribers::Entity::find()
            .filter(subscribers::Column::AccountType.eq(AccountType::Cafe))
            .filter(subscribers::Column::Username.eq(username))
            .all(&self.pool)
            .await?;
        if cards.is_empty() {
            log::warn!("Cafe card activation for {username}: no matching card");
            return Err(AppError::NotFound(format!(
                "No cafe card found for username {username}"
            )));
        }

        let now = Utc::now();
        let mut ends: HashMap<String, DateTime<Utc>> = HashMap::new();
        let mut updates = Vec::with_capacity(cards.len());
        for card in cards {
            let type_id = card.type_id.clone().unwrap_or_default();
            let end = match ends.get(&type_id) {
                Some(end) => *end,
                None => {
                    let package = find_package(&self.pool, &type_id).await?;
                    let end = subscription_end(now, package.bill_period)?;
                    ends.insert(type_id, end);
                    end
                }
            };
            let mut am = card.into_active_model();
            am.status = Set(Some(SubscriberStatus::Active));
            am.end_of_subscription = Set(Some(end));
            updates.push(am);
        }

        let txn = self.pool.begin().await?;
        let mut activated = Vec::with_capacity(updates.len());
        for am in updates {
            activated.push(am.update(&txn).await?);
        }
        txn.commit().await?;

        log::info!(
            "Cafe card activation for {username}: {} card(s) activated",
            activated.len()
        );
        Ok(CafeCardActivationResponse {
            updated: activated.len() as u64,
            subscribers: activated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::package_entity as packages;
    use chrono::Duration;
    use sea_orm::{PaginatorTrait, Set};

    async fn seed_package(db: &DatabaseConnection, type_id: &str, months: Option<i32>) {
        packages::ActiveModel {
            type_id: Set(type_id.to_string()),
            bill_period: Set(months),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn seed_prepaid(db: &DatabaseConnection, id: i64, login: &str, type_id: &str) {
        prepaid_cards::ActiveModel {
            id: Set(id),
            user_login: Set(Some(login.to_string())),
            type_id: Set(Some(type_id.to_string())),
            code: Set(Some(format!("CODE{id}"))),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn counts(db: &DatabaseConnection) -> (u64, u64) {
        let pending = prepaid_cards::Entity::find().count(db).await.unwrap();
        let active = subscribers::Entity::find().count(db).await.unwrap();
        (pending, active)
    }

    #[test]
    fn test_subscription_end_clamps_month_end() {
        let start = DateTime::parse_from_rfc3339("2024-01-31T10:20:30.750Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = subscription_end(start, Some(1)).unwrap();
        assert_eq!(end.to_rfc3339(), "2024-02-29T10:20:30+00:00");
        assert_eq!(subscription_end(start, Some(0)).unwrap(), start.trunc_subsecs(0));
        assert!(matches!(
            subscription_end(start, Some(-1)),
            Err(AppError::ValidationError(_))
        ));
        assert!(subscription_end(start, None).is_err());
    }

    #[tokio::test]
    async fn test_activate_prepaid_card() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        seed_prepaid(&db, 7, "user7", "P1").await;
        let service = LifecycleService::new(db.clone());

        let before = Utc::now().trunc_subsecs(0);
        let outcome = service.activate(PendingTable::Prepaid, 7).await.unwrap();
        let after = Utc::now();

        let sub = &outcome.subscriber;
        assert_eq!(outcome.consumed_id, 7);
        assert_eq!(sub.user_login, "user7");
        assert_eq!(sub.account_type, Some(AccountType::Prepaid));
        assert_eq!(sub.status, Some(SubscriberStatus::Active));
        let end = sub.end_of_subscription.unwrap();
        assert!(end >= before.checked_add_months(Months::new(1)).unwrap());
        assert!(end < after.checked_add_months(Months::new(1)).unwrap() + Duration::seconds(1));
        assert!(sub.type_id.is_none());
        assert_eq!(
            outcome.message(),
            "Inactive prepaid card with id=7, userlogin=user7 has been activated."
        );

        assert_eq!(counts(&db).await, (0, 1));
        let stored = subscribers::Entity::find_by_id(sub.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.end_of_subscription, Some(end));
    }

    #[tokio::test]
    async fn test_billperiod_window() {
        let db = test_pool().await;
        seed_package(&db, "P3", Some(3)).await;
        nullspeed_regular::ActiveModel {
            user_login: Set("regular1".into()),
            type_id: Set(Some("P3".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let service = LifecycleService::new(db.clone());

        let t = Utc::now().trunc_subsecs(0);
        let outcome = service
            .activate(PendingTable::NullspeedRegular, 1)
            .await
            .unwrap();
        let lower = t.checked_add_months(Months::new(3)).unwrap();
        let end = outcome.subscriber.end_of_subscription.unwrap();
        assert!(end >= lower && end < lower + Duration::seconds(2));
        assert_eq!(
            outcome.subscriber.account_type,
            Some(AccountType::NullRegular)
        );
        assert_eq!(end.timestamp_subsec_nanos(), 0);
    }

    #[tokio::test]
    async fn test_activate_nullspeed_cafe_card() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        nullspeed_cafe::ActiveModel {
            user_login: Set("cafe7".into()),
            type_id: Set(Some("P1".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let service = LifecycleService::new(db.clone());

        let outcome = service
            .activate(PendingTable::NullspeedCafe, 1)
            .await
            .unwrap();
        assert_eq!(outcome.subscriber.user_login, "cafe7");
        assert_eq!(outcome.subscriber.account_type, Some(AccountType::NullCafe));
        assert_eq!(outcome.subscriber.status, Some(SubscriberStatus::Active));

        assert_eq!(nullspeed_cafe::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(subscribers::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_card_removed_before_delete_rolls_back() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        seed_prepaid(&db, 7, "user7", "P1").await;
        let service = LifecycleService::new(db.clone());

        let pending = prepaid_cards::Entity::find_by_id(7)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        // another operator activates the same card first
        prepaid_cards::Entity::delete_by_id(7).exec(&db).await.unwrap();

        let err = service
            .move_to_subscribers::<prepaid_cards::Entity>(&pending, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(counts(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_missing_package_changes_nothing() {
        let db = test_pool().await;
        seed_prepaid(&db, 1, "user1", "NOPE").await;
        let service = LifecycleService::new(db.clone());

        let err = service.activate(PendingTable::Prepaid, 1).await.unwrap_err();
        assert!(matches!(err, AppError::PackageNotFound(_)));
        assert_eq!(counts(&db).await, (1, 0));
    }

    #[tokio::test]
    async fn test_invalid_pending_rows_rejected() {
        let db = test_pool().await;
        seed_package(&db, "NEG", Some(-1)).await;
        seed_prepaid(&db, 1, "user1", "NEG").await;
        prepaid_cards::ActiveModel {
            id: Set(2),
            type_id: Set(Some("NEG".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let service = LifecycleService::new(db.clone());

        assert!(matches!(
            service.activate(PendingTable::Prepaid, 1).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.activate(PendingTable::Prepaid, 2).await,
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(counts(&db).await, (2, 0));
    }

    #[tokio::test]
    async fn test_second_activation_not_found() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        seed_prepaid(&db, 7, "user7", "P1").await;
        let service = LifecycleService::new(db.clone());

        service.activate(PendingTable::Prepaid, 7).await.unwrap();
        assert!(matches!(
            service.activate(PendingTable::Prepaid, 7).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(counts(&db).await, (0, 1));
    }

    #[tokio::test]
    async fn test_duplicate_login_conflicts_and_keeps_pending() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        seed_prepaid(&db, 1, "user1", "P1").await;
        seed_prepaid(&db, 2, "user1", "P1").await;
        let service = LifecycleService::new(db.clone());

        service.activate(PendingTable::Prepaid, 1).await.unwrap();
        let err = service.activate(PendingTable::Prepaid, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert_eq!(counts(&db).await, (1, 1));
        assert!(
            prepaid_cards::Entity::find_by_id(2)
                .one(&db)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_cancel() {
        let db = test_pool().await;
        seed_package(&db, "P1", Some(1)).await;
        seed_prepaid(&db, 7, "user7", "P1").await;
        let service = LifecycleService::new(db.clone());
        let id = service
            .activate(PendingTable::Prepaid, 7)
            .await
            .unwrap()
            .subscriber
            .id;

        let before = Utc::now().trunc_subsecs(0);
        let res = service.cancel(id, SubscriberScope::All).await.unwrap();
        assert_eq!(res.affected, 1);
        let sub = subscribers::Entity::find_by_id(id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sub.status, Some(SubscriberStatus::Inactive));
        let end = sub.end_of_subscription.unwrap();
        assert!(end >= before && end <= Utc::now());

        let res = service.cancel(id + 100, SubscriberScope::All).await.unwrap();
        assert_eq!(res.affected, 0);
        // prepaid rows are outside the cafe scope
        let res = service.cancel(id, SubscriberScope::CafeCards).await.unwrap();
        assert_eq!(res.affected, 0);
    }

    #[tokio::test]
    async fn test_activate_cafe_card_by_username() {
        let db = test_pool().await;
        seed_package(&db, "C2", Some(2)).await;
        for (login, username) in [("cafe1", "guest"), ("cafe2", "guest"), ("cafe3", "other")] {
            subscribers::ActiveModel {
                user_login: Set(login.into()),
                username: Set(Some(username.into())),
                type_id: Set(Some("C2".into())),
                account_type: Set(Some(AccountType::Cafe)),
                status: Set(Some(SubscriberStatus::Inactive)),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }
        let service = LifecycleService::new(db.clone());

        let res = service.activate_cafe_card("guest").await.unwrap();
        assert_eq!(res.updated, 2);
        assert!(
            res.subscribers
                .iter()
                .all(|s| s.status == Some(SubscriberStatus::Active)
                    && s.end_of_subscription.is_some())
        );
        let other = subscribers::Entity::find()
            .filter(subscribers::Column::UserLogin.eq("cafe3"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(other.status, Some(SubscriberStatus::Inactive));

        assert!(matches!(
            service.activate_cafe_card("nobody").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_activate_cafe_card_missing_package() {
        let db = test_pool().await;
        subscribers::ActiveModel {
            user_login: Set("cafe1".into()),
            username: Set(Some("guest".into())),
            account_type: Set(Some(AccountType::Cafe)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let service = LifecycleService::new(db);

        assert!(matches!(
            service.activate_cafe_card("guest").await,
            Err(AppError::PackageNotFound(_))
        ));
    }
}
