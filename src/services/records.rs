//! Table-agnostic queries shared by every record service.

use crate::entities::{
    nullspeed_cafe_entity as nullspeed_cafe, nullspeed_regular_entity as nullspeed_regular,
    package_entity as packages, prepaid_card_entity as prepaid_cards,
    subscriber_entity as subscribers,
};
use crate::error::AppResult;
use crate::models::{PaginatedResponse, PaginationParams};
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr};
use sea_orm::{
    Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Upper bound on rows returned by a keyword search.
pub const SEARCH_LIMIT: u64 = 10;

const LIKE_ESCAPE: char = '!';

/// An entity whose columns can be searched by keyword.
pub trait SearchableEntity: EntityTrait {
    /// Columns matched by a keyword search, non-text columns included.
    const SEARCH_COLUMNS: &'static [Self::Column];

    /// Column listings and search results are ordered by, newest first.
    fn order_column() -> Self::Column;
}

impl SearchableEntity for subscribers::Entity {
    const SEARCH_COLUMNS: &'static [subscribers::Column] = {
        use subscribers::Column::*;
        &[
            Id,
            UserLogin,
            TimeBanking,
            FreeTime,
            EndOfSubscription,
            Password,
            FramedIp,
            LoginLimit,
            Roaming,
            Status,
            OldDomain,
            NewDomain,
            CalledStationId,
            PoolHint,
            TypeId,
            Speed,
            Package,
            Username,
            UserTelephone,
            UserNationality,
            IdNumber,
            IdType,
            Mobile,
            Email,
            AccountType,
        ]
    };

    fn order_column() -> subscribers::Column {
        subscribers::Column::Id
    }
}

impl SearchableEntity for prepaid_cards::Entity {
    const SEARCH_COLUMNS: &'static [prepaid_cards::Column] = {
        use prepaid_cards::Column::*;
        &[
            Id,
            Code,
            CardType,
            AccountType,
            Hours,
            GenerationDate,
            UsageDate,
            UserLogin,
            Dealer,
            SellDate,
            SellPrice,
            TrackNumber,
            MarkDel,
            PromoId,
            PromoCollected,
            CardPromoDays,
            OverActive,
            TransferredDays,
            TypeId,
            Speed,
            Package,
        ]
    };

    fn order_column() -> prepaid_cards::Column {
        prepaid_cards::Column::Id
    }
}

macro_rules! null_speed_searchable {
    ($module:ident) => {
        impl SearchableEntity for $module::Entity {
            const SEARCH_COLUMNS: &'static [$module::Column] = {
                use $module::Column::*;
                &[
                    Id,
                    UserLogin,
                    TimeBanking,
                    FreeTime,
                    EndOfSubscription,
                    Password,
                    FramedIp,
                    LoginLimit,
                    Roaming,
                    Status,
                    OldDomain,
                    NewDomain,
                    CalledStationId,
                    PoolHint,
                    TypeId,
                    Speed,
                    Package,
                    Username,
                    UserTelephone,
                    UserNationality,
                    IdNumber,
                    IdType,
                    Mobile,
                    Email,
                ]
            };

            fn order_column() -> $module::Column {
                $module::Column::Id
            }
        }
    };
}

null_speed_searchable!(nullspeed_regular);
null_speed_searchable!(nullspeed_cafe);

impl SearchableEntity for packages::Entity {
    const SEARCH_COLUMNS: &'static [packages::Column] = {
        use packages::Column::*;
        &[
            TypeId,
            PackageType,
            HourlyRate,
            SubNoSub,
            SubscriptionFee,
            FreeHours,
            Description,
            CountLogin,
            BillPeriod,
            Visible,
            AutoRenewable,
            TimeBanking,
            Promotion,
            Unlimited,
            OnlinePay,
            SmsCredits,
            OnlineSubscriptionFee,
            ReferrerDays,
            ReferrerHours,
            Dealers,
            FreeCourses,
            DiscountCourses,
            PromoTime,
            PromoDays,
            HasEmail,
            GroupId,
            RoamingFreeHours,
            Speed,
            Price,
            DayPrice,
            UserType,
            HostingPlanId,
            GmailUsers,
        ]
    };

    fn order_column() -> packages::Column {
        packages::Column::TypeId
    }
}

/// Lower-cased `%keyword%` pattern with LIKE wildcards in the keyword escaped.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// OR of case-insensitive substring matches over every searchable column.
pub fn keyword_condition<E: SearchableEntity>(keyword: &str) -> Condition {
    let pattern = like_pattern(keyword);
    E::SEARCH_COLUMNS
        .iter()
        .fold(Condition::any(), |cond, col| {
            let as_text = Expr::col((E::default(), *col)).cast_as(Alias::new("text"));
            cond.add(
                Expr::expr(Func::lower(as_text))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            )
        })
}

/// At most [`SEARCH_LIMIT`] rows matching `keyword`, optionally narrowed by `scope`.
///
/// An empty keyword applies no filter and returns the first rows of the table.
pub async fn search_records<E, C>(
    db: &C,
    keyword: &str,
    scope: Option<Condition>,
) -> AppResult<Vec<E::Model>>
where
    E: SearchableEntity,
    C: ConnectionTrait,
{
    let mut query = E::find();
    if let Some(scope) = scope {
        query = query.filter(scope);
    }
    if !keyword.is_empty() {
        query = query.filter(keyword_condition::<E>(keyword));
    }
    let rows = query
        .order_by_desc(E::order_column())
        .limit(SEARCH_LIMIT)
        .all(db)
        .await?;
    Ok(rows)
}

/// One page of rows, newest first.
pub async fn list_records<E, C>(
    db: &C,
    params: &PaginationParams,
    scope: Option<Condition>,
) -> AppResult<PaginatedResponse<E::Model>>
where
    E: SearchableEntity,
    E::Model: Sync + 'static,
    C: ConnectionTrait,
{
    let mut query = E::find();
    if let Some(scope) = scope {
        query = query.filter(scope);
    }
    let paginator = query
        .order_by_desc(E::order_column())
        .paginate(db, params.get_page_size());
    let total = paginator.num_items().await?;
    let data = paginator.fetch_page(params.get_page() - 1).await?;
    Ok(PaginatedResponse::new(data, params, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::{AccountType, SubscriberStatus};
    use sea_orm::{ActiveModelTrait, ColumnTrait, Set};

    async fn seed_subscribers(db: &sea_orm::DatabaseConnection, n: usize) {
        for i in 1..=n {
            subscribers::ActiveModel {
                user_login: Set(format!("user{i}")),
                status: Set(Some(SubscriberStatus::Active)),
                account_type: Set(Some(if i % 2 == 0 {
                    AccountType::Cafe
                } else {
                    AccountType::Prepaid
                })),
                mobile: Set(Some(format!("05000000{i:02}"))),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("User7"), "%user7%");
        assert_eq!(like_pattern("50%_off!"), "%50!%!_off!!%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern(" B"), "% b%");
    }

    #[tokio::test]
    async fn test_empty_keyword_returns_search_limit() {
        let db = test_pool().await;
        seed_subscribers(&db, 15).await;

        let rows = search_records::<subscribers::Entity, _>(&db, "", None)
            .await
            .unwrap();
        assert_eq!(rows.len(), SEARCH_LIMIT as usize);
        assert_eq!(rows[0].id, 15);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = test_pool().await;
        seed_subscribers(&db, 12).await;

        let rows = search_records::<subscribers::Entity, _>(&db, "USER1", None)
            .await
            .unwrap();
        let logins: Vec<_> = rows.iter().map(|r| r.user_login.as_str()).collect();
        assert_eq!(logins, vec!["user12", "user11", "user10", "user1"]);

        let rows = search_records::<subscribers::Entity, _>(&db, "0500000003", None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_login, "user3");

        let rows = search_records::<subscribers::Entity, _>(&db, "%", None)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_search_keeps_whitespace_in_keyword() {
        let db = test_pool().await;
        for login in ["a b", "ab"] {
            subscribers::ActiveModel {
                user_login: Set(login.to_string()),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        for keyword in [" b", "   "] {
            let rows = search_records::<subscribers::Entity, _>(&db, keyword, None)
                .await
                .unwrap();
            let logins: Vec<_> = rows.iter().map(|r| r.user_login.as_str()).collect();
            assert_eq!(logins, vec!["a b"], "keyword {keyword:?}");
        }
    }

    #[tokio::test]
    async fn test_search_respects_scope() {
        let db = test_pool().await;
        seed_subscribers(&db, 6).await;

        let scope = Condition::all().add(subscribers::Column::AccountType.eq(AccountType::Cafe));
        let rows = search_records::<subscribers::Entity, _>(&db, "user", Some(scope))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(
            rows.iter()
                .all(|r| r.account_type == Some(AccountType::Cafe))
        );
    }

    #[tokio::test]
    async fn test_list_records_pages() {
        let db = test_pool().await;
        seed_subscribers(&db, 25).await;

        let params = PaginationParams::new(Some(3), Some(10));
        let page = list_records::<subscribers::Entity, _>(&db, &params, None)
            .await
            .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].id, 5);
    }
}
