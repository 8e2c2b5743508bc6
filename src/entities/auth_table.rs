//! `AuthTable`: live subscriber accounts consulted by the RADIUS server.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(40))")]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    #[sea_orm(string_value = "prepaid")]
    Prepaid,
    #[sea_orm(string_value = "null-regular")]
    NullRegular,
    #[sea_orm(string_value = "null-cafe")]
    NullCafe,
    #[sea_orm(string_value = "cafe")]
    Cafe,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Prepaid => write!(f, "prepaid"),
            AccountType::NullRegular => write!(f, "null-regular"),
            AccountType::NullCafe => write!(f, "null-cafe"),
            AccountType::Cafe => write!(f, "cafe"),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    #[sea_orm(num_value = 1)]
    Active,
    #[sea_orm(num_value = 0)]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "AuthTable")]
#[schema(as = Subscriber)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "userlogin", unique)]
    pub user_login: String,
    #[sea_orm(column_name = "timebanking")]
    pub time_banking: Option<String>,
    #[sea_orm(column_name = "FreeTime")]
    pub free_time: Option<String>,
    #[sea_orm(column_name = "endofsubscription")]
    pub end_of_subscription: Option<DateTime<Utc>>,
    pub password: Option<String>,
    #[sea_orm(column_name = "framedip")]
    pub framed_ip: Option<String>,
    #[sea_orm(column_name = "loginlimit")]
    pub login_limit: Option<String>,
    #[sea_orm(column_name = "blnRoaming")]
    pub roaming: Option<String>,
    pub status: Option<SubscriberStatus>,
    #[sea_orm(column_name = "olddomain")]
    pub old_domain: Option<String>,
    #[sea_orm(column_name = "newdomain")]
    pub new_domain: Option<String>,
    #[sea_orm(column_name = "calledstationid")]
    pub called_station_id: Option<String>,
    #[sea_orm(column_name = "poolhint")]
    pub pool_hint: Option<String>,
    #[sea_orm(column_name = "typeid")]
    pub type_id: Option<String>,
    pub speed: Option<String>,
    pub package: Option<String>,
    pub username: Option<String>,
    #[sea_orm(column_name = "usertelephone")]
    pub user_telephone: Option<String>,
    #[sea_orm(column_name = "usernationality")]
    pub user_nationality: Option<String>,
    #[sea_orm(column_name = "idnumber")]
    pub id_number: Option<String>,
    #[sea_orm(column_name = "idtype")]
    pub id_type: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    #[sea_orm(column_name = "accounttype")]
    pub account_type: Option<AccountType>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
