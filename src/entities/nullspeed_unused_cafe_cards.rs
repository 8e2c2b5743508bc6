//! `NullSpeedUnusedCafeCards`: unused cafe cards parked at null speed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "NullSpeedUnusedCafeCards")]
#[schema(as = NullSpeedCafeCard)]
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
    pub end_of_subscription: Option<String>,
    pub password: Option<String>,
    #[sea_orm(column_name = "framedip")]
    pub framed_ip: Option<String>,
    #[sea_orm(column_name = "loginlimit")]
    pub login_limit: Option<String>,
    #[sea_orm(column_name = "blnRoaming")]
    pub roaming: Option<String>,
    pub status: Option<String>,
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
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
