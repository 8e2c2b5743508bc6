//! `InactivePrepaid`: sold or generated prepaid cards waiting to be activated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "InactivePrepaid")]
#[schema(as = PrepaidCard)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: Option<String>,
    #[sea_orm(column_name = "type")]
    pub card_type: Option<String>,
    #[sea_orm(column_name = "accounttype")]
    pub account_type: Option<String>,
    pub hours: Option<String>,
    #[sea_orm(column_name = "generationdate")]
    pub generation_date: Option<String>,
    #[sea_orm(column_name = "usagedate")]
    pub usage_date: Option<String>,
    #[sea_orm(column_name = "userlogin")]
    pub user_login: Option<String>,
    pub dealer: Option<String>,
    #[sea_orm(column_name = "selldate")]
    pub sell_date: Option<String>,
    #[sea_orm(column_name = "sellprice")]
    pub sell_price: Option<String>,
    #[sea_orm(column_name = "tracknumber")]
    pub track_number: Option<String>,
    #[sea_orm(column_name = "markdel")]
    pub mark_del: Option<String>,
    #[sea_orm(column_name = "promoid")]
    pub promo_id: Option<String>,
    #[sea_orm(column_name = "promocollected")]
    pub promo_collected: Option<String>,
    #[sea_orm(column_name = "cardpromodays")]
    pub card_promo_days: Option<String>,
    #[sea_orm(column_name = "overactive")]
    pub over_active: Option<String>,
    #[sea_orm(column_name = "transferreddays")]
    pub transferred_days: Option<String>,
    #[sea_orm(column_name = "typeid")]
    pub type_id: Option<String>,
    pub speed: Option<String>,
    pub package: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
