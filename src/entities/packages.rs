//! `Packages`: billing terms referenced by `typeid` on subscriber and card rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "Packages")]
#[schema(as = Package)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "TypeID")]
    pub type_id: String,
    #[sea_orm(column_name = "Type")]
    pub package_type: Option<String>,
    #[sea_orm(column_name = "HourlyRate")]
    pub hourly_rate: Option<String>,
    #[sea_orm(column_name = "Sub_NoSub")]
    pub sub_no_sub: Option<String>,
    #[sea_orm(column_name = "SubscriptionFee")]
    pub subscription_fee: Option<String>,
    #[sea_orm(column_name = "FreeHours")]
    pub free_hours: Option<String>,
    #[sea_orm(column_name = "Description")]
    pub description: Option<String>,
    #[sea_orm(column_name = "countlogin")]
    pub count_login: Option<String>,
    /// Subscription length in whole months.
    #[sea_orm(column_name = "billperiod")]
    pub bill_period: Option<i32>,
    pub visible: Option<String>,
    #[sea_orm(column_name = "AutoRenewable")]
    pub auto_renewable: Option<String>,
    #[sea_orm(column_name = "timebanking")]
    pub time_banking: Option<String>,
    #[sea_orm(column_name = "Promotion")]
    pub promotion: Option<String>,
    #[sea_orm(column_name = "Unlimited")]
    pub unlimited: Option<String>,
    #[sea_orm(column_name = "OnlinePay")]
    pub online_pay: Option<String>,
    #[sea_orm(column_name = "SMSCredits")]
    pub sms_credits: Option<String>,
    #[sea_orm(column_name = "OnlineSubscriptionFee")]
    pub online_subscription_fee: Option<String>,
    #[sea_orm(column_name = "ReferrerDays")]
    pub referrer_days: Option<String>,
    #[sea_orm(column_name = "ReferrerHours")]
    pub referrer_hours: Option<String>,
    #[sea_orm(column_name = "Dealers")]
    pub dealers: Option<String>,
    #[sea_orm(column_name = "FreeCourses")]
    pub free_courses: Option<String>,
    #[sea_orm(column_name = "DiscountCourses")]
    pub discount_courses: Option<String>,
    #[sea_orm(column_name = "Promotime")]
    pub promo_time: Option<String>,
    #[sea_orm(column_name = "Promodays")]
    pub promo_days: Option<String>,
    #[sea_orm(column_name = "HasEmail")]
    pub has_email: Option<String>,
    #[sea_orm(column_name = "GroupId")]
    pub group_id: Option<String>,
    #[sea_orm(column_name = "RoamingFreeHours")]
    pub roaming_free_hours: Option<String>,
    #[sea_orm(column_name = "Speed")]
    pub speed: Option<String>,
    #[sea_orm(column_name = "Price")]
    pub price: Option<String>,
    #[sea_orm(column_name = "DayPrice")]
    pub day_price: Option<String>,
    #[sea_orm(column_name = "UserType")]
    pub user_type: Option<String>,
    #[sea_orm(column_name = "HostingPlanID")]
    pub hosting_plan_id: Option<String>,
    #[sea_orm(column_name = "GmailUsers")]
    pub gmail_users: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
