use crate::entities::package_entity as packages;
use crate::error::{AppError, AppResult};
use crate::models::normalize;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for creating or editing a `Packages` row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PackageForm {
    #[schema(example = "P1")]
    pub type_id: String,
    /// Whole months added to the activation time.
    #[schema(example = 1)]
    pub bill_period: Option<i32>,
    pub package_type: Option<String>,
    pub hourly_rate: Option<String>,
    pub sub_no_sub: Option<String>,
    pub subscription_fee: Option<String>,
    pub free_hours: Option<String>,
    pub description: Option<String>,
    pub count_login: Option<String>,
    pub visible: Option<String>,
    pub auto_renewable: Option<String>,
    pub time_banking: Option<String>,
    pub promotion: Option<String>,
    pub unlimited: Option<String>,
    pub online_pay: Option<String>,
    pub sms_credits: Option<String>,
    pub online_subscription_fee: Option<String>,
    pub referrer_days: Option<String>,
    pub referrer_hours: Option<String>,
    pub dealers: Option<String>,
    pub free_courses: Option<String>,
    pub discount_courses: Option<String>,
    pub promo_time: Option<String>,
    pub promo_days: Option<String>,
    pub has_email: Option<String>,
    pub group_id: Option<String>,
    pub roaming_free_hours: Option<String>,
    pub speed: Option<String>,
    pub price: Option<String>,
    pub day_price: Option<String>,
    pub user_type: Option<String>,
    pub hosting_plan_id: Option<String>,
    pub gmail_users: Option<String>,
}

impl PackageForm {
    pub fn validate(&self) -> AppResult<()> {
        let type_id = self.type_id.trim();
        if type_id.is_empty() {
            return Err(AppError::ValidationError("TypeID is required".to_string()));
        }
        if type_id.len() > 40 {
            return Err(AppError::ValidationError(
                "TypeID must be at most 40 characters".to_string(),
            ));
        }
        if matches!(self.bill_period, Some(months) if months < 0) {
            return Err(AppError::ValidationError(
                "billperiod must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_active_model(self) -> packages::ActiveModel {
        packages::ActiveModel {
            type_id: Set(self.type_id.trim().to_string()),
            bill_period: Set(self.bill_period),
            package_type: Set(normalize(self.package_type)),
            hourly_rate: Set(normalize(self.hourly_rate)),
            sub_no_sub: Set(normalize(self.sub_no_sub)),
            subscription_fee: Set(normalize(self.subscription_fee)),
            free_hours: Set(normalize(self.free_hours)),
            description: Set(normalize(self.description)),
            count_login: Set(normalize(self.count_login)),
            visible: Set(normalize(self.visible)),
            auto_renewable: Set(normalize(self.auto_renewable)),
            time_banking: Set(normalize(self.time_banking)),
            promotion: Set(normalize(self.promotion)),
            unlimited: Set(normalize(self.unlimited)),
            online_pay: Set(normalize(self.online_pay)),
            sms_credits: Set(normalize(self.sms_credits)),
            online_subscription_fee: Set(normalize(self.online_subscription_fee)),
            referrer_days: Set(normalize(self.referrer_days)),
            referrer_hours: Set(normalize(self.referrer_hours)),
            dealers: Set(normalize(self.dealers)),
            free_courses: Set(normalize(self.free_courses)),
            discount_courses: Set(normalize(self.discount_courses)),
            promo_time: Set(normalize(self.promo_time)),
            promo_days: Set(normalize(self.promo_days)),
            has_email: Set(normalize(self.has_email)),
            group_id: Set(normalize(self.group_id)),
            roaming_free_hours: Set(normalize(self.roaming_free_hours)),
            speed: Set(normalize(self.speed)),
            price: Set(normalize(self.price)),
            day_price: Set(normalize(self.day_price)),
            user_type: Set(normalize(self.user_type)),
            hosting_plan_id: Set(normalize(self.hosting_plan_id)),
            gmail_users: Set(normalize(self.gmail_users)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let form = PackageForm {
            type_id: "P1".into(),
            bill_period: Some(1),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        let form = PackageForm {
            type_id: " ".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        let form = PackageForm {
            type_id: "P1".into(),
            bill_period: Some(-2),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_into_active_model_keeps_key() {
        let am = PackageForm {
            type_id: " P3 ".into(),
            bill_period: Some(3),
            description: Some("Quarterly".into()),
            ..Default::default()
        }
        .into_active_model();
        assert_eq!(am.type_id, Set("P3".to_string()));
        assert_eq!(am.bill_period, Set(Some(3)));
        assert_eq!(am.description, Set(Some("Quarterly".to_string())));
    }
}
