use crate::entities::{AccountType, Subscriber, SubscriberStatus, subscriber_entity as subscribers};
use crate::error::{AppError, AppResult};
use crate::models::normalize;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for creating or editing an `AuthTable` row. Editing replaces every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubscriberForm {
    #[schema(example = "user7")]
    pub user_login: String,
    pub account_type: Option<AccountType>,
    pub status: Option<SubscriberStatus>,
    pub end_of_subscription: Option<DateTime<Utc>>,
    pub time_banking: Option<String>,
    pub free_time: Option<String>,
    pub password: Option<String>,
    pub framed_ip: Option<String>,
    pub login_limit: Option<String>,
    pub roaming: Option<String>,
    pub old_domain: Option<String>,
    pub new_domain: Option<String>,
    pub called_station_id: Option<String>,
    pub pool_hint: Option<String>,
    #[schema(example = "P1")]
    pub type_id: Option<String>,
    pub speed: Option<String>,
    pub package: Option<String>,
    pub username: Option<String>,
    pub user_telephone: Option<String>,
    pub user_nationality: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

impl SubscriberForm {
    pub fn validate(&self) -> AppResult<()> {
        let login = self.user_login.trim();
        if login.is_empty() {
            return Err(AppError::ValidationError("userlogin is required".to_string()));
        }
        if login.len() > 40 {
            return Err(AppError::ValidationError(
                "userlogin must be at most 40 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Active model with every column set and the id left to the database.
    pub fn into_active_model(self) -> subscribers::ActiveModel {
        subscribers::ActiveModel {
            id: NotSet,
            user_login: Set(self.user_login.trim().to_string()),
            time_banking: Set(normalize(self.time_banking)),
            free_time: Set(normalize(self.free_time)),
            end_of_subscription: Set(self.end_of_subscription),
            password: Set(normalize(self.password)),
            framed_ip: Set(normalize(self.framed_ip)),
            login_limit: Set(normalize(self.login_limit)),
            roaming: Set(normalize(self.roaming)),
            status: Set(self.status),
            old_domain: Set(normalize(self.old_domain)),
            new_domain: Set(normalize(self.new_domain)),
            called_station_id: Set(normalize(self.called_station_id)),
            pool_hint: Set(normalize(self.pool_hint)),
            type_id: Set(normalize(self.type_id)),
            speed: Set(normalize(self.speed)),
            package: Set(normalize(self.package)),
            username: Set(normalize(self.username)),
            user_telephone: Set(normalize(self.user_telephone)),
            user_nationality: Set(normalize(self.user_nationality)),
            id_number: Set(normalize(self.id_number)),
            id_type: Set(normalize(self.id_type)),
            mobile: Set(normalize(self.mobile)),
            email: Set(normalize(self.email)),
            account_type: Set(self.account_type),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CafeCardActivationRequest {
    /// Matched against the `username` column of cafe card rows.
    #[schema(example = "cafe-guest-12")]
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CafeCardActivationResponse {
    pub updated: u64,
    pub subscribers: Vec<Subscriber>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_login() {
        let form = SubscriberForm {
            user_login: "   ".into(),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::ValidationError(_))));

        let form = SubscriberForm {
            user_login: "x".repeat(41),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_into_active_model_trims_and_blanks() {
        let form = SubscriberForm {
            user_login: " user7 ".into(),
            speed: Some("".into()),
            mobile: Some(" 0500000000 ".into()),
            ..Default::default()
        };
        let am = form.into_active_model();
        assert_eq!(am.user_login, Set("user7".to_string()));
        assert_eq!(am.speed, Set(None));
        assert_eq!(am.mobile, Set(Some("0500000000".to_string())));
        assert_eq!(am.id, NotSet);
    }
}
