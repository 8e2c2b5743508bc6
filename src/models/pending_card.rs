//! Request types for the staging tables that hold cards awaiting activation.

use crate::entities::{
    AccountType, nullspeed_cafe_entity as nullspeed_cafe,
    nullspeed_regular_entity as nullspeed_regular, prepaid_card_entity as prepaid_cards,
};
use crate::error::{AppError, AppResult};
use crate::models::normalize;
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Staging table selected by the `{table}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PendingTable {
    /// `InactivePrepaid`
    Prepaid,
    /// `NullSpeedRegularUsers`
    NullspeedRegular,
    /// `NullSpeedUnusedCafeCards`
    NullspeedCafe,
}

impl PendingTable {
    pub const ALL: [PendingTable; 3] = [
        PendingTable::Prepaid,
        PendingTable::NullspeedRegular,
        PendingTable::NullspeedCafe,
    ];

    /// Account type stamped on subscribers activated from this table.
    pub fn account_type(self) -> AccountType {
        match self {
            PendingTable::Prepaid => AccountType::Prepaid,
            PendingTable::NullspeedRegular => AccountType::NullRegular,
            PendingTable::NullspeedCafe => AccountType::NullCafe,
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            PendingTable::Prepaid => "InactivePrepaid",
            PendingTable::NullspeedRegular => "NullSpeedRegularUsers",
            PendingTable::NullspeedCafe => "NullSpeedUnusedCafeCards",
        }
    }

    /// Human readable name used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            PendingTable::Prepaid => "Inactive prepaid card",
            PendingTable::NullspeedRegular => "Null speed regular user",
            PendingTable::NullspeedCafe => "Null speed cafe card",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PendingTable::Prepaid => "prepaid",
            PendingTable::NullspeedRegular => "nullspeed-regular",
            PendingTable::NullspeedCafe => "nullspeed-cafe",
        }
    }
}

impl std::fmt::Display for PendingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PendingTable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PendingTable::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown pending table: {s}")))
    }
}

/// Body for creating or editing an `InactivePrepaid` row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PrepaidCardForm {
    pub code: Option<String>,
    pub card_type: Option<String>,
    pub account_type: Option<String>,
    pub hours: Option<String>,
    pub generation_date: Option<String>,
    pub usage_date: Option<String>,
    pub user_login: Option<String>,
    pub dealer: Option<String>,
    pub sell_date: Option<String>,
    pub sell_price: Option<String>,
    pub track_number: Option<String>,
    pub mark_del: Option<String>,
    pub promo_id: Option<String>,
    pub promo_collected: Option<String>,
    pub card_promo_days: Option<String>,
    pub over_active: Option<String>,
    pub transferred_days: Option<String>,
    #[schema(example = "P1")]
    pub type_id: Option<String>,
    pub speed: Option<String>,
    pub package: Option<String>,
}

impl PrepaidCardForm {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(login) = &self.user_login
            && login.trim().len() > 40
        {
            return Err(AppError::ValidationError(
                "userlogin must be at most 40 characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_active_model(self) -> prepaid_cards::ActiveModel {
        prepaid_cards::ActiveModel {
            id: NotSet,
            code: Set(normalize(self.code)),
            card_type: Set(normalize(self.card_type)),
            account_type: Set(normalize(self.account_type)),
            hours: Set(normalize(self.hours)),
            generation_date: Set(normalize(self.generation_date)),
            usage_date: Set(normalize(self.usage_date)),
            user_login: Set(normalize(self.user_login)),
            dealer: Set(normalize(self.dealer)),
            sell_date: Set(normalize(self.sell_date)),
            sell_price: Set(normalize(self.sell_price)),
            track_number: Set(normalize(self.track_number)),
            mark_del: Set(normalize(self.mark_del)),
            promo_id: Set(normalize(self.promo_id)),
            promo_collected: Set(normalize(self.promo_collected)),
            card_promo_days: Set(normalize(self.card_promo_days)),
            over_active: Set(normalize(self.over_active)),
            transferred_days: Set(normalize(self.transferred_days)),
            type_id: Set(normalize(self.type_id)),
            speed: Set(normalize(self.speed)),
            package: Set(normalize(self.package)),
        }
    }
}

/// Body for creating or editing a row of either null-speed table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NullSpeedForm {
    #[schema(example = "user7")]
    pub user_login: String,
    pub time_banking: Option<String>,
    pub free_time: Option<String>,
    pub end_of_subscription: Option<String>,
    pub password: Option<String>,
    pub framed_ip: Option<String>,
    pub login_limit: Option<String>,
    pub roaming: Option<String>,
    pub status: Option<String>,
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

impl NullSpeedForm {
    pub fn validate(&self, table: PendingTable) -> AppResult<()> {
        let login = self.user_login.trim();
        if login.is_empty() {
            return Err(AppError::ValidationError("userlogin is required".to_string()));
        }
        if login.len() > 40 {
            return Err(AppError::ValidationError(
                "userlogin must be at most 40 characters".to_string(),
            ));
        }
        if table == PendingTable::NullspeedCafe {
            for (name, value) in [
                ("typeid", &self.type_id),
                ("speed", &self.speed),
                ("package", &self.package),
            ] {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    return Err(AppError::ValidationError(format!("{name} is required")));
                }
            }
        }
        Ok(())
    }

    pub fn into_regular_active_model(self) -> nullspeed_regular::ActiveModel {
        nullspeed_regular::ActiveModel {
            id: NotSet,
            user_login: Set(self.user_login.trim().to_string()),
            time_banking: Set(normalize(self.time_banking)),
            free_time: Set(normalize(self.free_time)),
            end_of_subscription: Set(normalize(self.end_of_subscription)),
            password: Set(normalize(self.password)),
            framed_ip: Set(normalize(self.framed_ip)),
            login_limit: Set(normalize(self.login_limit)),
            roaming: Set(normalize(self.roaming)),
            status: Set(normalize(self.status)),
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
        }
    }

    pub fn into_cafe_active_model(self) -> nullspeed_cafe::ActiveModel {
        nullspeed_cafe::ActiveModel {
            id: NotSet,
            user_login: Set(self.user_login.trim().to_string()),
            time_banking: Set(normalize(self.time_banking)),
            free_time: Set(normalize(self.free_time)),
            end_of_subscription: Set(normalize(self.end_of_subscription)),
            password: Set(normalize(self.password)),
            framed_ip: Set(normalize(self.framed_ip)),
            login_limit: Set(normalize(self.login_limit)),
            roaming: Set(normalize(self.roaming)),
            status: Set(normalize(self.status)),
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
        }
    }
}

/// A row from any staging table.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PendingRecord {
    Prepaid(prepaid_cards::Model),
    NullspeedRegular(nullspeed_regular::Model),
    NullspeedCafe(nullspeed_cafe::Model),
}

impl PendingRecord {
    pub fn id(&self) -> i64 {
        match self {
            PendingRecord::Prepaid(m) => m.id,
            PendingRecord::NullspeedRegular(m) => m.id,
            PendingRecord::NullspeedCafe(m) => m.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_selector() {
        assert_eq!(
            "nullspeed-cafe".parse::<PendingTable>().unwrap(),
            PendingTable::NullspeedCafe
        );
        assert!(matches!(
            "cafe".parse::<PendingTable>(),
            Err(AppError::NotFound(_))
        ));
        for table in PendingTable::ALL {
            assert_eq!(table.as_str().parse::<PendingTable>().unwrap(), table);
        }
    }

    #[test]
    fn test_account_type_per_table() {
        assert_eq!(PendingTable::Prepaid.account_type(), AccountType::Prepaid);
        assert_eq!(
            PendingTable::NullspeedRegular.account_type(),
            AccountType::NullRegular
        );
        assert_eq!(
            PendingTable::NullspeedCafe.account_type(),
            AccountType::NullCafe
        );
    }

    #[test]
    fn test_cafe_form_requires_package_fields() {
        let form = NullSpeedForm {
            user_login: "cafe1".into(),
            type_id: Some("P1".into()),
            speed: Some("4M".into()),
            ..Default::default()
        };
        assert!(form.validate(PendingTable::NullspeedRegular).is_ok());
        let err = form.validate(PendingTable::NullspeedCafe).unwrap_err();
        assert!(err.to_string().contains("package"));
    }

    #[test]
    fn test_prepaid_form_login_optional() {
        assert!(PrepaidCardForm::default().validate().is_ok());
        let am = PrepaidCardForm {
            user_login: Some(" user7 ".into()),
            type_id: Some("P1".into()),
            ..Default::default()
        }
        .into_active_model();
        assert_eq!(am.user_login, Set(Some("user7".to_string())));
        assert_eq!(am.id, NotSet);
    }
}
