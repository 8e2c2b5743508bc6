use crate::entities::staff_user_entity as staff_users;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub is_staff: bool,
    pub read_only: bool,
    pub subscribers_management: bool,
    pub reporting_and_monitoring: bool,
    pub can_manage: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub staff: StaffResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

impl From<staff_users::Model> for StaffResponse {
    fn from(staff: staff_users::Model) -> Self {
        Self {
            full_name: staff.full_name(),
            can_manage: staff.can_manage(),
            id: staff.id,
            email: staff.email,
            first_name: staff.first_name,
            last_name: staff.last_name,
            is_staff: staff.is_staff,
            read_only: staff.read_only,
            subscribers_management: staff.subscribers_management,
            reporting_and_monitoring: staff.reporting_and_monitoring,
            date_joined: staff.date_joined,
            last_login: staff.last_login,
        }
    }
}
