use crate::config::AdminConfig;
use crate::entities::staff_user_entity as staff_users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{JwtService, hash_password, validate_password, verify_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};

const BAD_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();
        let staff = staff_users::Entity::find()
            .filter(staff_users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError(BAD_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &staff.password_hash)? {
            return Err(AppError::AuthError(BAD_CREDENTIALS.to_string()));
        }
        if !staff.is_active {
            return Err(AppError::AuthError("Account is disabled".to_string()));
        }

        let access_token = self.jwt_service.generate_access_token(staff.id, &staff.email)?;
        let refresh_token = self.jwt_service.generate_refresh_token(staff.id, &staff.email)?;

        let mut am = staff.into_active_model();
        am.last_login = Set(Some(Utc::now()));
        let staff = am.update(&self.pool).await?;
        log::info!("Staff {} logged in", staff.email);

        Ok(AuthResponse {
            staff: StaffResponse::from(staff),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let staff_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

        let staff = self.get_staff(staff_id).await?;
        if !staff.is_active {
            return Err(AppError::AuthError("Account is disabled".to_string()));
        }
        let access_token = self.jwt_service.generate_access_token(staff.id, &staff.email)?;

        Ok(RefreshResponse {
            access_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn get_staff(&self, staff_id: i64) -> AppResult<staff_users::Model> {
        staff_users::Entity::find_by_id(staff_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Staff user not found".to_string()))
    }

    /// Loads the caller and checks it may modify subscriber data.
    pub async fn require_manager(&self, staff_id: i64) -> AppResult<staff_users::Model> {
        let staff = self.get_staff(staff_id).await?;
        if !staff.can_manage() {
            log::warn!("Staff {} lacks subscriber management rights", staff.email);
            return Err(AppError::PermissionDenied);
        }
        Ok(staff)
    }

    /// Creates the configured admin account when no staff user exists yet.
    pub async fn bootstrap_admin(
        &self,
        admin: &AdminConfig,
    ) -> AppResult<Option<staff_users::Model>> {
        if staff_users::Entity::find().count(&self.pool).await? > 0 {
            return Ok(None);
        }
        let email = admin.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::ConfigError("admin.email is empty".to_string()));
        }
        validate_password(&admin.password, &email)?;

        let staff = staff_users::ActiveModel {
            email: Set(email),
            password_hash: Set(hash_password(&admin.password)?),
            first_name: Set(admin.first_name.clone()),
            last_name: Set(admin.last_name.clone()),
            is_active: Set(true),
            is_staff: Set(true),
            read_only: Set(false),
            subscribers_management: Set(true),
            reporting_and_monitoring: Set(true),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Bootstrapped admin staff user {}", staff.email);
        Ok(Some(staff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn admin() -> AdminConfig {
        AdminConfig {
            email: "Admin@Example.com".into(),
            password: "Password123".into(),
            first_name: "Site".into(),
            last_name: "Admin".into(),
        }
    }

    fn service(pool: DatabaseConnection) -> AuthService {
        AuthService::new(pool, JwtService::new("test-secret", 3600, 7200))
    }

    #[tokio::test]
    async fn test_bootstrap_and_login() {
        let service = service(test_pool().await);
        let created = service.bootstrap_admin(&admin()).await.unwrap().unwrap();
        assert_eq!(created.email, "admin@example.com");
        assert!(created.can_manage());
        assert!(service.bootstrap_admin(&admin()).await.unwrap().is_none());

        let auth = service
            .login(LoginRequest {
                email: "admin@example.com".into(),
                password: "Password123".into(),
            })
            .await
            .unwrap();
        assert_eq!(auth.staff.full_name, "Site Admin");
        assert!(auth.staff.last_login.is_some());

        let refreshed = service.refresh_token(&auth.refresh_token).await.unwrap();
        assert_eq!(refreshed.expires_in, 3600);
        assert!(service.refresh_token(&auth.access_token).await.is_err());

        let err = service
            .login(LoginRequest {
                email: "admin@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_password_built_from_email() {
        let service = service(test_pool().await);
        let weak = AdminConfig {
            password: "Admin2024x".into(),
            ..admin()
        };
        assert!(matches!(
            service.bootstrap_admin(&weak).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(service.bootstrap_admin(&admin()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_require_manager() {
        let pool = test_pool().await;
        let service = service(pool.clone());
        let admin = service.bootstrap_admin(&admin()).await.unwrap().unwrap();
        assert!(service.require_manager(admin.id).await.is_ok());

        let viewer = staff_users::ActiveModel {
            email: Set("viewer@example.com".into()),
            password_hash: Set("x".into()),
            first_name: Set("View".into()),
            last_name: Set("Only".into()),
            is_active: Set(true),
            is_staff: Set(false),
            read_only: Set(true),
            subscribers_management: Set(false),
            reporting_and_monitoring: Set(true),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&pool)
        .await
        .unwrap();
        assert!(matches!(
            service.require_manager(viewer.id).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.require_manager(999).await,
            Err(AppError::AuthError(_))
        ));
    }
}
