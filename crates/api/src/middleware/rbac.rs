//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role tag does
//! not meet the requirement. A missing or invalid token fails with 401 before
//! the role is looked at.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stay_core::error::CoreError;
use stay_core::roles::{is_admin, is_staff_or_admin};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the admin role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the hostess or admin role. Rejects with 403 Forbidden otherwise.
#[derive(Debug)]
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_staff_or_admin(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Hostess or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
