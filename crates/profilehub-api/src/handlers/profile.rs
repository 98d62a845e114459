//! Owner profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use profilehub_core::error::AppError;
use profilehub_entity::profile::Profile;
use profilehub_service::{CoverUpdate, RegisterProfileRequest as Register, UpdateProfileRequest as Update};

use crate::dto::request::{RegisterProfileRequest, UpdatePhotoRequest, UpdateProfileRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/profile
///
/// Creates the caller's profile on first sign-in. Repeating the call
/// returns the stored profile with 200.
pub async fn register_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterProfileRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Profile>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (profile, created) = state
        .profile_service
        .register(
            &auth,
            Register {
                email: req.email,
                display_name: req.display_name,
            },
        )
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(profile))))
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profile_service.get_profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let profile = state
        .profile_service
        .update_profile(
            &auth,
            Update {
                display_name: req.display_name,
                location: req.location,
                website: req.website,
                phone: req.phone,
                occupation: req.occupation,
                interests: req.interests,
                bio: req.bio,
                custom_fields: req.custom_fields,
                attachments: req.attachments,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile/photo
pub async fn update_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdatePhotoRequest>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let profile = state.profile_service.set_photo(&auth, req.photo_url).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile/cover
pub async fn update_cover(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CoverUpdate>,
) -> ApiResult<Json<ApiResponse<Profile>>> {
    let profile = state.profile_service.set_cover(&auth, req).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
