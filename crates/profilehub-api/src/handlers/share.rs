//! Share link management and public profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use profilehub_core::error::AppError;
use profilehub_entity::profile::SharedProfileView;
use profilehub_service::share::CreateShareLinkRequest as CreateLink;

use crate::dto::request::{CreateShareLinkRequest, UpdateVisibilityRequest};
use crate::dto::response::{ApiResponse, LinkStatsResponse, ShareLinkResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<ShareLinkResponse>>>> {
    let mut links = state.share_link_service.list(&auth).await?;
    links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let data = links
        .into_iter()
        .map(|link| {
            let url = state.share_url(&link.token);
            ShareLinkResponse::new(link, url)
        })
        .collect();

    Ok(Json(ApiResponse::ok(data)))
}

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareLinkRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ShareLinkResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let link = state
        .share_link_service
        .create(
            &auth,
            CreateLink {
                name: req.name,
                visibility: req.visibility,
            },
        )
        .await?;

    let url = state.share_url(&link.token);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ShareLinkResponse::new(link, url))),
    ))
}

/// GET /api/links/stats
pub async fn link_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<LinkStatsResponse>>> {
    let stats = state.stats_service.stats(&auth).await?;
    Ok(Json(ApiResponse::ok(LinkStatsResponse::new(stats, |t| {
        state.share_url(t)
    }))))
}

/// GET /api/links/{id}
pub async fn get_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ShareLinkResponse>>> {
    let link = state.share_link_service.get(&auth, id).await?;
    let url = state.share_url(&link.token);
    Ok(Json(ApiResponse::ok(ShareLinkResponse::new(link, url))))
}

/// PUT /api/links/{id}/visibility
pub async fn update_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateVisibilityRequest>,
) -> ApiResult<Json<ApiResponse<ShareLinkResponse>>> {
    let link = state
        .share_link_service
        .update_visibility(&auth, id, req.into())
        .await?;
    let url = state.share_url(&link.token);
    Ok(Json(ApiResponse::ok(ShareLinkResponse::new(link, url))))
}

/// DELETE /api/links/{id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.share_link_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/profile/share/{token}: public, no identity required.
pub async fn shared_profile(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<ApiResponse<SharedProfileView>>> {
    let view = state.profile_service.shared_view(&token).await?;
    Ok(Json(ApiResponse::ok(view)))
}
