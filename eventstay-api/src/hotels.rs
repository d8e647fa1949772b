use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use eventstay_shared::{Hotel, HotelWithRooms};

use crate::error::AppError;
use crate::middleware::{session_auth_middleware, AuthenticatedUser};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/{hotel_id}", get(get_hotel))
        .route_layer(middleware::from_fn_with_state(state, session_auth_middleware))
}

/// GET /hotels
async fn list_hotels(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Hotel>>, AppError> {
    let hotels = state.hotels.list(user.user_id).await?;
    Ok(Json(hotels))
}

/// GET /hotels/{hotel_id}
///
/// The id is taken as raw text so malformed values reach the core's own
/// validation instead of an extractor rejection.
async fn get_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(hotel_id): Path<String>,
) -> Result<Json<HotelWithRooms>, AppError> {
    let hotel = state.hotels.detail(user.user_id, &hotel_id).await?;
    Ok(Json(hotel))
}
