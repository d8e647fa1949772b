use std::sync::Arc;

use eventstay_core::repository::SessionRepository;
use eventstay_core::HotelService;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub hotels: HotelService,
    pub sessions: Arc<dyn SessionRepository>,
    pub auth: AuthConfig,
}
