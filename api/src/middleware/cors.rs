use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer.
///
/// The check-in API is a local, single-device service with no credentials,
/// so every origin is permitted. The layer answers OPTIONS preflights with
/// an empty 2xx.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
