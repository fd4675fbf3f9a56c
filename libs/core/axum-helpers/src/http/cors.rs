use tower_http::cors::CorsLayer;

/// Creates a permissive CORS layer.
///
/// Allows any origin, any method, and any headers. Suitable for APIs
/// that are intentionally open to browser clients on any host.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
