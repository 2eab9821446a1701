//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, EndpointIndex, ErrorResponse, HealthResponse, WelcomeResponse};
use super::state::AppState;
use crate::db::{
    Activity, CreatedItinerary, Database, Hotel, HotelStay, ItineraryDay, ItineraryDetail,
    ItinerarySummary, NewItinerary, NewItineraryDay, Transfer, TransferType,
};

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel Itinerary API",
        version = "0.1.0",
        description = "Browse and create multi-day travel itineraries",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_itineraries,
        handlers::get_itinerary,
        handlers::create_itinerary,
    ),
    components(
        schemas(
            WelcomeResponse,
            EndpointIndex,
            HealthResponse,
            ErrorResponse,
            ItinerarySummary,
            ItineraryDetail,
            ItineraryDay,
            HotelStay,
            Hotel,
            Transfer,
            TransferType,
            Activity,
            NewItinerary,
            NewItineraryDay,
            CreatedItinerary,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "itineraries", description = "Itinerary browsing and creation")
    )
)]
pub struct ApiDoc;

/// Create the API router, optionally with OpenAPI documentation at `/docs`
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    let state = state.with_docs(enable_docs);

    // System routes
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Routes generic over Database
    let api_routes = routes!(D => {
        get "/" => handlers::root,
        get "/itineraries" => handlers::list_itineraries,
        post "/itineraries" => handlers::create_itinerary,
        get "/itineraries/{id}" => handlers::get_itinerary,
    });

    let router = system_routes.merge(api_routes);

    let router = if enable_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state)
}
