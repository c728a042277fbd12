#[macro_use]
extern crate serde;

use futures::Future;

use poem::{
    listener::TcpListener,
    middleware::{Cors, Tracing},
    Endpoint, EndpointExt, Route, Server,
};
use poem_openapi::OpenApiService;

mod api;
pub mod configuration;
pub mod constants;
pub mod error;
pub mod model;
mod response;
pub mod service;
pub mod state;
pub mod telemetry;

use state::RelayState;

/// Route table: the relay endpoints at the root, plus the generated OpenAPI
/// document and Swagger UI.
pub fn app(state: RelayState) -> impl Endpoint {
    let api_service = OpenApiService::new(api::RelayApi, "VC Relay", "1.0.0").server("/");
    let ui = api_service.swagger_ui();
    let spec = api_service.spec();
    Route::new()
        .nest("/swagger", ui)
        .at("/spec", poem::endpoint::make_sync(move |_| spec.clone()))
        .nest("/", api_service)
        .with(Cors::new())
        .with(Tracing)
        .data(state)
}

/// Provide relay state and TCP listener, this can be different in production build and test build
pub fn server(
    state: RelayState,
    listener: TcpListener<String>,
) -> impl Future<Output = std::result::Result<(), std::io::Error>> {
    Server::new(listener).run(app(state))
}
