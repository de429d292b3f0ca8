//! Authenticated Galaxy REST client used by the AMR relay.
//!
//! Provides the request/response value types, the `GalaxyTransport` trait seam
//! that workflow components depend on, and the reqwest-backed
//! `GalaxyApiClient` that talks to a live Galaxy deployment.

pub mod galaxy_api_client;
pub mod galaxy_error;
pub mod galaxy_transport;
pub mod galaxy_types;

pub use galaxy_api_client::GalaxyApiClient;
pub use galaxy_error::GalaxyError;
pub use galaxy_transport::GalaxyTransport;
pub use galaxy_types::{
    GalaxyClientConfig, GalaxyMethod, GalaxyRequest, GalaxyResponse, DEFAULT_GALAXY_BASE_URL,
    DEFAULT_GALAXY_REQUEST_TIMEOUT_MS,
};
