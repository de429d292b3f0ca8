//! HTTP relay exposing the AMR workflow to browser clients without leaking the Galaxy credential.

pub mod amr_relay;

pub use amr_relay::{
    build_amr_relay_router, run_amr_relay_server, AmrRelayServerConfig, AmrRelayState,
};
