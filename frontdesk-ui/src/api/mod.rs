//! HTTP API Clients
//!
//! Functions for communicating with the remote services the dashboard is
//! built on: the server's same-origin `/api` routes (runtime config,
//! helpdesk proxy, usage reports, assistant relay) and the hosted
//! datastore's REST surface.
//!
//! All functions return `Result<T, String>` with a human-readable message;
//! callers surface the message through component state.

pub mod assistant;
pub mod datastore;
pub mod helpdesk;
pub mod reports;
pub mod runtime;

use gloo_net::http::Response;

/// Extract the message from a server error body, falling back to the
/// HTTP status when the body is not the expected shape.
pub(crate) async fn server_error_message(response: Response) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status();
    response
        .json::<ErrorEnvelope>()
        .await
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("Request failed with status {}", status))
}
