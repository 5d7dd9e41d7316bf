//! Assistant Relay (via the server)
//!
//! Sends the user's text to the automation webhook and returns the reply.

use gloo_net::http::Request;

use super::server_error_message;

/// Request an assistant reply for a message
pub async fn request_reply(message: &str) -> Result<String, String> {
    #[derive(serde::Serialize)]
    struct ReplyRequest<'a> {
        message: &'a str,
    }

    #[derive(serde::Deserialize)]
    struct ReplyResponse {
        reply: String,
    }

    let response = Request::post("/api/assistant/reply")
        .json(&ReplyRequest { message })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    let body: ReplyResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(body.reply)
}
