//! Hosted Datastore Client
//!
//! REST client for the hosted datastore (PostgREST-style row API plus the
//! password-grant auth endpoint). The SPA talks to it directly: the anon
//! key is public, and row-level security on the datastore side decides
//! what a session may touch.
//!
//! Requests carry `apikey` plus `Authorization: Bearer` - the session's
//! access token when signed in, the anon key otherwise.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::runtime::RuntimeConfig;

/// An authenticated handle to the datastore's row API
#[derive(Clone, Debug, PartialEq)]
pub struct Datastore {
    base: String,
    anon_key: String,
    token: Option<String>,
}

impl Datastore {
    /// Build a handle from the runtime config and the current session
    pub fn new(config: &RuntimeConfig, session: Option<&Session>) -> Self {
        Self {
            base: config.datastore_url.trim_end_matches('/').to_string(),
            anon_key: config.datastore_anon_key.clone(),
            token: session.map(|s| s.access_token.clone()),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or(&self.anon_key))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer())
    }

    /// Select all columns of `table`, with extra query modifiers such as
    /// `("order", "created_at.desc")` or `("id", "eq.<value>")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, String> {
        let request = self
            .authed(Request::get(&self.table_url(table)))
            .query([("select", "*")])
            .query(query.iter().copied());

        let response = request
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        read_rows(response).await
    }

    /// Insert one row and return the stored representation
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .authed(Request::post(&self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        single_row(response).await
    }

    /// Upsert one row, resolving conflicts on `on_conflict`
    pub async fn upsert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        on_conflict: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .authed(Request::post(&self.table_url(table)))
            .query([("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        single_row(response).await
    }

    /// Update the rows where `column = value` and return the first updated
    /// representation
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        column: &str,
        value: &str,
        body: &B,
    ) -> Result<T, String> {
        let filter = format!("eq.{}", value);
        let response = self
            .authed(Request::patch(&self.table_url(table)))
            .query([(column, filter.as_str())])
            .header("Prefer", "return=representation")
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        single_row(response).await
    }

    /// Delete the rows where `column = value`
    pub async fn delete(&self, table: &str, column: &str, value: &str) -> Result<(), String> {
        let filter = format!("eq.{}", value);
        let response = self
            .authed(Request::delete(&self.table_url(table)))
            .query([(column, filter.as_str())])
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(datastore_error_message(response).await);
        }
        Ok(())
    }
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, String> {
    if !response.ok() {
        return Err(datastore_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// Mutations with `return=representation` answer with an array of rows.
async fn single_row<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let rows: Vec<T> = read_rows(response).await?;
    rows.into_iter()
        .next()
        .ok_or_else(|| "Datastore returned no rows".to_string())
}

async fn datastore_error_message(response: Response) -> String {
    #[derive(serde::Deserialize)]
    struct DatastoreError {
        message: String,
    }

    let status = response.status();
    response
        .json::<DatastoreError>()
        .await
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("Datastore error: status {}", status))
}

// ============ Auth ============

/// An authenticated datastore session
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// The signed-in user
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sign in with the password grant
pub async fn sign_in(
    config: &RuntimeConfig,
    email: &str,
    password: &str,
) -> Result<Session, String> {
    #[derive(serde::Serialize)]
    struct PasswordGrant<'a> {
        email: &'a str,
        password: &'a str,
    }

    let url = format!(
        "{}/auth/v1/token?grant_type=password",
        config.datastore_url.trim_end_matches('/')
    );

    let response = Request::post(&url)
        .header("apikey", &config.datastore_anon_key)
        .json(&PasswordGrant { email, password })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Invalidate the session's access token
pub async fn sign_out(config: &RuntimeConfig, token: &str) -> Result<(), String> {
    let url = format!(
        "{}/auth/v1/logout",
        config.datastore_url.trim_end_matches('/')
    );

    let response = Request::post(&url)
        .header("apikey", &config.datastore_anon_key)
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(auth_error_message(response).await);
    }
    Ok(())
}

// The auth endpoint varies its error shape between grant failures and
// endpoint errors; try both before giving up.
async fn auth_error_message(response: Response) -> String {
    #[derive(serde::Deserialize)]
    struct AuthError {
        #[serde(default)]
        error_description: Option<String>,
        #[serde(default)]
        msg: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    let status = response.status();
    response
        .json::<AuthError>()
        .await
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.error))
        .unwrap_or_else(|| format!("Authentication failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RuntimeConfig {
        RuntimeConfig {
            platform_name: "Frontdesk".to_string(),
            favicon_url: None,
            datastore_url: "https://example.supabase.co/".to_string(),
            datastore_anon_key: "anon".to_string(),
            reports_enabled: false,
            assistant_enabled: false,
            setup_required: false,
            missing_settings: Vec::new(),
        }
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let ds = Datastore::new(&test_config(), None);
        assert_eq!(
            ds.table_url("stages"),
            "https://example.supabase.co/rest/v1/stages"
        );
    }

    #[test]
    fn test_bearer_prefers_session_token() {
        let config = test_config();
        let anon = Datastore::new(&config, None);
        assert_eq!(anon.bearer(), "Bearer anon");

        let session = Session {
            access_token: "jwt".to_string(),
            user: AuthUser {
                id: "u1".to_string(),
                email: None,
            },
        };
        let signed_in = Datastore::new(&config, Some(&session));
        assert_eq!(signed_in.bearer(), "Bearer jwt");
    }
}
