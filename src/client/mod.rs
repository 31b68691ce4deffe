//! Library backend credential exchange
//!
//! Only the endpoints that hand out tokens live here. The returned token is
//! opaque to this module; feed it to [`crate::auth::SessionStore::login`].

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::Role;
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// JSON fields a login response may carry the token in
const TOKEN_FIELDS: [&str; 3] = ["token", "accessToken", "jwt"];

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

/// HTTP client for the backend auth endpoints
pub struct AuthClient {
    http: Client,
    config: BackendConfig,
}

impl AuthClient {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Exchange credentials for a token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.config.url(&self.config.login_path);
        debug!(%url, email, "Requesting token");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let body = read_success_body(response).await?;
        extract_token(&body)
    }

    /// Register a new account
    pub async fn signup(&self, email: &str, password: &str, role: Role) -> Result<()> {
        let url = self.config.url(&self.config.signup_path);
        debug!(%url, email, %role, "Registering account");

        let response = self
            .http
            .post(&url)
            .json(&SignupRequest {
                email,
                password,
                role,
            })
            .send()
            .await?;

        read_success_body(response).await?;
        info!(email, "Account created");
        Ok(())
    }
}

async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(Error::Backend {
            status: status.as_u16(),
            message: backend_message(&body),
        })
    }
}

/// Pull the token out of a login response body.
///
/// Accepts a bare token, a JSON string, or a JSON object with one of the
/// usual token fields.
pub fn extract_token(body: &str) -> Result<String> {
    let body = body.trim();

    let token = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(token)) => token,
        Ok(serde_json::Value::Object(fields)) => TOKEN_FIELDS
            .iter()
            .find_map(|name| fields.get(*name).and_then(|v| v.as_str()))
            .map(str::to_string)
            .ok_or_else(|| Error::Other("login response has no token field".to_string()))?,
        Ok(_) => return Err(Error::Other("unexpected login response".to_string())),
        Err(_) => body.to_string(),
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Other("backend returned an empty token".to_string()));
    }
    Ok(token.to_string())
}

/// Best-effort error text from a failed response
fn backend_message(body: &str) -> String {
    let body = body.trim();
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        if let Some(message) = ["message", "error"]
            .iter()
            .find_map(|name| fields.get(*name).and_then(|v| v.as_str()))
        {
            return message.to_string();
        }
    }

    if body.is_empty() {
        "no response body".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_token() {
        assert_eq!(extract_token(" a.b.c\n").expect("token"), "a.b.c");
    }

    #[test]
    fn test_extract_json_token() {
        assert_eq!(extract_token(r#"{"token":"a.b.c"}"#).expect("token"), "a.b.c");
        assert_eq!(
            extract_token(r#"{"accessToken":"a.b.c","type":"Bearer"}"#).expect("token"),
            "a.b.c"
        );
        assert_eq!(extract_token(r#""a.b.c""#).expect("token"), "a.b.c");
    }

    #[test]
    fn test_extract_rejects_missing_or_empty() {
        assert!(extract_token("").is_err());
        assert!(extract_token(r#"{"user":"a@b.com"}"#).is_err());
        assert!(extract_token(r#"{"token":""}"#).is_err());
        assert!(extract_token("[1,2]").is_err());
    }

    #[test]
    fn test_backend_message() {
        assert_eq!(backend_message(r#"{"message":"Email already exists"}"#), "Email already exists");
        assert_eq!(backend_message("Bad credentials"), "Bad credentials");
        assert_eq!(backend_message(""), "no response body");
    }

    #[test]
    fn test_signup_body_uses_uppercase_role() {
        let body = serde_json::to_value(SignupRequest {
            email: "a@b.com",
            password: "pw",
            role: Role::Librarian,
        })
        .expect("Failed to serialize");
        assert_eq!(body["role"], "LIBRARIAN");
    }
}
