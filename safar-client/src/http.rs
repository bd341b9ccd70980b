use crate::app_config::Config;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};
use chrono::Utc;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use safar_core::user::UserProfile;
use serde_json::Value;
use std::time::Duration;

/// HTTP wrapper owning the session. Every outbound request carries the
/// bearer token, the tenant header, and `Cache-Control: no-cache`; "me"
/// endpoints additionally get a cache-busting timestamp query parameter.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    /// Explicit override or configured fallback, consulted after the cache.
    tenant_fallback: Option<String>,
    store: SessionStore,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, company_override: Option<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        let store = SessionStore::new(
            config
                .session
                .file
                .clone()
                .unwrap_or_else(SessionStore::default_path),
        );
        let session = store.load();

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            tenant_fallback: company_override.or_else(|| config.tenant.company_id.clone()),
            store,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    /// Tenant id priority: cached session, explicit override, configured
    /// fallback.
    pub fn company_id(&self) -> Option<String> {
        self.session
            .company_id()
            .map(str::to_string)
            .or_else(|| self.tenant_fallback.clone())
    }

    pub(crate) fn replace_session(&mut self, session: Session) -> ClientResult<()> {
        self.session = session;
        self.store.save(&self.session)
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub(crate) fn persist_session(&self) -> ClientResult<()> {
        self.store.save(&self.session)
    }

    /// Drop the in-memory session and the cached file. Used by logout and
    /// by the 401 path.
    pub fn clear_session(&mut self) -> ClientResult<()> {
        self.session = Session::default();
        self.store.clear()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method, url)
            .header(CACHE_CONTROL, "no-cache");
        if let Some(token) = self.session.token.as_deref().filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }
        if let Some(company) = self.company_id() {
            req = req.header("X-Company-Id", company);
        }
        req
    }

    /// "me" endpoints are fetched with a timestamp query parameter so no
    /// intermediary serves a stale profile.
    pub(crate) fn cache_busted(path: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}_ts={}", path, sep, Utc::now().timestamp_millis())
    }

    pub(crate) async fn send(&mut self, req: RequestBuilder) -> ClientResult<Value> {
        let resp = req.send().await?;
        self.handle_json(resp).await
    }

    pub(crate) async fn send_bytes(&mut self, req: RequestBuilder) -> ClientResult<Vec<u8>> {
        let resp = req.send().await?;
        let resp = self.check_status(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }

    async fn handle_json(&mut self, resp: Response) -> ClientResult<Value> {
        let resp = self.check_status(resp).await?;
        let raw = resp.text().await?;
        if raw.trim().is_empty() {
            // DELETE and some mutations answer 204
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn check_status(&mut self, resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Received 401, clearing cached session");
            let _ = self.clear_session();
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .or_else(|| body.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("request failed with status {}", status));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_busting_appends_the_right_separator() {
        let plain = ApiClient::cache_busted("/api/auth/me");
        assert!(plain.starts_with("/api/auth/me?_ts="));

        let with_query = ApiClient::cache_busted("/api/auth/me?expand=1");
        assert!(with_query.starts_with("/api/auth/me?expand=1&_ts="));
    }
}
