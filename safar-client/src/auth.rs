use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::session::Session;
use reqwest::Method;
use safar_core::user::UserProfile;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Authenticate against the admin or agent login endpoint and persist
    /// the resulting session.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        as_agent: bool,
    ) -> ClientResult<UserProfile> {
        let path = if as_agent {
            "/api/agent/login"
        } else {
            "/api/auth/login"
        };

        let body = self
            .send(
                self.request(Method::POST, path)
                    .json(&LoginRequest { email, password }),
            )
            .await?;

        let token = body
            .get("token")
            .or_else(|| body.get("accessToken"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Api {
                status: 200,
                message: "login response carried no token".to_string(),
            })?
            .to_string();

        let user = extract_profile(&body).unwrap_or_else(|| UserProfile {
            email: email.to_string(),
            role: if as_agent { "agent" } else { "admin" }.to_string(),
            ..UserProfile::default()
        });
        let company_id = user.company_id.clone();

        self.replace_session(Session {
            token: Some(token),
            user: Some(user.clone()),
            company_id,
        })?;

        tracing::info!("Logged in as {} ({})", user.email, user.role);
        Ok(user)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        tracing::info!("Logging out, clearing session");
        self.clear_session()
    }

    /// Make sure the session carries a tenant id. When the cached session
    /// has none, force-refetch the profile with a cache-busting query
    /// parameter, trying the admin "me" endpoint first and falling back to
    /// the agent one.
    pub async fn ensure_company_id(&mut self) -> ClientResult<Option<String>> {
        if let Some(id) = self.company_id() {
            return Ok(Some(id));
        }
        if !self.session().is_authenticated() {
            return Ok(None);
        }

        let body = match self.fetch_me("/api/auth/me").await {
            Ok(body) => body,
            Err(ClientError::Unauthorized) => return Err(ClientError::Unauthorized),
            Err(_) => self.fetch_me("/api/agent/me").await?,
        };

        if let Some(user) = extract_profile(&body) {
            let company_id = user.company_id.clone();
            self.session_mut().user = Some(user);
            self.session_mut().company_id = company_id;
            self.persist_session()?;
        }
        Ok(self.company_id())
    }

    async fn fetch_me(&mut self, path: &str) -> ClientResult<Value> {
        let busted = Self::cache_busted(path);
        self.send(self.request(Method::GET, &busted)).await
    }
}

/// The profile rides under `user`, `admin`, or `agent` depending on which
/// login endpoint answered; older deployments return it at the top level.
fn extract_profile(body: &Value) -> Option<UserProfile> {
    let node = body
        .get("user")
        .or_else(|| body.get("admin"))
        .or_else(|| body.get("agent"))
        .unwrap_or(body);
    let profile: UserProfile = serde_json::from_value(node.clone()).ok()?;
    if profile.id.is_empty() && profile.email.is_empty() {
        return None;
    }
    Some(profile)
}
