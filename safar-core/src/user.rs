use serde::{Deserialize, Serialize};

/// The authenticated back-office user, as returned by the login and "me"
/// endpoints. Cached in the session store between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// "admin" or "agent"; free-form on the wire.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl UserProfile {
    pub fn is_agent(&self) -> bool {
        self.role.eq_ignore_ascii_case("agent")
    }

    /// The identity bookings are attributed to when the form carries no
    /// explicit agent selection: the user's agent id, else the user id.
    pub fn effective_agent_id(&self) -> &str {
        match &self.agent_id {
            Some(agent_id) if !agent_id.is_empty() => agent_id,
            _ => &self.id,
        }
    }
}
