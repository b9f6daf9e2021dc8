use serde::{Deserialize, Serialize};

/// Authenticated user attached to the store. Authentication itself happens
/// outside this crate; the store only cares whether a session is present,
/// which gates the mutation relay and reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub email: Option<String>,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }
}
