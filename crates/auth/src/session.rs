use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FormErrors, SignInForm, SignUpForm};

/// The locally stored "logged in" identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl LocalUser {
    pub fn sign_up(form: &SignUpForm, now: DateTime<Utc>) -> Result<Self, FormErrors> {
        form.validate()?;
        Ok(Self {
            username: Some(form.username.trim().to_string()),
            email: form.email.trim().to_string(),
            is_authenticated: true,
            created_at: Some(now),
            last_login: None,
        })
    }

    pub fn sign_in(form: &SignInForm, now: DateTime<Utc>) -> Result<Self, FormErrors> {
        form.validate()?;
        Ok(Self {
            username: None,
            email: form.email.trim().to_string(),
            is_authenticated: true,
            created_at: None,
            last_login: Some(now),
        })
    }

    /// Interpret a stored value. Anything unparsable or not marked authenticated is
    /// treated as signed out, and the caller should clear it.
    pub fn restore(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .filter(|user| user.is_authenticated)
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}
