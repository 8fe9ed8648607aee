use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;

use super::types::UserResponse;

/// Credentials persisted by the login flow. The portal only reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<UserResponse>,
    pub selected_company: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// Tenant for the `X-Company` header: an explicit selection wins, then the
    /// stored profile, then the `company` claim of the access token.
    pub fn company(&self) -> Option<String> {
        self.selected_company
            .clone()
            .or_else(|| self.user.as_ref().and_then(|user| user.company.clone()))
            .or_else(|| self.access_token.as_deref().and_then(decode_company_claim))
            .filter(|company| !company.trim().is_empty())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::utils::storage::{
            read_item, ACCESS_TOKEN_KEY, CURRENT_USER_KEY, SELECTED_COMPANY_KEY,
        };
        let user = read_item(CURRENT_USER_KEY).and_then(|raw| {
            serde_json::from_str::<UserResponse>(&raw)
                .map_err(|err| log::warn!("Ignoring malformed stored user: {}", err))
                .ok()
        });
        Self {
            access_token: read_item(ACCESS_TOKEN_KEY),
            user,
            selected_company: read_item(SELECTED_COMPANY_KEY),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn clear_stored() {
        use crate::utils::storage::{remove_items, ACCESS_TOKEN_KEY, CURRENT_USER_KEY};
        remove_items(&[ACCESS_TOKEN_KEY, CURRENT_USER_KEY]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear_stored() {}
}

fn decode_company_claim(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&decoded).ok()?;
    claims
        .get("company")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(company: Option<&str>) -> UserResponse {
        UserResponse {
            id: 1,
            username: "ana".into(),
            full_name: "Ana Pérez".into(),
            role: "employee".into(),
            company: company.map(str::to_string),
        }
    }

    fn token_with_claims(claims: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(claims))
    }

    #[test]
    fn selected_company_takes_precedence() {
        let session = Session {
            access_token: Some(token_with_claims(r#"{"company":"claim"}"#)),
            user: Some(user(Some("profile"))),
            selected_company: Some("selected".into()),
        };
        assert_eq!(session.company().as_deref(), Some("selected"));
    }

    #[test]
    fn falls_back_to_profile_then_token_claim() {
        let mut session = Session {
            access_token: Some(token_with_claims(r#"{"company":"claim"}"#)),
            user: Some(user(Some("profile"))),
            selected_company: None,
        };
        assert_eq!(session.company().as_deref(), Some("profile"));
        session.user = Some(user(None));
        assert_eq!(session.company().as_deref(), Some("claim"));
        session.access_token = Some("not-a-jwt".into());
        assert_eq!(session.company(), None);
    }

    #[test]
    fn authenticated_requires_token_and_user() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        session.access_token = Some("t".into());
        assert!(!session.is_authenticated());
        session.user = Some(user(None));
        assert!(session.is_authenticated());
    }
}
