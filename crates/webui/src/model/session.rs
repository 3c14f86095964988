use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[display("NATIONAL")]
    National,
    #[display("REGIONAL")]
    Regional,
    /// A role this client has no rules for; grants nothing.
    #[serde(other)]
    #[display("INCONNU")]
    Unknown,
}

/// Signed-in user as stored under the `user` local storage key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Agency name.
    #[serde(default)]
    pub agence: Option<String>,
    #[serde(default)]
    pub agence_id: Option<i64>,
}

impl User {
    pub fn is_national(&self) -> bool {
        self.role == Some(Role::National)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Body of a successful `POST login/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub agence: Option<String>,
    #[serde(default)]
    pub agence_id: Option<i64>,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session {
            token: response.token,
            user: User {
                username: response.username,
                email: response.email,
                role: response.role,
                agence: response.agence,
                agence_id: response.agence_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn login_response_normalises_to_session() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token": "abc", "username": "yaounde", "email": "r@feicom.cm",
                "role": "REGIONAL", "agence": "Centre", "agence_id": 4}"#,
        )
        .unwrap();
        let session = Session::from(response);
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.role, Some(Role::Regional));
        assert_eq!(session.user.agence_id, Some(4));
        assert!(!session.user.is_national());
    }

    #[test]
    fn national_user_has_no_agence() {
        let user: User = serde_json::from_str(
            r#"{"username": "admin", "email": "admin@feicom.com", "role": "NATIONAL", "agence": null, "agence_id": null}"#,
        )
        .unwrap();
        assert!(user.is_national());
        assert_eq!(user.agence_id, None);
    }

    #[test]
    fn unknown_role_is_kept_apart() {
        let user: User = serde_json::from_str(r#"{"username": "x", "role": "AUDITOR"}"#).unwrap();
        assert_matches!(user.role, Some(Role::Unknown));
    }

    #[test]
    fn user_round_trips_through_storage_format() {
        let user = User {
            username: "admin".into(),
            role: Some(Role::National),
            ..User::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), user);
        assert_eq!(Role::National.to_string(), "NATIONAL");
    }
}
