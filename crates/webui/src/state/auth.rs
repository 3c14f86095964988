use crate::model::{Session, User};
use gloo::storage::{LocalStorage, Storage as _};
use std::rc::Rc;
use yew::Reducible;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }
}

#[derive(Debug)]
pub enum AuthAction {
    LoggedIn(Session),
    LoggedOut,
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::LoggedIn(session) => AuthState {
                session: Some(session),
            }
            .into(),
            AuthAction::LoggedOut if self.session.is_none() => self,
            AuthAction::LoggedOut => AuthState::default().into(),
        }
    }
}

/// Session left in local storage by a previous visit. The token is stored raw, the user as JSON.
pub fn restore() -> Option<Session> {
    let token = LocalStorage::raw()
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())?;
    match LocalStorage::get::<Option<User>>(USER_KEY) {
        Ok(Some(user)) => Some(Session { token, user }),
        Ok(None) => None,
        Err(err) => {
            log::warn!("Ignoring stored user - {err:?}");
            None
        }
    }
}

pub fn persist(session: Option<&Session>) {
    let Some(session) = session else {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(USER_KEY);
        return;
    };
    if let Err(err) = LocalStorage::raw().set_item(TOKEN_KEY, &session.token) {
        log::error!("Cannot store token - {err:?}");
    }
    if let Err(err) = LocalStorage::set(USER_KEY, &session.user) {
        log::error!("Cannot store user - {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn session() -> Session {
        Session {
            token: "abc".into(),
            user: User {
                username: "admin".into(),
                role: Some(Role::National),
                ..User::default()
            },
        }
    }

    #[test]
    fn login_then_logout() {
        let state = Rc::new(AuthState::default()).reduce(AuthAction::LoggedIn(session()));
        assert_eq!(state.token(), Some("abc"));
        assert_eq!(state.user().map(|u| u.username.as_str()), Some("admin"));
        let state = state.reduce(AuthAction::LoggedOut);
        assert_eq!(*state, AuthState::default());
    }

    #[test]
    fn logout_without_session_keeps_state() {
        let state = Rc::new(AuthState::default());
        let next = state.clone().reduce(AuthAction::LoggedOut);
        assert!(Rc::ptr_eq(&state, &next));
    }
}
