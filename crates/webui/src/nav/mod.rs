//! Who may see which page, and the sidebar menu derived from it.

pub mod menu;

use crate::model::{Role, User};

/// Requirement a page puts on the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in user.
    Private,
    Role(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Allow,
    RedirectLogin,
    RedirectUnauthorized,
}

pub fn check(access: Access, user: Option<&User>) -> Guard {
    match (access, user) {
        (Access::Public, _) => Guard::Allow,
        (_, None) => Guard::RedirectLogin,
        (Access::Private, Some(_)) => Guard::Allow,
        (Access::Role(required), Some(user)) => match user.role {
            None => Guard::RedirectLogin,
            Some(role) if role == required => Guard::Allow,
            Some(_) => Guard::RedirectUnauthorized,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(role: Option<Role>) -> User {
        User {
            username: "u".into(),
            role,
            ..User::default()
        }
    }

    #[rstest]
    #[case(Access::Public, None, Guard::Allow)]
    #[case(Access::Private, None, Guard::RedirectLogin)]
    #[case(Access::Private, Some(None), Guard::Allow)]
    #[case(Access::Role(Role::National), None, Guard::RedirectLogin)]
    #[case(Access::Role(Role::National), Some(None), Guard::RedirectLogin)]
    #[case(Access::Role(Role::National), Some(Some(Role::National)), Guard::Allow)]
    #[case(Access::Role(Role::National), Some(Some(Role::Regional)), Guard::RedirectUnauthorized)]
    #[case(Access::Role(Role::Regional), Some(Some(Role::National)), Guard::RedirectUnauthorized)]
    #[case(Access::Role(Role::Regional), Some(Some(Role::Unknown)), Guard::RedirectUnauthorized)]
    fn guard_decisions(
        #[case] access: Access,
        #[case] role: Option<Option<Role>>,
        #[case] expected: Guard,
    ) {
        let user = role.map(user);
        assert_eq!(check(access, user.as_ref()), expected);
    }
}
