use crate::{Registration, ResultEngine, Role, Taxpayer};

use super::Engine;

/// Built-in administrator, never stored in the roster.
pub const RESERVED_ADMIN_USERNAME: &str = "admin";
pub const RESERVED_ADMIN_PASSWORD: &str = "admin123";

/// The logged in identity.
///
/// Holds a copy of the taxpayer record taken at login. Operations that change
/// the record through a session update both this copy and the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    profile: Taxpayer,
    reserved: bool,
}

impl Session {
    fn reserved_admin() -> Self {
        Self {
            profile: Taxpayer {
                username: RESERVED_ADMIN_USERNAME.to_string(),
                full_name: "Administrator".to_string(),
                is_admin: true,
                ..Taxpayer::default()
            },
            reserved: true,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &Taxpayer {
        &self.profile
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.profile.username
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Role::Administrator
    }

    /// `true` for the built-in administrator, which has no roster record.
    #[must_use]
    pub fn is_reserved_admin(&self) -> bool {
        self.reserved
    }

    pub(super) fn profile_mut(&mut self) -> &mut Taxpayer {
        &mut self.profile
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Session(Session),
    ReservedAdmin(Session),
    Failure,
}

impl LoginOutcome {
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        match self {
            LoginOutcome::Session(session) | LoginOutcome::ReservedAdmin(session) => Some(session),
            LoginOutcome::Failure => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    UsernameTaken,
    NationalIdTaken,
    PasswordMismatch,
}

impl Engine {
    #[must_use]
    pub fn username_available(&self, username: &str) -> bool {
        self.store.username_available(username)
    }

    #[must_use]
    pub fn national_id_available(&self, national_id: &str) -> bool {
        self.store.national_id_available(national_id)
    }

    /// Adds a new citizen account and persists the roster.
    ///
    /// Checks run in order: username, password confirmation, national ID.
    /// Nothing is created when one of them fails. If the save fails the
    /// account stays in memory and the error is returned.
    pub fn register(&mut self, registration: Registration) -> ResultEngine<RegisterOutcome> {
        if !self.username_available(&registration.username) {
            return Ok(RegisterOutcome::UsernameTaken);
        }
        if registration.password != registration.password_confirmation {
            return Ok(RegisterOutcome::PasswordMismatch);
        }
        if !self.national_id_available(&registration.national_id) {
            return Ok(RegisterOutcome::NationalIdTaken);
        }

        let username = registration.username.clone();
        self.store.push(Taxpayer {
            username: registration.username,
            password: registration.password,
            national_id: registration.national_id,
            full_name: registration.full_name,
            monthly_income: registration.monthly_income,
            property_value: registration.property_value,
            vehicle_value: registration.vehicle_value,
            dependents: registration.dependents,
            paid: false,
            is_admin: false,
        });
        tracing::info!("registered taxpayer {username}");

        self.store.save()?;
        Ok(RegisterOutcome::Registered)
    }

    /// Resolves credentials to a session.
    ///
    /// The built-in administrator is checked first, then the roster in order
    /// (plain text comparison, first match wins).
    #[must_use]
    pub fn login(&self, username: &str, password: &str) -> LoginOutcome {
        if username == RESERVED_ADMIN_USERNAME && password == RESERVED_ADMIN_PASSWORD {
            tracing::info!("built-in administrator logged in");
            return LoginOutcome::ReservedAdmin(Session::reserved_admin());
        }

        match self
            .store
            .taxpayers()
            .iter()
            .find(|t| t.username == username && t.password == password)
        {
            Some(taxpayer) => {
                tracing::info!("{username} logged in as {:?}", taxpayer.role());
                LoginOutcome::Session(Session {
                    profile: taxpayer.clone(),
                    reserved: false,
                })
            }
            None => {
                tracing::warn!("failed login for {username}");
                LoginOutcome::Failure
            }
        }
    }
}
