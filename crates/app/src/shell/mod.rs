//! Interactive menus driving the engine.

use std::io::{BufRead, Write};

use engine::{Engine, EngineError, RegisterOutcome, Registration};

use crate::{
    console::Console,
    error::{AppError, Result},
    payment::PaymentDesk,
};

mod admin;
mod citizen;

pub struct Shell<R, W> {
    engine: Engine,
    console: Console<R, W>,
    payments: PaymentDesk,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(engine: Engine, console: Console<R, W>, payments: PaymentDesk) -> Self {
        Self {
            engine,
            console,
            payments,
        }
    }

    /// Runs until the user exits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(AppError::InputClosed) => {
                tracing::debug!("input closed, leaving");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            self.console
                .say("\n=== TAXPAYER SYSTEM ===\n1. Login\n2. Register\n3. Exit")?;
            match self.console.prompt_parsed::<u32>("Choose: ")? {
                1 => self.login()?,
                2 => self.register()?,
                3 => {
                    self.console.say("Goodbye.")?;
                    return Ok(());
                }
                _ => self.console.say("Invalid choice.")?,
            }
        }
    }

    fn login(&mut self) -> Result<()> {
        let username = self.console.prompt("Username: ")?;
        let password = self.console.prompt_password("Password: ")?;

        let Some(session) = self.engine.login(&username, &password).into_session() else {
            return self.console.say("Invalid username or password.");
        };

        self.console
            .say(format!("Welcome, {}!", session.profile().full_name))?;
        if session.is_admin() {
            self.admin_menu()
        } else {
            self.citizen_menu(session)
        }
    }

    fn register(&mut self) -> Result<()> {
        self.console.say("\n--- REGISTRATION ---")?;

        let mut username = self.console.prompt("Username: ")?;
        loop {
            if username.is_empty() {
                username = self.console.prompt("Username must not be empty: ")?;
            } else if !self.engine.username_available(&username) {
                username = self
                    .console
                    .prompt("Username already taken. Choose another: ")?;
            } else {
                break;
            }
        }

        let password = self.console.prompt_password("Password: ")?;
        let confirmation = self.console.prompt_password("Confirm password: ")?;
        if password != confirmation {
            return self.console.say("Passwords do not match.");
        }

        let full_name = self.console.prompt("Full name: ")?;
        let mut national_id = self.console.prompt("National ID (NIK): ")?;
        loop {
            if national_id.is_empty() {
                national_id = self.console.prompt("National ID must not be empty: ")?;
            } else if !self.engine.national_id_available(&national_id) {
                national_id = self
                    .console
                    .prompt("National ID already registered. Enter another: ")?;
            } else {
                break;
            }
        }

        let monthly_income = self.console.prompt_money("Monthly income: ")?;
        let dependents = self.console.prompt_parsed::<u32>("Number of dependents: ")?;
        let mut registration = Registration::new(username, national_id)
            .password(password)
            .password_confirmation(confirmation)
            .full_name(full_name)
            .monthly_income(monthly_income)
            .dependents(dependents);

        if self.console.prompt_yes_no("Do you own property? (y/n): ")? {
            let value = self.console.prompt_money("Property value: ")?;
            registration = registration.property_value(value);
        }
        if self.console.prompt_yes_no("Do you own a vehicle? (y/n): ")? {
            let value = self.console.prompt_money("Vehicle value: ")?;
            registration = registration.vehicle_value(value);
        }

        let outcome = self.engine.register(registration);
        let message = match self.saved(outcome)? {
            Some(RegisterOutcome::Registered) => "Registration successful. You can now log in.",
            Some(RegisterOutcome::UsernameTaken) => "Username already taken.",
            Some(RegisterOutcome::NationalIdTaken) => "National ID already registered.",
            Some(RegisterOutcome::PasswordMismatch) => "Passwords do not match.",
            None => return Ok(()),
        };
        self.console.say(message)
    }

    /// Turns a storage failure into a notice so the menu keeps running.
    fn saved<T>(&mut self, result: std::result::Result<T, EngineError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.console
                    .say(format!("Warning: changes could not be saved ({err})."))?;
                Ok(None)
            }
        }
    }
}
