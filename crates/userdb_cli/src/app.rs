//! Interactive menu loop.
//!
//! # Responsibility
//! - Read menu tokens and field prompts, dispatch to `UserService`.
//! - Turn recoverable store errors into one printed line per action.
//!
//! # Invariants
//! - Validation, duplicate-email and not-found errors never leave the action
//!   that raised them.
//! - Storage failures end the loop with `AppError::Store`.
//! - End of input ends the loop as if exit was confirmed.

use crate::command::{MenuCommand, MENU_PROMPT};
use crate::render::render_users;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use userdb_core::db::DbError;
use userdb_core::{
    parse_age_bound, RepoError, UserFilter, UserRecord, UserRepository, UserService,
    UserValidationError,
};

const NAME_MISSING: &str = "User with this name does not exist. Try again.";
const EMAIL_TAKEN: &str = "User with this email already exists. Try again.";

/// Unrecoverable failure of the interactive session.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Store(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::Store(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Store(RepoError::Db(value))
    }
}

/// Menu session over one service and one console.
pub struct App<R: UserRepository, I: BufRead, O: Write> {
    service: UserService<R>,
    input: I,
    output: O,
}

impl<R: UserRepository, I: BufRead, O: Write> App<R, I, O> {
    pub fn new(service: UserService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until exit is confirmed or input ends.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            let Some(token) = self.ask(MENU_PROMPT)? else {
                return Ok(());
            };

            let Some(command) = MenuCommand::parse(&token) else {
                writeln!(self.output, "Invalid option. Try again.")?;
                writeln!(self.output)?;
                continue;
            };
            debug!("event=menu_action module=cli status=start action={command:?}");

            match command {
                MenuCommand::ViewAll => {
                    let users = self.service.list_all()?;
                    self.print_users(&users)?;
                    writeln!(self.output)?;
                }
                MenuCommand::Create => {
                    self.create_user()?;
                    writeln!(self.output)?;
                }
                MenuCommand::Update => {
                    self.update_user()?;
                    writeln!(self.output)?;
                }
                MenuCommand::Delete => {
                    self.delete_user()?;
                    writeln!(self.output)?;
                }
                MenuCommand::Search => self.search_users()?,
                MenuCommand::Filter => self.filter_users()?,
                MenuCommand::Exit => {
                    let confirmed = self
                        .ask("Are you sure? (Y/N) ")?
                        .map_or(true, |answer| answer.trim().eq_ignore_ascii_case("y"));
                    if confirmed {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn create_user(&mut self) -> Result<(), AppError> {
        let Some(user) = self.read_user_data()? else {
            return Ok(());
        };

        match self.service.create(&user) {
            Ok(()) => writeln!(self.output, "User created")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn update_user(&mut self) -> Result<(), AppError> {
        let Some(name) = self.ask_existing_name("Name of the user to update: ")? else {
            return Ok(());
        };
        let Some(user) = self.read_user_data()? else {
            return Ok(());
        };

        match self.service.update(&name, &user) {
            Ok(_) => writeln!(self.output, "User {name} updated.")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn delete_user(&mut self) -> Result<(), AppError> {
        let Some(name) = self.ask_existing_name("Name of the user to delete: ")? else {
            return Ok(());
        };

        self.service.delete(&name)?;
        writeln!(self.output, "User {name} deleted.")?;
        Ok(())
    }

    fn search_users(&mut self) -> Result<(), AppError> {
        let Some(term) = self.ask("Enter name or email to find users: ")? else {
            return Ok(());
        };

        let users = self.service.search(&term)?;
        self.print_users(&users)
    }

    fn filter_users(&mut self) -> Result<(), AppError> {
        let Some(name_prefix) =
            self.ask("First letter of the name (or click ENTER if not applicable): ")?
        else {
            return Ok(());
        };
        let Some(min_age) = self.ask("Minimum age (or click ENTER if not applicable): ")? else {
            return Ok(());
        };
        let Some(max_age) = self.ask("Maximum age (or click ENTER if not applicable): ")? else {
            return Ok(());
        };

        let bounds = parse_age_bound(&min_age)
            .and_then(|min| parse_age_bound(&max_age).map(|max| (min, max)));
        let (min_age, max_age) = match bounds {
            Ok(bounds) => bounds,
            Err(err) => {
                writeln!(self.output, "{}", validation_message(&err))?;
                return Ok(());
            }
        };

        let users = self.service.filter(&UserFilter {
            name_prefix,
            min_age,
            max_age,
        })?;
        self.print_users(&users)
    }

    /// Prompts for a name and returns it only if a user has it.
    fn ask_existing_name(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        let Some(name) = self.ask(prompt)? else {
            return Ok(None);
        };

        if self.service.find_by_name(&name)?.is_none() {
            writeln!(self.output, "{NAME_MISSING}")?;
            return Ok(None);
        }
        Ok(Some(name))
    }

    /// Prompts for name, email and age; prints the first validation failure.
    fn read_user_data(&mut self) -> Result<Option<UserRecord>, AppError> {
        let Some(name) = self.ask("Name of the user: ")? else {
            return Ok(None);
        };
        let Some(email) = self.ask("Email of the user: ")? else {
            return Ok(None);
        };
        let Some(age) = self.ask("Age of the user: ")? else {
            return Ok(None);
        };

        match UserRecord::parse(&name, &email, &age) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                writeln!(self.output, "{}", validation_message(&err))?;
                Ok(None)
            }
        }
    }

    /// Prints recoverable errors; passes storage failures through.
    fn report(&mut self, err: RepoError) -> Result<(), AppError> {
        match err {
            RepoError::Validation(err) => writeln!(self.output, "{}", validation_message(&err))?,
            RepoError::DuplicateEmail(_) => writeln!(self.output, "{EMAIL_TAKEN}")?,
            RepoError::NotFound(_) => writeln!(self.output, "{NAME_MISSING}")?,
            RepoError::Db(_) => return Err(err.into()),
        }
        Ok(())
    }

    fn print_users(&mut self, users: &[UserRecord]) -> Result<(), AppError> {
        writeln!(self.output, "{}", render_users(users))?;
        Ok(())
    }

    /// Writes `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn validation_message(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::EmptyName => "Name cannot be empty. Try again.",
        UserValidationError::MissingAt => "Email must contain a @. Try again.",
        UserValidationError::InvalidAge(_) => "Age must be an integer. Try again.",
    }
}
