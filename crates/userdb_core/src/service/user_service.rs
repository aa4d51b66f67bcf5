//! User use-case service.
//!
//! # Responsibility
//! - Provide the create/read/update/delete/search/filter entry points.
//! - Gate updates on the target name existing.
//! - Emit metadata-only diagnostic events.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Log events never include names or emails.

use crate::model::user::UserRecord;
use crate::repo::user_repo::{RepoError, RepoResult, UserFilter, UserRepository};
use log::{debug, info, warn};

/// Use-case service wrapper for user operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts one validated user.
    ///
    /// Returns `RepoError::DuplicateEmail` when the email is taken.
    pub fn create(&self, user: &UserRecord) -> RepoResult<()> {
        match self.repo.create_user(user) {
            Ok(()) => {
                info!("event=user_create module=service status=ok");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=user_create module=service status=rejected error_code={}",
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<UserRecord>> {
        self.repo.find_by_name(name)
    }

    pub fn list_all(&self) -> RepoResult<Vec<UserRecord>> {
        let users = self.repo.list_users()?;
        debug!("event=user_list module=service status=ok rows={}", users.len());
        Ok(users)
    }

    pub fn search(&self, term: &str) -> RepoResult<Vec<UserRecord>> {
        let users = self.repo.search_users(term)?;
        debug!("event=user_search module=service status=ok rows={}", users.len());
        Ok(users)
    }

    pub fn filter(&self, filter: &UserFilter) -> RepoResult<Vec<UserRecord>> {
        let users = self.repo.filter_users(filter)?;
        debug!(
            "event=user_filter module=service status=ok bounded_min={} bounded_max={} rows={}",
            filter.min_age.is_some(),
            filter.max_age.is_some(),
            users.len()
        );
        Ok(users)
    }

    /// Overwrites every user named `name` with `user`.
    ///
    /// # Contract
    /// - Returns `RepoError::NotFound` without writing when no row has `name`.
    /// - Returns the number of rows changed, which can exceed one when names
    ///   are shared.
    pub fn update(&self, name: &str, user: &UserRecord) -> RepoResult<usize> {
        if self.repo.find_by_name(name)?.is_none() {
            warn!("event=user_update module=service status=rejected error_code=not_found");
            return Err(RepoError::NotFound(name.to_string()));
        }

        match self.repo.update_users_by_name(name, user) {
            Ok(changed) => {
                info!("event=user_update module=service status=ok rows={changed}");
                Ok(changed)
            }
            Err(err) => {
                warn!(
                    "event=user_update module=service status=rejected error_code={}",
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    /// Removes every user named `name`. Zero removed rows is not an error.
    pub fn delete(&self, name: &str) -> RepoResult<usize> {
        let removed = self.repo.delete_users_by_name(name)?;
        info!("event=user_delete module=service status=ok rows={removed}");
        Ok(removed)
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation",
        RepoError::Db(_) => "db",
        RepoError::DuplicateEmail(_) => "duplicate_email",
        RepoError::NotFound(_) => "not_found",
    }
}
