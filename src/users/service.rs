use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{
    model::{NewUser, User, UserChanges},
    repo::UserRepository,
};
use crate::{
    auth::password::{self, PasswordError},
    error::{Error, Result},
};

/// Business operations exposed to the HTTP layer.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn get(&self, id: &str) -> Result<User>;
    /// Succeeds only when `email` names a live user whose stored hash
    /// matches `password`.
    async fn login(&self, email: &str, password: &str) -> Result<()>;
    async fn update(&self, user: UserChanges) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct Users {
    repo: Arc<dyn UserRepository>,
}

impl Users {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for Users {
    #[instrument(skip_all)]
    async fn create(&self, user: NewUser) -> Result<User> {
        let user = self.repo.create(user).await?;
        info!(user_id = %user.id, email = %user.email, "user created");
        Ok(user)
    }

    async fn get(&self, id: &str) -> Result<User> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let saved = self.repo.get_by_email(email).await?;

        match password::verify_blocking(saved.password, password.to_owned()).await {
            Ok(()) => {
                info!(user_id = %saved.id, "user logged in");
                Ok(())
            }
            Err(PasswordError::Mismatch) => {
                debug!(user_id = %saved.id, "login invalid password");
                Err(Error::unauthorized("invalid password"))
            }
            Err(other) => Err(other.into()),
        }
    }

    #[instrument(skip_all, fields(user_id = %user.id))]
    async fn update(&self, user: UserChanges) -> Result<()> {
        self.repo.update(user).await?;
        info!("user updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await?;
        info!("user deleted");
        Ok(())
    }
}
