use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{gen_salt, Hasher};
use crate::auth::token::{Token, TokenPayload, TokenProvider};
use crate::error::{AppError, EntityOp, RepoError};
use crate::users::dto::{UserCreate, UserLogin, UserUpdate};
use crate::users::model::{NewUser, Role, User};
use crate::users::repo::{UserFilter, UserRepo};

const ENTITY: &str = "users";
const SALT_LEN: usize = 50;

/// Business rules over the repository: validation, duplicate-email pre-check,
/// salting and hashing, token issuance, error translation.
pub struct UserService {
    repo: Arc<dyn UserRepo>,
    hasher: Arc<dyn Hasher>,
    tokens: Arc<dyn TokenProvider>,
    token_expiry_secs: u64,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepo>,
        hasher: Arc<dyn Hasher>,
        tokens: Arc<dyn TokenProvider>,
        token_expiry_secs: u64,
    ) -> Self {
        Self {
            repo,
            hasher,
            tokens,
            token_expiry_secs,
        }
    }

    /// Registers a new account and returns its generated id.
    ///
    /// The email pre-check only produces a friendlier error; the UNIQUE
    /// constraint on the column is what actually closes the race between
    /// concurrent registrations, surfacing here as the creation failure.
    pub async fn register(&self, data: UserCreate) -> Result<Uuid, AppError> {
        let mut data = data;
        data.email = data.email.trim().to_lowercase();
        data.validate()?;

        match self.repo.get_user(&UserFilter::ByEmail(data.email.clone())).await {
            Ok(_) => {
                warn!(email = %data.email, "email already registered");
                return Err(AppError::EmailTaken);
            }
            Err(RepoError::NotFound) => {}
            Err(err) => return Err(AppError::storage(ENTITY, EntityOp::Get, err)),
        }

        let salt = gen_salt(SALT_LEN);
        let user = NewUser {
            id: Uuid::new_v4(),
            password_hash: self.hasher.hash(&format!("{}{}", data.password, salt)),
            email: data.email,
            salt,
            role: Role::Regular,
        };

        if let Err(err) = self.repo.save(&user).await {
            return Err(AppError::storage(ENTITY, EntityOp::Create, err));
        }

        info!(user_id = %user.id, "user registered");
        Ok(user.id)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// Lookup failure and hash mismatch collapse into one error so callers
    /// cannot tell a missing account from a wrong password.
    pub async fn login(&self, data: UserLogin) -> Result<Token, AppError> {
        let email = data.email.trim().to_lowercase();

        let user = match self.repo.get_user(&UserFilter::ByEmail(email)).await {
            Ok(user) => user,
            Err(_) => {
                warn!(email = %data.email, "login with unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let supplied = self.hasher.hash(&format!("{}{}", data.password, user.salt));
        if supplied != user.password_hash {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let payload = TokenPayload {
            user_id: user.id,
            role: user.role,
        };
        let token = self
            .tokens
            .generate(payload, self.token_expiry_secs)
            .map_err(|err| AppError::Internal(err.into()))?;

        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        self.repo
            .get_all()
            .await
            .map_err(|err| AppError::storage(ENTITY, EntityOp::List, err))
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.repo
            .get_user(&UserFilter::ById(id))
            .await
            .map_err(|err| AppError::storage(ENTITY, EntityOp::Get, err))
    }

    pub async fn update_user(&self, id: Uuid, changes: UserUpdate) -> Result<(), AppError> {
        self.repo
            .update(id, &changes)
            .await
            .map_err(|err| AppError::storage(ENTITY, EntityOp::Update, err))?;

        info!(user_id = %id, "user updated");
        Ok(())
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.repo
            .delete(id)
            .await
            .map_err(|err| AppError::storage(ENTITY, EntityOp::Delete, err))?;

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
