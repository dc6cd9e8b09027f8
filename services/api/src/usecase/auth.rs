use foodgram_auth_types::token::issue_token;

use crate::domain::repository::UserRepository;
use crate::error::FoodgramError;
use crate::password::verify_password;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Exchange email + password for a signed auth token.
pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<String, FoodgramError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(FoodgramError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash)? {
            return Err(FoodgramError::InvalidCredentials);
        }
        let token = issue_token(user.id, &self.jwt_secret, self.token_ttl_secs)
            .map_err(anyhow::Error::from)?;
        tracing::info!(user_id = user.id, "issued auth token");
        Ok(token)
    }
}
