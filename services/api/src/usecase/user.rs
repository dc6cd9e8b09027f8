use foodgram_domain::pagination::{PageRequest, Paged};

use crate::domain::image::ImageUpload;
use crate::domain::repository::{FollowRepository, MediaStore, UserRepository};
use crate::domain::types::{
    EMAIL_MAX_LEN, NewUser, PERSON_NAME_MAX_LEN, Profile, RESERVED_USERNAME, USERNAME_MAX_LEN,
    User, is_valid_username,
};
use crate::error::{FieldErrors, FoodgramError};
use crate::password::{hash_password, verify_password};
use crate::usecase::views::{profile, profiles};

pub const AVATAR_FOLDER: &str = "users";

fn check_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, "this field may not be blank");
    } else if value.chars().count() > max {
        errors.add(
            field,
            format!("ensure this field has no more than {max} characters"),
        );
    }
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterUserInput {
    fn validate(&self) -> Result<(), FoodgramError> {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "email", &self.email, EMAIL_MAX_LEN);
        if !errors.contains("email") && !self.email.contains('@') {
            errors.add("email", "enter a valid email address");
        }
        check_length(&mut errors, "username", &self.username, USERNAME_MAX_LEN);
        if !errors.contains("username") {
            if !is_valid_username(&self.username) {
                errors.add(
                    "username",
                    "only letters, digits and @/./+/-/_ are allowed",
                );
            } else if self.username == RESERVED_USERNAME {
                errors.add("username", "this username is reserved");
            }
        }
        check_length(&mut errors, "first_name", &self.first_name, PERSON_NAME_MAX_LEN);
        check_length(&mut errors, "last_name", &self.last_name, PERSON_NAME_MAX_LEN);
        if self.password.is_empty() {
            errors.add("password", "this field may not be blank");
        }
        errors.into_result()
    }
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, FoodgramError> {
        input.validate()?;
        let new_user = NewUser {
            password_hash: hash_password(&input.password)?,
            email: input.email,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = user.id, "registered user");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> ListUsersUseCase<U, F> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Paged<Profile>, FoodgramError> {
        let Paged { items, count } = self.users.list(page).await?;
        let items = profiles(&self.follows, viewer, items).await?;
        Ok(Paged::new(items, count))
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> GetUserUseCase<U, F> {
    pub async fn execute(&self, viewer: Option<i32>, id: i32) -> Result<Profile, FoodgramError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        profile(&self.follows, viewer, user).await
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    pub async fn execute(&self, user_id: i32, input: SetPasswordInput) -> Result<(), FoodgramError> {
        if input.new_password.is_empty() {
            return Err(FoodgramError::Validation(FieldErrors::single(
                "new_password",
                "this field may not be blank",
            )));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if !verify_password(&input.current_password, &user.password_hash)? {
            return Err(FoodgramError::Validation(FieldErrors::single(
                "current_password",
                "invalid password",
            )));
        }
        let hash = hash_password(&input.new_password)?;
        self.users.update_password(user_id, &hash).await?;
        tracing::info!(user_id, "changed password");
        Ok(())
    }
}

// ── Avatar ───────────────────────────────────────────────────────────────────

pub struct SetAvatarUseCase<U: UserRepository, S: MediaStore> {
    pub users: U,
    pub media: S,
}

impl<U: UserRepository, S: MediaStore> SetAvatarUseCase<U, S> {
    /// Store the data-URL image and return its media path.
    pub async fn execute(
        &self,
        user_id: i32,
        avatar: Option<&str>,
    ) -> Result<String, FoodgramError> {
        let avatar = avatar
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                FoodgramError::Validation(FieldErrors::single("avatar", "this field is required"))
            })?;
        let upload = ImageUpload::from_data_url(avatar).map_err(|e| {
            FoodgramError::Validation(FieldErrors::single("avatar", e.to_string()))
        })?;
        let path = self.media.save(AVATAR_FOLDER, &upload).await?;
        let previous = self.users.set_avatar(user_id, Some(&path)).await?;
        if let Some(old) = previous {
            discard_media(&self.media, &old).await;
        }
        Ok(path)
    }
}

pub struct DeleteAvatarUseCase<U: UserRepository, S: MediaStore> {
    pub users: U,
    pub media: S,
}

impl<U: UserRepository, S: MediaStore> DeleteAvatarUseCase<U, S> {
    pub async fn execute(&self, user_id: i32) -> Result<(), FoodgramError> {
        if let Some(old) = self.users.set_avatar(user_id, None).await? {
            discard_media(&self.media, &old).await;
        }
        Ok(())
    }
}

/// Remove a replaced file. The database no longer points at it, so failures
/// are only logged.
pub(crate) async fn discard_media<S: MediaStore>(media: &S, path: &str) {
    if let Err(e) = media.remove(path).await {
        tracing::warn!(error = %e, path, "failed to remove replaced media file");
    }
}
