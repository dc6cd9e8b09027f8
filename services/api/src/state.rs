use sea_orm::DatabaseConnection;

use foodgram_auth_types::identity::TokenSecret;

use crate::infra::db::{
    DbFollowRepository, DbIngredientRepository, DbRecipeMarkRepository, DbRecipeRepository,
    DbTagRepository, DbUserRepository,
};
use crate::infra::media::FsMediaStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Base for absolute links, without a trailing slash.
    pub public_url: String,
    pub media: FsMediaStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn mark_repo(&self) -> DbRecipeMarkRepository {
        DbRecipeMarkRepository {
            db: self.db.clone(),
        }
    }

    pub fn media_store(&self) -> FsMediaStore {
        self.media.clone()
    }

    /// Absolute URL for a site path such as `/s/abc/`.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{path}", self.public_url.trim_end_matches('/'))
    }

    /// Absolute URL of a stored media file.
    pub fn media_url(&self, relative: &str) -> String {
        self.absolute(&format!("/media/{relative}"))
    }
}

impl TokenSecret for AppState {
    fn token_secret(&self) -> &str {
        &self.jwt_secret
    }
}
