//! User Application Service

use commerce_types::{
    AppError, NotFoundError, RepoError, User, UserDto, UserId, UserRepository,
};

/// Application service for users and their credentials.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists all users.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<UserDto>, AppError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Gets a user by ID.
    #[tracing::instrument(skip(self), fields(user_id = %id))]
    pub async fn find_by_id(&self, id: UserId) -> Result<UserDto, AppError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NotFoundError::User(id))?;

        Ok(user.into())
    }

    /// Gets the user owning the credential with exactly this username.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<UserDto, AppError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| NotFoundError::Username(username.to_string()))?;

        Ok(user.into())
    }

    /// Stores a new user together with its credential. Any ID on the DTO is ignored.
    #[tracing::instrument(skip(self, dto))]
    pub async fn save(&self, dto: UserDto) -> Result<UserDto, AppError> {
        let user = User {
            user_id: None,
            ..User::from(dto)
        };

        let saved = self.repo.save(user).await?;
        tracing::info!(user_id = ?saved.user_id, "user created");
        Ok(saved.into())
    }

    /// Updates the user identified by the DTO's own ID.
    #[tracing::instrument(skip(self, dto))]
    pub async fn update(&self, dto: UserDto) -> Result<UserDto, AppError> {
        let id = dto
            .user_id
            .ok_or_else(|| AppError::BadRequest("User id is required for update".into()))?;

        self.update_by_id(id, dto).await
    }

    /// Updates an existing user with every field present in the DTO.
    #[tracing::instrument(skip(self, dto), fields(user_id = %id))]
    pub async fn update_by_id(&self, id: UserId, dto: UserDto) -> Result<UserDto, AppError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NotFoundError::User(id))?;

        dto.apply_to(&mut user);

        let saved = self.repo.save(user).await.map_err(|e| match e {
            RepoError::NotFound => AppError::from(NotFoundError::User(id)),
            other => other.into(),
        })?;

        Ok(saved.into())
    }

    /// Deletes a user and its credential. Deleting an unknown ID succeeds.
    #[tracing::instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_by_id(&self, id: UserId) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await?;
        Ok(())
    }
}
