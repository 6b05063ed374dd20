use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, unique_err};
use crate::domain::user::normalize_email;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::user;

const DUPLICATE_EMAIL: &str = "User already exists";

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Moderator => UserRole::Moderator,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Moderator => user::UserRole::Moderator,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password).map_err(|e| DomainError::internal("Failed to hash password", e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name.trim().to_string()),
            email: Set(normalize_email(&dto.email)),
            password_hash: Set(hash(&dto.password)?),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| unique_err(e, DUPLICATE_EMAIL))?;

        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(email) = dto.email {
            active.email = Set(normalize_email(&email));
        }
        if let Some(password) = dto.password {
            active.password_hash = Set(hash(&password)?);
        }
        if let Some(role) = dto.role {
            active.role = Set(domain_role_to_entity(role));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| unique_err(e, DUPLICATE_EMAIL))?;

        Ok(Some(user_model_to_domain(updated)))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(())
    }
}
