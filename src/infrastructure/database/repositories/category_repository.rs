use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, unique_err};
use crate::domain::category::CategoryType;
use crate::domain::{Category, CategoryRepositoryInterface, DomainError, DomainResult};
use crate::infrastructure::database::entities::category;

const DUPLICATE_NAME: &str = "Category already exists";

#[derive(Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn types_to_json(types: &[CategoryType]) -> DomainResult<serde_json::Value> {
    serde_json::to_value(types).map_err(|e| DomainError::internal("Failed to encode types", e))
}

fn category_model_to_domain(model: category::Model) -> DomainResult<Category> {
    let types: Vec<CategoryType> = serde_json::from_value(model.types)
        .map_err(|e| DomainError::internal("Corrupt category types", e))?;

    Ok(Category {
        id: model.id,
        name: model.name,
        description: model.description,
        types,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn category_to_active(category: &Category) -> DomainResult<category::ActiveModel> {
    Ok(category::ActiveModel {
        id: Set(category.id.clone()),
        name: Set(category.name.clone()),
        description: Set(category.description.clone()),
        types: Set(types_to_json(&category.types)?),
        created_at: Set(category.created_at),
        updated_at: Set(category.updated_at),
    })
}

fn models_to_domain(models: Vec<category::Model>) -> DomainResult<Vec<Category>> {
    models.into_iter().map(category_model_to_domain).collect()
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CategoryRepositoryInterface for CategoryRepository {
    async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models_to_domain(models)
    }

    async fn get_categories_by_ids(&self, ids: &[String]) -> DomainResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models_to_domain(models)
    }

    async fn get_category(&self, id: &str) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(category_model_to_domain).transpose()
    }

    async fn get_category_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(category_model_to_domain).transpose()
    }

    async fn insert_category(&self, category: Category) -> DomainResult<Category> {
        let model = category_to_active(&category)?
            .insert(&self.db)
            .await
            .map_err(|e| unique_err(e, DUPLICATE_NAME))?;

        category_model_to_domain(model)
    }

    async fn save_category(&self, category: Category) -> DomainResult<Category> {
        let mut active = category_to_active(&category)?;
        // Primary key stays unchanged; created_at is never rewritten
        active.created_at = sea_orm::ActiveValue::NotSet;

        let model = active.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Category"),
            other => unique_err(other, DUPLICATE_NAME),
        })?;

        category_model_to_domain(model)
    }

    async fn delete_category(&self, id: &str) -> DomainResult<()> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Category"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::test_support::test_db;

    fn rock() -> Category {
        let now = Utc::now();
        Category {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Rock".into(),
            description: Some("Rock music".into()),
            types: vec![CategoryType::new("Classic", Some("60s-80s".into()))],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn types_survive_a_roundtrip_through_the_json_column() {
        let (_dir, db) = test_db().await;
        let repo = CategoryRepository::new(db);
        let created = repo.insert_category(rock()).await.unwrap();

        let loaded = repo.get_category(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.types, created.types);
        assert_eq!(loaded.types[0].name, "Classic");
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let (_dir, db) = test_db().await;
        let repo = CategoryRepository::new(db);
        repo.insert_category(rock()).await.unwrap();

        let err = repo.insert_category(rock()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn save_replaces_types() {
        let (_dir, db) = test_db().await;
        let repo = CategoryRepository::new(db);
        let mut category = repo.insert_category(rock()).await.unwrap();

        category.add_type("Punk", None).unwrap();
        let saved = repo.save_category(category.clone()).await.unwrap();
        assert_eq!(saved.types.len(), 2);

        let by_name = repo.get_category_by_name("Rock").await.unwrap().unwrap();
        assert_eq!(by_name.types[1].name, "Punk");
    }

    #[tokio::test]
    async fn lookup_by_ids_skips_unknown() {
        let (_dir, db) = test_db().await;
        let repo = CategoryRepository::new(db);
        let created = repo.insert_category(rock()).await.unwrap();

        let found = repo
            .get_categories_by_ids(&[created.id.clone(), "missing".into()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.get_categories_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let (_dir, db) = test_db().await;
        let repo = CategoryRepository::new(db);
        let created = repo.insert_category(rock()).await.unwrap();

        repo.delete_category(&created.id).await.unwrap();
        let err = repo.delete_category(&created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
