use std::str::FromStr;

use axum::async_trait;
use shared::items::{CatalogRecipe, Item, ItemSource};
use shared::palette;
use shared::store::{check_new_item, RecipeStore};
use shared::StoreError;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

/// `RecipeStore` backed by PostgreSQL.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    label: String,
    color_index: i16,
    source: String,
    created_at: OffsetDateTime,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let source = ItemSource::from_str(&row.source).map_err(|_| {
            StoreError::Unavailable(format!("item {} has unknown source '{}'", row.id, row.source))
        })?;
        Ok(Item {
            id: row.id,
            label: row.label,
            color_index: row.color_index as u8,
            source,
            created_at: row.created_at,
        })
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    error!("Database error: {}", e);
    StoreError::Unavailable(e.to_string())
}

const SELECT_ITEMS: &str = r#"
    SELECT id, label, color_index, source, created_at
    FROM user_wheel_items
    WHERE user_id = $1
    ORDER BY created_at, id
"#;

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogRecipe>, StoreError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, label FROM catalog_recipes ORDER BY label")
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(id, label)| CatalogRecipe { id, label })
            .collect())
    }

    async fn list_user_items(&self, user_id: Uuid) -> Result<Vec<Item>, StoreError> {
        let rows: Vec<ItemRow> = sqlx::query_as(SELECT_ITEMS)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn add_item(
        &self,
        user_id: Uuid,
        label: &str,
        source: ItemSource,
    ) -> Result<Item, StoreError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(unavailable)?;

        // Serializes concurrent adds for one user so the count and color stay consistent.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(unavailable)?;

        let rows: Vec<ItemRow> = sqlx::query_as(SELECT_ITEMS)
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(unavailable)?;
        let existing = rows
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let label = check_new_item(&existing, label)?;
        let color_index = palette::color_index_for(existing.len());

        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO user_wheel_items (user_id, label, source, color_index)
            VALUES ($1, $2, $3, $4)
            RETURNING id, label, color_index, source, created_at
            "#,
        )
        .bind(user_id)
        .bind(label)
        .bind(source.to_string())
        .bind(color_index as i16)
        .fetch_one(&mut *tx)
        .await
        .map_err(unavailable)?;

        tx.commit().await.map_err(unavailable)?;
        Item::try_from(row)
    }

    async fn remove_item(&self, item_id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM user_wheel_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn remove_user_item(&self, user_id: Uuid, item_id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM user_wheel_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
