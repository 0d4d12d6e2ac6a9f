//! `CredentialRepository` backed by a sea-orm database connection.

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use vaultora_core::error::{CoreError, CoreResult};
use vaultora_core::traits::CredentialRepository;
use vaultora_core::types::{CredentialMatcher, CredentialRecord};

use crate::config::DatabaseConfig;
use crate::entity::password;

impl From<password::Model> for CredentialRecord {
    fn from(row: password::Model) -> Self {
        Self {
            id: row.id,
            website: row.website,
            username: row.username,
            password: row.password,
        }
    }
}

fn storage_error(action: &str) -> impl FnOnce(sea_orm::DbErr) -> CoreError + '_ {
    move |e| CoreError::StorageError(format!("Failed to {action}: {e}"))
}

/// Credential collection stored in the `passwords` table.
pub struct DatabaseCredentialRepository {
    db: DatabaseConnection,
}

impl DatabaseCredentialRepository {
    /// Connect and bring the schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the connection or a migration fails.
    pub async fn connect(config: &DatabaseConfig) -> CoreResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .map_err(storage_error("connect to database"))?;
        tracing::info!("Connected to database");

        Migrator::up(&db, None)
            .await
            .map_err(storage_error("run migrations"))?;

        Ok(Self { db })
    }
}

/// Conjunction of every field present in the matcher, empty matches every row
fn matcher_condition(matcher: &CredentialMatcher) -> Condition {
    Condition::all()
        .add_option(matcher.id.as_deref().map(|v| password::Column::Id.eq(v)))
        .add_option(matcher.website.as_deref().map(|v| password::Column::Website.eq(v)))
        .add_option(matcher.username.as_deref().map(|v| password::Column::Username.eq(v)))
        .add_option(matcher.password.as_deref().map(|v| password::Column::Password.eq(v)))
}

#[async_trait]
impl CredentialRepository for DatabaseCredentialRepository {
    #[tracing_attributes::instrument(level = "debug", skip_all)]
    async fn find_all(&self) -> CoreResult<Vec<CredentialRecord>> {
        let rows = password::Entity::find()
            .order_by_asc(password::Column::Seq)
            .all(&self.db)
            .await
            .map_err(storage_error("query credentials"))?;

        Ok(rows.into_iter().map(CredentialRecord::from).collect())
    }

    #[tracing_attributes::instrument(level = "debug", skip_all, fields(id = %record.id))]
    async fn insert(&self, record: &CredentialRecord) -> CoreResult<()> {
        let active_model = password::ActiveModel {
            id: Set(record.id.clone()),
            website: Set(record.website.clone()),
            username: Set(record.username.clone()),
            password: Set(record.password.clone()),
            ..Default::default()
        };

        password::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(storage_error("insert credential"))?;

        Ok(())
    }

    #[tracing_attributes::instrument(level = "debug", skip_all, fields(id = %record.id))]
    async fn update(&self, record: &CredentialRecord) -> CoreResult<bool> {
        let result = password::Entity::update_many()
            .set(password::ActiveModel {
                website: Set(record.website.clone()),
                username: Set(record.username.clone()),
                password: Set(record.password.clone()),
                ..Default::default()
            })
            .filter(password::Column::Id.eq(record.id.as_str()))
            .exec(&self.db)
            .await
            .map_err(storage_error("update credential"))?;

        Ok(result.rows_affected > 0)
    }

    #[tracing_attributes::instrument(level = "debug", skip_all)]
    async fn delete_one(&self, matcher: &CredentialMatcher) -> CoreResult<u64> {
        if matcher.has_unknown_fields() {
            return Ok(0);
        }

        let row = password::Entity::find()
            .filter(matcher_condition(matcher))
            .order_by_asc(password::Column::Seq)
            .one(&self.db)
            .await
            .map_err(storage_error("query credential"))?;

        let Some(row) = row else {
            return Ok(0);
        };

        let result = password::Entity::delete_by_id(row.seq)
            .exec(&self.db)
            .await
            .map_err(storage_error("delete credential"))?;

        Ok(result.rows_affected)
    }
}
