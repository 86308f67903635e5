use std::collections::BTreeMap;

use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqlitePool};

use hbnb_app::ports::{Storage, StorageSession};
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::PlaceId;
use hbnb_domain::object::{EntityKind, Object};
use hbnb_domain::review::Review;

use crate::error::StorageError;
use crate::rows;

/// `SQLite`-backed storage. Each session holds one pooled connection.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new storage over the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Storage for SqliteStorage {
    type Session = SqliteSession;

    async fn open(&self) -> Result<SqliteSession, HbnbError> {
        let conn = self.pool.acquire().await.map_err(StorageError::from)?;
        Ok(SqliteSession {
            conn,
            staged: Vec::new(),
        })
    }
}

enum Change {
    Put(Object),
    Remove { kind: EntityKind, id: String },
}

/// A session on the database. Staged changes are written in one transaction
/// on save; reads see committed rows only.
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
    staged: Vec<Change>,
}

impl StorageSession for SqliteSession {
    async fn get(&mut self, kind: EntityKind, id: &str) -> Result<Option<Object>, HbnbError> {
        Ok(rows::fetch_one(&mut self.conn, kind, id).await?)
    }

    fn stage(&mut self, object: Object) {
        self.staged.push(Change::Put(object));
    }

    fn delete(&mut self, object: &Object) {
        self.staged.push(Change::Remove {
            kind: object.kind(),
            id: object.id().to_string(),
        });
    }

    async fn save(&mut self) -> Result<(), HbnbError> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let mut tx = Connection::begin(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;
        for change in &self.staged {
            match change {
                Change::Put(object) => rows::upsert(&mut tx, object).await?,
                Change::Remove { kind, id } => rows::remove(&mut tx, *kind, id).await?,
            }
        }
        tx.commit().await.map_err(StorageError::from)?;

        tracing::debug!(changes = self.staged.len(), "sqlite storage saved");
        self.staged.clear();
        Ok(())
    }

    async fn count(&mut self, kind: Option<EntityKind>) -> Result<usize, HbnbError> {
        let mut total = 0;
        for kind in kind.map_or(EntityKind::ALL.to_vec(), |kind| vec![kind]) {
            total += rows::count(&mut self.conn, kind).await?;
        }
        Ok(total)
    }

    async fn all(
        &mut self,
        kind: Option<EntityKind>,
    ) -> Result<BTreeMap<String, Object>, HbnbError> {
        let mut objects = BTreeMap::new();
        for kind in kind.map_or(EntityKind::ALL.to_vec(), |kind| vec![kind]) {
            for object in rows::fetch_all(&mut self.conn, kind).await? {
                objects.insert(object.key(), object);
            }
        }
        Ok(objects)
    }

    async fn place_reviews(&mut self, place_id: &PlaceId) -> Result<Vec<Review>, HbnbError> {
        Ok(rows::fetch_place_reviews(&mut self.conn, place_id).await?)
    }

    async fn close(self) -> Result<(), HbnbError> {
        if !self.staged.is_empty() {
            tracing::debug!(
                discarded = self.staged.len(),
                "closing sqlite session with unsaved changes"
            );
        }
        drop(self.conn);
        Ok(())
    }
}
