//! Row mapping and SQL for the three record tables.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use hbnb_domain::attributes::Attributes;
use hbnb_domain::id::PlaceId;
use hbnb_domain::object::{EntityKind, Object};
use hbnb_domain::place::Place;
use hbnb_domain::review::Review;
use hbnb_domain::time::{self, Timestamp};
use hbnb_domain::user::User;

use crate::error::StorageError;

fn decode_err(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let text: String = row.try_get(column)?;
    time::parse(&text).map_err(decode_err)
}

fn attributes(row: &SqliteRow) -> Result<Attributes, sqlx::Error> {
    let text: String = row.try_get("attributes")?;
    serde_json::from_str(&text).map_err(decode_err)
}

/// Wrapper for converting `places` rows into domain [`Place`].
struct PlaceRow(Place);

impl<'r> FromRow<'r, SqliteRow> for PlaceRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(Place {
            id: id.into(),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            attributes: attributes(row)?,
        }))
    }
}

/// Wrapper for converting `users` rows into domain [`User`].
struct UserRow(User);

impl<'r> FromRow<'r, SqliteRow> for UserRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(User {
            id: id.into(),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            attributes: attributes(row)?,
        }))
    }
}

/// Wrapper for converting `reviews` rows into domain [`Review`].
struct ReviewRow(Review);

impl<'r> FromRow<'r, SqliteRow> for ReviewRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let place_id: String = row.try_get("place_id")?;
        let user_id: String = row.try_get("user_id")?;
        Ok(Self(Review {
            id: id.into(),
            place_id: place_id.into(),
            user_id: user_id.into(),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            attributes: attributes(row)?,
        }))
    }
}

const SELECT_PLACE: &str = "SELECT * FROM places WHERE id = ?";
const SELECT_PLACES: &str = "SELECT * FROM places ORDER BY rowid";
const UPSERT_PLACE: &str = r"
    INSERT INTO places (id, created_at, updated_at, attributes)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        updated_at = excluded.updated_at,
        attributes = excluded.attributes
";

const SELECT_USER: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_USERS: &str = "SELECT * FROM users ORDER BY rowid";
const UPSERT_USER: &str = r"
    INSERT INTO users (id, created_at, updated_at, attributes)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        updated_at = excluded.updated_at,
        attributes = excluded.attributes
";

const SELECT_REVIEW: &str = "SELECT * FROM reviews WHERE id = ?";
const SELECT_REVIEWS: &str = "SELECT * FROM reviews ORDER BY rowid";
const SELECT_REVIEWS_BY_PLACE: &str = "SELECT * FROM reviews WHERE place_id = ? ORDER BY rowid";
// place_id and user_id never change once written.
const UPSERT_REVIEW: &str = r"
    INSERT INTO reviews (id, place_id, user_id, created_at, updated_at, attributes)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        updated_at = excluded.updated_at,
        attributes = excluded.attributes
";

fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Place => "places",
        EntityKind::Review => "reviews",
        EntityKind::User => "users",
    }
}

pub(crate) async fn fetch_one(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<Option<Object>, StorageError> {
    let object = match kind {
        EntityKind::Place => sqlx::query_as::<_, PlaceRow>(SELECT_PLACE)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(|row| Object::Place(row.0)),
        EntityKind::Review => sqlx::query_as::<_, ReviewRow>(SELECT_REVIEW)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(|row| Object::Review(row.0)),
        EntityKind::User => sqlx::query_as::<_, UserRow>(SELECT_USER)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(|row| Object::User(row.0)),
    };
    Ok(object)
}

pub(crate) async fn fetch_all(
    conn: &mut SqliteConnection,
    kind: EntityKind,
) -> Result<Vec<Object>, StorageError> {
    let objects = match kind {
        EntityKind::Place => sqlx::query_as::<_, PlaceRow>(SELECT_PLACES)
            .fetch_all(conn)
            .await?
            .into_iter()
            .map(|row| Object::Place(row.0))
            .collect(),
        EntityKind::Review => sqlx::query_as::<_, ReviewRow>(SELECT_REVIEWS)
            .fetch_all(conn)
            .await?
            .into_iter()
            .map(|row| Object::Review(row.0))
            .collect(),
        EntityKind::User => sqlx::query_as::<_, UserRow>(SELECT_USERS)
            .fetch_all(conn)
            .await?
            .into_iter()
            .map(|row| Object::User(row.0))
            .collect(),
    };
    Ok(objects)
}

pub(crate) async fn fetch_place_reviews(
    conn: &mut SqliteConnection,
    place_id: &PlaceId,
) -> Result<Vec<Review>, StorageError> {
    let rows: Vec<ReviewRow> = sqlx::query_as(SELECT_REVIEWS_BY_PLACE)
        .bind(place_id.as_str())
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| row.0).collect())
}

pub(crate) async fn count(
    conn: &mut SqliteConnection,
    kind: EntityKind,
) -> Result<usize, StorageError> {
    let query = format!("SELECT COUNT(*) FROM {}", table(kind));
    let count: i64 = sqlx::query_scalar(&query).fetch_one(conn).await?;
    Ok(usize::try_from(count).unwrap_or_default())
}

pub(crate) async fn upsert(conn: &mut SqliteConnection, object: &Object) -> Result<(), StorageError> {
    let query = match object {
        Object::Place(place) => sqlx::query(UPSERT_PLACE)
            .bind(place.id.as_str())
            .bind(time::format(&place.created_at))
            .bind(time::format(&place.updated_at))
            .bind(serde_json::to_string(&place.attributes)?),
        Object::User(user) => sqlx::query(UPSERT_USER)
            .bind(user.id.as_str())
            .bind(time::format(&user.created_at))
            .bind(time::format(&user.updated_at))
            .bind(serde_json::to_string(&user.attributes)?),
        Object::Review(review) => sqlx::query(UPSERT_REVIEW)
            .bind(review.id.as_str())
            .bind(review.place_id.as_str())
            .bind(review.user_id.as_str())
            .bind(time::format(&review.created_at))
            .bind(time::format(&review.updated_at))
            .bind(serde_json::to_string(&review.attributes)?),
    };
    query.execute(conn).await?;
    Ok(())
}

pub(crate) async fn remove(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<(), StorageError> {
    let query = format!("DELETE FROM {} WHERE id = ?", table(kind));
    sqlx::query(&query).bind(id).execute(conn).await?;
    Ok(())
}
