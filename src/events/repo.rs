use sqlx::PgPool;

use crate::error::{self, Error};
use crate::events::repo_types::Event;

impl Event {
    /// Unordered full scan; an empty table yields an empty vec.
    pub async fn all(db: &PgPool) -> Result<Vec<Event>, Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, date_time, user_id
            FROM events
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(events)
    }

    pub async fn by_id(db: &PgPool, id: i64) -> Result<Event, Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, date_time, user_id
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(Error::EventNotFound)
    }

    /// Insert, ignoring `event.id`. The owner reference is enforced by the
    /// foreign key, not checked in-process.
    pub async fn create(db: &PgPool, event: &Event) -> Result<Event, Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, description, location, date_time, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, location, date_time, user_id
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date_time)
        .bind(event.user_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if error::is_fk_violation(&e) {
                Error::ForeignKeyViolation
            } else {
                Error::Database(e)
            }
        })
    }

    /// Full replace of the mutable fields by id. Updating a nonexistent id
    /// affects zero rows and is not an error here.
    pub async fn update(db: &PgPool, event: &Event) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = $1, description = $2, location = $3, date_time = $4, user_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date_time)
        .bind(event.user_id)
        .bind(event.id)
        .execute(db)
        .await
        .map_err(|e| {
            if error::is_fk_violation(&e) {
                Error::ForeignKeyViolation
            } else {
                Error::Database(e)
            }
        })?;
        Ok(())
    }

    /// No-op success when the id does not exist.
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// A user registers for an event at most once; the composite primary key
    /// makes a repeat attempt fail distinguishably.
    pub async fn register(db: &PgPool, event_id: i64, user_id: i64) -> Result<(), Error> {
        sqlx::query("INSERT INTO registrations (event_id, user_id) VALUES ($1, $2)")
            .bind(event_id)
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                if error::is_unique_violation(&e) {
                    Error::DuplicateRegistration
                } else if error::is_fk_violation(&e) {
                    Error::ForeignKeyViolation
                } else {
                    Error::Database(e)
                }
            })?;
        Ok(())
    }

    /// No-op success when the pair was never registered.
    pub async fn unregister(db: &PgPool, event_id: i64, user_id: i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
