//! SQLite implementation of the ReservationRepository port.
//!
//! Writes run in IMMEDIATE transactions; the schema's overlap triggers are
//! the authoritative guard against concurrent double-booking and surface
//! here as `ReservaError::Conflict`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_core::ReservationRepository;
use reserva_domain::{Location, ReservaError, Reservation, Result};
use rusqlite::{params, Row, ToSql, TransactionBehavior};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::{datetime_from_ts, DbManager};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "id, title, description, start_ts, end_ts, location, owner_id,
        status, kind, people_count, remote_event_id, created_at, updated_at";

/// SQLite implementation of ReservationRepository
pub struct SqliteReservationRepository {
    db: Arc<DbManager>,
}

impl SqliteReservationRepository {
    /// Create a new reservation repository.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

/// Raw row image, converted into the domain type after the rusqlite
/// closure returns.
struct ReservationRow {
    id: String,
    title: String,
    description: Option<String>,
    start_ts: i64,
    end_ts: i64,
    location: String,
    owner_id: String,
    status: String,
    kind: String,
    people_count: u32,
    remote_event_id: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ReservationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            start_ts: row.get(3)?,
            end_ts: row.get(4)?,
            location: row.get(5)?,
            owner_id: row.get(6)?,
            status: row.get(7)?,
            kind: row.get(8)?,
            people_count: row.get(9)?,
            remote_event_id: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_domain(self) -> Result<Reservation> {
        Ok(Reservation {
            id: parse_uuid(&self.id)?,
            title: self.title,
            description: self.description,
            start: datetime_from_ts(self.start_ts)?,
            end: datetime_from_ts(self.end_ts)?,
            location: self.location.parse()?,
            owner_id: parse_uuid(&self.owner_id)?,
            status: self.status.parse()?,
            kind: self.kind.parse()?,
            people_count: self.people_count,
            remote_event_id: self.remote_event_id,
            created_at: datetime_from_ts(self.created_at)?,
            updated_at: datetime_from_ts(self.updated_at)?,
        })
    }
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    value
        .parse()
        .map_err(|e| ReservaError::Database(format!("malformed uuid in store: {e}")))
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepository {
    #[instrument(skip(self, reservation), fields(reservation_id = %reservation.id))]
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        let mut conn = self.db.get_connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(InfraError::from)?;

        tx.execute(
            "INSERT INTO reservations (
                id, title, description, start_ts, end_ts, location, owner_id,
                status, kind, people_count, remote_event_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                reservation.id.to_string(),
                reservation.title,
                reservation.description,
                reservation.start.timestamp(),
                reservation.end.timestamp(),
                reservation.location.as_str(),
                reservation.owner_id.to_string(),
                reservation.status.as_str(),
                reservation.kind.as_str(),
                reservation.people_count,
                reservation.remote_event_id,
                reservation.created_at.timestamp(),
                reservation.updated_at.timestamp(),
            ],
        )
        .map_err(InfraError::from)?;

        tx.commit().map_err(InfraError::from)?;

        debug!(reservation_id = %reservation.id, "reservation inserted");
        Ok(())
    }

    #[instrument(skip(self, reservation), fields(reservation_id = %reservation.id))]
    async fn update(&self, reservation: &Reservation) -> Result<()> {
        let mut conn = self.db.get_connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(InfraError::from)?;

        let changed = tx
            .execute(
                "UPDATE reservations
                 SET title = ?2, description = ?3, start_ts = ?4, end_ts = ?5,
                     location = ?6, status = ?7, kind = ?8, people_count = ?9,
                     remote_event_id = ?10, updated_at = ?11
                 WHERE id = ?1",
                params![
                    reservation.id.to_string(),
                    reservation.title,
                    reservation.description,
                    reservation.start.timestamp(),
                    reservation.end.timestamp(),
                    reservation.location.as_str(),
                    reservation.status.as_str(),
                    reservation.kind.as_str(),
                    reservation.people_count,
                    reservation.remote_event_id,
                    reservation.updated_at.timestamp(),
                ],
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(ReservaError::NotFound(format!("reservation {}", reservation.id)));
        }

        tx.commit().map_err(InfraError::from)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<()> {
        let conn = self.db.get_connection()?;
        let deleted = conn
            .execute("DELETE FROM reservations WHERE id = ?1", params![id.to_string()])
            .map_err(InfraError::from)?;

        if deleted == 0 {
            return Err(ReservaError::NotFound(format!("reservation {id}")));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>> {
        let conn = self.db.get_connection()?;
        let result = conn.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM reservations WHERE id = ?1"),
            params![id.to_string()],
            ReservationRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.into_domain()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }

    async fn list_active_by_location(&self, location: Location) -> Result<Vec<Reservation>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM reservations
                 WHERE location = ?1 AND status != 'cancelled'
                 ORDER BY start_ts"
            ))
            .map_err(InfraError::from)?;

        let rows = stmt
            .query_map(params![location.as_str()], ReservationRow::from_row)
            .map_err(InfraError::from)?;

        collect_rows(rows)
    }

    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<Location>,
    ) -> Result<Vec<Reservation>> {
        let conn = self.db.get_connection()?;

        let mut sql = format!(
            "SELECT {SELECT_COLUMNS} FROM reservations
             WHERE start_ts < ?1 AND ?2 < end_ts"
        );
        let mut bind: Vec<Box<dyn ToSql>> =
            vec![Box::new(end.timestamp()), Box::new(start.timestamp())];

        if let Some(location) = location {
            sql.push_str(" AND location = ?3");
            bind.push(Box::new(location.as_str()));
        }
        sql.push_str(" ORDER BY start_ts");

        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
        let params: Vec<&dyn ToSql> = bind.iter().map(|b| b.as_ref()).collect();
        let rows = stmt
            .query_map(params.as_slice(), ReservationRow::from_row)
            .map_err(InfraError::from)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn set_remote_event_id(&self, id: Uuid, remote_event_id: Option<&str>) -> Result<()> {
        let conn = self.db.get_connection()?;
        let changed = conn
            .execute(
                "UPDATE reservations SET remote_event_id = ?2, updated_at = ?3 WHERE id = ?1",
                params![id.to_string(), remote_event_id, Utc::now().timestamp()],
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(ReservaError::NotFound(format!("reservation {id}")));
        }
        Ok(())
    }
}

fn collect_rows(
    rows: impl Iterator<Item = rusqlite::Result<ReservationRow>>,
) -> Result<Vec<Reservation>> {
    let mut reservations = Vec::new();
    for row in rows {
        reservations.push(row.map_err(InfraError::from)?.into_domain()?);
    }
    Ok(reservations)
}
