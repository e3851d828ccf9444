use crate::db::connection::Database;
use crate::domain::listing::{Listing, ListingStatus, ListingType};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Serialize;

/// Narrowing for list views. Empty fields do not filter.
#[derive(Debug, Default, Clone)]
pub struct ListingFilter {
    pub company_id: Option<String>,
    pub status: Option<ListingStatus>,
    pub listing_type: Option<ListingType>,
    /// Case-insensitive match on title, make, model or city.
    pub search: Option<String>,
}

impl ListingFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ListingStatus::Active),
            ..Self::default()
        }
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        [
            listing.title.as_str(),
            listing.make.as_str(),
            listing.model.as_str(),
            listing.location.city.as_str(),
        ]
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub listing_id: String,
    pub from_status: String,
    pub to_status: String,
    pub changed_at: DateTime<Utc>,
}

fn decode(data: &str) -> Result<Listing, ServerError> {
    serde_json::from_str(data)
        .map_err(|e| ServerError::DbError(format!("corrupt listing row: {e}")))
}

fn upsert(conn: &Connection, listing: &Listing) -> Result<(), ServerError> {
    let data = serde_json::to_string(listing)
        .map_err(|e| ServerError::DbError(format!("encode listing failed: {e}")))?;

    conn.execute(
        r#"
        INSERT INTO listings (
            id, company_id, listing_type, status, title, data, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(id) DO UPDATE SET
            company_id = excluded.company_id,
            listing_type = excluded.listing_type,
            status = excluded.status,
            title = excluded.title,
            data = excluded.data,
            updated_at = excluded.updated_at
        "#,
        params![
            listing.id,
            listing.company_id,
            listing.listing_type.as_str(),
            listing.status.as_str(),
            listing.title,
            data,
            listing.created_at,
            listing.updated_at,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("save listing failed: {e}")))?;

    Ok(())
}

/// Inserts or replaces a listing. `created_at` of an existing row is kept.
pub fn save_listing(db: &Database, listing: &Listing) -> Result<(), ServerError> {
    db.with_conn(|conn| upsert(conn, listing))
}

/// Saves the listing and records the status move in one transaction.
pub fn save_with_status_change(
    db: &Database,
    listing: &Listing,
    from: ListingStatus,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        upsert(&tx, listing)?;
        if from != listing.status {
            tx.execute(
                r#"
                INSERT INTO listing_status_history (listing_id, from_status, to_status, changed_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![listing.id, from.as_str(), listing.status.as_str(), listing.updated_at],
            )
            .map_err(|e| ServerError::DbError(format!("record status change failed: {e}")))?;
        }
        tx.commit()?;
        Ok(())
    })
}

pub fn get_listing(db: &Database, id: &str) -> Result<Option<Listing>, ServerError> {
    db.with_conn(|conn| {
        let data: Option<String> = conn
            .query_row("SELECT data FROM listings WHERE id = ?1", [id], |row| row.get(0))
            .optional()
            .map_err(|e| ServerError::DbError(format!("get listing failed: {e}")))?;

        data.as_deref().map(decode).transpose()
    })
}

pub fn list_listings(db: &Database, filter: &ListingFilter) -> Result<Vec<Listing>, ServerError> {
    let mut sql = String::from("SELECT data FROM listings WHERE 1 = 1");
    let mut args: Vec<String> = Vec::new();

    if let Some(company) = filter.company_id.as_deref().filter(|c| !c.is_empty()) {
        args.push(company.to_string());
        sql.push_str(&format!(" AND company_id = ?{}", args.len()));
    }
    if let Some(status) = filter.status {
        args.push(status.as_str().to_string());
        sql.push_str(&format!(" AND status = ?{}", args.len()));
    }
    if let Some(listing_type) = filter.listing_type {
        args.push(listing_type.as_str().to_string());
        sql.push_str(&format!(" AND listing_type = ?{}", args.len()));
    }
    sql.push_str(" ORDER BY updated_at DESC, id");

    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), |row| row.get::<_, String>(0))
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            let data = row.map_err(|e| ServerError::DbError(e.to_string()))?;
            let listing = decode(&data)?;
            if filter.matches_search(&listing) {
                out.push(listing);
            }
        }
        Ok(out)
    })
}

/// Removes the listing and its history together. Returns whether a row was removed.
pub fn delete_listing(db: &Database, id: &str) -> Result<bool, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let removed = tx
            .execute("DELETE FROM listings WHERE id = ?1", [id])
            .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;
        tx.execute("DELETE FROM listing_status_history WHERE listing_id = ?1", [id])
            .map_err(|e| ServerError::DbError(format!("delete history failed: {e}")))?;
        tx.commit()?;
        Ok(removed > 0)
    })
}

pub fn status_history(db: &Database, id: &str) -> Result<Vec<StatusChange>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT listing_id, from_status, to_status, changed_at
                FROM listing_status_history
                WHERE listing_id = ?1
                ORDER BY id
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([id], |row| {
                Ok(StatusChange {
                    listing_id: row.get(0)?,
                    from_status: row.get(1)?,
                    to_status: row.get(2)?,
                    changed_at: row.get(3)?,
                })
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(results)
    })
}
