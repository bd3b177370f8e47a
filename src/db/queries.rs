use crate::db::Database;
use crate::error::{Result, RoofOpsError};
use crate::models::{WorkLogEntry, WorkStatus};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

// Work Log Queries

impl Database {
    pub fn insert_work_log(&self, entry: &WorkLogEntry) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO work_log
                    (log_date, assembly_id, crew_size, hours_worked, status, notes, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    entry.date.format("%Y-%m-%d").to_string(),
                    entry.assembly_id,
                    entry.crew_size,
                    entry.hours_worked,
                    format!("{:?}", entry.status),
                    entry.notes,
                    entry.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn work_log_for_date(&self, date: NaiveDate) -> Result<Vec<WorkLogEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM work_log WHERE log_date = ?1 ORDER BY assembly_id",
            )?;
            let entries = stmt
                .query_map([date.format("%Y-%m-%d").to_string()], row_to_work_log)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(entries)
        })
    }

    pub fn recent_work_logs(&self, limit: u32) -> Result<Vec<WorkLogEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM work_log ORDER BY log_date DESC, id DESC LIMIT ?1",
            )?;
            let entries = stmt
                .query_map([limit], row_to_work_log)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(entries)
        })
    }

    pub fn delete_work_log(&self, id: i64) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            conn.execute("DELETE FROM work_log WHERE id = ?1", [id])
                .map_err(Into::into)
        })?;
        if deleted == 0 {
            return Err(RoofOpsError::NotFound(format!("work log entry {}", id)));
        }
        Ok(())
    }
}

fn row_to_work_log(row: &Row) -> rusqlite::Result<WorkLogEntry> {
    let date_str: String = row.get("log_date")?;
    let status_str: String = row.get("status")?;
    let created_at_str: String = row.get("created_at")?;

    let status = WorkStatus::from_str(&status_str).unwrap_or_else(|| {
        warn!(
            status = %status_str,
            "Unknown work status in database, defaulting to Standby"
        );
        WorkStatus::Standby
    });

    Ok(WorkLogEntry {
        id: Some(row.get("id")?),
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Local::now().date_naive()),
        assembly_id: row.get("assembly_id")?,
        crew_size: row.get("crew_size")?,
        hours_worked: row.get("hours_worked")?,
        status,
        notes: row.get("notes")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
