//! Aggregates behind the dashboard and analytics endpoints.
//!
//! Every function takes the reference instant explicitly. Timestamps are the
//! UTC `CURRENT_TIMESTAMP` text SQLite writes, so month windows are plain
//! string comparisons on `created_at`.

use super::Store;
use crate::entities::{EntityKind, EXPORT, IMPORT};
use crate::error::StoreError;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use common::model::stats::{
    ActivityItem, AnalyticsTotals, ContainerSizeCount, DashboardStats, MonthlyVolume, NamedCount,
};
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const OVERVIEW_MONTHS: u32 = 6;
const TOP_FORWARDERS: u32 = 10;

/// First day of the month `back` months before the one containing `today`.
fn month_start(today: NaiveDate, back: u32) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(back)))
        .unwrap_or(today)
}

fn day_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Month-over-month change in percent. An empty previous month counts as one
/// record so the ratio stays finite.
pub fn trend(current: i64, previous: i64) -> i64 {
    let base = if previous == 0 { 1 } else { previous };
    (((current - base) as f64 / base as f64) * 100.0).round() as i64
}

pub fn time_ago(now: NaiveDateTime, then: NaiveDateTime) -> String {
    let elapsed = (now - then).num_seconds().max(0);
    let minutes = elapsed / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let plural = |n: i64, unit: &str| format!("{} {}{} ago", n, unit, if n > 1 { "s" } else { "" });
    if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
}

/// Rows created in `[from, until)`; `until` of `None` means no upper bound.
fn count_created(
    conn: &Connection,
    table: &str,
    from: NaiveDate,
    until: Option<NaiveDate>,
) -> rusqlite::Result<i64> {
    match until {
        Some(until) => conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE created_at >= ?1 AND created_at < ?2",
                table
            ),
            [day_key(from), day_key(until)],
            |row| row.get(0),
        ),
        None => conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE created_at >= ?1", table),
            [day_key(from)],
            |row| row.get(0),
        ),
    }
}

/// This month's and last month's creations for one table.
fn monthly_pair(conn: &Connection, table: &str, today: NaiveDate) -> rusqlite::Result<(i64, i64)> {
    let this_month = month_start(today, 0);
    let last_month = month_start(today, 1);
    Ok((
        count_created(conn, table, this_month, None)?,
        count_created(conn, table, last_month, Some(this_month))?,
    ))
}

fn grouped_counts(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

struct ActivityRow {
    id: i64,
    kind: EntityKind,
    job_no: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl ActivityRow {
    fn touched_at(&self) -> NaiveDateTime {
        self.created_at.max(self.updated_at)
    }
}

fn latest_touched(
    conn: &Connection,
    kind: EntityKind,
    limit: u32,
    now: NaiveDateTime,
) -> rusqlite::Result<Vec<ActivityRow>> {
    let sql = format!(
        "SELECT id, job_no, created_at, updated_at FROM {}
         ORDER BY MAX(created_at, updated_at) DESC, id DESC LIMIT ?1",
        kind.def().table
    );
    let parse = |s: String| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).unwrap_or(now);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([limit], |row| {
            Ok(ActivityRow {
                id: row.get(0)?,
                kind,
                job_no: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                created_at: parse(row.get(2)?),
                updated_at: parse(row.get(3)?),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

impl Store {
    pub fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats, StoreError> {
        let conn = self.lock()?;
        let (imports_this, imports_last) = monthly_pair(&conn, IMPORT.table, today)?;
        let (exports_this, exports_last) = monthly_pair(&conn, EXPORT.table, today)?;
        let pending_reviews = conn.query_row(
            "SELECT COUNT(*) FROM import_data WHERE nn_copy_rcvd = 0 OR original_docs_rcvd = 0",
            [],
            |row| row.get(0),
        )?;

        Ok(DashboardStats {
            total_imports: count(&conn, IMPORT.table)?,
            total_exports: count(&conn, EXPORT.table)?,
            this_month_total: imports_this + exports_this,
            pending_reviews,
            import_trend: trend(imports_this, imports_last),
            export_trend: trend(exports_this, exports_last),
        })
    }

    /// The `limit` most recently created or updated records of either type.
    pub fn recent_activity(
        &self,
        limit: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<ActivityItem>, StoreError> {
        let conn = self.lock()?;
        let mut rows = latest_touched(&conn, EntityKind::Import, limit, now)?;
        rows.extend(latest_touched(&conn, EntityKind::Export, limit, now)?);
        rows.sort_by(|a, b| b.touched_at().cmp(&a.touched_at()));

        Ok(rows
            .into_iter()
            .take(limit as usize)
            .map(|row| ActivityItem {
                id: row.id,
                record_type: row.kind.record_type(),
                action: if row.updated_at > row.created_at {
                    "Updated"
                } else {
                    "Added"
                }
                .to_string(),
                time: time_ago(now, row.touched_at()),
                job_no: row.job_no,
            })
            .collect())
    }

    /// Records created per month over the last six months, oldest first.
    pub fn monthly_overview(&self, today: NaiveDate) -> Result<Vec<MonthlyVolume>, StoreError> {
        let conn = self.lock()?;
        let since = day_key(month_start(today, OVERVIEW_MONTHS - 1));
        let per_month = |table: &str| -> rusqlite::Result<HashMap<String, i64>> {
            let mut stmt = conn.prepare(&format!(
                "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) FROM {}
                 WHERE created_at >= ?1 GROUP BY month",
                table
            ))?;
            let counts = stmt
                .query_map([&since], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<HashMap<_, _>>>()?;
            Ok(counts)
        };
        let imports = per_month(IMPORT.table)?;
        let exports = per_month(EXPORT.table)?;

        Ok((0..OVERVIEW_MONTHS)
            .rev()
            .map(|back| {
                let start = month_start(today, back);
                let key = start.format("%Y-%m").to_string();
                MonthlyVolume {
                    month: start.format("%b").to_string(),
                    import: imports.get(&key).copied().unwrap_or(0),
                    export: exports.get(&key).copied().unwrap_or(0),
                }
            })
            .collect())
    }

    /// Top forwarders by shipment count across both tables.
    pub fn forwarder_counts(&self) -> Result<Vec<NamedCount>, StoreError> {
        let conn = self.lock()?;
        let rows = grouped_counts(
            &conn,
            &format!(
                "WITH combined AS (
                    SELECT forwarder_name FROM import_data WHERE forwarder_name != ''
                    UNION ALL
                    SELECT forwarder_name FROM export_data WHERE forwarder_name != ''
                 )
                 SELECT forwarder_name, COUNT(*) AS value FROM combined
                 GROUP BY forwarder_name ORDER BY value DESC, forwarder_name LIMIT {}",
                TOP_FORWARDERS
            ),
        )?;
        Ok(rows
            .into_iter()
            .map(|(name, value)| NamedCount { name, value })
            .collect())
    }

    /// Container sizes seen in either table, sorted by size.
    pub fn container_sizes(&self) -> Result<Vec<ContainerSizeCount>, StoreError> {
        let conn = self.lock()?;
        let imports = grouped_counts(
            &conn,
            "SELECT container_size, COUNT(*) FROM import_data
             WHERE container_size != '' GROUP BY container_size",
        )?;
        let exports = grouped_counts(
            &conn,
            "SELECT size, COUNT(*) FROM export_data WHERE size != '' GROUP BY size",
        )?;

        let mut sizes: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for (name, n) in imports {
            sizes.entry(name).or_default().0 = n;
        }
        for (name, n) in exports {
            sizes.entry(name).or_default().1 = n;
        }
        Ok(sizes
            .into_iter()
            .map(|(name, (import, export))| ContainerSizeCount { name, import, export })
            .collect())
    }

    pub fn analytics_totals(&self, today: NaiveDate) -> Result<AnalyticsTotals, StoreError> {
        let conn = self.lock()?;
        let import_volume = count(&conn, IMPORT.table)?;
        let export_volume = count(&conn, EXPORT.table)?;
        let import_value: f64 = conn.query_row(
            "SELECT COALESCE(SUM(invoice_value), 0.0) FROM import_data",
            [],
            |row| row.get(0),
        )?;
        let export_value: f64 = conn.query_row(
            "SELECT COALESCE(SUM(fob_value_inr), 0.0) FROM export_data",
            [],
            |row| row.get(0),
        )?;
        let (imports_this, imports_last) = monthly_pair(&conn, IMPORT.table, today)?;
        let (exports_this, exports_last) = monthly_pair(&conn, EXPORT.table, today)?;

        Ok(AnalyticsTotals {
            total_shipments: import_volume + export_volume,
            import_volume,
            export_volume,
            total_value: import_value + export_value,
            total_trend: trend(imports_this + exports_this, imports_last + exports_last),
            import_trend: trend(imports_this, imports_last),
            export_trend: trend(exports_this, exports_last),
        })
    }

    /// Import records bucketed by which documents have arrived.
    pub fn document_status(&self) -> Result<Vec<NamedCount>, StoreError> {
        let conn = self.lock()?;
        let rows = grouped_counts(
            &conn,
            "SELECT CASE
                 WHEN nn_copy_rcvd = 1 AND original_docs_rcvd = 1 THEN 'Delivered'
                 WHEN nn_copy_rcvd = 1 OR original_docs_rcvd = 1 THEN 'In Transit'
                 ELSE 'Pending'
             END AS name, COUNT(*) AS value
             FROM import_data GROUP BY name ORDER BY value DESC, name",
        )?;
        Ok(rows
            .into_iter()
            .map(|(name, value)| NamedCount { name, value })
            .collect())
    }
}
