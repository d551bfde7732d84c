use crate::{
    error::{AppError, AppResult},
    model::attendance::Attendance,
    models::{DateFilter, DateRange, MarkAttendance},
    service::employee::fetch_employee,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, instrument};

const SELECT_ATTENDANCE: &str = "SELECT id, employee_id, date, status FROM attendance";

/// Records `status` for the employee on `date`, overwriting any earlier mark
/// for the same day. The write is a single upsert on the
/// `(employee_id, date)` unique key, so concurrent marks never duplicate a row.
/// An unknown employee fails the foreign key and surfaces as `NotFound`.
#[instrument(skip(pool, input), fields(date = %input.date, status = %input.status))]
pub async fn mark_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    input: MarkAttendance,
) -> AppResult<Attendance> {
    let mut tx = pool.begin().await?;

    let record = sqlx::query_as::<_, Attendance>(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        VALUES (?, ?, ?)
        ON CONFLICT (employee_id, date) DO UPDATE SET status = excluded.status
        RETURNING id, employee_id, date, status
        "#,
    )
    .bind(employee_id)
    .bind(input.date)
    .bind(input.status)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| translate_missing_employee(e, employee_id))?;

    tx.commit().await?;
    info!(attendance_id = record.id, "Attendance marked");
    Ok(record)
}

fn translate_missing_employee(err: sqlx::Error, employee_id: i64) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::employee_not_found(employee_id);
        }
    }
    err.into()
}

/// Attendance of one employee, newest first, within the optional inclusive bounds.
pub async fn employee_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    range: DateRange,
) -> AppResult<Vec<Attendance>> {
    fetch_employee(pool, employee_id).await?;

    let mut query = QueryBuilder::<Sqlite>::new(SELECT_ATTENDANCE);
    query.push(" WHERE employee_id = ").push_bind(employee_id);
    if let Some(start) = range.start_date {
        query.push(" AND date >= ").push_bind(start);
    }
    if let Some(end) = range.end_date {
        query.push(" AND date <= ").push_bind(end);
    }
    query.push(" ORDER BY date DESC, id DESC");

    Ok(query.build_query_as::<Attendance>().fetch_all(pool).await?)
}

/// Attendance across all employees, newest first, optionally for one day only.
pub async fn all_attendance(pool: &SqlitePool, filter: DateFilter) -> AppResult<Vec<Attendance>> {
    let mut query = QueryBuilder::<Sqlite>::new(SELECT_ATTENDANCE);
    if let Some(date) = filter.date {
        query.push(" WHERE date = ").push_bind(date);
    }
    query.push(" ORDER BY date DESC, id DESC");

    Ok(query.build_query_as::<Attendance>().fetch_all(pool).await?)
}
