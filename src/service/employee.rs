use crate::{
    error::{AppError, AppResult, UniqueField},
    model::{attendance::Attendance, employee::Employee},
    models::CreateEmployee,
};
use sqlx::{Sqlite, SqliteExecutor, SqlitePool, Transaction};
use tracing::{debug, info, instrument};
use validator::Validate;

const EMPLOYEE_COLUMNS: &str = "id, employee_id, full_name, email, department";

/// An employee together with every attendance row it owns, in storage order.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub employee: Employee,
    pub attendances: Vec<Attendance>,
}

/// Loads an employee by surrogate id, failing with `NotFound` when absent.
pub async fn fetch_employee<'e, E>(executor: E, id: i64) -> AppResult<Employee>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| AppError::employee_not_found(id))
}

/// Inserts a new employee. The insert opens its transaction, so concurrent
/// creators wait on the write lock; a unique violation is then resolved to the
/// conflicting column, employee_id before email.
#[instrument(skip(pool, input), fields(employee_id = %input.employee_id))]
pub async fn create_employee(pool: &SqlitePool, input: CreateEmployee) -> AppResult<Employee> {
    let input = input.trimmed();
    input.validate()?;

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query_as::<_, Employee>(&format!(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    ))
    .bind(&input.employee_id)
    .bind(&input.full_name)
    .bind(&input.email)
    .bind(&input.department)
    .fetch_one(&mut *tx)
    .await;

    let employee = match inserted {
        Ok(employee) => employee,
        Err(err) if is_unique_violation(&err) => {
            let err = duplicate_of(&mut tx, input).await?;
            tx.rollback().await?;
            return Err(err);
        }
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;
    info!(id = employee.id, "Employee created");
    Ok(employee)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

async fn duplicate_of(
    tx: &mut Transaction<'_, Sqlite>,
    input: CreateEmployee,
) -> AppResult<AppError> {
    let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE employee_id = ?")
        .bind(&input.employee_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(if taken > 0 {
        AppError::DuplicateKey {
            field: UniqueField::EmployeeId,
            value: input.employee_id,
        }
    } else {
        AppError::DuplicateKey {
            field: UniqueField::Email,
            value: input.email,
        }
    })
}

pub async fn list_employees(pool: &SqlitePool) -> AppResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    debug!(count = employees.len(), "Listed employees");
    Ok(employees)
}

pub async fn get_employee(pool: &SqlitePool, id: i64) -> AppResult<EmployeeRecord> {
    let mut tx = pool.begin().await?;

    let employee = fetch_employee(&mut *tx, id).await?;
    let attendances = sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendance WHERE employee_id = ?",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(EmployeeRecord {
        employee,
        attendances,
    })
}

/// Removes the employee and all of its attendance in one transaction.
#[instrument(skip(pool))]
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    // A missing employee owns no rows, so this is a no-op before the NotFound below.
    let removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        tx.rollback().await?;
        return Err(AppError::employee_not_found(id));
    }

    tx.commit().await?;
    info!(attendance_removed = removed, "Employee deleted");
    Ok(())
}
