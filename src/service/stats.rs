use crate::{
    error::AppResult,
    model::stats::{DashboardStats, EmployeeStats, attendance_rate},
    service::employee::fetch_employee,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Headcount and attendance split for `today`. The rate is relative to the
/// whole headcount, so unmarked employees lower it.
pub async fn dashboard_stats(pool: &SqlitePool, today: NaiveDate) -> AppResult<DashboardStats> {
    let mut tx = pool.begin().await?;

    let total_employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(&mut *tx)
        .await?;

    let (present, absent): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(status = 'present'), 0),
            COALESCE(SUM(status = 'absent'), 0)
        FROM attendance
        WHERE date = ?
        "#,
    )
    .bind(today)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(DashboardStats {
        total_employees,
        total_present_today: present,
        total_absent_today: absent,
        attendance_rate: attendance_rate(present, total_employees),
    })
}

pub async fn employee_stats(pool: &SqlitePool, employee_id: i64) -> AppResult<EmployeeStats> {
    let mut tx = pool.begin().await?;

    fetch_employee(&mut *tx, employee_id).await?;
    let (total_days, present_days, absent_days): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(status = 'present'), 0),
            COALESCE(SUM(status = 'absent'), 0)
        FROM attendance
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(EmployeeStats {
        employee_id,
        total_days,
        present_days,
        absent_days,
        attendance_rate: attendance_rate(present_days, total_days),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::error::AppError;
    use crate::model::attendance::AttendanceStatus::{self, Absent, Present};
    use crate::models::{CreateEmployee, MarkAttendance};
    use crate::service::attendance::mark_attendance;
    use crate::service::employee::create_employee;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    async fn hire(pool: &SqlitePool, n: usize) -> Vec<i64> {
        let mut ids = Vec::new();
        for i in 0..n {
            let input = CreateEmployee {
                employee_id: format!("E{i}"),
                full_name: format!("Person {i}"),
                email: format!("p{i}@x.com"),
                department: "Ops".into(),
            };
            ids.push(create_employee(pool, input).await.unwrap().id);
        }
        ids
    }

    async fn mark(pool: &SqlitePool, id: i64, date: NaiveDate, status: AttendanceStatus) {
        mark_attendance(pool, id, MarkAttendance { date, status })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn empty_system_has_zero_rate() {
        let pool = memory_pool().await;
        let stats = dashboard_stats(&pool, day(1)).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_employees: 0,
                total_present_today: 0,
                total_absent_today: 0,
                attendance_rate: 0.0,
            }
        );
    }

    #[actix_web::test]
    async fn dashboard_counts_only_today() {
        let pool = memory_pool().await;
        let ids = hire(&pool, 3).await;
        mark(&pool, ids[0], day(2), Present).await;
        mark(&pool, ids[1], day(2), Absent).await;
        mark(&pool, ids[2], day(1), Present).await;

        let stats = dashboard_stats(&pool, day(2)).await.unwrap();
        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.total_present_today, 1);
        assert_eq!(stats.total_absent_today, 1);
        assert_eq!(stats.attendance_rate, 33.33);
    }

    #[actix_web::test]
    async fn employee_stats_cover_whole_history() {
        let pool = memory_pool().await;
        let ids = hire(&pool, 1).await;
        mark(&pool, ids[0], day(1), Present).await;
        mark(&pool, ids[0], day(2), Present).await;
        mark(&pool, ids[0], day(3), Absent).await;

        let stats = employee_stats(&pool, ids[0]).await.unwrap();
        assert_eq!(
            stats,
            EmployeeStats {
                employee_id: ids[0],
                total_days: 3,
                present_days: 2,
                absent_days: 1,
                attendance_rate: 66.67,
            }
        );
    }

    #[actix_web::test]
    async fn employee_without_history_has_zero_rate() {
        let pool = memory_pool().await;
        let ids = hire(&pool, 1).await;
        let stats = employee_stats(&pool, ids[0]).await.unwrap();
        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.attendance_rate, 0.0);
    }

    #[actix_web::test]
    async fn stats_for_unknown_employee_is_not_found() {
        let pool = memory_pool().await;
        let err = employee_stats(&pool, 11).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { id: 11, .. }));
    }
}
