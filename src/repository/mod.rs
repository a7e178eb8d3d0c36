//! Repository interfaces consumed by the evaluation service.
//!
//! Persistence is owned by the surrounding application; the engine only
//! codes against these traits. [`InMemoryRepository`] implements all of them
//! for tests and local tooling.

mod in_memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AbsenceDay, DailyValue, MonthlyValue};

pub use in_memory::InMemoryRepository;

/// Read access to evaluated days.
#[async_trait]
pub trait DailyValueRepository: Send + Sync {
    /// Returns the employee's daily values with `from <= date <= to`.
    async fn get_by_employee_date_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DailyValue>>;
}

/// Read access to absence days.
#[async_trait]
pub trait AbsenceRepository: Send + Sync {
    /// Returns the employee's absence days of any status with
    /// `from <= date <= to`.
    async fn get_by_employee_date_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AbsenceDay>>;
}

/// Employee lookups.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Returns the employee's tenant, or `None` if the employee is unknown.
    async fn get_tenant_id(&self, employee_id: Uuid) -> EngineResult<Option<Uuid>>;
}

/// Storage for monthly values.
#[async_trait]
pub trait MonthlyValueRepository: Send + Sync {
    /// Returns the record for the employee-month, if any.
    async fn get_by_employee_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<MonthlyValue>>;

    /// Returns the record of the calendar month before `year`/`month`.
    async fn get_previous_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<MonthlyValue>>;

    /// Inserts or replaces the record keyed by employee, year and month.
    async fn upsert(&self, value: MonthlyValue) -> EngineResult<()>;

    /// Returns every record of the employee in `year`, ordered by month.
    async fn list_by_employee_year(
        &self,
        employee_id: Uuid,
        year: i32,
    ) -> EngineResult<Vec<MonthlyValue>>;

    /// Marks the month closed and returns the updated record.
    async fn close_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        closed_by: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<MonthlyValue>;

    /// Marks the month reopened and returns the updated record.
    async fn reopen_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        reopened_by: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<MonthlyValue>;
}
