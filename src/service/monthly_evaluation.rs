//! Monthly evaluation service.
//!
//! Wires the month lifecycle to the repositories: every operation validates
//! the period, loads the current record and checks the lifecycle transition
//! before it aggregates or writes anything.
//!
//! Callers must serialize operations per employee-month. Recalculating month
//! `N + 1` reads month `N`'s `flextime_end`, so adjacent months of the same
//! employee must not be recalculated concurrently.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    MonthKey, MonthOperation, MonthState, build_monthly_value, calculate_month, month_range,
    transition, validate_period, validate_year,
};
use crate::error::{EngineError, EngineResult};
use crate::models::MonthlyValue;
use crate::repository::{
    AbsenceRepository, DailyValueRepository, EmployeeRepository, MonthlyValueRepository,
};

/// One employee whose recalculation failed during a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee.
    pub employee_id: Uuid,
    /// The error message.
    pub error: String,
}

/// The outcome of recalculating one month for many employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Employees whose month was recalculated.
    pub recalculated: Vec<Uuid>,
    /// Employees whose month is closed and was left untouched.
    pub skipped_closed: Vec<Uuid>,
    /// Employees whose recalculation failed.
    pub failed: Vec<BatchFailure>,
}

/// Runs the month lifecycle operations against the repositories.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use flextime_engine::repository::InMemoryRepository;
/// use flextime_engine::service::MonthlyEvaluationService;
/// use uuid::Uuid;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = Arc::new(InMemoryRepository::new());
/// let employee = Uuid::new_v4();
/// repo.add_employee(employee, Uuid::new_v4()).await;
///
/// let service = MonthlyEvaluationService::from_repository(repo);
/// let value = service.recalculate(employee, 2026, 1).await.unwrap();
/// assert_eq!(value.flextime_start, 0);
/// assert!(!value.is_closed);
/// # });
/// ```
#[derive(Clone)]
pub struct MonthlyEvaluationService {
    daily_values: Arc<dyn DailyValueRepository>,
    absences: Arc<dyn AbsenceRepository>,
    employees: Arc<dyn EmployeeRepository>,
    monthly_values: Arc<dyn MonthlyValueRepository>,
}

impl MonthlyEvaluationService {
    /// Creates a service over separate repositories.
    pub fn new(
        daily_values: Arc<dyn DailyValueRepository>,
        absences: Arc<dyn AbsenceRepository>,
        employees: Arc<dyn EmployeeRepository>,
        monthly_values: Arc<dyn MonthlyValueRepository>,
    ) -> Self {
        Self {
            daily_values,
            absences,
            employees,
            monthly_values,
        }
    }

    /// Creates a service over one store implementing every repository.
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: DailyValueRepository
            + AbsenceRepository
            + EmployeeRepository
            + MonthlyValueRepository
            + 'static,
    {
        Self::new(
            repository.clone(),
            repository.clone(),
            repository.clone(),
            repository,
        )
    }

    /// Loads the current record and checks `operation` against its state.
    async fn guard(
        &self,
        key: MonthKey,
        operation: MonthOperation,
    ) -> EngineResult<Option<MonthlyValue>> {
        let existing = self
            .monthly_values
            .get_by_employee_month(key.employee_id, key.year, key.month)
            .await?;

        if let Err(err) = transition(MonthState::of(existing.as_ref()), operation, key) {
            warn!(
                employee_id = %key.employee_id,
                year = key.year,
                month = key.month,
                ?operation,
                error = %err,
                "Month lifecycle operation rejected"
            );
            return Err(err);
        }

        Ok(existing)
    }

    /// Returns the stored monthly value. Never triggers a calculation.
    pub async fn get_summary(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyValue> {
        validate_period(year, month)?;
        let key = MonthKey::new(employee_id, year, month);
        self.guard(key, MonthOperation::GetSummary)
            .await?
            .ok_or_else(|| key.not_found())
    }

    /// Recalculates and stores the monthly value.
    ///
    /// Fails with [`EngineError::MonthClosed`] without writing anything if
    /// the month is closed.
    pub async fn recalculate(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyValue> {
        validate_period(year, month)?;
        let key = MonthKey::new(employee_id, year, month);
        let existing = self.guard(key, MonthOperation::Recalculate).await?;

        let tenant_id = match &existing {
            Some(value) => value.tenant_id,
            None => self
                .employees
                .get_tenant_id(employee_id)
                .await?
                .ok_or(EngineError::EmployeeNotFound { employee_id })?,
        };

        info!(employee_id = %employee_id, year, month, "Recalculating monthly value");

        let (from, to) = month_range(year, month)?;
        let daily_values = self
            .daily_values
            .get_by_employee_date_range(employee_id, from, to)
            .await?;
        let absences = self
            .absences
            .get_by_employee_date_range(employee_id, from, to)
            .await?;
        let previous = self
            .monthly_values
            .get_previous_month(employee_id, year, month)
            .await?;

        let calculation = calculate_month(&daily_values, &absences, previous.as_ref());
        let value = build_monthly_value(
            existing.as_ref(),
            tenant_id,
            employee_id,
            year,
            month,
            &calculation,
            Utc::now(),
        );
        self.monthly_values.upsert(value.clone()).await?;

        info!(
            employee_id = %employee_id,
            year,
            month,
            days = daily_values.len(),
            flextime_start = value.flextime_start,
            flextime_change = value.flextime_change,
            flextime_end = value.flextime_end,
            "Monthly value recalculated"
        );

        Ok(value)
    }

    /// Closes the month.
    pub async fn close_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        closed_by: Uuid,
    ) -> EngineResult<MonthlyValue> {
        validate_period(year, month)?;
        let key = MonthKey::new(employee_id, year, month);
        self.guard(key, MonthOperation::Close).await?;

        let value = self
            .monthly_values
            .close_month(employee_id, year, month, closed_by, Utc::now())
            .await?;
        info!(employee_id = %employee_id, year, month, closed_by = %closed_by, "Month closed");
        Ok(value)
    }

    /// Reopens a closed month. The last close stays on record.
    pub async fn reopen_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        reopened_by: Uuid,
    ) -> EngineResult<MonthlyValue> {
        validate_period(year, month)?;
        let key = MonthKey::new(employee_id, year, month);
        self.guard(key, MonthOperation::Reopen).await?;

        let value = self
            .monthly_values
            .reopen_month(employee_id, year, month, reopened_by, Utc::now())
            .await?;
        info!(employee_id = %employee_id, year, month, reopened_by = %reopened_by, "Month reopened");
        Ok(value)
    }

    /// Returns every stored month of the year, ordered by month. Months
    /// without a record are absent rather than filled in.
    pub async fn year_overview(
        &self,
        employee_id: Uuid,
        year: i32,
    ) -> EngineResult<Vec<MonthlyValue>> {
        validate_year(year)?;
        self.monthly_values
            .list_by_employee_year(employee_id, year)
            .await
    }

    /// Recalculates `month` and then, in order, every later month of the
    /// same year that already has a record, so a changed balance reaches
    /// the end of the year. Closed later months are skipped; their frozen
    /// balance feeds the month after them.
    pub async fn recalculate_from_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<MonthlyValue>> {
        let mut recalculated = vec![self.recalculate(employee_id, year, month).await?];

        for later in (month + 1)..=12 {
            let existing = self
                .monthly_values
                .get_by_employee_month(employee_id, year, later)
                .await?;
            match MonthState::of(existing.as_ref()) {
                MonthState::Calculated => {
                    recalculated.push(self.recalculate(employee_id, year, later).await?);
                }
                MonthState::Closed => {
                    info!(employee_id = %employee_id, year, month = later, "Skipping closed month");
                }
                MonthState::Open => {}
            }
        }

        Ok(recalculated)
    }

    /// Recalculates one month for each employee, in the given order.
    ///
    /// An invalid period fails the whole batch before anything is read.
    /// Otherwise per-employee failures are collected, and closed months are
    /// reported as skipped.
    pub async fn recalculate_batch(
        &self,
        employee_ids: &[Uuid],
        year: i32,
        month: u32,
    ) -> EngineResult<BatchOutcome> {
        validate_period(year, month)?;

        let mut outcome = BatchOutcome::default();
        for &employee_id in employee_ids {
            match self.recalculate(employee_id, year, month).await {
                Ok(_) => outcome.recalculated.push(employee_id),
                Err(EngineError::MonthClosed { .. }) => outcome.skipped_closed.push(employee_id),
                Err(err) => outcome.failed.push(BatchFailure {
                    employee_id,
                    error: err.to_string(),
                }),
            }
        }

        info!(
            year,
            month,
            recalculated = outcome.recalculated.len(),
            skipped_closed = outcome.skipped_closed.len(),
            failed = outcome.failed.len(),
            "Batch recalculation finished"
        );

        Ok(outcome)
    }
}
