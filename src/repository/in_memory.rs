// In memory implementation of every repository the service needs.
//
// Rows live in maps keyed by their natural identity. An offline switch makes
// every call fail, to exercise error propagation without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::calculation::previous_month;
use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceDay, DailyValue, MonthlyValue};

use super::{AbsenceRepository, DailyValueRepository, EmployeeRepository, MonthlyValueRepository};

type MonthId = (Uuid, i32, u32);

/// In-memory store backing all four repository traits.
#[derive(Default)]
pub struct InMemoryRepository {
    employees: RwLock<HashMap<Uuid, Uuid>>,
    daily_values: RwLock<HashMap<(Uuid, NaiveDate), DailyValue>>,
    absences: RwLock<HashMap<(Uuid, NaiveDate), AbsenceDay>>,
    monthly_values: RwLock<HashMap<MonthId, MonthlyValue>>,
    upserts: AtomicUsize,
    is_offline: AtomicBool,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    /// Returns how many monthly upserts have been performed.
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// Registers an employee under a tenant.
    pub async fn add_employee(&self, employee_id: Uuid, tenant_id: Uuid) {
        self.employees.write().await.insert(employee_id, tenant_id);
    }

    /// Stores a daily value, replacing the one for the same day.
    pub async fn put_daily_value(&self, value: DailyValue) {
        self.daily_values
            .write()
            .await
            .insert((value.employee_id, value.value_date), value);
    }

    /// Stores an absence day, replacing the one for the same day.
    pub async fn put_absence(&self, absence: AbsenceDay) {
        self.absences
            .write()
            .await
            .insert((absence.employee_id, absence.absence_date), absence);
    }

    fn ensure_online(&self, what: &str) -> EngineResult<()> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(EngineError::Repository {
                message: format!("{} repository offline", what),
            });
        }
        Ok(())
    }

    async fn update_month<F>(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        update: F,
    ) -> EngineResult<MonthlyValue>
    where
        F: FnOnce(&mut MonthlyValue) + Send,
    {
        self.ensure_online("Monthly value")?;
        let mut guard = self.monthly_values.write().await;
        let value = guard.get_mut(&(employee_id, year, month)).ok_or(
            EngineError::MonthlyValueNotFound {
                employee_id,
                year,
                month,
            },
        )?;
        update(value);
        Ok(value.clone())
    }
}

fn in_range(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    from <= date && date <= to
}

#[async_trait]
impl DailyValueRepository for InMemoryRepository {
    async fn get_by_employee_date_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DailyValue>> {
        self.ensure_online("Daily value")?;
        let mut values: Vec<DailyValue> = self
            .daily_values
            .read()
            .await
            .values()
            .filter(|v| v.employee_id == employee_id && in_range(v.value_date, from, to))
            .cloned()
            .collect();
        values.sort_by_key(|v| v.value_date);
        Ok(values)
    }
}

#[async_trait]
impl AbsenceRepository for InMemoryRepository {
    async fn get_by_employee_date_range(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AbsenceDay>> {
        self.ensure_online("Absence")?;
        let mut absences: Vec<AbsenceDay> = self
            .absences
            .read()
            .await
            .values()
            .filter(|a| a.employee_id == employee_id && in_range(a.absence_date, from, to))
            .cloned()
            .collect();
        absences.sort_by_key(|a| a.absence_date);
        Ok(absences)
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn get_tenant_id(&self, employee_id: Uuid) -> EngineResult<Option<Uuid>> {
        self.ensure_online("Employee")?;
        Ok(self.employees.read().await.get(&employee_id).copied())
    }
}

#[async_trait]
impl MonthlyValueRepository for InMemoryRepository {
    async fn get_by_employee_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<MonthlyValue>> {
        self.ensure_online("Monthly value")?;
        Ok(self
            .monthly_values
            .read()
            .await
            .get(&(employee_id, year, month))
            .cloned())
    }

    async fn get_previous_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<MonthlyValue>> {
        let (prev_year, prev_month) = previous_month(year, month);
        self.get_by_employee_month(employee_id, prev_year, prev_month)
            .await
    }

    async fn upsert(&self, value: MonthlyValue) -> EngineResult<()> {
        self.ensure_online("Monthly value")?;
        self.monthly_values
            .write()
            .await
            .insert((value.employee_id, value.year, value.month), value);
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_by_employee_year(
        &self,
        employee_id: Uuid,
        year: i32,
    ) -> EngineResult<Vec<MonthlyValue>> {
        self.ensure_online("Monthly value")?;
        let mut values: Vec<MonthlyValue> = self
            .monthly_values
            .read()
            .await
            .values()
            .filter(|v| v.employee_id == employee_id && v.year == year)
            .cloned()
            .collect();
        values.sort_by_key(|v| v.month);
        Ok(values)
    }

    async fn close_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        closed_by: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<MonthlyValue> {
        self.update_month(employee_id, year, month, |v| v.mark_closed(closed_by, at))
            .await
    }

    async fn reopen_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
        reopened_by: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<MonthlyValue> {
        self.update_month(employee_id, year, month, |v| {
            v.mark_reopened(reopened_by, at)
        })
        .await
    }
}
