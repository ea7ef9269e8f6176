//! Employee handlers - HTTP endpoints under `/employees`
//!
//! Each handler parses the input, validates the employee and calls the
//! service. Failures become responses here and nowhere else: validation and
//! malformed bodies are 400, a missing employee on read is 404, and any
//! store failure is logged and reported as 400.

use crate::core::{AppError, AppState};
use crate::dtos::EmployeeQuery;
use crate::entities::Employee;
use crate::store::DocumentStore;
use crate::validation::Validatable;
use axum::{
    extract::{Json, Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, payload))]
pub async fn create_employee<S: DocumentStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, AppError> {
    let Json(employee) = payload.inspect_err(|e| warn!("Rejected create body: {}", e))?;

    employee.validate().into_result().inspect_err(|failure| {
        debug!("{}", failure);
    })?;

    let created = state.employees.create(employee).await.map_err(|err| {
        error!(operation = %err.operation(), "Failed to create employee: {}", err);
        AppError::operation_failed("Failed to create employee", &err)
    })?;

    info!(id = ?created.id, "Processed a request to create an employee");
    Ok(Json(created))
}

#[instrument(skip(state))]
pub async fn get_employee_by_id<S: DocumentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, AppError> {
    let employee = state.employees.get_by_id(&id).await.map_err(|err| {
        error!("Failed to fetch employee {}: {}", id, err);
        AppError::operation_failed(format!("Failed to fetch employee with id: {}", id), &err)
    })?;

    match employee {
        Some(employee) => {
            info!("Processed a request to fetch an employee");
            Ok(Json(employee))
        }
        None => {
            debug!("Employee not found");
            Err(AppError::not_found(format!("Employee with id {} not found", id)))
        }
    }
}

/// Lists every employee, or only the matching ones when filters are given
#[instrument(skip(state))]
pub async fn list_employees<S: DocumentStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<EmployeeQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    query.validate()?;

    let result = if query.is_empty() {
        state.employees.get_all().await
    } else {
        state
            .employees
            .get_by_condition(move |employee: &Employee| query.matches(employee))
            .await
    };

    let employees = result.map_err(|err| {
        error!("Failed to fetch employees: {}", err);
        AppError::operation_failed("Failed to fetch all employees", &err)
    })?;

    info!("Processed a request to fetch {} employees", employees.len());
    Ok(Json(employees))
}

/// Replaces the employee; the id in the path wins over any id in the body
#[instrument(skip(state, payload))]
pub async fn update_employee<S: DocumentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, AppError> {
    let Json(mut employee) = payload.inspect_err(|e| warn!("Rejected update body: {}", e))?;

    if employee.id.as_deref().is_some_and(|body_id| body_id != id) {
        debug!(body_id = ?employee.id, "Body id overridden by path id");
    }
    employee.id = Some(id.clone());

    employee.validate().into_result().inspect_err(|failure| {
        debug!("{}", failure);
    })?;

    let updated = state.employees.update(employee).await.map_err(|err| {
        error!(operation = %err.operation(), "Failed to update employee {}: {}", id, err);
        AppError::operation_failed(format!("Failed to update employee with id: {}", id), &err)
    })?;

    info!("Processed a request to update an employee");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_employee<S: DocumentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.employees.delete(&id).await.map_err(|err| {
        error!("Failed to delete employee {}: {}", id, err);
        AppError::operation_failed(format!("Failed to delete employee with id: {}", id), &err)
    })?;

    info!("Processed a request to delete an employee");
    Ok(StatusCode::NO_CONTENT)
}
