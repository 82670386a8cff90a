//! Employee registration and dashboard endpoints. These are public.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::{Employee, NewEmployee};

use super::handlers::{tax_error, json_body, path_param};
use super::response::{ApiErrorResponse, EmployeeWithTax};
use super::state::AppState;

/// Handler for POST /employees/register.
///
/// Stores the employee and the tax computed from their salary.
pub(super) async fn register_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<Json<Employee>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee registration");

    let new_employee = json_body(payload, correlation_id)?;
    new_employee
        .validate()
        .map_err(|err| tax_error(correlation_id, err))?;

    let (employee, tax) = state
        .store()
        .register_employee(new_employee, Utc::now())
        .map_err(|err| tax_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.employee_id,
        calculated_tax = %tax.calculated_tax,
        tax_rate = %tax.tax_rate,
        "Employee registered"
    );
    Ok(Json(employee))
}

/// Handler for GET /employees.
pub(super) async fn list_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store().employees())
}

/// Handler for GET /employees/records.
pub(super) async fn employee_records_handler(
    State(state): State<AppState>,
) -> Json<Vec<EmployeeWithTax>> {
    Json(
        state
            .store()
            .employees_with_tax()
            .into_iter()
            .map(EmployeeWithTax::from)
            .collect(),
    )
}

/// Handler for GET /employees/:id.
pub(super) async fn get_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Employee>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(path, correlation_id)?;

    let employee = state
        .store()
        .employee(id)
        .map_err(|err| tax_error(correlation_id, err))?;
    Ok(Json(employee))
}

/// Handler for GET /employees/:id/dashboard.
pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<EmployeeWithTax>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(path, correlation_id)?;

    let dashboard = state
        .store()
        .employee_with_tax(id)
        .map_err(|err| tax_error(correlation_id, err))?;
    Ok(Json(dashboard.into()))
}

#[cfg(test)]
mod tests {
    use crate::api::response::{ApiError, EmployeeWithTax};
    use crate::api::{AppState, create_router};
    use crate::config::ConfigLoader;
    use crate::models::Employee;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let config = ConfigLoader::load("./config/app.yaml").expect("Failed to load config");
        create_router(AppState::new(config))
    }

    fn employee_body(tax_number: &str, salary: &str) -> String {
        format!(
            r#"{{
                "full_name": "Asha Verma",
                "tax_number": "{tax_number}",
                "years_of_experience": 4,
                "skills": "rust,sql",
                "salary": "{salary}"
            }}"#
        )
    }

    async fn register(router: &Router, body: String) -> Response {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/employees/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(router: &Router, uri: &str) -> Response {
        router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_dashboard() {
        let router = create_test_router();
        let response = register(&router, employee_body("TN-1", "600000")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let employee: Employee = read_json(response).await;
        assert_eq!(employee.full_name, "Asha Verma");

        let dashboard: EmployeeWithTax = read_json(
            get(&router, &format!("/employees/{}/dashboard", employee.employee_id)).await,
        )
        .await;
        let tax = dashboard.tax.unwrap();
        assert_eq!(dashboard.employee, employee);
        assert_eq!(tax.calculated_tax, dec!(32499.75));
        assert_eq!(tax.tax_rate, dec!(5.42));
    }

    #[tokio::test]
    async fn test_duplicate_tax_number_returns_400() {
        let router = create_test_router();
        register(&router, employee_body("TN-1", "600000")).await;

        let response = register(&router, employee_body("TN-1", "300000")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "DUPLICATE_TAX_NUMBER");
    }

    #[tokio::test]
    async fn test_non_positive_salary_returns_400() {
        let router = create_test_router();
        let response = register(&router, employee_body("TN-1", "0")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_listing_endpoints() {
        let router = create_test_router();
        register(&router, employee_body("TN-1", "600000")).await;
        register(&router, employee_body("TN-2", "100000")).await;

        let employees: Vec<Employee> = read_json(get(&router, "/employees").await).await;
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].tax_number, "TN-1");

        let records: Vec<EmployeeWithTax> =
            read_json(get(&router, "/employees/records").await).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].tax.as_ref().unwrap().calculated_tax, dec!(0));
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let router = create_test_router();

        let response = get(&router, "/employees/42").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");

        let response = get(&router, "/employees/42/dashboard").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
