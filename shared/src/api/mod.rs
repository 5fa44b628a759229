//! Typed access to the school backend.
//!
//! Every resource API goes through one [`Gateway`] and returns
//! [`ApiResult`]; a failed call is always an `Err`, never an error value
//! standing in for data.

pub mod attendance;
pub mod attendance_times;
pub mod class_names;
pub mod dashboard;
pub mod expenses;
pub mod fees;
pub mod gateway;
pub mod income;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod students;
pub mod teachers;

pub use attendance::AttendanceApi;
pub use attendance_times::AttendanceTimeApi;
pub use class_names::ClassNameApi;
pub use dashboard::DashboardApi;
pub use expenses::ExpenseApi;
pub use fees::FeeApi;
pub use gateway::{
    Clock, FixedClock, Gateway, HttpRequest, HttpResponse, HttpTransport, Method, SessionProvider,
    StaticSession, SystemClock,
};
pub use income::IncomeApi;
pub use students::StudentApi;
pub use teachers::TeacherApi;

use serde_json::Value;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Classify a non-2xx response, preferring the backend's `detail` text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(Value::String(detail)) => Some(detail.clone()),
                Some(other) => Some(other.to_string()),
                None => None,
            });

        let message = match detail {
            Some(detail) => detail,
            None if body.trim().is_empty() => "Unknown error".to_string(),
            None => body.trim().to_string(),
        };

        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Every resource API, built over one gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolApi {
    pub classes: ClassNameApi,
    pub timings: AttendanceTimeApi,
    pub teachers: TeacherApi,
    pub students: StudentApi,
    pub attendance: AttendanceApi,
    pub fees: FeeApi,
    pub income: IncomeApi,
    pub expenses: ExpenseApi,
    pub dashboard: DashboardApi,
}

impl SchoolApi {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            classes: ClassNameApi::new(gateway.clone()),
            timings: AttendanceTimeApi::new(gateway.clone()),
            teachers: TeacherApi::new(gateway.clone()),
            students: StudentApi::new(gateway.clone()),
            attendance: AttendanceApi::new(gateway.clone()),
            fees: FeeApi::new(gateway.clone()),
            income: IncomeApi::new(gateway.clone()),
            expenses: ExpenseApi::new(gateway.clone()),
            dashboard: DashboardApi::new(gateway),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_prefers_detail() {
        let error = ApiError::from_status(404, r#"{"detail":"Student not found"}"#);
        assert_eq!(
            error,
            ApiError::Status {
                status: 404,
                message: "Student not found".to_string()
            }
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn test_from_status_with_structured_detail() {
        let error = ApiError::from_status(422, r#"{"detail":[{"loc":["body","date"]}]}"#);
        assert_eq!(error.status(), Some(422));
        assert!(error.to_string().contains("loc"));
    }

    #[test]
    fn test_from_status_with_plain_or_empty_body() {
        assert_eq!(
            ApiError::from_status(500, "Internal Server Error").to_string(),
            "Server error 500: Internal Server Error"
        );
        assert_eq!(
            ApiError::from_status(502, "  ").to_string(),
            "Server error 502: Unknown error"
        );
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::Transport("offline".to_string()).is_unauthorized());
    }
}
