use chrono::NaiveDate;

use crate::summary::{
    AttendanceSummaryReport, CategorySummaryReport, FeeCollectionSummary, IncomeExpenseSummary,
    StudentSummaryReport,
};

use super::{ApiResult, Gateway};

/// Read-only reports for the overview page. Admin-only on the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardApi {
    gateway: Gateway,
}

fn year_and_month(year: i32, month: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("year", year.to_string())];
    if let Some(month) = month {
        query.push(("month", month.to_string()));
    }
    query
}

impl DashboardApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn student_summary(&self, date: NaiveDate) -> ApiResult<StudentSummaryReport> {
        self.gateway
            .get_json(
                "/auth/dashboard/student-summary",
                &[("date", date.format("%Y-%m-%d").to_string())],
            )
            .await
    }

    /// Per-class counts for the backend's current day.
    pub async fn attendance_summary(&self) -> ApiResult<AttendanceSummaryReport> {
        self.gateway
            .get_json("/auth/dashboard/attendance-summary", &[])
            .await
    }

    pub async fn income_expense_summary(&self, year: i32) -> ApiResult<IncomeExpenseSummary> {
        self.gateway
            .get_json(
                "/auth/dashboard/income-expense-summary",
                &[("year", year.to_string())],
            )
            .await
    }

    pub async fn fee_summary(&self, year: i32) -> ApiResult<FeeCollectionSummary> {
        self.gateway
            .get_json("/auth/dashboard/fee-summary", &[("year", year.to_string())])
            .await
    }

    /// Totals for the whole year when `month` is `None`.
    pub async fn income_summary(
        &self,
        year: i32,
        month: Option<u32>,
    ) -> ApiResult<CategorySummaryReport> {
        self.gateway
            .get_json("/auth/dashboard/income-summary", &year_and_month(year, month))
            .await
    }

    pub async fn expense_summary(
        &self,
        year: i32,
        month: Option<u32>,
    ) -> ApiResult<CategorySummaryReport> {
        self.gateway
            .get_json("/auth/dashboard/expense-summary", &year_and_month(year, month))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{Method, StaticSession};
    use serde_json::json;
    use std::rc::Rc;

    fn api(backend: &Rc<MockBackend>) -> DashboardApi {
        DashboardApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::with_token("token")),
        ))
    }

    #[tokio::test]
    async fn test_student_summary_for_date() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/auth/dashboard/student-summary",
            200,
            json!({
                "summary": { "total_students": 40, "present": 30, "absent": 4, "late": 1, "sick": 0, "leave": 1 },
                "graph": {
                    "labels": ["Present", "Absent", "Late", "Sick", "Leave", "Unmarked"],
                    "datasets": [{
                        "label": "Student Attendance for 2025-01-21 (Total Students: 40)",
                        "data": [30, 4, 1, 0, 1, 4],
                        "backgroundColor": ["a", "b", "c", "d", "e"],
                        "borderWidth": 1
                    }],
                    "title": "Student Attendance Distribution for 2025-01-21"
                }
            }),
        );
        let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();

        let report = api(&backend).student_summary(date).await.unwrap();

        assert_eq!(report.summary.unmarked(), 4);
        assert_eq!(report.graph.points(None).last(), Some(&("Unmarked", 4.0)));
        let request = backend.last_request().unwrap();
        assert_eq!(request.query_param("date"), Some("2025-01-21"));
        assert_eq!(request.header("Authorization"), Some("Bearer token"));
    }

    #[tokio::test]
    async fn test_income_summary_month_is_optional() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/auth/dashboard/income-summary",
            200,
            json!({
                "summary": [{ "year": 2025, "month": 0, "category_summary": { "Donations": 5000.0 } }],
                "graph": { "labels": ["Donations"], "datasets": [], "title": "Income Category Details for 2025" },
                "total": 5000.0
            }),
        );
        let api = api(&backend);

        let report = api.income_summary(2025, None).await.unwrap();
        assert_eq!(report.total, 5000.0);
        let request = backend.last_request().unwrap();
        assert_eq!(request.query_param("year"), Some("2025"));
        assert_eq!(request.query_param("month"), None);

        api.income_summary(2025, Some(3)).await.unwrap();
        assert_eq!(backend.last_request().unwrap().query_param("month"), Some("3"));
    }

    #[tokio::test]
    async fn test_fee_summary_rejected_year_is_an_error() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/auth/dashboard/fee-summary",
            400,
            json!({ "detail": "Invalid year: 1990. Year must be between 2000 and 2030" }),
        );

        let err = api(&backend).fee_summary(1990).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Invalid year: 1990"));
    }

    #[tokio::test]
    async fn test_expense_and_attendance_reports_decode() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/auth/dashboard/expense-summary",
            200,
            json!({
                "summary": [{ "year": 2025, "month": 1, "category_summary": { "Utilities": 9000.0, "Salaries": 30000.0 } }],
                "graph": { "labels": ["Utilities", "Salaries"], "datasets": [], "title": "Expense Category Details for 2025-01" },
                "total": 39000.0
            }),
        );
        backend.on(
            Method::Get,
            "/auth/dashboard/attendance-summary",
            200,
            json!({
                "summary": [{ "date": "2025-01-21", "class_name": "Class 1", "attendance_values": { "Present": 20 } }],
                "graph": { "labels": ["Class 1"], "datasets": [], "title": "Attendance Summary" }
            }),
        );
        let api = api(&backend);

        let expenses = api.expense_summary(2025, Some(1)).await.unwrap();
        let attendance = api.attendance_summary().await.unwrap();

        assert_eq!(expenses.ranked()[0], ("Salaries", 30000.0));
        assert_eq!(attendance.summary[0].count("Present"), 20);
    }
}
