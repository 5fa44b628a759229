use crate::models::{FeeRecord, NewFee, StudentFeeStatus};

use super::{ApiResult, Gateway};

#[derive(Debug, Clone, PartialEq)]
pub struct FeeApi {
    gateway: Gateway,
}

impl FeeApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<FeeRecord>> {
        self.gateway.get_json("/fee/all", &[]).await
    }

    pub async fn create(&self, fee: &NewFee) -> ApiResult<FeeRecord> {
        self.gateway.create("/fee/add_fee/", fee).await
    }

    pub async fn delete(&self, fee_id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/fee/delete_fee/{}", fee_id)).await
    }

    /// Paid/unpaid status of every student in a class for one month
    pub async fn class_fee_status(
        &self,
        class_id: i64,
        month: &str,
        year: i32,
    ) -> ApiResult<Vec<StudentFeeStatus>> {
        self.gateway
            .get_json(
                &format!("/fee/class-fee-status/{}", class_id),
                &[("fee_month", month.to_string()), ("fee_year", year.to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{Method, StaticSession};
    use crate::models::FeeStatus;
    use serde_json::json;
    use std::rc::Rc;

    fn api(backend: &Rc<MockBackend>) -> FeeApi {
        FeeApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::with_token("token")),
        ))
    }

    #[tokio::test]
    async fn test_class_fee_status_query() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/fee/class-fee-status/1",
            200,
            json!([
                { "student_id": 101, "student_name": "Ben Carter", "father_name": "Tom Carter", "fee_status": "Paid" },
                { "student_id": 102, "student_name": "Ava Stone", "fee_status": "Unpaid" }
            ]),
        );

        let rows = api(&backend).class_fee_status(1, "January", 2025).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, FeeStatus::Paid);
        assert_eq!(rows[1].father_name, None);
        let request = backend.last_request().unwrap();
        assert_eq!(request.query_param("fee_month"), Some("January"));
        assert_eq!(request.query_param("fee_year"), Some("2025"));
    }

    #[tokio::test]
    async fn test_create_fee_is_stamped() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Post,
            "/fee/add_fee/",
            201,
            json!({
                "fee_id": 1,
                "fee_amount": 1500.0,
                "fee_month": "January",
                "fee_year": 2025,
                "fee_status": "Unpaid"
            }),
        );
        let fee = NewFee {
            student_id: 101,
            class_id: 1,
            amount: 1500.0,
            month: "January".to_string(),
            year: 2025,
        };

        let created = api(&backend).create(&fee).await.unwrap();

        assert_eq!(created.fee_id, 1);
        let body = backend.last_request().unwrap().json_body();
        assert_eq!(body["fee_amount"], 1500.0);
        assert!(body["created_at"].is_string());
    }
}
