use crate::models::{IncomeCategory, IncomeRecord, IncomeUpdate, NewIncome, NewIncomeCategory};

use super::{ApiResult, Gateway, Method};

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeApi {
    gateway: Gateway,
}

impl IncomeApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<IncomeRecord>> {
        self.gateway.get_json("/income/all", &[]).await
    }

    pub async fn get_by_category(&self, category_id: i64) -> ApiResult<Vec<IncomeRecord>> {
        self.gateway
            .get_json("/income/filter_income", &[("category_id", category_id.to_string())])
            .await
    }

    pub async fn create(&self, income: &NewIncome) -> ApiResult<IncomeRecord> {
        self.gateway.create("/income/", income).await
    }

    pub async fn update(&self, income_id: i64, update: &IncomeUpdate) -> ApiResult<IncomeRecord> {
        self.gateway
            .update(Method::Patch, &format!("/income/update/{}", income_id), update)
            .await
    }

    pub async fn delete(&self, income_id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/income/delete/{}", income_id)).await
    }

    pub async fn get_categories(&self) -> ApiResult<Vec<IncomeCategory>> {
        self.gateway
            .get_json("/income_cat_names/income-cat-names-all/", &[])
            .await
    }

    pub async fn create_category(&self, category: &NewIncomeCategory) -> ApiResult<IncomeCategory> {
        self.gateway
            .create("/income_cat_names/add_income_cat_name/", category)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::StaticSession;
    use serde_json::json;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let backend = Rc::new(MockBackend::new());
        backend.on_with(Method::Delete, "/income/delete/3", |_| {
            crate::api::HttpResponse::new(204, "")
        });
        let api = IncomeApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::default()),
        ));

        assert_eq!(api.delete(3).await, Ok(()));
    }

    #[tokio::test]
    async fn test_get_by_category_uses_filter_endpoint() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/income/filter_income",
            200,
            json!([{
                "id": 1,
                "created_at": "2025-01-02T10:00:00",
                "recipt_number": 55,
                "date": "2025-01-02T00:00:00",
                "category": "Donations",
                "source": "Parent council",
                "amount": 25000.0
            }]),
        );
        let api = IncomeApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::default()),
        ));

        let records = api.get_by_category(4).await.unwrap();

        assert_eq!(records[0].receipt_number, Some(55));
        assert_eq!(records[0].description, None);
        assert_eq!(backend.last_request().unwrap().query_param("category_id"), Some("4"));
    }
}
