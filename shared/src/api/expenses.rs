use crate::models::{ExpenseCategory, ExpenseRecord, ExpenseUpdate, NewExpense, NewExpenseCategory};

use super::{ApiResult, Gateway, Method};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseApi {
    gateway: Gateway,
}

impl ExpenseApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<ExpenseRecord>> {
        self.gateway.get_json("/expenses/expenses-all/", &[]).await
    }

    pub async fn get_by_category(&self, category_id: i64) -> ApiResult<Vec<ExpenseRecord>> {
        self.gateway
            .get_list(&format!("/expenses/filter-by-category/{}", category_id), &[])
            .await
    }

    pub async fn create(&self, expense: &NewExpense) -> ApiResult<ExpenseRecord> {
        self.gateway.create("/expenses/add_expense/", expense).await
    }

    // The expense endpoint takes PUT, unlike income and students.
    pub async fn update(&self, expense_id: i64, update: &ExpenseUpdate) -> ApiResult<ExpenseRecord> {
        self.gateway
            .update(Method::Put, &format!("/expenses/update/{}", expense_id), update)
            .await
    }

    pub async fn delete(&self, expense_id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/expenses/del/{}", expense_id)).await
    }

    pub async fn get_categories(&self) -> ApiResult<Vec<ExpenseCategory>> {
        self.gateway
            .get_json("/expense_cat_names/expense-cat-names-all/", &[])
            .await
    }

    pub async fn create_category(
        &self,
        category: &NewExpenseCategory,
    ) -> ApiResult<ExpenseCategory> {
        self.gateway
            .create("/expense_cat_names/add_expense_cat_name/", category)
            .await
    }
}
