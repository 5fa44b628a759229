use crate::models::{ClassName, NewClassName};

use super::{ApiResult, Gateway};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassNameApi {
    gateway: Gateway,
}

impl ClassNameApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<ClassName>> {
        self.gateway.get_json("/class_name/class-names-all/", &[]).await
    }

    pub async fn create(&self, class: &NewClassName) -> ApiResult<ClassName> {
        self.gateway.create("/class_name/add_class_name/", class).await
    }

    pub async fn delete(&self, class_id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/class_name/del/{}", class_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{Method, StaticSession};
    use serde_json::json;
    use std::rc::Rc;

    fn api(backend: &Rc<MockBackend>) -> ClassNameApi {
        ClassNameApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::with_token("token")),
        ))
    }

    #[tokio::test]
    async fn test_get_is_repeatable_and_ordered() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/class_name/class-names-all/",
            200,
            json!([
                { "class_name_id": 2, "class_name": "Class 9" },
                { "class_name_id": 1, "class_name": "Class 8" }
            ]),
        );
        let api = api(&backend);

        let first = api.get().await.unwrap();
        let second = api.get().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|class| class.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_class_is_an_error() {
        let backend = Rc::new(MockBackend::new());
        let api = api(&backend);

        let error = api.delete(99).await.unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(backend.requests_to(Method::Delete, "/class_name/del/99").len(), 1);
    }
}
