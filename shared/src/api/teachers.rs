use crate::models::{NewTeacher, Teacher};

use super::{ApiResult, Gateway};

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherApi {
    gateway: Gateway,
}

impl TeacherApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<Teacher>> {
        self.gateway.get_json("/teacher_name/teacher-names-all/", &[]).await
    }

    pub async fn create(&self, teacher: &NewTeacher) -> ApiResult<Teacher> {
        self.gateway.create("/teacher_name/add_teacher_name/", teacher).await
    }

    pub async fn delete(&self, teacher_id: i64) -> ApiResult<()> {
        self.gateway
            .delete(&format!("/teacher_name/del/{}", teacher_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{ApiError, Method, StaticSession};
    use serde_json::json;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_get_failure_is_returned_as_err() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/teacher_name/teacher-names-all/",
            500,
            json!({ "detail": "database unavailable" }),
        );
        let api = TeacherApi::new(Gateway::new(
            "http://localhost:8000",
            backend.clone(),
            Rc::new(StaticSession::default()),
        ));

        let result = api.get().await;

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 500,
                message: "database unavailable".to_string()
            })
        );
    }
}
