use crate::models::{NewStudent, Student, StudentUpdate};

use super::{ApiResult, Gateway, Method};

#[derive(Debug, Clone, PartialEq)]
pub struct StudentApi {
    gateway: Gateway,
}

impl StudentApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<Student>> {
        self.gateway.get_json("/students/all_students/", &[]).await
    }

    /// Students enrolled in one class; the attendance roster source.
    pub async fn get_by_class(&self, class_id: i64) -> ApiResult<Vec<Student>> {
        self.gateway
            .get_list("/students/by_class_id/", &[("class_id", class_id.to_string())])
            .await
    }

    pub async fn create(&self, student: &NewStudent) -> ApiResult<Student> {
        self.gateway.create("/students/add/", student).await
    }

    pub async fn update(&self, student_id: i64, update: &StudentUpdate) -> ApiResult<Student> {
        self.gateway
            .update(Method::Patch, &format!("/students/{}", student_id), update)
            .await
    }

    pub async fn delete(&self, student_id: i64) -> ApiResult<()> {
        self.gateway.delete(&format!("/students/{}", student_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{FixedClock, StaticSession};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::rc::Rc;

    fn student_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "student_id": id,
            "student_name": name,
            "student_date_of_birth": "2012-04-02T00:00:00",
            "student_age": "12",
            "student_gender": "Male",
            "student_education": "Grade 7",
            "class_name": "Class 8",
            "student_city": "Karachi",
            "student_address": "House 4, Street 9",
            "father_name": "Tom Carter",
            "father_occupation": "Engineer",
            "father_cnic": "42101-1234567-1",
            "father_cast_name": "Carter",
            "father_contact": "0300-1234567"
        })
    }

    fn new_student() -> NewStudent {
        NewStudent {
            name: "Ben Carter".to_string(),
            date_of_birth: "2012-04-02T00:00:00".to_string(),
            age: "12".to_string(),
            gender: "Male".to_string(),
            education: "Grade 7".to_string(),
            class_name: "Class 8".to_string(),
            city: "Karachi".to_string(),
            address: "House 4, Street 9".to_string(),
            father_name: "Tom Carter".to_string(),
            father_occupation: "Engineer".to_string(),
            father_cnic: "42101-1234567-1".to_string(),
            father_cast_name: "Carter".to_string(),
            father_contact: "0300-1234567".to_string(),
        }
    }

    fn api(backend: &Rc<MockBackend>) -> StudentApi {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 21, 9, 0, 0).unwrap());
        StudentApi::new(
            Gateway::new(
                "http://localhost:8000",
                backend.clone(),
                Rc::new(StaticSession::with_token("token")),
            )
            .with_clock(Rc::new(clock)),
        )
    }

    #[tokio::test]
    async fn test_get_by_class_sends_class_id_query() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/students/by_class_id/",
            200,
            json!([student_json(101, "Ben Carter")]),
        );

        let students = api(&backend).get_by_class(1).await.unwrap();

        assert_eq!(students.len(), 1);
        assert_eq!(students[0].student_id, 101);
        assert_eq!(students[0].name, "Ben Carter");
        let request = backend.last_request().unwrap();
        assert_eq!(request.query_param("class_id"), Some("1"));
    }

    #[tokio::test]
    async fn test_empty_class_is_an_empty_roster() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/students/by_class_id/",
            404,
            json!({ "detail": "No students found for the specified class" }),
        );

        let students = api(&backend).get_by_class(3).await.unwrap();

        assert!(students.is_empty());
    }

    #[tokio::test]
    async fn test_roster_server_error_still_fails() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Get,
            "/students/by_class_id/",
            500,
            json!({ "detail": "Database unavailable" }),
        );

        let error = api(&backend).get_by_class(3).await.unwrap_err();

        assert_eq!(error.status(), Some(500));
    }

    #[tokio::test]
    async fn test_create_adds_timestamp_distinct_from_input_dates() {
        let backend = Rc::new(MockBackend::new());
        backend.on(Method::Post, "/students/add/", 200, student_json(5, "Ben Carter"));

        let created = api(&backend).create(&new_student()).await.unwrap();

        assert_eq!(created.student_id, 5);
        let body = backend.last_request().unwrap().json_body();
        assert_eq!(body["student_name"], "Ben Carter");
        assert_eq!(body["created_at"], "2025-01-21T09:00:00.000Z");
        assert_ne!(body["created_at"], body["student_date_of_birth"]);
    }

    #[tokio::test]
    async fn test_update_patches_student_path() {
        let backend = Rc::new(MockBackend::new());
        backend.on(Method::Patch, "/students/5", 200, student_json(5, "Ben Carter"));
        let update = StudentUpdate {
            city: Some("Karachi".to_string()),
            ..StudentUpdate::default()
        };

        api(&backend).update(5, &update).await.unwrap();

        let body = backend.last_request().unwrap().json_body();
        assert_eq!(body["student_city"], "Karachi");
        assert_eq!(body["updated_at"], "2025-01-21T09:00:00.000Z");
        assert!(body.get("student_name").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_student_surfaces_failure() {
        let backend = Rc::new(MockBackend::new());
        backend.on(
            Method::Delete,
            "/students/404",
            404,
            json!({ "detail": "Student not found" }),
        );

        let error = api(&backend).delete(404).await.unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Server error 404: Student not found");
    }
}
