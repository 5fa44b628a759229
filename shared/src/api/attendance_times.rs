use crate::models::{ClassTiming, NewClassTiming};

use super::{ApiResult, Gateway};

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceTimeApi {
    gateway: Gateway,
}

impl AttendanceTimeApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self) -> ApiResult<Vec<ClassTiming>> {
        self.gateway
            .get_json("/attendance_time/attendance-values-all/", &[])
            .await
    }

    pub async fn create(&self, timing: &NewClassTiming) -> ApiResult<ClassTiming> {
        self.gateway
            .create("/attendance_time/add_attendance_value/", timing)
            .await
    }

    pub async fn delete(&self, timing_id: i64) -> ApiResult<()> {
        self.gateway
            .delete(&format!("/attendance_time/{}", timing_id))
            .await
    }
}
