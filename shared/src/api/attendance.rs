use serde::Serialize;

use crate::attendance::{AttendanceStatus, BulkAttendanceRequest};
use crate::models::AttendanceRecord;

use super::{ApiResult, Gateway, Method};

#[derive(Debug, Serialize)]
struct AttendanceStatusUpdate {
    attendance_value_id: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceApi {
    gateway: Gateway,
}

impl AttendanceApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Stored attendance joined with class, teacher and student names
    pub async fn get(&self) -> ApiResult<Vec<AttendanceRecord>> {
        self.gateway
            .get_list("/mark_attendance/filtered_attendance", &[])
            .await
    }

    /// Submit a whole roster in one request. The backend accepts or rejects
    /// it as a unit.
    pub async fn create_bulk(
        &self,
        request: &BulkAttendanceRequest,
    ) -> ApiResult<Vec<AttendanceRecord>> {
        self.gateway
            .create("/mark_attendance/add_bulk_attendance/", request)
            .await
    }

    pub async fn update_status(
        &self,
        attendance_id: i64,
        status: AttendanceStatus,
    ) -> ApiResult<AttendanceRecord> {
        let body = AttendanceStatusUpdate {
            attendance_value_id: status.value_id(),
        };
        self.gateway
            .update(
                Method::Patch,
                &format!("/mark_attendance/update_attendance/{}", attendance_id),
                &body,
            )
            .await
    }

    pub async fn delete(&self, attendance_id: i64) -> ApiResult<()> {
        self.gateway
            .delete(&format!("/mark_attendance/delete_attendance/{}", attendance_id))
            .await
    }
}
