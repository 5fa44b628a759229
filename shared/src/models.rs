//! Wire types exchanged with the school backend.
//!
//! Field names on the wire follow the backend's column names
//! (`class_name_id`, `student_name`, `recipt_number`, ...). The Rust side
//! uses shorter names and maps them with `#[serde(rename)]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A small lookup-table resource used to populate selection controls.
pub trait ReferenceEntity {
    fn id(&self) -> i64;
    fn display_name(&self) -> &str;
}

/// Class name lookup entry ("Class 8", "Nursery", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassName {
    #[serde(rename = "class_name_id")]
    pub id: i64,
    #[serde(rename = "class_name")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClassName {
    #[serde(rename = "class_name")]
    pub name: String,
}

/// Attendance time slot ("Morning", "09:00", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTiming {
    #[serde(rename = "attendance_time_id")]
    pub id: i64,
    #[serde(rename = "attendance_time")]
    pub label: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClassTiming {
    #[serde(rename = "attendance_time")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "teacher_name_id")]
    pub id: i64,
    #[serde(rename = "teacher_name")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeacher {
    #[serde(rename = "teacher_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeCategory {
    #[serde(rename = "income_cat_name_id")]
    pub id: i64,
    #[serde(rename = "income_cat_name")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncomeCategory {
    #[serde(rename = "income_cat_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    #[serde(rename = "expense_cat_name_id")]
    pub id: i64,
    #[serde(rename = "expense_cat_name")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpenseCategory {
    #[serde(rename = "expense_cat_name")]
    pub name: String,
}

macro_rules! reference_entity {
    ($ty:ty, $field:ident) => {
        impl ReferenceEntity for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn display_name(&self) -> &str {
                &self.$field
            }
        }
    };
}

reference_entity!(ClassName, name);
reference_entity!(ClassTiming, label);
reference_entity!(Teacher, name);
reference_entity!(IncomeCategory, name);
reference_entity!(ExpenseCategory, name);

/// A student record as returned by the student endpoints.
///
/// Class membership is the denormalized class *name*, not a class id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    #[serde(rename = "student_name")]
    pub name: String,
    #[serde(rename = "student_date_of_birth")]
    pub date_of_birth: String,
    #[serde(rename = "student_age")]
    pub age: String,
    #[serde(rename = "student_gender")]
    pub gender: String,
    #[serde(rename = "student_education")]
    pub education: String,
    pub class_name: String,
    #[serde(rename = "student_city")]
    pub city: String,
    #[serde(rename = "student_address")]
    pub address: String,
    pub father_name: String,
    pub father_occupation: String,
    pub father_cnic: String,
    pub father_cast_name: String,
    pub father_contact: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for admitting a new student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(rename = "student_name")]
    pub name: String,
    #[serde(rename = "student_date_of_birth")]
    pub date_of_birth: String,
    #[serde(rename = "student_age")]
    pub age: String,
    #[serde(rename = "student_gender")]
    pub gender: String,
    #[serde(rename = "student_education")]
    pub education: String,
    pub class_name: String,
    #[serde(rename = "student_city")]
    pub city: String,
    #[serde(rename = "student_address")]
    pub address: String,
    pub father_name: String,
    pub father_occupation: String,
    pub father_cnic: String,
    pub father_cast_name: String,
    pub father_contact: String,
}

/// Partial update; only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(rename = "student_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "student_date_of_birth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "student_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(rename = "student_gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "student_education", skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(rename = "student_city", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "student_address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_cnic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_cast_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_contact: Option<String>,
}

/// One stored attendance row, joined with its display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attendance_id: i64,
    pub attendance_date: String,
    #[serde(rename = "attendance_time")]
    pub time: String,
    #[serde(rename = "attendance_class")]
    pub class_name: String,
    #[serde(rename = "attendance_teacher")]
    pub teacher: String,
    #[serde(rename = "attendance_student")]
    pub student: String,
    #[serde(rename = "attendance_std_fname")]
    pub father_name: String,
    #[serde(rename = "attendance_value")]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeStatus {
    Paid,
    Unpaid,
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeStatus::Paid => write!(f, "Paid"),
            FeeStatus::Unpaid => write!(f, "Unpaid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFee {
    pub student_id: i64,
    pub class_id: i64,
    #[serde(rename = "fee_amount")]
    pub amount: f64,
    #[serde(rename = "fee_month")]
    pub month: String,
    #[serde(rename = "fee_year")]
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub fee_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(rename = "fee_amount")]
    pub amount: f64,
    #[serde(rename = "fee_month")]
    pub month: String,
    #[serde(rename = "fee_year")]
    pub year: i32,
    #[serde(rename = "fee_status")]
    pub status: FeeStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Paid/unpaid row of the per-class fee status report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentFeeStatus {
    pub student_id: i64,
    pub student_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(rename = "fee_status")]
    pub status: FeeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    #[serde(rename = "recipt_number")]
    pub receipt_number: Option<i64>,
    pub date: String,
    pub category_id: i64,
    pub source: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "recipt_number", default)]
    pub receipt_number: Option<i64>,
    pub date: String,
    pub category: String,
    pub source: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeUpdate {
    #[serde(rename = "recipt_number", skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(rename = "recipt_number")]
    pub receipt_number: Option<i64>,
    pub date: String,
    pub category_id: i64,
    pub to_whom: String,
    pub description: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "recipt_number", default)]
    pub receipt_number: Option<i64>,
    pub date: String,
    pub category: String,
    pub to_whom: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(rename = "recipt_number", skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_whom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_class_name_uses_backend_field_names() {
        let class: ClassName = serde_json::from_value(json!({
            "class_name_id": 1,
            "class_name": "Class 8",
            "created_at": "2025-01-20T09:00:00"
        }))
        .unwrap();

        assert_eq!(class.id(), 1);
        assert_eq!(class.display_name(), "Class 8");
        assert_eq!(class.created_at.as_deref(), Some("2025-01-20T09:00:00"));
    }

    #[test]
    fn test_reference_entity_without_created_at() {
        let timing: ClassTiming = serde_json::from_value(json!({
            "attendance_time_id": 2,
            "attendance_time": "Morning"
        }))
        .unwrap();

        assert_eq!(timing.display_name(), "Morning");
        assert_eq!(timing.created_at, None);
    }

    #[test]
    fn test_student_update_skips_empty_fields() {
        let update = StudentUpdate {
            city: Some("Lahore".to_string()),
            ..StudentUpdate::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "student_city": "Lahore" }));
    }

    #[test]
    fn test_fee_record_status() {
        let fee: FeeRecord = serde_json::from_value(json!({
            "fee_id": 7,
            "student_name": "Ben Carter",
            "fee_amount": 1500.0,
            "fee_month": "January",
            "fee_year": 2025,
            "fee_status": "Unpaid"
        }))
        .unwrap();

        assert_eq!(fee.status, FeeStatus::Unpaid);
        assert_eq!(fee.status.to_string(), "Unpaid");
        assert_eq!(fee.class_name, None);
    }
}
