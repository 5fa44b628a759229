//! Platform-independent core of the school dashboard: wire types, the
//! backend gateway, and the view state the frontend components drive.

pub mod api;
pub mod attendance;
pub mod cascade;
pub mod config;
pub mod list_view;
pub mod models;
pub mod notification;
pub mod student_form;
pub mod summary;

pub use api::{ApiError, ApiResult, SchoolApi};
pub use attendance::{
    AttendanceEntry, AttendanceMark, AttendanceStatus, AttendanceWorkflow, BulkAttendanceRequest,
    HeaderField, SubmissionError,
};
pub use cascade::{
    CascadeError, CascadeState, CategoryCascade, DependentSelection, FetchTicket, RosterCascade,
    SelectionChange,
};
pub use config::DashboardConfig;
pub use list_view::{ListView, Searchable};
pub use models::*;
pub use notification::{Notification, NotificationKind};
pub use student_form::{FormErrors, StudentDraft, StudentField};
pub use summary::{
    bar_percent, max_magnitude, AttendanceSummaryReport, CategorySummaryReport, Chart,
    ChartSeries, ClassAttendanceSummary, FeeCollectionSummary, IncomeExpenseSummary,
    MonthlyBalance, StudentSummary, StudentSummaryReport,
};
