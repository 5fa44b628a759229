//! Reports behind the dashboard overview.
//!
//! Each report carries the backend's chart payload next to its figures.
//! Colours and chart options in that payload are ignored; only labels and
//! series values are kept.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<ChartSeries>,
    #[serde(default)]
    pub title: String,
}

impl Chart {
    /// Labels paired with the named series, or the first series when
    /// `series` is `None`. Labels without a value are dropped.
    pub fn points(&self, series: Option<&str>) -> Vec<(&str, f64)> {
        let dataset = match series {
            Some(name) => self.datasets.iter().find(|d| d.label == name),
            None => self.datasets.first(),
        };
        match dataset {
            Some(dataset) => self
                .labels
                .iter()
                .map(String::as_str)
                .zip(dataset.data.iter().copied())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Width of a bar relative to the largest value, in whole percent.
/// Negative values are measured by magnitude.
pub fn bar_percent(value: f64, max: f64) -> u8 {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value.abs() / max) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Largest magnitude among `values`, for scaling bars.
pub fn max_magnitude(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().map(f64::abs).fold(0.0, f64::max)
}

/// Attendance counts across the whole school for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub total_students: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub sick: u32,
    pub leave: u32,
}

impl StudentSummary {
    pub fn marked(&self) -> u32 {
        self.present + self.absent + self.late + self.sick + self.leave
    }

    pub fn unmarked(&self) -> u32 {
        self.total_students.saturating_sub(self.marked())
    }

    /// Present or late, as a share of all students.
    pub fn attendance_rate(&self) -> Option<f64> {
        (self.total_students > 0)
            .then(|| f64::from(self.present + self.late) * 100.0 / f64::from(self.total_students))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummaryReport {
    pub summary: StudentSummary,
    #[serde(default)]
    pub graph: Chart,
}

/// Today's attendance counts for one class, keyed by status name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAttendanceSummary {
    pub date: String,
    pub class_name: String,
    #[serde(default)]
    pub attendance_values: BTreeMap<String, u32>,
}

impl ClassAttendanceSummary {
    pub fn count(&self, status: &str) -> u32 {
        self.attendance_values.get(status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.attendance_values.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummaryReport {
    #[serde(default)]
    pub summary: Vec<ClassAttendanceSummary>,
    #[serde(default)]
    pub graph: Chart,
}

impl AttendanceSummaryReport {
    /// Status names found in any class, in a stable order.
    pub fn statuses(&self) -> Vec<&str> {
        let mut statuses: Vec<&str> = self
            .summary
            .iter()
            .flat_map(|class| class.attendance_values.keys().map(String::as_str))
            .collect();
        statuses.sort_unstable();
        statuses.dedup();
        statuses
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
    #[serde(default)]
    pub profit: f64,
}

/// Income against expenses month by month for one year. Months are 1-12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseSummary {
    pub year: i32,
    #[serde(default)]
    pub monthly_data: BTreeMap<u32, MonthlyBalance>,
    #[serde(default)]
    pub totals: MonthlyBalance,
    #[serde(default)]
    pub graph: Chart,
}

impl IncomeExpenseSummary {
    /// Months that had any income or expense.
    pub fn active_months(&self) -> impl Iterator<Item = (u32, &MonthlyBalance)> {
        self.monthly_data
            .iter()
            .filter(|(_, balance)| balance.income != 0.0 || balance.expense != 0.0)
            .map(|(month, balance)| (*month, balance))
    }
}

/// Fees collected month by month for one year. Months are 1-12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeCollectionSummary {
    pub year: i32,
    #[serde(default)]
    pub monthly_data: BTreeMap<u32, f64>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub graph: Chart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub year: i32,
    /// `0` when the totals cover the whole year
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub category_summary: BTreeMap<String, f64>,
}

/// Income or expense totals per category for a year or one month of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryReport {
    #[serde(default)]
    pub summary: Vec<CategoryTotals>,
    #[serde(default)]
    pub graph: Chart,
    #[serde(default)]
    pub total: f64,
}

impl CategorySummaryReport {
    /// Category totals, largest first; ties keep name order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .summary
            .iter()
            .flat_map(|totals| totals.category_summary.iter())
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_points_ignore_colours() {
        let chart: Chart = serde_json::from_value(json!({
            "labels": ["Jan", "Feb", "Mar"],
            "datasets": [
                { "label": "Income", "data": [100.0, 0.0, 50.0], "backgroundColor": "rgba(0, 200, 83, 0.7)" },
                { "label": "Expense", "data": [40.0, 10.0], "backgroundColor": ["red", "red"], "borderWidth": 1 }
            ],
            "title": "Financial Summary for 2025",
            "options": { "scales": {} }
        }))
        .unwrap();

        assert_eq!(chart.points(None), vec![("Jan", 100.0), ("Feb", 0.0), ("Mar", 50.0)]);
        assert_eq!(chart.points(Some("Expense")), vec![("Jan", 40.0), ("Feb", 10.0)]);
        assert!(chart.points(Some("Profit/Loss")).is_empty());
    }

    #[test]
    fn test_bar_percent_scales_to_largest() {
        let max = max_magnitude([250.0, -500.0, 0.0]);
        assert_eq!(max, 500.0);
        assert_eq!(bar_percent(250.0, max), 50);
        assert_eq!(bar_percent(-500.0, max), 100);
        assert_eq!(bar_percent(10.0, 0.0), 0);
        assert_eq!(bar_percent(f64::NAN, max), 0);
    }

    #[test]
    fn test_student_summary_unmarked_and_rate() {
        let summary = StudentSummary {
            total_students: 40,
            present: 30,
            absent: 2,
            late: 2,
            sick: 1,
            leave: 0,
        };

        assert_eq!(summary.marked(), 35);
        assert_eq!(summary.unmarked(), 5);
        assert_eq!(summary.attendance_rate(), Some(80.0));
        assert_eq!(StudentSummary::default().attendance_rate(), None);
    }

    #[test]
    fn test_unmarked_never_underflows() {
        // Totals come from an id range and can be lower than the marks
        let summary = StudentSummary {
            total_students: 3,
            present: 5,
            ..StudentSummary::default()
        };
        assert_eq!(summary.unmarked(), 0);
    }

    #[test]
    fn test_income_expense_months_keyed_by_number() {
        let report: IncomeExpenseSummary = serde_json::from_value(json!({
            "year": 2025,
            "monthly_data": {
                "1": { "income": 5000.0, "expense": 3000.0, "profit": 2000.0 },
                "2": { "income": 0, "expense": 0, "profit": 0 },
                "10": { "income": 0, "expense": 800.0, "profit": -800.0 }
            },
            "month_names": ["Jan", "Feb"],
            "totals": { "income": 5000.0, "expense": 3800.0, "profit": 1200.0 }
        }))
        .unwrap();

        let months: Vec<u32> = report.active_months().map(|(month, _)| month).collect();
        assert_eq!(months, vec![1, 10]);
        assert_eq!(report.totals.profit, 1200.0);
        assert!(report.graph.labels.is_empty());
    }

    #[test]
    fn test_attendance_statuses_across_classes() {
        let report: AttendanceSummaryReport = serde_json::from_value(json!({
            "summary": [
                { "date": "2025-01-21", "class_name": "Class 1", "attendance_values": { "Present": 20, "Absent": 1 } },
                { "date": "2025-01-21", "class_name": "Class 2", "attendance_values": { "Present": 18, "Sick": 2 } }
            ],
            "graph": { "labels": ["Class 1", "Class 2"], "datasets": [], "title": "Today" }
        }))
        .unwrap();

        assert_eq!(report.statuses(), vec!["Absent", "Present", "Sick"]);
        assert_eq!(report.summary[1].count("Absent"), 0);
        assert_eq!(report.summary[1].total(), 20);
    }

    #[test]
    fn test_category_totals_ranked() {
        let report: CategorySummaryReport = serde_json::from_value(json!({
            "summary": [{
                "year": 2025,
                "month": 0,
                "category_summary": { "Books": 1200.0, "Donations": 5000.0, "Uniforms": 1200.0, "Canteen": 0.0 }
            }],
            "graph": { "labels": [], "datasets": [], "title": "Income Category Details for 2025" },
            "total": 7400.0
        }))
        .unwrap();

        assert_eq!(
            report.ranked(),
            vec![("Donations", 5000.0), ("Books", 1200.0), ("Uniforms", 1200.0), ("Canteen", 0.0)]
        );
    }
}
