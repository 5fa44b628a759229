//! Client-side search and pagination over an already fetched list.

use crate::models::{
    AttendanceRecord, ClassName, ClassTiming, ExpenseCategory, ExpenseRecord, FeeRecord,
    IncomeCategory, IncomeRecord, ReferenceEntity, Student, StudentFeeStatus, Teacher,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A row that can be found by the table search box and removed by id.
pub trait Searchable {
    fn row_id(&self) -> i64;

    /// Text the search query is matched against
    fn search_text(&self) -> String;
}

macro_rules! searchable_reference {
    ($($ty:ty),*) => {
        $(
            impl Searchable for $ty {
                fn row_id(&self) -> i64 {
                    self.id()
                }

                fn search_text(&self) -> String {
                    self.display_name().to_string()
                }
            }
        )*
    };
}

searchable_reference!(ClassName, ClassTiming, Teacher, IncomeCategory, ExpenseCategory);

impl Searchable for Student {
    fn row_id(&self) -> i64 {
        self.student_id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.father_name, self.class_name, self.city
        )
    }
}

impl Searchable for AttendanceRecord {
    fn row_id(&self) -> i64 {
        self.attendance_id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.student, self.father_name, self.class_name, self.teacher, self.attendance_date
        )
    }
}

impl Searchable for FeeRecord {
    fn row_id(&self) -> i64 {
        self.fee_id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.student_name.as_deref().unwrap_or_default(),
            self.father_name.as_deref().unwrap_or_default(),
            self.class_name.as_deref().unwrap_or_default(),
            self.month,
            self.status
        )
    }
}

impl Searchable for StudentFeeStatus {
    fn row_id(&self) -> i64 {
        self.student_id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.student_name,
            self.father_name.as_deref().unwrap_or_default()
        )
    }
}

impl Searchable for IncomeRecord {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.source,
            self.category,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

impl Searchable for ExpenseRecord {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.to_whom,
            self.category,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

/// Search + pagination state for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    items: Vec<T>,
    query: String,
    page_size: usize,
    page_index: usize,
}

impl<T: Searchable> Default for ListView<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Searchable> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_page_size(items, DEFAULT_PAGE_SIZE)
    }

    /// A zero page size is treated as one row per page.
    pub fn with_page_size(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            query: String::new(),
            page_size: page_size.max(1),
            page_index: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based index of the current page
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page_index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows matching the query, in fetch order
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// At least one page, even when nothing matches.
    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size).max(1)
    }

    pub fn page(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous() {
            self.page_index -= 1;
        }
    }

    /// One-based `(first, last, total)` of the visible rows; `(0, 0, 0)`
    /// when nothing matches.
    pub fn range(&self) -> (usize, usize, usize) {
        let total = self.filtered_count();
        if total == 0 {
            return (0, 0, 0);
        }
        let first = self.page_index * self.page_size + 1;
        let last = (first + self.page_size - 1).min(total);
        (first, last, total)
    }

    pub fn range_label(&self) -> String {
        let (first, last, total) = self.range();
        format!("Showing {} to {} of {}", first, last, total)
    }

    /// Replace the rows after a re-fetch, keeping the query and moving
    /// back to the last page if the current one no longer exists.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_page();
    }

    /// Drop one row after a successful delete.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let position = self.items.iter().position(|item| item.row_id() == id)?;
        let removed = self.items.remove(position);
        self.clamp_page();
        Some(removed)
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.row_id() == id)
    }

    /// Mutable access to one row, used after an in-place update.
    pub fn find_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.row_id() == id)
    }

    fn clamp_page(&mut self) {
        let last = self.page_count() - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }
}
