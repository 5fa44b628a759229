//! Admission and edit form for student records.

use chrono::NaiveDate;

use crate::models::{NewStudent, Student, StudentUpdate};

pub const REQUIRED: &str = "Field is required";
pub const INVALID_DATE: &str = "Enter a valid date (YYYY-MM-DD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    DateOfBirth,
    Age,
    Gender,
    Education,
    ClassName,
    City,
    Address,
    FatherName,
    FatherOccupation,
    FatherCnic,
    FatherCastName,
    FatherContact,
}

impl StudentField {
    pub const ALL: [StudentField; 13] = [
        StudentField::ClassName,
        StudentField::Name,
        StudentField::FatherName,
        StudentField::Age,
        StudentField::DateOfBirth,
        StudentField::FatherCastName,
        StudentField::City,
        StudentField::Gender,
        StudentField::FatherCnic,
        StudentField::Education,
        StudentField::FatherContact,
        StudentField::FatherOccupation,
        StudentField::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Student Name",
            StudentField::DateOfBirth => "Date of Birth",
            StudentField::Age => "Age",
            StudentField::Gender => "Gender",
            StudentField::Education => "Education",
            StudentField::ClassName => "Class Name",
            StudentField::City => "City",
            StudentField::Address => "Address",
            StudentField::FatherName => "Father Name",
            StudentField::FatherOccupation => "Father Occupation",
            StudentField::FatherCnic => "Father CNIC",
            StudentField::FatherCastName => "Cast",
            StudentField::FatherContact => "Father Contact",
        }
    }
}

/// Per-field validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<(StudentField, &'static str)>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn message(&self, field: StudentField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| *message)
    }

    fn push(&mut self, field: StudentField, message: &'static str) {
        self.errors.push((field, message));
    }
}

/// Raw form input. Every field is a string as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDraft {
    pub name: String,
    pub date_of_birth: String,
    pub age: String,
    pub gender: String,
    pub education: String,
    pub class_name: String,
    pub city: String,
    pub address: String,
    pub father_name: String,
    pub father_occupation: String,
    pub father_cnic: String,
    pub father_cast_name: String,
    pub father_contact: String,
}

impl StudentDraft {
    /// Pre-fill the edit form; the date input only shows the date part.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            date_of_birth: date_part(&student.date_of_birth).to_string(),
            age: student.age.clone(),
            gender: student.gender.clone(),
            education: student.education.clone(),
            class_name: student.class_name.clone(),
            city: student.city.clone(),
            address: student.address.clone(),
            father_name: student.father_name.clone(),
            father_occupation: student.father_occupation.clone(),
            father_cnic: student.father_cnic.clone(),
            father_cast_name: student.father_cast_name.clone(),
            father_contact: student.father_contact.clone(),
        }
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::DateOfBirth => &self.date_of_birth,
            StudentField::Age => &self.age,
            StudentField::Gender => &self.gender,
            StudentField::Education => &self.education,
            StudentField::ClassName => &self.class_name,
            StudentField::City => &self.city,
            StudentField::Address => &self.address,
            StudentField::FatherName => &self.father_name,
            StudentField::FatherOccupation => &self.father_occupation,
            StudentField::FatherCnic => &self.father_cnic,
            StudentField::FatherCastName => &self.father_cast_name,
            StudentField::FatherContact => &self.father_contact,
        }
    }

    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::Name => self.name = value,
            StudentField::DateOfBirth => self.date_of_birth = value,
            StudentField::Age => self.age = value,
            StudentField::Gender => self.gender = value,
            StudentField::Education => self.education = value,
            StudentField::ClassName => self.class_name = value,
            StudentField::City => self.city = value,
            StudentField::Address => self.address = value,
            StudentField::FatherName => self.father_name = value,
            StudentField::FatherOccupation => self.father_occupation = value,
            StudentField::FatherCnic => self.father_cnic = value,
            StudentField::FatherCastName => self.father_cast_name = value,
            StudentField::FatherContact => self.father_contact = value,
        }
    }

    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for field in StudentField::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                errors.push(field, REQUIRED);
            } else if field == StudentField::DateOfBirth && birth_timestamp(value).is_none() {
                errors.push(field, INVALID_DATE);
            }
        }
        errors
    }

    /// Validate every field and build the create body. A bare date of
    /// birth is sent as midnight UTC.
    pub fn validate(&self) -> Result<NewStudent, FormErrors> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        let date_of_birth = birth_timestamp(self.date_of_birth.trim()).ok_or(errors)?;
        Ok(NewStudent {
            name: self.name.trim().to_string(),
            date_of_birth,
            age: self.age.trim().to_string(),
            gender: self.gender.trim().to_string(),
            education: self.education.trim().to_string(),
            class_name: self.class_name.trim().to_string(),
            city: self.city.trim().to_string(),
            address: self.address.trim().to_string(),
            father_name: self.father_name.trim().to_string(),
            father_occupation: self.father_occupation.trim().to_string(),
            father_cnic: self.father_cnic.trim().to_string(),
            father_cast_name: self.father_cast_name.trim().to_string(),
            father_contact: self.father_contact.trim().to_string(),
        })
    }

    /// Validate and keep only the fields that differ from `original`.
    pub fn changes_from(&self, original: &Student) -> Result<StudentUpdate, FormErrors> {
        let new = self.validate()?;
        let changed = |value: String, current: &str| (value != current).then_some(value);

        Ok(StudentUpdate {
            date_of_birth: (date_part(&new.date_of_birth) != date_part(&original.date_of_birth))
                .then_some(new.date_of_birth),
            name: changed(new.name, &original.name),
            age: changed(new.age, &original.age),
            gender: changed(new.gender, &original.gender),
            education: changed(new.education, &original.education),
            class_name: changed(new.class_name, &original.class_name),
            city: changed(new.city, &original.city),
            address: changed(new.address, &original.address),
            father_name: changed(new.father_name, &original.father_name),
            father_occupation: changed(new.father_occupation, &original.father_occupation),
            father_cnic: changed(new.father_cnic, &original.father_cnic),
            father_cast_name: changed(new.father_cast_name, &original.father_cast_name),
            father_contact: changed(new.father_contact, &original.father_contact),
        })
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

fn birth_timestamp(value: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date_part(value), "%Y-%m-%d").ok()?;
    Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
}
