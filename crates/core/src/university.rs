//! Aggregation: a university refers to students that exist on their own.
//!
//! The university keeps [`StudentId`]s only. Students are owned by the
//! caller and outlive any enrollment.

use core::fmt;

use crate::error::ErrorKind;
use crate::types::StudentId;

/// Errors raised by [`University`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UniversityError {
    #[error("{student} is already enrolled at {university}")]
    AlreadyEnrolled { student: String, university: String },
}

impl UniversityError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::State
    }
}

/// A student, enrolled somewhere or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    age: u32,
    university: Option<String>,
}

impl Student {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            id: StudentId::generate(),
            name: name.into(),
            age,
            university: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn university(&self) -> Option<&str> {
        self.university.as_deref()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student: {}", self.name)?;
        if let Some(university) = &self.university {
            write!(f, " at {university}")?;
        }
        Ok(())
    }
}

/// A university and the ids of its enrolled students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct University {
    name: String,
    students: Vec<StudentId>,
}

impl University {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn enrolled(&self) -> &[StudentId] {
        &self.students
    }

    #[must_use]
    pub fn is_enrolled(&self, student: &Student) -> bool {
        self.students.contains(&student.id)
    }

    /// Enroll `student` and record this university on them.
    ///
    /// # Errors
    ///
    /// Returns [`UniversityError::AlreadyEnrolled`] if the student is already
    /// enrolled here or elsewhere.
    pub fn enroll(&mut self, student: &mut Student) -> Result<(), UniversityError> {
        if let Some(current) = &student.university {
            return Err(UniversityError::AlreadyEnrolled {
                student: student.name.clone(),
                university: current.clone(),
            });
        }
        self.students.push(student.id);
        student.university = Some(self.name.clone());
        tracing::debug!(student = %student.id.short(), university = %self.name, "student enrolled");
        Ok(())
    }

    /// Remove `student` if enrolled here. Returns whether anything changed.
    pub fn graduate(&mut self, student: &mut Student) -> bool {
        let before = self.students.len();
        self.students.retain(|id| *id != student.id);
        if self.students.len() == before {
            return false;
        }
        student.university = None;
        true
    }
}
