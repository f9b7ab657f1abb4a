use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `students` table.
///
/// Request bodies decode leniently: missing fields take their zero value,
/// which is also what the partial update treats as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub class: i32,
}

impl Student {
    pub fn new(name: impl Into<String>, age: i32, class: i32) -> Self {
        Self {
            id: 0, // Will be set by database
            name: name.into(),
            age,
            class,
        }
    }

    /// Copy of this record carrying the id the database assigned to it
    pub fn with_id(&self, id: i32) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

/// Body of `POST /students/bulk`: an array, or a single object that is
/// treated as a one-element array. `null` reads as an empty array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BulkPayload {
    Many(Option<Vec<Student>>),
    One(Student),
}

impl BulkPayload {
    pub fn into_students(self) -> Vec<Student> {
        match self {
            BulkPayload::Many(students) => students.unwrap_or_default(),
            BulkPayload::One(student) => vec![student],
        }
    }
}

/// One column assignment of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentChange {
    Name(String),
    Age(i32),
    Class(i32),
}

impl StudentChange {
    pub fn column(&self) -> &'static str {
        match self {
            StudentChange::Name(_) => "name",
            StudentChange::Age(_) => "age",
            StudentChange::Class(_) => "class",
        }
    }
}

/// The set of columns a `PATCH` request actually changes.
///
/// Zero and empty values count as absent, so a patch can never set `age` or
/// `class` to 0 or `name` to "".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    changes: Vec<StudentChange>,
}

impl StudentPatch {
    pub fn changes(&self) -> &[StudentChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl From<&Student> for StudentPatch {
    fn from(student: &Student) -> Self {
        let mut changes = Vec::new();
        if !student.name.is_empty() {
            changes.push(StudentChange::Name(student.name.clone()));
        }
        if student.age != 0 {
            changes.push(StudentChange::Age(student.age));
        }
        if student.class != 0 {
            changes.push(StudentChange::Class(student.class));
        }
        Self { changes }
    }
}
