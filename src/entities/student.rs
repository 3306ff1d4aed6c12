//! Student records: independent entities with no relations

use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterKind, FilterSpec};
use crate::core::resource::Resource;
use crate::core::schema::{self, FieldDef, FieldType, InputMode, Schema};
use crate::core::serializer::{Payload, ResourceSerializer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

static SCHEMA: Schema = Schema {
    kind: "student",
    fields: &[
        FieldDef::read_only("id", FieldType::Reference),
        FieldDef::read_only("created_at", FieldType::Text),
        FieldDef::read_only("updated_at", FieldType::Text),
        FieldDef::required("name", FieldType::Text),
        FieldDef::required("age", FieldType::Integer),
        FieldDef::optional("grade", FieldType::Text),
    ],
};

static FILTERS: [FilterSpec; 1] = [FilterSpec::new("name", "name", FilterKind::ContainsIgnoreCase)];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub age: i64,
    pub grade: Option<String>,
}

impl Student {
    pub fn new(name: String, age: i64, grade: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name,
            age,
            grade,
        }
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Resource for Student {
    fn kind() -> &'static str {
        "student"
    }

    fn plural() -> &'static str {
        "students"
    }

    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn filters() -> &'static [FilterSpec] {
        &FILTERS
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "age" => Some(FieldValue::Integer(self.age)),
            "grade" => self.grade.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

pub struct StudentSerializer;

#[async_trait]
impl ResourceSerializer<Student> for StudentSerializer {
    async fn build(&self, payload: &Payload) -> Result<Student, ApiError> {
        Student::schema().check(payload, InputMode::Create)?;
        let name = schema::text(payload, "name").unwrap_or_default();
        let age = schema::integer(payload, "age").unwrap_or_default();
        Ok(Student::new(name, age, schema::text(payload, "grade")))
    }

    async fn merge(&self, existing: &Student, payload: &Payload) -> Result<Student, ApiError> {
        Student::schema().check(payload, InputMode::Patch)?;
        let mut next = existing.clone();
        if let Some(name) = schema::text(payload, "name") {
            next.name = name;
        }
        if let Some(age) = schema::integer(payload, "age") {
            next.age = age;
        }
        if payload.get("grade").is_some_and(Value::is_null) {
            next.grade = None;
        } else if let Some(grade) = schema::text(payload, "grade") {
            next.grade = Some(grade);
        }
        next.touch();
        Ok(next)
    }
}
