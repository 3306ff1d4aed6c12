//! Employee records and their filter table
//!
//! `emp_id` is a display badge ("EMP003"), distinct from the storage
//! identifier. It orders lexicographically, which is exactly what the
//! `id_min`/`id_max` range filters rely on.

use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterKind, FilterSpec};
use crate::core::resource::Resource;
use crate::core::schema::{self, FieldDef, FieldType, InputMode, Schema};
use crate::core::serializer::{Payload, ResourceSerializer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static SCHEMA: Schema = Schema {
    kind: "employee",
    fields: &[
        FieldDef::read_only("id", FieldType::Reference),
        FieldDef::read_only("created_at", FieldType::Text),
        FieldDef::read_only("updated_at", FieldType::Text),
        FieldDef::required("emp_id", FieldType::Text),
        FieldDef::required("emp_name", FieldType::Text),
        FieldDef::required("designation", FieldType::Text),
    ],
};

static FILTERS: [FilterSpec; 4] = [
    FilterSpec::new("designation", "designation", FilterKind::EqualsIgnoreCase),
    FilterSpec::new("emp_name", "emp_name", FilterKind::ContainsIgnoreCase),
    FilterSpec::new("id_min", "emp_id", FilterKind::AtLeast),
    FilterSpec::new("id_max", "emp_id", FilterKind::AtMost),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub emp_id: String,
    pub emp_name: String,
    pub designation: String,
}

impl Employee {
    pub fn new(emp_id: String, emp_name: String, designation: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            emp_id,
            emp_name,
            designation,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Resource for Employee {
    fn kind() -> &'static str {
        "employee"
    }

    fn plural() -> &'static str {
        "employees"
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
            "emp_id" => Some(FieldValue::Text(self.emp_id.clone())),
            "emp_name" => Some(FieldValue::Text(self.emp_name.clone())),
            "designation" => Some(FieldValue::Text(self.designation.clone())),
            _ => None,
        }
    }
}

pub struct EmployeeSerializer;

#[async_trait]
impl ResourceSerializer<Employee> for EmployeeSerializer {
    async fn build(&self, payload: &Payload) -> Result<Employee, ApiError> {
        Employee::schema().check(payload, InputMode::Create)?;
        Ok(Employee::new(
            schema::text(payload, "emp_id").unwrap_or_default(),
            schema::text(payload, "emp_name").unwrap_or_default(),
            schema::text(payload, "designation").unwrap_or_default(),
        ))
    }

    async fn merge(&self, existing: &Employee, payload: &Payload) -> Result<Employee, ApiError> {
        Employee::schema().check(payload, InputMode::Patch)?;
        let mut next = existing.clone();
        if let Some(emp_id) = schema::text(payload, "emp_id") {
            next.emp_id = emp_id;
        }
        if let Some(emp_name) = schema::text(payload, "emp_name") {
            next.emp_name = emp_name;
        }
        if let Some(designation) = schema::text(payload, "designation") {
            next.designation = designation;
        }
        next.touch();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn payload(value: Value) -> Payload {
        value.as_object().expect("object literal").clone()
    }

    #[tokio::test]
    async fn build_reads_all_fields() {
        let employee = EmployeeSerializer
            .build(&payload(json!({
                "emp_id": "EMP003",
                "emp_name": "John Doe",
                "designation": "Manager",
            })))
            .await
            .expect("valid payload");
        assert_eq!(employee.emp_id, "EMP003");
        assert_eq!(employee.designation, "Manager");
    }

    #[tokio::test]
    async fn merge_keeps_unsupplied_fields() {
        let existing = Employee::new(
            "EMP003".to_string(),
            "John Doe".to_string(),
            "Manager".to_string(),
        );
        let merged = EmployeeSerializer
            .merge(&existing, &payload(json!({ "designation": "Director" })))
            .await
            .expect("valid patch");
        assert_eq!(merged.emp_id, "EMP003");
        assert_eq!(merged.emp_name, "John Doe");
        assert_eq!(merged.designation, "Director");
        assert_eq!(merged.id, existing.id);
    }

    #[test]
    fn badge_filters_target_emp_id() {
        let by_param = |param: &str| {
            Employee::filters()
                .iter()
                .find(|s| s.param == param)
                .expect("filter exists")
        };
        assert_eq!(by_param("id_min").field, "emp_id");
        assert_eq!(by_param("id_max").field, "emp_id");
        assert_eq!(by_param("designation").kind, FilterKind::EqualsIgnoreCase);
    }
}
