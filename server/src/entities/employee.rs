//! Employee entity - the only document type stored by the server

use super::Entity;
use crate::validation::{FieldValue, Rule, RuleSet, Validatable};
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee document. `name`, `position`, `department` and `address` stay
/// optional so that missing input reaches validation instead of failing
/// deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub salary: Decimal,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Department the employee belongs to, embedded in the employee document
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub department_id: i32,
    #[serde(default)]
    pub department_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

pub const NAME_MAX_LENGTH: usize = 100;
pub const POSITION_MAX_LENGTH: usize = 50;

lazy_static! {
    static ref EMPLOYEE_RULES: RuleSet<Employee> = RuleSet::<Employee>::new()
        .field(
            "Name",
            |e| FieldValue::Text(e.name.as_deref()),
            [Rule::Required, Rule::MaxLength(NAME_MAX_LENGTH)],
        )
        .field(
            "Position",
            |e| FieldValue::Text(e.position.as_deref()),
            [Rule::Required, Rule::MaxLength(POSITION_MAX_LENGTH)],
        )
        .field(
            "Salary",
            |e| FieldValue::Number(e.salary),
            [Rule::range_with_message(
                Decimal::ZERO,
                Decimal::MAX,
                "Salary must be a non-negative value.",
            )],
        )
        .field(
            "Department",
            |e| FieldValue::Object(e.department.is_some()),
            [Rule::Required],
        )
        .field(
            "Address",
            |e| FieldValue::Object(e.address.is_some()),
            [Rule::Required],
        );
}

impl Entity for Employee {
    const CONTAINER: &'static str = "Employee";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Validatable for Employee {
    fn rules() -> &'static RuleSet<Self> {
        &EMPLOYEE_RULES
    }
}
