//! Query DTOs - filters accepted by `GET /employees`

use crate::entities::Employee;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Optional filters for listing employees. With every field empty the list
/// is the whole collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    /// Case-insensitive substring of the name
    #[validate(length(min = 1, max = 100, message = "name filter must be between 1 and 100 characters"))]
    pub name: Option<String>,

    /// Exact position, case-insensitive
    #[validate(length(min = 1, max = 100, message = "position filter must be between 1 and 100 characters"))]
    pub position: Option<String>,

    /// Exact department name, case-insensitive
    #[validate(length(min = 1, max = 100, message = "department filter must be between 1 and 100 characters"))]
    pub department: Option<String>,

    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
}

impl EmployeeQuery {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.min_salary.is_none()
            && self.max_salary.is_none()
    }

    /// Whether `employee` satisfies every filter that is set
    pub fn matches(&self, employee: &Employee) -> bool {
        let name_ok = self.name.as_ref().is_none_or(|needle| {
            employee
                .name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase()))
        });

        let position_ok = self.position.as_ref().is_none_or(|wanted| {
            employee
                .position
                .as_ref()
                .is_some_and(|position| position.eq_ignore_ascii_case(wanted))
        });

        let department_ok = self.department.as_ref().is_none_or(|wanted| {
            employee
                .department
                .as_ref()
                .is_some_and(|d| d.department_name.eq_ignore_ascii_case(wanted))
        });

        let min_ok = self.min_salary.is_none_or(|min| employee.salary >= min);
        let max_ok = self.max_salary.is_none_or(|max| employee.salary <= max);

        name_ok && position_ok && department_ok && min_ok && max_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Department;

    fn employee() -> Employee {
        Employee {
            name: Some("John Doe".into()),
            position: Some("BSA".into()),
            salary: Decimal::from(50000),
            department: Some(Department {
                department_id: 1,
                department_name: "HR".into(),
            }),
            ..Employee::default()
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = EmployeeQuery::default();
        assert!(query.is_empty());
        assert!(query.matches(&employee()));
        assert!(query.matches(&Employee::default()));
    }

    #[test]
    fn test_filters_combine() {
        let query = EmployeeQuery {
            name: Some("john".into()),
            department: Some("hr".into()),
            min_salary: Some(Decimal::from(40000)),
            ..EmployeeQuery::default()
        };
        assert!(query.matches(&employee()));

        let query = EmployeeQuery {
            max_salary: Some(Decimal::from(100)),
            ..query
        };
        assert!(!query.matches(&employee()));
    }

    #[test]
    fn test_position_is_exact() {
        let query = EmployeeQuery {
            position: Some("BS".into()),
            ..EmployeeQuery::default()
        };
        assert!(!query.matches(&employee()));
    }

    #[test]
    fn test_blank_filter_is_invalid() {
        let query = EmployeeQuery {
            name: Some(String::new()),
            ..EmployeeQuery::default()
        };
        assert!(query.validate().is_err());
        assert!(EmployeeQuery::default().validate().is_ok());
    }
}
