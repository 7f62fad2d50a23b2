use serde::{Deserialize, Serialize};

use crate::domain::{Employee, PageInfo};

pub const EMPLOYEES_PATH: &str = "/api/employees";

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Query parameters of `GET /api/employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    pub search: String,
    pub page: u64,
    pub per_page: u64,
}

impl EmployeeQuery {
    pub fn new(search: impl Into<String>, page: u64, per_page: u64) -> Self {
        Self {
            search: search.into(),
            page,
            per_page,
        }
    }
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self::new("", DEFAULT_PAGE, DEFAULT_PER_PAGE)
    }
}

/// Body of a successful `GET /api/employees` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePage {
    pub data: Vec<Employee>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl EmployeePage {
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }

    pub fn into_parts(self) -> (Vec<Employee>, PageInfo) {
        let page = self.page_info();
        (self.data, page)
    }
}
