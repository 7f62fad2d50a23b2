//! Built-in sample directory shown when the service cannot be reached.

use shared::domain::{Employee, EmployeeId, PageInfo};

const SAMPLE_EMPLOYEES: [(u64, &str, &str, &str, &str); 3] = [
    (
        1,
        "Juan",
        "Dela Cruz",
        "juan.delacruz@example.com",
        "Software Engineering Head",
    ),
    (
        2,
        "Maria",
        "Santos",
        "maria.santos@example.com",
        "Senior Software Engineer",
    ),
    (
        3,
        "Carlos",
        "Reyes",
        "carlos.reyes@example.com",
        "Junior Software Engineer",
    ),
];

pub fn sample_employees() -> Vec<Employee> {
    SAMPLE_EMPLOYEES
        .iter()
        .map(|(id, first_name, last_name, email, position)| Employee {
            id: EmployeeId(*id),
            first_name: (*first_name).to_string(),
            last_name: (*last_name).to_string(),
            email: (*email).to_string(),
            position: (*position).to_string(),
        })
        .collect()
}

/// The sample set always fits on a single page, whatever `per_page` the caller asked for.
pub fn sample_page_info(per_page: u64) -> PageInfo {
    PageInfo {
        current_page: 1,
        per_page,
        total: SAMPLE_EMPLOYEES.len() as u64,
        last_page: 1,
    }
}
