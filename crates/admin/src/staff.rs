//! Local staff directory.
//!
//! The legacy backend never grew an employee endpoint, so the directory is
//! session-local: a seeded roster with plain CRUD. IDs are assigned
//! locally as max-plus-one, mirroring how the backend numbers its rows.

use minimart_core::EmployeeId;

/// One employee on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub title: String,
    pub phone: String,
}

/// Fields for creating an employee; the directory assigns the ID.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub full_name: String,
    pub title: String,
    pub phone: String,
}

/// A partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
}

/// The employee roster.
#[derive(Debug, Clone)]
pub struct StaffDirectory {
    employees: Vec<Employee>,
}

impl StaffDirectory {
    /// Create a directory with the seeded roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            employees: seed_roster(),
        }
    }

    /// Create an empty directory.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            employees: Vec::new(),
        }
    }

    /// All employees in roster order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Look up one employee.
    #[must_use]
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Add an employee, assigning the next free ID.
    pub fn add(&mut self, new: NewEmployee) -> EmployeeId {
        let id = self
            .employees
            .iter()
            .map(|e| e.id.as_i32())
            .max()
            .unwrap_or(0)
            + 1;
        let id = EmployeeId::new(id);
        self.employees.push(Employee {
            id,
            full_name: new.full_name,
            title: new.title,
            phone: new.phone,
        });
        id
    }

    /// Apply a partial update. Returns whether the employee existed.
    pub fn update(&mut self, id: EmployeeId, update: EmployeeUpdate) -> bool {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(full_name) = update.full_name {
            employee.full_name = full_name;
        }
        if let Some(title) = update.title {
            employee.title = title;
        }
        if let Some(phone) = update.phone {
            employee.phone = phone;
        }
        true
    }

    /// Remove an employee. Returns whether one was removed.
    pub fn remove(&mut self, id: EmployeeId) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        self.employees.len() != before
    }
}

impl Default for StaffDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_roster() -> Vec<Employee> {
    let roster = [
        (1, "Tran Thi Linh", "Store manager", "0901 234 561"),
        (2, "Nguyen Van Minh", "Cashier", "0901 234 562"),
        (3, "Le Thi Hoa", "Stock clerk", "0901 234 563"),
        (4, "Pham Quoc Anh", "Cashier", "0901 234 564"),
    ];
    roster
        .into_iter()
        .map(|(id, full_name, title, phone)| Employee {
            id: EmployeeId::new(id),
            full_name: full_name.to_string(),
            title: title.to_string(),
            phone: phone.to_string(),
        })
        .collect()
}
