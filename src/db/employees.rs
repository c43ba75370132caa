use crate::db::db::Db;
use crate::libs::attendance::EmployeeId;
use crate::libs::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::libs::error::EmployeeError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (first_name, last_name, email, avatar, department, role)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_EMPLOYEE: &str = "UPDATE employees
    SET first_name = ?1, last_name = ?2, email = ?3, avatar = ?4, department = ?5, role = ?6
    WHERE id = ?7";
const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?1";
const SELECT_EMPLOYEE: &str = "SELECT id, first_name, last_name, email, avatar, department, role FROM employees WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, first_name, last_name, email, avatar, department, role FROM employees ORDER BY id";

/// Employee directory backed by the `employees` table.
///
/// Deleting an employee leaves their attendance history in place.
pub struct Employees {
    conn: Connection,
}

impl Employees {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Employees { conn: db.conn }
    }

    /// Validates and stores a new employee, returning the assigned id.
    pub fn create(&self, employee: &NewEmployee) -> Result<EmployeeId, EmployeeError> {
        let employee = employee.clone().validated()?;
        self.conn.execute(
            INSERT_EMPLOYEE,
            params![
                employee.first_name,
                employee.last_name,
                employee.email,
                employee.avatar,
                employee.department,
                employee.role
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Applies a partial update and returns the employee as stored.
    pub fn update(&self, id: EmployeeId, changes: &EmployeeChanges) -> Result<Employee, EmployeeError> {
        let current = self.get(id)?.ok_or(EmployeeError::NotFound(id))?;
        let updated = current.with_changes(changes)?;
        self.conn.execute(
            UPDATE_EMPLOYEE,
            params![
                updated.first_name,
                updated.last_name,
                updated.email,
                updated.avatar,
                updated.department,
                updated.role,
                id
            ],
        )?;
        Ok(updated)
    }

    pub fn delete(&self, id: EmployeeId) -> Result<(), EmployeeError> {
        match self.conn.execute(DELETE_EMPLOYEE, [id])? {
            0 => Err(EmployeeError::NotFound(id)),
            _ => Ok(()),
        }
    }

    pub fn get(&self, id: EmployeeId) -> Result<Option<Employee>, EmployeeError> {
        Ok(self.conn.query_row(SELECT_EMPLOYEE, [id], map_employee).optional()?)
    }

    pub fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let employees = stmt.query_map([], map_employee)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }
}

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        avatar: row.get(4)?,
        department: row.get(5)?,
        role: row.get(6)?,
    })
}
