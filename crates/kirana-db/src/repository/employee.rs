//! # Employee Repository
//!
//! Database operations for employee accounts and login.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  authenticate(emp_id, password, selected_role)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Fetch row by emp_id ──── none ──► InvalidCredentials                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kirana_core::auth::authorize_login                                    │
//! │  (deactivated / wrong password / role mismatch)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Employee) ──► Session                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kirana_core::auth::{authorize_login, hash_password};
use kirana_core::validation::{validate_aadhar, validate_email, validate_name, validate_phone};
use kirana_core::{AuthError, CoreError, Employee, Role};

/// Input for creating an employee account. The plain password is hashed
/// before anything touches the database.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
    pub contact_number: String,
    pub email: Option<String>,
    pub aadhar_number: Option<String>,
}

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Creates an employee account.
    ///
    /// Validates contact formats, hashes the password, and inserts.
    /// A duplicate emp_id surfaces as `DbError::UniqueViolation`.
    pub async fn create(&self, new: NewEmployee) -> DbResult<Employee> {
        validate_name("first_name", &new.first_name).map_err(CoreError::Validation)?;
        validate_name("last_name", &new.last_name).map_err(CoreError::Validation)?;
        validate_phone(&new.contact_number).map_err(CoreError::Validation)?;
        if let Some(email) = &new.email {
            validate_email(email).map_err(CoreError::Validation)?;
        }
        if let Some(aadhar) = &new.aadhar_number {
            validate_aadhar(aadhar).map_err(CoreError::Validation)?;
        }

        let password_hash = hash_password(&new.password).map_err(CoreError::Auth)?;
        let now = Utc::now();

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            emp_id: new.emp_id,
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash,
            role: new.role,
            contact_number: new.contact_number,
            email: new.email,
            aadhar_number: new.aadhar_number,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(emp_id = %employee.emp_id, role = %employee.role, "Creating employee");

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, emp_id, first_name, last_name, password_hash, role,
                contact_number, email, aadhar_number, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.emp_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.password_hash)
        .bind(employee.role)
        .bind(&employee.contact_number)
        .bind(&employee.email)
        .bind(&employee.aadhar_number)
        .bind(employee.is_active)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        info!(emp_id = %employee.emp_id, "Employee created");
        Ok(employee)
    }

    /// Gets an employee by business id ("EMP001").
    pub async fn get_by_emp_id(&self, emp_id: &str) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, emp_id, first_name, last_name, password_hash, role,
                   contact_number, email, aadhar_number, is_active,
                   created_at, updated_at
            FROM employees
            WHERE emp_id = ?1
            "#,
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Gets an employee by primary id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, emp_id, first_name, last_name, password_hash, role,
                   contact_number, email, aadhar_number, is_active,
                   created_at, updated_at
            FROM employees
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Verifies credentials and the selected role; returns the employee
    /// on success.
    ///
    /// An unknown emp_id reports `InvalidCredentials`, the same as a wrong
    /// password, so login failures never reveal which part was wrong.
    pub async fn authenticate(
        &self,
        emp_id: &str,
        password: &str,
        selected_role: Role,
    ) -> DbResult<Employee> {
        let employee = self
            .get_by_emp_id(emp_id)
            .await?
            .ok_or(CoreError::Auth(AuthError::InvalidCredentials))?;

        authorize_login(&employee, password, selected_role).map_err(CoreError::Auth)?;

        info!(emp_id = %employee.emp_id, role = %employee.role, "Login succeeded");
        Ok(employee)
    }

    /// Lists employees, newest first. Deactivated accounts are included
    /// only when `include_inactive` is set.
    pub async fn list(&self, include_inactive: bool) -> DbResult<Vec<Employee>> {
        let sql = if include_inactive {
            r#"
            SELECT id, emp_id, first_name, last_name, password_hash, role,
                   contact_number, email, aadhar_number, is_active,
                   created_at, updated_at
            FROM employees
            ORDER BY created_at DESC
            "#
        } else {
            r#"
            SELECT id, emp_id, first_name, last_name, password_hash, role,
                   contact_number, email, aadhar_number, is_active,
                   created_at, updated_at
            FROM employees
            WHERE is_active = 1
            ORDER BY created_at DESC
            "#
        };

        let employees = sqlx::query_as::<_, Employee>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    /// Soft-deactivates an employee. The row stays so historical bills
    /// keep a valid reference.
    pub async fn deactivate(&self, emp_id: &str) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET is_active = 0, updated_at = ?2
            WHERE emp_id = ?1 AND is_active = 1
            "#,
        )
        .bind(emp_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", emp_id));
        }

        info!(emp_id = %emp_id, "Employee deactivated");
        Ok(())
    }

    /// Updates an employee's contact details.
    pub async fn update_contact(
        &self,
        emp_id: &str,
        contact_number: &str,
        email: Option<&str>,
    ) -> DbResult<()> {
        validate_phone(contact_number).map_err(CoreError::Validation)?;
        if let Some(email) = email {
            validate_email(email).map_err(CoreError::Validation)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET contact_number = ?2, email = ?3, updated_at = ?4
            WHERE emp_id = ?1
            "#,
        )
        .bind(emp_id)
        .bind(contact_number)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", emp_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_employee(emp_id: &str, role: Role) -> NewEmployee {
        NewEmployee {
            emp_id: emp_id.to_string(),
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            password: "secret123".to_string(),
            role,
            contact_number: "9876543210".to_string(),
            email: Some("asha@example.com".to_string()),
            aadhar_number: Some("123456789012".to_string()),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let db = test_db().await;
        let repo = db.employees();

        let created = repo.create(new_employee("EMP001", Role::Admin)).await.unwrap();
        assert!(created.password_hash.starts_with("$argon2"));

        let fetched = repo.get_by_emp_id("EMP001").await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.role, Role::Admin);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_emp_id_rejected() {
        let db = test_db().await;
        let repo = db.employees();

        repo.create(new_employee("EMP001", Role::Admin)).await.unwrap();
        let err = repo
            .create(new_employee("EMP001", Role::Employee))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let db = test_db().await;
        let mut input = new_employee("EMP002", Role::Employee);
        input.contact_number = "1234567890".to_string();

        let err = db.employees().create(input).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_happy_path() {
        let db = test_db().await;
        let repo = db.employees();
        repo.create(new_employee("EMP001", Role::Employee)).await.unwrap();

        let emp = repo
            .authenticate("EMP001", "secret123", Role::Employee)
            .await
            .unwrap();
        assert_eq!(emp.emp_id, "EMP001");
    }

    #[tokio::test]
    async fn test_authenticate_role_mismatch() {
        let db = test_db().await;
        let repo = db.employees();
        repo.create(new_employee("EMP001", Role::Admin)).await.unwrap();

        // Correct admin credentials, employee role selected.
        let err = repo
            .authenticate("EMP001", "secret123", Role::Employee)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Auth(AuthError::RoleMismatch))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_and_wrong_password_look_alike() {
        let db = test_db().await;
        let repo = db.employees();
        repo.create(new_employee("EMP001", Role::Employee)).await.unwrap();

        let unknown = repo
            .authenticate("EMP999", "secret123", Role::Employee)
            .await
            .unwrap_err();
        let wrong = repo
            .authenticate("EMP001", "bad-password", Role::Employee)
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_deactivated_cannot_login() {
        let db = test_db().await;
        let repo = db.employees();
        repo.create(new_employee("EMP001", Role::Employee)).await.unwrap();
        repo.deactivate("EMP001").await.unwrap();

        let err = repo
            .authenticate("EMP001", "secret123", Role::Employee)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Auth(AuthError::AccountDeactivated))
        ));

        // Deactivating twice is a NotFound, not a silent no-op.
        assert!(repo.deactivate("EMP001").await.is_err());
    }

    #[tokio::test]
    async fn test_list_filters_inactive() {
        let db = test_db().await;
        let repo = db.employees();
        repo.create(new_employee("EMP001", Role::Admin)).await.unwrap();
        repo.create(new_employee("EMP002", Role::Employee)).await.unwrap();
        repo.deactivate("EMP002").await.unwrap();

        assert_eq!(repo.list(false).await.unwrap().len(), 1);
        assert_eq!(repo.list(true).await.unwrap().len(), 2);
    }
}
