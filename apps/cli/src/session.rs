//! Authenticated session for one CLI invocation.
//!
//! The CLI is stateless between runs; every command logs in with the
//! credentials from flags or `KIRANA_EMP_ID` / `KIRANA_PASSWORD`.

use kirana_core::{Employee, Role};
use kirana_db::{Database, DbError};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// The employee running this invocation.
pub struct Session {
    pub employee: Employee,
}

impl Session {
    /// Logs in with the given credentials and selected role.
    pub async fn login(
        db: &Database,
        emp_id: &str,
        password: &str,
        role: Role,
    ) -> CliResult<Session> {
        let employee = db
            .employees()
            .authenticate(emp_id, password, role)
            .await
            .map_err(|e| match e {
                DbError::Domain(domain) => CliError::AccessDenied(domain.to_string()),
                other => CliError::Db(other),
            })?;

        debug!(emp_id = %employee.emp_id, role = %employee.role, "Login ok");
        Ok(Session { employee })
    }

    /// Errors unless the session belongs to an admin.
    pub fn require_admin(&self) -> CliResult<()> {
        if self.employee.role != Role::Admin {
            return Err(CliError::AccessDenied(
                "This command requires an admin login".to_string(),
            ));
        }
        Ok(())
    }
}
