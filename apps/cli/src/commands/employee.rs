//! Employee account commands.

use clap::Subcommand;

use kirana_core::Role;
use kirana_db::repository::employee::NewEmployee;

use crate::error::{CliError, CliResult};
use crate::Ctx;

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add an employee account
    Add {
        /// Business id, e.g. EMP002
        #[arg(long)]
        emp_id: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Initial password (min 8 characters)
        #[arg(long)]
        password: String,

        /// Role: admin or employee
        #[arg(long, default_value = "employee")]
        role: String,

        /// 10-digit mobile number
        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: Option<String>,

        /// 12-digit Aadhar number
        #[arg(long)]
        aadhar: Option<String>,
    },

    /// List employees
    List {
        /// Include deactivated accounts
        #[arg(long)]
        all: bool,
    },

    /// Deactivate an employee account
    Deactivate { emp_id: String },
}

pub async fn run(ctx: &Ctx, cmd: EmployeeCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        EmployeeCmd::Add {
            emp_id,
            first_name,
            last_name,
            password,
            role,
            phone,
            email,
            aadhar,
        } => {
            let role = Role::parse(&role)
                .ok_or_else(|| CliError::InvalidArgument(format!("unknown role: {}", role)))?;

            let employee = ctx
                .db
                .employees()
                .create(NewEmployee {
                    emp_id,
                    first_name,
                    last_name,
                    password,
                    role,
                    contact_number: phone,
                    email,
                    aadhar_number: aadhar,
                })
                .await?;
            println!(
                "Created {} ({}, {})",
                employee.full_name(),
                employee.emp_id,
                employee.role
            );
            Ok(())
        }

        EmployeeCmd::List { all } => {
            for e in ctx.db.employees().list(all).await? {
                let status = if e.is_active { "" } else { "  [inactive]" };
                println!(
                    "{:<10} {:<30} {:<10} {}{}",
                    e.emp_id,
                    e.full_name(),
                    e.role.to_string(),
                    e.contact_number,
                    status
                );
            }
            Ok(())
        }

        EmployeeCmd::Deactivate { emp_id } => {
            if emp_id == ctx.session.employee.emp_id {
                return Err(CliError::InvalidArgument(
                    "You cannot deactivate your own account".to_string(),
                ));
            }
            ctx.db.employees().deactivate(&emp_id).await?;
            println!("Deactivated {}", emp_id);
            Ok(())
        }
    }
}
