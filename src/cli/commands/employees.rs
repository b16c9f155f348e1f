use crate::cli::commands::confirmed;
use crate::cli::parser::EmployeeAction;
use crate::context::AppContext;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeInput;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, paint};
use crate::utils::table::Table;

fn check_email(email: &str) -> AppResult<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid email address: {}", email)))
    }
}

/// Every employee operation needs an administrator session.
pub async fn handle(action: &EmployeeAction, ctx: &AppContext) -> AppResult<()> {
    let (_, api) = ctx.admin_api()?;

    match action {
        EmployeeAction::List => {
            let employees = api.list_employees().await?;
            if employees.is_empty() {
                info("No employees found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Name", "Email", "Role", "Active"]);
            for e in &employees {
                let active = if e.is_active {
                    "yes".to_string()
                } else {
                    paint("no", GREY)
                };
                table.add_row(vec![
                    e.id.to_string(),
                    e.full_name(),
                    e.email.clone(),
                    e.role.clone(),
                    active,
                ]);
            }
            table.print();
        }

        EmployeeAction::Add {
            first_name,
            last_name,
            email,
            role,
        } => {
            check_email(email)?;
            let input = EmployeeInput {
                first_name: Some(first_name.clone()),
                last_name: Some(last_name.clone()),
                email: Some(email.clone()),
                role: role.clone(),
                is_active: Some(true),
            };

            let employee = api.create_employee(&input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "employee_create",
                &format!("employee #{}", employee.id),
                &employee.email,
            );
            success(format!(
                "Employee #{} created: {}",
                employee.id,
                employee.full_name()
            ));
        }

        EmployeeAction::Update {
            id,
            first_name,
            last_name,
            email,
            role,
            active,
        } => {
            if let Some(email) = email {
                check_email(email)?;
            }
            let input = EmployeeInput {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                role: role.clone(),
                is_active: *active,
            };
            if input == EmployeeInput::default() {
                return Err(AppError::Validation("Nothing to update".into()));
            }

            let employee = api.update_employee(*id, &input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "employee_update",
                &format!("employee #{}", employee.id),
                &employee.email,
            );
            success(format!("Employee #{} updated", employee.id));
        }

        EmployeeAction::Delete { id, yes } => {
            if !confirmed(*yes, &format!("Delete employee #{}? This action is irreversible.", id)) {
                info("Operation cancelled.");
                return Ok(());
            }

            api.delete_employee(*id).await?;
            ttlog_quiet(ctx.store.conn(), "employee_delete", &format!("employee #{}", id), "Deleted");
            success(format!("Employee #{} deleted", id));
        }
    }

    Ok(())
}
