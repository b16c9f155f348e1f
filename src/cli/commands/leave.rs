use crate::api::ApiClient;
use crate::cli::commands::confirmed;
use crate::cli::parser::LeaveAction;
use crate::context::AppContext;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveRequest, LeaveRequestInput, LeaveStatus};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::paint;
use crate::utils::date::{parse_date, parse_optional_date};
use crate::utils::formatting::{leave_status_color, truncate};
use crate::utils::table::Table;

fn print_requests(requests: &[LeaveRequest]) {
    let mut table = Table::new(&["ID", "Employee", "Type", "Start", "End", "Days", "Status", "Reason"]);
    for r in requests {
        table.add_row(vec![
            r.id.to_string(),
            r.employee_name.clone(),
            r.leave_type.as_str().to_string(),
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.days().to_string(),
            paint(r.status.as_str(), leave_status_color(r.status)),
            truncate(&r.reason, 40),
        ]);
    }
    table.print();
}

async fn find_request(api: &ApiClient, id: i64) -> AppResult<LeaveRequest> {
    api.list_leave_requests()
        .await?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::Validation(format!("Leave request #{} not found", id)))
}

async fn decide(ctx: &AppContext, id: i64, status: LeaveStatus) -> AppResult<()> {
    let (_, api) = ctx.admin_api()?;

    let request = find_request(&api, id).await?;
    if !request.status.is_decidable() {
        return Err(AppError::Validation(format!(
            "Leave request #{} is {} and cannot be changed",
            id,
            request.status.as_str()
        )));
    }

    let updated = api.set_leave_status(id, status).await?;
    ttlog_quiet(
        ctx.store.conn(),
        "leave_update",
        &format!("leave #{}", id),
        &format!("{} -> {}", request.status.as_str(), updated.status.as_str()),
    );
    success(format!(
        "Leave request #{} of {} is now {}",
        id,
        request.employee_name,
        updated.status.as_str()
    ));
    Ok(())
}

pub async fn handle(action: &LeaveAction, ctx: &AppContext) -> AppResult<()> {
    match action {
        LeaveAction::List => {
            let (_, api) = ctx.authed_api()?;
            let requests = api.list_leave_requests().await?;
            if requests.is_empty() {
                info("No leave requests found.");
            } else {
                print_requests(&requests);
            }
        }

        LeaveAction::Balance => {
            let (_, api) = ctx.authed_api()?;
            let balance = api.leave_balance().await?;

            header("Leave balance");
            println!("Annual      : {} day(s)", balance.annual);
            println!("Sick        : {} day(s)", balance.sick);
            println!("Casual      : {} day(s)", balance.casual);
        }

        LeaveAction::Request {
            leave_type,
            start,
            end,
            reason,
            draft,
        } => {
            let (session, api) = ctx.authed_api()?;

            // The request carries the requester's identity as the server expects it.
            let (employee_name, employee_email) = match ctx.sessions().cached_profile()? {
                Some(p) => (p.full_name(), p.email),
                None => (session.username.clone(), session.username.clone()),
            };

            let input = LeaveRequestInput {
                employee_name,
                employee_email,
                leave_type: *leave_type,
                start_date: parse_date(start)?,
                end_date: parse_date(end)?,
                reason: reason.clone().unwrap_or_default(),
                status: if *draft {
                    LeaveStatus::Draft
                } else {
                    LeaveStatus::Pending
                },
            };

            let created = api.create_leave_request(&input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "leave_create",
                &format!("leave #{}", created.id),
                &format!(
                    "{} {} to {}",
                    created.leave_type.as_str(),
                    created.start_date,
                    created.end_date
                ),
            );

            if created.status == LeaveStatus::Draft {
                success(format!("Leave request #{} saved as draft", created.id));
            } else {
                success(format!(
                    "Leave request #{} submitted ({} day(s))",
                    created.id,
                    created.days()
                ));
            }
        }

        LeaveAction::Update {
            id,
            leave_type,
            start,
            end,
            reason,
            submit,
        } => {
            let (_, api) = ctx.authed_api()?;
            let current = find_request(&api, *id).await?;

            if !matches!(current.status, LeaveStatus::Draft | LeaveStatus::Pending) {
                return Err(AppError::Validation(format!(
                    "Leave request #{} is {} and can no longer be edited",
                    id,
                    current.status.as_str()
                )));
            }

            let status = if *submit && current.status == LeaveStatus::Draft {
                LeaveStatus::Pending
            } else {
                current.status
            };

            let input = LeaveRequestInput {
                employee_name: current.employee_name,
                employee_email: current.employee_email,
                leave_type: leave_type.unwrap_or(current.leave_type),
                start_date: parse_optional_date(start.as_deref())?.unwrap_or(current.start_date),
                end_date: parse_optional_date(end.as_deref())?.unwrap_or(current.end_date),
                reason: reason.clone().unwrap_or(current.reason),
                status,
            };

            let updated = api.update_leave_request(*id, &input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "leave_update",
                &format!("leave #{}", id),
                updated.status.as_str(),
            );
            success(format!("Leave request #{} updated", id));
        }

        LeaveAction::Delete { id, yes } => {
            let (_, api) = ctx.authed_api()?;
            if !confirmed(*yes, &format!("Delete leave request #{}?", id)) {
                info("Operation cancelled.");
                return Ok(());
            }

            api.delete_leave_request(*id).await?;
            ttlog_quiet(ctx.store.conn(), "leave_delete", &format!("leave #{}", id), "Deleted");
            success(format!("Leave request #{} deleted", id));
        }

        LeaveAction::Approve { id } => decide(ctx, *id, LeaveStatus::Approved).await?,
        LeaveAction::Reject { id } => decide(ctx, *id, LeaveStatus::Rejected).await?,
    }

    Ok(())
}
