use crate::cli::commands::confirmed;
use crate::cli::parser::{TaskAction, TaskFields};
use crate::context::AppContext;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::task::{Task, TaskInput};
use crate::ui::messages::{info, success};
use crate::utils::colors::paint;
use crate::utils::date::{display_date, parse_optional_date};
use crate::utils::formatting::{task_status_color, truncate};
use crate::utils::table::Table;

impl TaskFields {
    fn to_input(&self, name: Option<&str>) -> AppResult<TaskInput> {
        Ok(TaskInput {
            name: name.map(str::to_string),
            description: self.description.clone(),
            due_date: parse_optional_date(self.due_date.as_deref())?,
            status: self.status,
            assigned_to: self.assigned_to,
            project_id: self.project_id,
        })
    }
}

fn print_tasks(tasks: &[Task]) {
    let mut table = Table::new(&["ID", "Name", "Status", "Due", "Assigned", "Project"]);
    for t in tasks {
        table.add_row(vec![
            t.id.to_string(),
            truncate(&t.name, 40),
            paint(t.status.as_str(), task_status_color(t.status)),
            display_date(t.due_date),
            t.assigned_to.map(|a| a.to_string()).unwrap_or_default(),
            t.project_id.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }
    table.print();
}

fn print_task(t: &Task) {
    println!("Task #{}     : {}", t.id, t.name);
    println!("Status      : {}", paint(t.status.as_str(), task_status_color(t.status)));
    println!("Due         : {}", display_date(t.due_date));
    if let Some(a) = t.assigned_to {
        println!("Assigned to : {}", a);
    }
    if let Some(p) = t.project_id {
        println!("Project     : {}", p);
    }
    if !t.description.is_empty() {
        println!("\n{}", t.description);
    }
}

pub async fn handle(action: &TaskAction, ctx: &AppContext) -> AppResult<()> {
    match action {
        TaskAction::List { status, project_id } => {
            let (_, api) = ctx.authed_api()?;
            let tasks: Vec<Task> = api
                .list_tasks()
                .await?
                .into_iter()
                .filter(|t| status.is_none_or(|s| t.status == s))
                .filter(|t| project_id.is_none_or(|p| t.project_id == Some(p)))
                .collect();

            if tasks.is_empty() {
                info("No tasks found.");
            } else {
                print_tasks(&tasks);
            }
        }

        TaskAction::Show { id } => {
            let (_, api) = ctx.authed_api()?;
            print_task(&api.get_task(*id).await?);
        }

        TaskAction::Add { name, fields } => {
            let (_, api) = ctx.admin_api()?;
            let mut input = fields.to_input(Some(name.as_str()))?;
            input.status.get_or_insert_default();

            let task = api.create_task(&input).await?;
            ttlog_quiet(ctx.store.conn(), "task_create", &format!("task #{}", task.id), &task.name);
            success(format!("Task #{} created: {}", task.id, task.name));
        }

        TaskAction::Update { id, name, fields } => {
            let (_, api) = ctx.authed_api()?;
            let input = fields.to_input(name.as_deref())?;
            if input == TaskInput::default() {
                return Err(AppError::Validation("Nothing to update".into()));
            }

            let task = api.update_task(*id, &input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "task_update",
                &format!("task #{}", task.id),
                &format!("{} [{}]", task.name, task.status.as_str()),
            );
            success(format!("Task #{} updated", task.id));
        }

        TaskAction::Delete { id, yes } => {
            let (_, api) = ctx.admin_api()?;
            if !confirmed(*yes, &format!("Delete task #{}? This action is irreversible.", id)) {
                info("Operation cancelled.");
                return Ok(());
            }

            api.delete_task(*id).await?;
            ttlog_quiet(ctx.store.conn(), "task_delete", &format!("task #{}", id), "Deleted");
            success(format!("Task #{} deleted", id));
        }
    }

    Ok(())
}
