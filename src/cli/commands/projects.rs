use crate::cli::commands::confirmed;
use crate::cli::parser::{ProjectAction, ProjectFields};
use crate::context::AppContext;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::project::ProjectInput;
use crate::ui::messages::{info, success};
use crate::utils::date::{display_date, parse_optional_date};
use crate::utils::formatting::truncate;
use crate::utils::table::Table;

impl ProjectFields {
    fn to_input(&self, name: Option<&str>) -> AppResult<ProjectInput> {
        let input = ProjectInput {
            name: name.map(str::to_string),
            description: self.description.clone(),
            start_date: parse_optional_date(self.start_date.as_deref())?,
            end_date: parse_optional_date(self.end_date.as_deref())?,
        };

        if let (Some(start), Some(end)) = (input.start_date, input.end_date)
            && end < start
        {
            return Err(AppError::Validation(format!(
                "Project end date {} is before start date {}",
                end, start
            )));
        }
        Ok(input)
    }
}

pub async fn handle(action: &ProjectAction, ctx: &AppContext) -> AppResult<()> {
    match action {
        ProjectAction::List => {
            let (_, api) = ctx.authed_api()?;
            let projects = api.list_projects().await?;
            if projects.is_empty() {
                info("No projects found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Name", "Start", "End", "Description"]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    display_date(p.start_date),
                    display_date(p.end_date),
                    truncate(&p.description, 50),
                ]);
            }
            table.print();
        }

        ProjectAction::Add { name, fields } => {
            let (_, api) = ctx.admin_api()?;
            let project = api.create_project(&fields.to_input(Some(name.as_str()))?).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "project_create",
                &format!("project #{}", project.id),
                &project.name,
            );
            success(format!("Project #{} created: {}", project.id, project.name));
        }

        ProjectAction::Update { id, name, fields } => {
            let (_, api) = ctx.admin_api()?;
            let input = fields.to_input(name.as_deref())?;
            if input == ProjectInput::default() {
                return Err(AppError::Validation("Nothing to update".into()));
            }

            let project = api.update_project(*id, &input).await?;
            ttlog_quiet(
                ctx.store.conn(),
                "project_update",
                &format!("project #{}", project.id),
                &project.name,
            );
            success(format!("Project #{} updated", project.id));
        }

        ProjectAction::Delete { id, yes } => {
            let (_, api) = ctx.admin_api()?;
            if !confirmed(*yes, &format!("Delete project #{}? This action is irreversible.", id)) {
                info("Operation cancelled.");
                return Ok(());
            }

            api.delete_project(*id).await?;
            ttlog_quiet(ctx.store.conn(), "project_delete", &format!("project #{}", id), "Deleted");
            success(format!("Project #{} deleted", id));
        }
    }

    Ok(())
}
