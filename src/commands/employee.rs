use crate::{
    db::employees::Employees,
    libs::{
        attendance::EmployeeId,
        employee::{Employee, EmployeeChanges, NewEmployee},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    command: EmployeeCommand,
}

/// Fields accepted by `add` and `edit`. Missing ones are prompted for.
#[derive(Debug, Args)]
struct EmployeeFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Avatar URL; pass an empty string to remove it
    #[arg(long)]
    avatar: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    role: Option<String>,
}

impl EmployeeFields {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.department.is_none()
            && self.role.is_none()
    }
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    /// Add an employee
    Add(EmployeeFields),
    /// Edit an employee
    Edit {
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee. Their attendance history is kept
    Delete {
        id: EmployeeId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all employees
    List,
    /// Show one employee
    Show { id: EmployeeId },
}

pub fn cmd(args: EmployeeArgs) -> Result<()> {
    match args.command {
        EmployeeCommand::Add(fields) => handle_add(fields),
        EmployeeCommand::Edit { id, fields } => handle_edit(id, fields),
        EmployeeCommand::Delete { id, yes } => handle_delete(id, yes),
        EmployeeCommand::List => handle_list(),
        EmployeeCommand::Show { id } => handle_show(id),
    }
}

fn handle_add(fields: EmployeeFields) -> Result<()> {
    let employee = NewEmployee {
        first_name: value_or_prompt(fields.first_name, Message::PromptFirstName)?,
        last_name: value_or_prompt(fields.last_name, Message::PromptLastName)?,
        email: value_or_prompt(fields.email, Message::PromptEmail)?,
        avatar: match fields.avatar {
            Some(avatar) => Some(avatar),
            None => Some(prompt(Message::PromptAvatar, None, true)?),
        },
        department: value_or_prompt(fields.department, Message::PromptDepartment)?,
        role: value_or_prompt(fields.role, Message::PromptRole)?,
    };

    let employees = Employees::new()?;
    let id = employees.create(&employee)?;
    let name = format!("{} {}", employee.first_name.trim(), employee.last_name.trim());
    msg_success!(Message::EmployeeCreated(id, name));
    Ok(())
}

fn handle_edit(id: EmployeeId, fields: EmployeeFields) -> Result<()> {
    let employees = Employees::new()?;
    let current = existing(&employees, id)?;

    let changes = if fields.is_empty() {
        msg_print!(Message::EditingEmployee(current.full_name()), true);
        changes_from_prompts(&current)?
    } else {
        EmployeeChanges {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            avatar: fields.avatar,
            department: fields.department,
            role: fields.role,
        }
    };

    if changes.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let updated = employees.update(id, &changes)?;
    msg_success!(Message::EmployeeUpdated(updated.full_name()));
    Ok(())
}

fn handle_delete(id: EmployeeId, yes: bool) -> Result<()> {
    let employees = Employees::new()?;
    let employee = existing(&employees, id)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEmployee(employee.full_name()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        employees.delete(id)?;
        msg_success!(Message::EmployeeDeleted(employee.full_name()));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

fn handle_list() -> Result<()> {
    let employees = Employees::new()?.list()?;

    if employees.is_empty() {
        msg_info!(Message::EmployeesNotFound);
        return Ok(());
    }

    msg_print!(Message::EmployeesHeader, true);
    View::employees(&employees);
    Ok(())
}

fn handle_show(id: EmployeeId) -> Result<()> {
    let employee = existing(&Employees::new()?, id)?;
    View::employee(&employee);
    Ok(())
}

fn existing(employees: &Employees, id: EmployeeId) -> Result<Employee> {
    match employees.get(id)? {
        Some(employee) => Ok(employee),
        None => msg_bail_anyhow!(Message::EmployeeNotFound(id)),
    }
}

/// Prompts for every field with the current value as default; only edited fields become changes.
fn changes_from_prompts(current: &Employee) -> Result<EmployeeChanges> {
    let changed = |value: String, old: &str| (value != old).then_some(value);
    let avatar = current.avatar.clone().unwrap_or_default();

    Ok(EmployeeChanges {
        first_name: changed(prompt(Message::PromptFirstName, Some(&current.first_name), false)?, &current.first_name),
        last_name: changed(prompt(Message::PromptLastName, Some(&current.last_name), false)?, &current.last_name),
        email: changed(prompt(Message::PromptEmail, Some(&current.email), false)?, &current.email),
        avatar: changed(prompt(Message::PromptAvatar, Some(&avatar), true)?, &avatar),
        department: changed(prompt(Message::PromptDepartment, Some(&current.department), false)?, &current.department),
        role: changed(prompt(Message::PromptRole, Some(&current.role), false)?, &current.role),
    })
}

fn value_or_prompt(value: Option<String>, message: Message) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(message, None, false),
    }
}

fn prompt(message: Message, default: Option<&str>, allow_empty: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(message.to_string()).allow_empty(allow_empty);
    if let Some(default) = default.filter(|d| !d.is_empty()) {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}
