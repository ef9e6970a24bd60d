#![allow(dead_code)]
//! Task-board import scenario shared by the integration tests: employees
//! arrive as a JSON array referencing already-stored tasks, projects arrive
//! as an XML document owning their tasks.

pub mod mocks;

use std::collections::HashSet;

use batch_import_rs::core::record::{Accepted, MapperResult, RecordMapper};
use batch_import_rs::core::validation::{Violation, parse_date, violations_of};
use batch_import_rs::error::ImportError;
use batch_import_rs::store::EntityStore;
use batch_import_rs::store::memory::MemoryStore;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

pub const DATE_PATTERN: &str = "%d/%m/%Y";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ImportEmployeeDto {
    #[validate(required, length(min = 1, max = 40))]
    #[serde(rename = "Username")]
    pub username: Option<String>,

    #[validate(required, email)]
    #[serde(rename = "Email")]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    #[serde(rename = "Phone")]
    pub phone: Option<String>,

    #[serde(rename = "Tasks", default)]
    pub tasks: Vec<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImportProjectDto {
    #[validate(required, length(min = 2))]
    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[validate(required)]
    #[serde(rename = "OpenDate")]
    pub open_date: Option<String>,

    #[serde(rename = "DueDate")]
    pub due_date: Option<String>,

    #[serde(rename = "Tasks", default)]
    pub tasks: Option<ImportProjectTasksDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportProjectTasksDto {
    #[serde(rename = "Task", default)]
    pub items: Vec<ImportTaskDto>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImportTaskDto {
    #[validate(required, length(min = 2))]
    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[validate(required)]
    #[serde(rename = "OpenDate")]
    pub open_date: Option<String>,

    #[validate(required)]
    #[serde(rename = "DueDate")]
    pub due_date: Option<String>,

    #[serde(rename = "ExecutionType")]
    pub execution_type: Option<u8>,

    #[serde(rename = "LabelType")]
    pub label_type: Option<u8>,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub registered_on: NaiveDate,
    pub task_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionType {
    ProductBacklog,
    SprintBacklog,
    InProgress,
    Finished,
}

impl ExecutionType {
    /// Unknown or absent codes fall back to the backlog.
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(1) => ExecutionType::SprintBacklog,
            Some(2) => ExecutionType::InProgress,
            Some(3) => ExecutionType::Finished,
            _ => ExecutionType::ProductBacklog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelType {
    Priority,
    Bug,
    Feature,
    Maintenance,
}

impl LabelType {
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(1) => LabelType::Bug,
            Some(2) => LabelType::Feature,
            Some(3) => LabelType::Maintenance,
            _ => LabelType::Priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub open_date: NaiveDate,
    pub due_date: NaiveDate,
    pub execution: ExecutionType,
    pub label: LabelType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub open_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub tasks: Vec<Task>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Task-board store: employees are persisted through the pipeline, task ids
/// are the already-stored rows that employee records reference.
pub struct TaskBoardStore {
    existing_task_ids: HashSet<i32>,
    employees: MemoryStore<Employee>,
}

impl TaskBoardStore {
    pub fn with_tasks<I: IntoIterator<Item = i32>>(ids: I) -> Self {
        Self {
            existing_task_ids: ids.into_iter().collect(),
            employees: MemoryStore::new(),
        }
    }

    pub fn task_exists(&self, id: i32) -> bool {
        self.existing_task_ids.contains(&id)
    }

    pub fn committed_employees(&self) -> Vec<Employee> {
        self.employees.committed()
    }

    pub fn clear(&self) {
        self.employees.clear();
    }
}

impl EntityStore<Employee> for TaskBoardStore {
    fn add_batch(&self, entities: Vec<Employee>) -> Result<(), ImportError> {
        self.employees.add_batch(entities)
    }

    fn commit(&self) -> Result<(), ImportError> {
        self.employees.commit()
    }
}

// ---------------------------------------------------------------------------
// Mappers
// ---------------------------------------------------------------------------

/// Maps employee records, resolving task references against the store.
/// `registered_on` is the declared default applied to every accepted
/// employee; tests pin it for determinism.
pub struct EmployeeMapper {
    pub registered_on: NaiveDate,
}

impl RecordMapper<ImportEmployeeDto, Employee, TaskBoardStore> for EmployeeMapper {
    fn map(&self, record: &ImportEmployeeDto, store: &TaskBoardStore) -> MapperResult<Employee> {
        let Some(username) = record.username.clone() else {
            return Err(Violation::MissingField("Username".to_string()));
        };
        let Some(email) = record.email.clone() else {
            return Err(Violation::MissingField("Email".to_string()));
        };
        let Some(phone) = record.phone.clone() else {
            return Err(Violation::MissingField("Phone".to_string()));
        };

        let mut task_ids = Vec::new();
        let mut child_violations = Vec::new();
        let mut seen = HashSet::new();

        for id in &record.tasks {
            // Repeated references to the same task collapse into one link
            if !seen.insert(*id) {
                continue;
            }
            if store.task_exists(*id) {
                task_ids.push(*id);
            } else {
                child_violations.push(Violation::UnresolvedReference(format!("task {}", id)));
            }
        }

        let children_accepted = task_ids.len();

        Ok(Accepted {
            entities: vec![Employee {
                username,
                email,
                phone,
                registered_on: self.registered_on,
                task_ids,
            }],
            children_accepted,
            child_violations,
        })
    }

    fn success_line(&self, record: &ImportEmployeeDto, accepted: &Accepted<Employee>) -> String {
        format!(
            "Successfully imported employee - {} with {} tasks.",
            record.username.as_deref().unwrap_or_default(),
            accepted.children_accepted
        )
    }
}

/// Maps project records; tasks are owned children validated against their
/// parent's dates.
pub struct ProjectMapper;

impl ProjectMapper {
    fn map_task(
        dto: &ImportTaskDto,
        project_open: NaiveDate,
        project_due: Option<NaiveDate>,
    ) -> Result<Task, Violation> {
        if let Err(errors) = dto.validate() {
            return Err(violations_of(&errors)
                .into_iter()
                .next()
                .unwrap_or(Violation::BadFormat("Task".to_string())));
        }

        let open_date = parse_date(
            "OpenDate",
            dto.open_date.as_deref().unwrap_or_default(),
            DATE_PATTERN,
        )?;
        let due_date = parse_date(
            "DueDate",
            dto.due_date.as_deref().unwrap_or_default(),
            DATE_PATTERN,
        )?;

        if open_date < project_open {
            return Err(Violation::OutOfRange("OpenDate".to_string()));
        }
        if let Some(project_due) = project_due {
            if due_date > project_due {
                return Err(Violation::OutOfRange("DueDate".to_string()));
            }
        }

        Ok(Task {
            name: dto.name.clone().unwrap_or_default(),
            open_date,
            due_date,
            execution: ExecutionType::from_code(dto.execution_type),
            label: LabelType::from_code(dto.label_type),
        })
    }
}

impl RecordMapper<ImportProjectDto, Project, MemoryStore<Project>> for ProjectMapper {
    fn map(
        &self,
        record: &ImportProjectDto,
        _store: &MemoryStore<Project>,
    ) -> MapperResult<Project> {
        let Some(name) = record.name.clone() else {
            return Err(Violation::MissingField("Name".to_string()));
        };
        let Some(open_raw) = record.open_date.as_deref() else {
            return Err(Violation::MissingField("OpenDate".to_string()));
        };

        // A bad project date rejects the whole unit, tasks included
        let open_date = parse_date("OpenDate", open_raw, DATE_PATTERN)?;
        let due_date = match record.due_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_date("DueDate", raw, DATE_PATTERN)?)
            }
            _ => None,
        };

        let mut tasks = Vec::new();
        let mut child_violations = Vec::new();

        for task_dto in record.tasks.iter().flat_map(|t| t.items.iter()) {
            match Self::map_task(task_dto, open_date, due_date) {
                Ok(task) => tasks.push(task),
                Err(violation) => child_violations.push(violation),
            }
        }

        let children_accepted = tasks.len();

        Ok(Accepted {
            entities: vec![Project {
                name,
                open_date,
                due_date,
                tasks,
            }],
            children_accepted,
            child_violations,
        })
    }

    fn success_line(&self, record: &ImportProjectDto, accepted: &Accepted<Project>) -> String {
        format!(
            "Successfully imported project - {} with {} tasks.",
            record.name.as_deref().unwrap_or_default(),
            accepted.children_accepted
        )
    }
}
