//! Imports task-board employees from a JSON payload and projects from an
//! XML payload, then prints the per-record reports.

use std::collections::HashSet;

use anyhow::Result;
use batch_import_rs::core::pipeline::ImportPipelineBuilder;
use batch_import_rs::core::record::{Accepted, MapperResult, RecordMapper};
use batch_import_rs::core::validation::{Violation, parse_date};
use batch_import_rs::error::ImportError;
use batch_import_rs::format::json::JsonRecordReader;
use batch_import_rs::format::xml::XmlRecordReaderBuilder;
use batch_import_rs::store::EntityStore;
use batch_import_rs::store::logger::LoggerStore;
use batch_import_rs::store::memory::MemoryStore;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

const DATE_PATTERN: &str = "%d/%m/%Y";

#[derive(Debug, Deserialize, Validate)]
struct ImportEmployeeDto {
    #[validate(required, length(min = 1, max = 40))]
    #[serde(rename = "Username")]
    username: Option<String>,

    #[validate(required, email)]
    #[serde(rename = "Email")]
    email: Option<String>,

    #[validate(required, length(min = 1))]
    #[serde(rename = "Phone")]
    phone: Option<String>,

    #[serde(rename = "Tasks", default)]
    tasks: Vec<i32>,
}

#[derive(Debug, Deserialize, Validate)]
struct ImportProjectDto {
    #[validate(required, length(min = 2))]
    #[serde(rename = "Name")]
    name: Option<String>,

    #[validate(required)]
    #[serde(rename = "OpenDate")]
    open_date: Option<String>,

    #[serde(rename = "DueDate")]
    due_date: Option<String>,

    #[serde(rename = "Tasks", default)]
    tasks: Option<ImportProjectTasksDto>,
}

#[derive(Debug, Default, Deserialize)]
struct ImportProjectTasksDto {
    #[serde(rename = "Task", default)]
    items: Vec<ImportTaskDto>,
}

#[derive(Debug, Deserialize, Validate)]
struct ImportTaskDto {
    #[validate(required, length(min = 2))]
    #[serde(rename = "Name")]
    name: Option<String>,

    #[validate(required)]
    #[serde(rename = "OpenDate")]
    open_date: Option<String>,

    #[validate(required)]
    #[serde(rename = "DueDate")]
    due_date: Option<String>,
}

#[derive(Debug, Clone)]
struct Employee {
    username: String,
    email: String,
    phone: String,
    registered_on: NaiveDate,
    task_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
struct Task {
    name: String,
    open_date: NaiveDate,
    due_date: NaiveDate,
}

#[derive(Debug, Clone)]
struct Project {
    name: String,
    open_date: NaiveDate,
    due_date: Option<NaiveDate>,
    tasks: Vec<Task>,
}

struct TaskBoardStore {
    existing_task_ids: HashSet<i32>,
    employees: MemoryStore<Employee>,
}

impl TaskBoardStore {
    fn task_exists(&self, id: i32) -> bool {
        self.existing_task_ids.contains(&id)
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

struct EmployeeMapper {
    registered_on: NaiveDate,
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

struct ProjectMapper;

// Projects resolve nothing against the store, so the mapper works with
// any store type, the logging one included.
impl<S> RecordMapper<ImportProjectDto, Project, S> for ProjectMapper {
    fn map(&self, record: &ImportProjectDto, _store: &S) -> MapperResult<Project> {
        let Some(name) = record.name.clone() else {
            return Err(Violation::MissingField("Name".to_string()));
        };
        let Some(open_raw) = record.open_date.as_deref() else {
            return Err(Violation::MissingField("OpenDate".to_string()));
        };

        let open_date = parse_date("OpenDate", open_raw, DATE_PATTERN)?;
        let due_date = match record.due_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_date("DueDate", raw, DATE_PATTERN)?),
            _ => None,
        };

        let mut tasks = Vec::new();
        let mut child_violations = Vec::new();

        for task_dto in record.tasks.iter().flat_map(|t| t.items.iter()) {
            if task_dto.validate().is_err() {
                child_violations.push(Violation::BadFormat("Task".to_string()));
                continue;
            }

            let task_dates = parse_date(
                "OpenDate",
                task_dto.open_date.as_deref().unwrap_or_default(),
                DATE_PATTERN,
            )
            .and_then(|open| {
                parse_date(
                    "DueDate",
                    task_dto.due_date.as_deref().unwrap_or_default(),
                    DATE_PATTERN,
                )
                .map(|due| (open, due))
            });

            let (task_open, task_due) = match task_dates {
                Ok(dates) => dates,
                Err(violation) => {
                    child_violations.push(violation);
                    continue;
                }
            };

            if task_open < open_date || due_date.is_some_and(|due| task_due > due) {
                child_violations.push(Violation::OutOfRange("Task".to_string()));
                continue;
            }

            tasks.push(Task {
                name: task_dto.name.clone().unwrap_or_default(),
                open_date: task_open,
                due_date: task_due,
            });
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

fn main() -> Result<()> {
    env_logger::init();

    let employees_json = br#"[
        {"Username":"stoyan","Email":"stoyan@mail.bg","Phone":"111-222","Tasks":[1,2,2]},
        {"Username":"mina","Email":"not-an-email","Phone":"333","Tasks":[1]},
        {"Username":"ivo","Email":"ivo@mail.bg","Phone":"444","Tasks":[7]}
    ]"#;

    let reader: JsonRecordReader<ImportEmployeeDto> = JsonRecordReader::new();
    let mapper = EmployeeMapper {
        registered_on: Utc::now().date_naive(),
    };
    let store = TaskBoardStore {
        existing_task_ids: HashSet::from([1, 2]),
        employees: MemoryStore::new(),
    };

    let pipeline = ImportPipelineBuilder::new()
        .name("import-employees")
        .reader(&reader)
        .mapper(&mapper)
        .store(&store)
        .build();

    let report = pipeline.run(employees_json)?;
    println!("{}", report);
    println!(
        "-- {} employees persisted\n",
        store.employees.committed_len()
    );

    let projects_xml = br#"
        <Projects>
            <Project>
                <Name>Redesign</Name>
                <OpenDate>01/01/2019</OpenDate>
                <DueDate>01/09/2019</DueDate>
                <Tasks>
                    <Task>
                        <Name>Wireframes</Name>
                        <OpenDate>02/01/2019</OpenDate>
                        <DueDate>01/05/2019</DueDate>
                    </Task>
                    <Task>
                        <Name>Kickoff</Name>
                        <OpenDate>31/12/2018</OpenDate>
                        <DueDate>01/02/2019</DueDate>
                    </Task>
                </Tasks>
            </Project>
            <Project>
                <Name>X</Name>
                <OpenDate>01/01/2019</OpenDate>
            </Project>
        </Projects>
    "#;

    let reader = XmlRecordReaderBuilder::<ImportProjectDto>::new()
        .tag("Project")
        .build();
    let mapper = ProjectMapper;
    let store: MemoryStore<Project> = MemoryStore::new();

    let pipeline = ImportPipelineBuilder::new()
        .name("import-projects")
        .reader(&reader)
        .mapper(&mapper)
        .store(&store)
        .build();

    let report = pipeline.run(projects_xml)?;
    println!("{}", report);
    println!("-- {} projects persisted", store.committed_len());

    // Same import against a logging store, to watch the batch go by
    let logging_store = LoggerStore::default();
    let pipeline = ImportPipelineBuilder::new()
        .name("import-projects-dry-run")
        .reader(&reader)
        .mapper(&mapper)
        .store(&logging_store)
        .build();
    pipeline.run(projects_xml)?;

    Ok(())
}
