// Record module
// Backend payload shapes: projects with embedded tasks/comments, legacy time slots

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::event::SourceRef;

/// Identifier sent by the backend. PHP backends emit ids as numbers or as
/// numeric strings depending on the driver, so both deserialize to the same
/// textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self::new(text),
            RawId::Number(number) => Self::from(number),
        })
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps as text. Numbers, booleans and other non-string values are kept
/// as their JSON text so the index builder rejects them per record.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Name(String),
    Profile {
        #[serde(default)]
        id: Option<RecordId>,
        #[serde(rename = "nome", alias = "name")]
        name: String,
    },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Profile { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: RecordId,
    #[serde(rename = "projeto_id", alias = "project_id", default)]
    pub project_id: Option<RecordId>,
    #[serde(rename = "nome", alias = "name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "data_criacao", alias = "created_at", alias = "start_date", default, deserialize_with = "lenient_text")]
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: RecordId,
    #[serde(rename = "projeto_id", alias = "project_id", default)]
    pub project_id: Option<RecordId>,
    #[serde(rename = "autor", alias = "author", default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(rename = "data", alias = "created_at", default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(rename = "texto", alias = "text", default, deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: RecordId,
    #[serde(rename = "nome", alias = "name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "versao", alias = "version", default)]
    pub version: Option<String>,
    #[serde(rename = "data_inicio", alias = "start_date", default, deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(rename = "data_fim", alias = "end_date", default, deserialize_with = "lenient_text")]
    pub end: Option<String>,
    #[serde(rename = "membros", alias = "members", default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(rename = "tarefas", alias = "tasks", default, deserialize_with = "null_as_default")]
    pub tasks: Vec<TaskRecord>,
    #[serde(rename = "comentarios", alias = "comments", default, deserialize_with = "null_as_default")]
    pub comments: Vec<CommentRecord>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: None,
            version: None,
            start: None,
            end: None,
            members: Vec::new(),
            tasks: Vec::new(),
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotEntry {
    #[serde(rename = "hora", alias = "time", default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(rename = "atividade", alias = "activity", default)]
    pub activity: Option<String>,
}

/// Legacy payload shape: one calendar date with its scheduled activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotRecord {
    #[serde(rename = "data", alias = "date", default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(rename = "tipo", alias = "kind", default)]
    pub kind: Option<String>,
    #[serde(rename = "horarios", alias = "entries", default, deserialize_with = "null_as_default")]
    pub entries: Vec<TimeSlotEntry>,
}

impl TimeSlotEntry {
    /// Activity label, falling back to the slot's kind.
    pub fn label<'a>(&'a self, slot: &'a TimeSlotRecord) -> &'a str {
        self.activity
            .as_deref()
            .filter(|activity| !activity.trim().is_empty())
            .or(slot.kind.as_deref())
            .unwrap_or("")
    }
}

/// One backend response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(rename = "allProjects", default, deserialize_with = "null_as_default")]
    pub all_projects: Vec<ProjectRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectRecord>,
    #[serde(rename = "timeSlots", default, deserialize_with = "null_as_default")]
    pub time_slots: Vec<TimeSlotRecord>,
}

/// Borrowed view of the record an event was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceRecord<'a> {
    Project(&'a ProjectRecord),
    Task(&'a ProjectRecord, &'a TaskRecord),
    Comment(&'a ProjectRecord, &'a CommentRecord),
    TimeSlot(&'a TimeSlotRecord, &'a TimeSlotEntry),
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.time_slots.is_empty()
    }

    /// `(id, name)` pairs for a project selector, in backend order.
    pub fn project_options(&self) -> Vec<(RecordId, String)> {
        self.all_projects
            .iter()
            .map(|project| (project.id.clone(), project.name.clone()))
            .collect()
    }

    /// Look a project up in the filtered list first, then in the full listing.
    pub fn find_project(&self, id: &RecordId) -> Option<&ProjectRecord> {
        self.projects
            .iter()
            .chain(self.all_projects.iter())
            .find(|project| &project.id == id)
    }

    /// Resolve an event's back-reference against this record set.
    pub fn resolve(&self, source: &SourceRef) -> Option<SourceRecord<'_>> {
        match *source {
            SourceRef::Project { project } => self.projects.get(project).map(SourceRecord::Project),
            SourceRef::Task { project, task } => {
                let owner = self.projects.get(project)?;
                owner.tasks.get(task).map(|task| SourceRecord::Task(owner, task))
            }
            SourceRef::Comment { project, comment } => {
                let owner = self.projects.get(project)?;
                owner
                    .comments
                    .get(comment)
                    .map(|comment| SourceRecord::Comment(owner, comment))
            }
            SourceRef::TimeSlot { slot, entry } => {
                let owner = self.time_slots.get(slot)?;
                owner
                    .entries
                    .get(entry)
                    .map(|entry| SourceRecord::TimeSlot(owner, entry))
            }
        }
    }
}
