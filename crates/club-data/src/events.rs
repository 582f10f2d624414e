use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Tournament,
    #[default]
    Training,
    Social,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EventKind::Tournament => write!(f, "tournament"),
            EventKind::Training => write!(f, "training"),
            EventKind::Social => write!(f, "social"),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventFilter {
    pub id: Option<String>,
    pub kind: Option<EventKind>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// Free-form start time, e.g. "18:30"
    pub time: String,
    pub venue: String,
    pub description: String,
    pub kind: EventKind,
    pub attendees: Vec<String>,
}
