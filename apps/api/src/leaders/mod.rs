// Leader profiles scraped from Wikipedia.
// Every request resolves from scratch; nothing is cached.

pub mod handlers;
pub mod resolver;
pub mod skills;
pub mod wikipedia;

use serde::Serialize;

use crate::leaders::resolver::ResolvedLeader;

/// The fixed roster, in listing order: (id, Wikipedia title).
pub const LEADERS: [(&str, &str); 3] = [
    ("jensen-huang", "Jensen Huang"),
    ("sam-altman", "Sam Altman"),
    ("bill-gates", "Bill Gates"),
];

pub const UNAVAILABLE_SUMMARY: &str = "Information temporarily unavailable";

pub fn leader_name(id: &str) -> Option<&'static str> {
    LEADERS
        .iter()
        .find(|(leader_id, _)| *leader_id == id)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderProfile {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub url: String,
}

impl LeaderProfile {
    pub fn new(id: &str, leader: ResolvedLeader) -> Self {
        Self {
            id: id.to_string(),
            name: leader.name,
            summary: leader.summary,
            image: leader.image,
            skills: leader.skills,
            url: leader.url,
        }
    }
}

/// Placeholder listed in place of a leader that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailableLeader {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub error: String,
}

impl UnavailableLeader {
    pub fn new(id: &str, name: &str, error: String) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            summary: UNAVAILABLE_SUMMARY.to_string(),
            image: None,
            skills: Vec::new(),
            error,
        }
    }
}

/// One item of `GET /api/leaders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LeaderEntry {
    Profile(LeaderProfile),
    Unavailable(UnavailableLeader),
}
