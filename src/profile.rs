// src/profile.rs

use serde::{Deserialize, Serialize};

/// One graded subject. Subjects are unique within a profile; insertion order
/// is the order they render in the prompt and the profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMark {
    pub subject: String,
    pub percent: u8,
}

impl SubjectMark {
    pub fn new(subject: impl Into<String>, percent: u8) -> Self {
        Self {
            subject: subject.into(),
            percent,
        }
    }
}

/// The fixed descriptive record for the one supported student. Read-only for
/// the process lifetime; injected through the config file rather than
/// hard-coded in the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub schedule: String,
    pub marks: Vec<SubjectMark>,
    pub interests: Vec<String>,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub description: String,
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            name: "Riya".to_string(),
            schedule: "School 8 AM–2 PM, Dance 5–6 PM, Homework 7–9 PM".to_string(),
            marks: vec![
                SubjectMark::new("Math", 92),
                SubjectMark::new("Science", 78),
                SubjectMark::new("English", 85),
                SubjectMark::new("History", 65),
            ],
            interests: vec![
                "dancing".to_string(),
                "reading novels".to_string(),
                "cricket".to_string(),
            ],
            likes: vec![
                "group study".to_string(),
                "interactive learning apps".to_string(),
            ],
            dislikes: vec![
                "long lectures".to_string(),
                "rote memorization".to_string(),
            ],
            description: "Active student who enjoys creative expression. History is her weakest subject."
                .to_string(),
        }
    }
}

impl StudentProfile {
    /// Renders the marks as `"Math: 92%, Science: 78%, ..."`.
    pub fn formatted_marks(&self) -> String {
        self.marks
            .iter()
            .map(|m| format!("{}: {}%", m.subject, m.percent))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
