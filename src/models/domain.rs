use serde::{Deserialize, Serialize};

/// Profile card eligible for an accept/reject decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Candidate {
    /// Name as shown on the card title
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Outcome of classifying a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    None,
    Accept,
    Reject,
}

impl Decision {
    /// The action to dispatch, if this decision is decisive
    pub fn action(self) -> Option<Action> {
        match self {
            Decision::None => None,
            Decision::Accept => Some(Action::Accept),
            Decision::Reject => Some(Action::Reject),
        }
    }

    pub fn is_decisive(self) -> bool {
        self.action().is_some()
    }
}

/// A decisive outcome that results in a network call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Reject,
}

impl Action {
    /// Request status understood by the matching API
    pub fn status(self) -> &'static str {
        match self {
            Action::Accept => "interested",
            Action::Reject => "ignored",
        }
    }

    /// Parse a button or API status name
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "accept" | "interested" => Some(Action::Accept),
            "reject" | "ignore" | "ignored" => Some(Action::Reject),
            _ => None,
        }
    }
}

impl From<Action> for Decision {
    fn from(value: Action) -> Self {
        match value {
            Action::Accept => Decision::Accept,
            Action::Reject => Decision::Reject,
        }
    }
}

/// Per-card interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPhase {
    Idle,
    Dragging,
    Decided,
}

/// Live drag on the front card
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub candidate_id: String,
    pub offset: f64,
}

/// Deck tuning: decision threshold and visual interpolation domains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckTuning {
    pub threshold: f64,
    pub rotation_domain: f64,
    pub max_rotation_deg: f64,
    pub stack_offset_deg: f64,
    pub indicator_domain: f64,
    pub back_card_scale: f64,
}

impl Default for DeckTuning {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            rotation_domain: 150.0,
            max_rotation_deg: 12.0,
            stack_offset_deg: 3.0,
            indicator_domain: 100.0,
            back_card_scale: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_wire_format() {
        let json = r#"{
            "_id": "64f1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "photoUrl": "https://img.test/ada.png",
            "age": 36,
            "gender": "female",
            "about": "Analytical engines",
            "skills": ["math", "poetry"]
        }"#;

        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "64f1");
        assert_eq!(candidate.display_name(), "Ada Lovelace");
        assert_eq!(candidate.skills.len(), 2);
    }

    #[test]
    fn test_candidate_optional_fields() {
        let candidate: Candidate = serde_json::from_str(r#"{"_id": "x", "firstName": "Solo"}"#).unwrap();
        assert_eq!(candidate.display_name(), "Solo");
        assert!(candidate.skills.is_empty());
        assert_eq!(candidate.age, None);
    }

    #[test]
    fn test_action_status() {
        assert_eq!(Action::Accept.status(), "interested");
        assert_eq!(Action::Reject.status(), "ignored");
        assert_eq!(Action::parse("Interested"), Some(Action::Accept));
        assert_eq!(Action::parse("ignore"), Some(Action::Reject));
        assert_eq!(Action::parse("maybe"), None);
    }

    #[test]
    fn test_decision_action() {
        assert_eq!(Decision::None.action(), None);
        assert!(Decision::Accept.is_decisive());
        assert_eq!(Decision::from(Action::Reject), Decision::Reject);
    }
}
