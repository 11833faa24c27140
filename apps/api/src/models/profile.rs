use serde::{Deserialize, Serialize};

/// Candidate fields used to personalise a cover letter. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl CandidateProfile {
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn skills(&self) -> Option<&str> {
        non_blank(self.skills.as_deref())
    }

    pub fn bio(&self) -> Option<&str> {
        non_blank(self.bio.as_deref())
    }
}

/// One earlier exchange of an advice conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub message: String,
    pub response: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_read_as_absent() {
        let profile = CandidateProfile {
            name: Some("   ".to_string()),
            skills: Some(String::new()),
            bio: None,
        };
        assert!(profile.name().is_none());
        assert!(profile.skills().is_none());
        assert!(profile.bio().is_none());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let profile = CandidateProfile {
            name: Some("  Alice ".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.name(), Some("Alice"));
    }
}
