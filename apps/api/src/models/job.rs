use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of a job posting, as handed over by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl JobDocument {
    /// Title, description and requirements flattened into one blob for embedding.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.requirements.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_text_joins_all_fields() {
        let job = JobDocument {
            id: Uuid::new_v4(),
            title: "Backend Developer".to_string(),
            description: "Python Django APIs".to_string(),
            requirements: vec!["REST".to_string(), "SQL".to_string()],
        };
        assert_eq!(job.embedding_text(), "Backend Developer Python Django APIs REST SQL");
    }

    #[test]
    fn test_requirements_default_to_empty() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "Frontend Developer",
            "description": "React"
        });
        let job: JobDocument = serde_json::from_value(json).unwrap();
        assert!(job.requirements.is_empty());
    }
}
