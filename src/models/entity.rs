use serde::{Deserialize, Serialize};

/// A person in the knowledge base carrying a local actor id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorEntity {
    /// Bare entity id, e.g. `Q123`
    pub entity_id: String,
    pub label: String,
    pub local_id: String,
    /// Creator templates on the display side
    pub templates: Vec<String>,
    pub categories: Vec<String>,
    pub death_dates: Vec<String>,
}

impl CreatorEntity {
    /// The single display template, if exactly one exists
    pub fn single_template(&self) -> Option<&str> {
        match self.templates.as_slice() {
            [template] => Some(template.as_str()),
            _ => None,
        }
    }
}

/// An artwork in the knowledge base carrying a local object id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingEntity {
    pub entity_id: String,
    pub obj_id: String,
    pub types: Vec<String>,
    pub creators: Vec<String>,
    pub creator_templates: Vec<String>,
    pub creator_categories: Vec<String>,
    pub creator_death_dates: Vec<String>,
    pub depicted_persons: Vec<String>,
    pub depicted_categories: Vec<String>,
    /// Categories already set on the artwork entity
    pub categories: Vec<String>,
}

impl PaintingEntity {
    /// Creator ids excluding the anonymous placeholder
    pub fn named_creators(&self, anonymous_entity: &str) -> Vec<String> {
        self.creators
            .iter()
            .filter(|c| c.as_str() != anonymous_entity)
            .cloned()
            .collect()
    }

    pub fn single_creator_template(&self) -> Option<&str> {
        match self.creator_templates.as_slice() {
            [template] => Some(template.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_creators_drops_anonymous() {
        let painting = PaintingEntity {
            creators: vec!["Q4233718".to_string(), "Q5598".to_string()],
            ..Default::default()
        };
        assert_eq!(painting.named_creators("Q4233718"), vec!["Q5598".to_string()]);
    }

    #[test]
    fn test_single_template() {
        let mut creator = CreatorEntity {
            templates: vec!["Rembrandt".to_string()],
            ..Default::default()
        };
        assert_eq!(creator.single_template(), Some("Rembrandt"));
        creator.templates.push("Rembrandt van Rijn".to_string());
        assert_eq!(creator.single_template(), None);
    }
}
