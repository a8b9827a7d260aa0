use fitness_errors::AppError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXERCISE_LIMIT: u64 = 50;
pub const MAX_EXERCISE_LIMIT: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: uuid::Uuid,
    pub name: String,
    pub gif_url: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub target: Option<String>,
    pub instructions: Option<String>,
}

/// Exercise row ready to upsert into the local cache, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub gif_url: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub target: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Steps(Vec<String>),
    Text(String),
}

/// Record as served by the exercise catalog API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseApiItem {
    pub name: String,
    pub gif_url: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub instructions: Option<Instructions>,
}

impl From<ExerciseApiItem> for CatalogEntry {
    fn from(item: ExerciseApiItem) -> Self {
        let instructions = item.instructions.map(|i| match i {
            Instructions::Steps(steps) => steps.join("\n"),
            Instructions::Text(text) => text,
        });
        Self {
            name: item.name,
            gif_url: item.gif_url,
            body_part: item.body_part,
            equipment: item.equipment,
            target: item.target,
            instructions,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseQuery {
    pub limit: Option<u64>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub target: Option<String>,
    pub name: Option<String>,
}

/// Which catalog endpoint a query maps to. Name wins over body part,
/// body part over equipment, equipment over target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup<'a> {
    Name(&'a str),
    BodyPart(&'a str),
    Equipment(&'a str),
    Target(&'a str),
    All(u64),
}

impl ExerciseQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.limit {
            Some(0) => Err(AppError::Validation("limit must be positive".to_string())),
            Some(n) if n > MAX_EXERCISE_LIMIT => Err(AppError::Validation(format!(
                "limit must be at most {}",
                MAX_EXERCISE_LIMIT
            ))),
            _ => Ok(()),
        }
    }

    pub fn effective_limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_EXERCISE_LIMIT)
    }

    pub fn lookup(&self) -> CatalogLookup<'_> {
        if let Some(name) = self.name() {
            CatalogLookup::Name(name)
        } else if let Some(body_part) = self.body_part() {
            CatalogLookup::BodyPart(body_part)
        } else if let Some(equipment) = self.equipment() {
            CatalogLookup::Equipment(equipment)
        } else if let Some(target) = self.target() {
            CatalogLookup::Target(target)
        } else {
            CatalogLookup::All(self.effective_limit())
        }
    }

    // Blank filters count as absent everywhere.

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn body_part(&self) -> Option<&str> {
        non_empty(&self.body_part)
    }

    pub fn equipment(&self) -> Option<&str> {
        non_empty(&self.equipment)
    }

    pub fn target(&self) -> Option<&str> {
        non_empty(&self.target)
    }

    /// Lowercased `LIKE` pattern for a substring match on name, with `\`,
    /// `%` and `_` escaped by a backslash.
    pub fn name_pattern(&self) -> Option<String> {
        self.name().map(|name| {
            let mut pattern = String::with_capacity(name.len() + 2);
            pattern.push('%');
            for c in name.to_lowercase().chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Cache,
    Api,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub source: CatalogSource,
    pub items: Vec<Exercise>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_precedence() {
        let q = ExerciseQuery {
            name: Some("curl".to_string()),
            body_part: Some("arms".to_string()),
            ..Default::default()
        };
        assert_eq!(q.lookup(), CatalogLookup::Name("curl"));

        let q = ExerciseQuery {
            equipment: Some("barbell".to_string()),
            target: Some("glutes".to_string()),
            ..Default::default()
        };
        assert_eq!(q.lookup(), CatalogLookup::Equipment("barbell"));

        let q = ExerciseQuery {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.lookup(), CatalogLookup::All(DEFAULT_EXERCISE_LIMIT));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let q = ExerciseQuery {
            body_part: Some(String::new()),
            equipment: Some("  ".to_string()),
            target: Some(" glutes ".to_string()),
            name: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(q.body_part(), None);
        assert_eq!(q.equipment(), None);
        assert_eq!(q.target(), Some("glutes"));
        assert_eq!(q.name_pattern(), None);
        assert_eq!(q.lookup(), CatalogLookup::Target("glutes"));
    }

    #[test]
    fn test_name_pattern_escapes_wildcards() {
        let q = ExerciseQuery {
            name: Some("Push_Up 100%".to_string()),
            ..Default::default()
        };
        assert_eq!(q.name_pattern().as_deref(), Some(r"%push\_up 100\%%"));

        let q = ExerciseQuery {
            name: Some(r"a\b".to_string()),
            ..Default::default()
        };
        assert_eq!(q.name_pattern().as_deref(), Some(r"%a\\b%"));
    }

    #[test]
    fn test_limit_bounds() {
        let q = ExerciseQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(q.validate().is_err());

        let q = ExerciseQuery {
            limit: Some(501),
            ..Default::default()
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_instruction_steps_are_joined() {
        let item: ExerciseApiItem = serde_json::from_str(
            r#"{"name":"push-up","gifUrl":"https://x/1.gif","bodyPart":"chest","instructions":["Plank","Lower","Press"]}"#,
        )
        .unwrap();
        let entry = CatalogEntry::from(item);
        assert_eq!(entry.instructions.as_deref(), Some("Plank\nLower\nPress"));
        assert_eq!(entry.body_part.as_deref(), Some("chest"));
        assert!(entry.target.is_none());
    }

    #[test]
    fn test_instruction_text_and_null() {
        let item: ExerciseApiItem =
            serde_json::from_str(r#"{"name":"plank","instructions":"Hold."}"#).unwrap();
        assert_eq!(CatalogEntry::from(item).instructions.as_deref(), Some("Hold."));

        let item: ExerciseApiItem =
            serde_json::from_str(r#"{"name":"plank","instructions":null}"#).unwrap();
        assert!(CatalogEntry::from(item).instructions.is_none());
    }
}
