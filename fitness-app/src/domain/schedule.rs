use fitness_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Upcoming,
    Completed,
    Missed,
    Failed,
    Skipped,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Calendar colour for the status.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Upcoming => "#3B82F6",
            Self::Completed => "#10B981",
            Self::Missed | Self::Failed => "#EF4444",
            Self::Skipped => "#FACC15",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "missed" => Ok(Self::Missed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            other => Err(AppError::Validation(format!("unknown status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEntry {
    #[serde(alias = "workoutId")]
    pub template_id: uuid::Uuid,
    pub date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleUpdate {
    pub status: ScheduleStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: uuid::Uuid,
    pub template_id: uuid::Uuid,
    pub date: chrono::DateTime<chrono::Utc>,
    pub status: ScheduleStatus,
    pub note: Option<String>,
    pub color: String,
}

/// Shape the calendar widget consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub color: String,
}

impl CalendarEvent {
    pub fn new(entry: &ScheduleEntry, template_name: Option<&str>) -> Self {
        Self {
            id: entry.id.to_string(),
            title: template_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or("Unnamed Workout")
                .to_string(),
            start: entry.date.to_rfc3339(),
            color: entry.status.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_colors() {
        assert_eq!(ScheduleStatus::Upcoming.color(), "#3B82F6");
        assert_eq!(ScheduleStatus::Completed.color(), "#10B981");
        assert_eq!(ScheduleStatus::Missed.color(), "#EF4444");
        assert_eq!(ScheduleStatus::Failed.color(), "#EF4444");
        assert_eq!(ScheduleStatus::Skipped.color(), "#FACC15");
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            ScheduleStatus::Upcoming,
            ScheduleStatus::Completed,
            ScheduleStatus::Missed,
            ScheduleStatus::Failed,
            ScheduleStatus::Skipped,
        ] {
            assert_eq!(status.as_str().parse::<ScheduleStatus>().unwrap(), status);
        }
        assert!("done".parse::<ScheduleStatus>().is_err());
    }

    #[test]
    fn test_calendar_event_falls_back_to_unnamed() {
        let entry = ScheduleEntry {
            id: uuid::Uuid::nil(),
            template_id: uuid::Uuid::nil(),
            date: chrono::Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap(),
            status: ScheduleStatus::Completed,
            note: None,
            color: ScheduleStatus::Completed.color().to_string(),
        };

        let event = CalendarEvent::new(&entry, None);
        assert_eq!(event.title, "Unnamed Workout");
        assert_eq!(event.color, "#10B981");
        assert_eq!(event.start, "2025-03-01T07:30:00+00:00");

        assert_eq!(CalendarEvent::new(&entry, Some("Leg day")).title, "Leg day");
    }

    #[test]
    fn test_new_entry_accepts_workout_id() {
        let entry: NewScheduleEntry = serde_json::from_str(
            r#"{"workoutId":"6f1c1a52-7d1e-4c55-9d7a-0c6a8b1f2e11","date":"2025-03-01T07:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.date.to_rfc3339(), "2025-03-01T07:30:00+00:00");
    }
}
