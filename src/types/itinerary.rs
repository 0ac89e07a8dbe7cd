use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::SafarError, structured_output, types::language::Language};

/// Parameters of an itinerary generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub destination: String,
    pub days: u32,
    #[serde(default)]
    pub language: Language,
}

impl ItineraryRequest {
    pub fn new(destination: impl Into<String>, days: u32, language: Language) -> Self {
        Self {
            destination: destination.into(),
            days,
            language,
        }
    }

    pub fn validate(&self) -> Result<(), SafarError> {
        if self.destination.trim().is_empty() {
            return Err(SafarError::InvalidRequest(
                "destination must not be empty".to_string(),
            ));
        }
        if self.days == 0 {
            return Err(SafarError::InvalidRequest(
                "trip length must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Day-by-day travel plan produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[structured_output(name = "Itinerary")]
pub struct Itinerary {
    /// Destination the plan covers
    pub destination: String,
    /// Human-readable trip length, e.g. "3 days"
    pub duration: String,
    /// Short overview of the whole trip
    pub summary: String,
    /// One entry per day, in order, numbered from 1
    pub days: Vec<DayPlan>,
}

/// Plan for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    /// Theme or title of the day
    pub theme: String,
    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    /// Time label such as "09:00" or "Morning"
    pub time: String,
    pub description: String,
    /// Place where the activity happens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Itinerary {
    /// Check that `days` holds exactly `expected` entries numbered `1..=expected`
    /// in order.
    pub fn check_day_sequence(&self, expected: u32) -> Result<(), String> {
        if self.days.len() != expected as usize {
            return Err(format!(
                "expected {} day entries, got {}",
                expected,
                self.days.len()
            ));
        }

        for (idx, plan) in self.days.iter().enumerate() {
            let want = idx as u32 + 1;
            if plan.day != want {
                return Err(format!(
                    "days[{idx}] has day index {}, expected {want}",
                    plan.day
                ));
            }
        }

        Ok(())
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.destination, self.duration)?;
        writeln!(f, "{}", self.summary)?;
        for day in &self.days {
            writeln!(f)?;
            writeln!(f, "Day {}: {}", day.day, day.theme)?;
            for activity in &day.activities {
                match &activity.location {
                    Some(location) => writeln!(
                        f,
                        "  {}  {} @ {}",
                        activity.time, activity.description, location
                    )?,
                    None => writeln!(f, "  {}  {}", activity.time, activity.description)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u32, theme: &str) -> DayPlan {
        DayPlan {
            day,
            theme: theme.to_string(),
            activities: vec![Activity {
                time: "09:00".to_string(),
                description: "Breakfast".to_string(),
                location: None,
            }],
        }
    }

    fn kyoto(days: Vec<DayPlan>) -> Itinerary {
        Itinerary {
            destination: "Kyoto".to_string(),
            duration: "3 days".to_string(),
            summary: "Temples and gardens".to_string(),
            days,
        }
    }

    #[test]
    fn contiguous_days_pass() {
        let plan = kyoto(vec![
            day(1, "Arrival & Gion District"),
            day(2, "Temples of Higashiyama"),
            day(3, "Arashiyama & Departure"),
        ]);
        assert!(plan.check_day_sequence(3).is_ok());
        assert_eq!(plan.activity_count(), 3);
    }

    #[test]
    fn wrong_count_fails() {
        let plan = kyoto(vec![day(1, "a"), day(2, "b")]);
        let err = plan.check_day_sequence(3).unwrap_err();
        assert!(err.contains("expected 3"));
    }

    #[test]
    fn gap_or_reorder_fails() {
        let gap = kyoto(vec![day(1, "a"), day(3, "b"), day(4, "c")]);
        assert!(gap.check_day_sequence(3).is_err());

        let reordered = kyoto(vec![day(2, "a"), day(1, "b")]);
        assert!(reordered.check_day_sequence(2).is_err());

        let zero_based = kyoto(vec![day(0, "a")]);
        assert!(zero_based.check_day_sequence(1).is_err());
    }

    #[test]
    fn request_validation() {
        assert!(ItineraryRequest::new("Kyoto", 3, Language::En)
            .validate()
            .is_ok());
        assert!(ItineraryRequest::new("  ", 3, Language::En)
            .validate()
            .is_err());
        assert!(ItineraryRequest::new("Kyoto", 0, Language::En)
            .validate()
            .is_err());
        assert!(ItineraryRequest::new("Kyoto", 12, Language::Ar)
            .validate()
            .is_ok());
    }

    #[test]
    fn display_lists_days() {
        let rendered = kyoto(vec![day(1, "Arrival")]).to_string();
        assert!(rendered.contains("Kyoto (3 days)"));
        assert!(rendered.contains("Day 1: Arrival"));
        assert!(rendered.contains("09:00  Breakfast"));
    }
}
