//! The roster model: an immutable description of the people, the planning
//! horizon, and the scheduling rules to enforce.
//!
//! A [`Roster`] is constructed once per run from static configuration and
//! validated before any solving begins. Days are 1-based and run over
//! `[1, horizon]`.

use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name; unique within a roster.
    pub name: String,
    /// Exact number of resting days this person must take over the horizon,
    /// mandatory off-days included.
    pub rest_target: u32,
    /// Days (1-based) on which this person is forced to rest.
    #[serde(default)]
    pub mandatory_off: BTreeSet<u32>,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        rest_target: u32,
        mandatory_off: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            name: name.into(),
            rest_target,
            mandatory_off: mandatory_off.into_iter().collect(),
        }
    }
}

/// Whether the exception budget is shared across the whole roster or granted
/// to each person individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExceptionScope {
    Global,
    PerPerson,
}

/// Permission to exceed the consecutive-work limit by one day, a bounded
/// number of times.
///
/// Each full window of `consecutive_work_limit + 1` days may be individually
/// relaxed; the count of relaxed windows is capped by `budget` under the
/// configured scope. Regardless of relaxation, no run of more than
/// `consecutive_work_limit + 1` working days is ever allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionPolicy {
    pub scope: ExceptionScope,
    pub budget: u32,
}

/// The full problem instance handed to the constraint builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub people: Vec<Person>,
    /// Number of days to plan, `> 0`.
    pub horizon: u32,
    /// Per-day upper bound on how many people may rest; one entry per day.
    pub daily_rest_quota: Vec<u32>,
    /// Maximum run of consecutive working days under normal operation.
    pub consecutive_work_limit: u32,
    #[serde(default)]
    pub exception: Option<ExceptionPolicy>,
    /// Wall-clock budget for the solve; elapsing it yields `TimedOut`.
    #[serde(default = "default_time_budget")]
    pub time_budget: Duration,
}

fn default_time_budget() -> Duration {
    Duration::from_secs(60)
}

impl Roster {
    /// Builds a validated roster. See [`Roster::validate`] for the rules.
    pub fn new(
        people: Vec<Person>,
        horizon: u32,
        daily_rest_quota: Vec<u32>,
        consecutive_work_limit: u32,
        exception: Option<ExceptionPolicy>,
        time_budget: Duration,
    ) -> Result<Self> {
        let roster = Self {
            people,
            horizon,
            daily_rest_quota,
            consecutive_work_limit,
            exception,
            time_budget,
        };
        roster.validate()?;
        Ok(roster)
    }

    /// Checks the roster for self-contradictions.
    ///
    /// Fails with [`Error::Configuration`] if the horizon is zero, a rest
    /// target exceeds the horizon, a mandatory off-day falls outside the
    /// horizon, a person's mandatory off-days alone exceed their rest
    /// target, the quota vector does not line up with the horizon, a quota
    /// exceeds the number of people, or person names collide.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(Error::configuration("horizon must be positive"));
        }
        if self.daily_rest_quota.len() != self.horizon as usize {
            return Err(Error::configuration(format!(
                "daily rest quota has {} entries for a horizon of {} days",
                self.daily_rest_quota.len(),
                self.horizon
            )));
        }
        for (day0, &quota) in self.daily_rest_quota.iter().enumerate() {
            if quota as usize > self.people.len() {
                return Err(Error::configuration(format!(
                    "day {} allows {} resting people but the roster only has {}",
                    day0 + 1,
                    quota,
                    self.people.len()
                )));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for person in &self.people {
            if !seen.insert(person.name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate person name '{}'",
                    person.name
                )));
            }
            if person.rest_target > self.horizon {
                return Err(Error::configuration(format!(
                    "{}: rest target {} exceeds the {}-day horizon",
                    person.name, person.rest_target, self.horizon
                )));
            }
            for &day in &person.mandatory_off {
                if day == 0 || day > self.horizon {
                    return Err(Error::configuration(format!(
                        "{}: mandatory off-day {} is outside 1..={}",
                        person.name, day, self.horizon
                    )));
                }
            }
            if person.mandatory_off.len() as u32 > person.rest_target {
                return Err(Error::configuration(format!(
                    "{}: {} mandatory off-days exceed the rest target of {}",
                    person.name,
                    person.mandatory_off.len(),
                    person.rest_target
                )));
            }
        }
        Ok(())
    }

    pub fn num_people(&self) -> usize {
        self.people.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn base_roster() -> Roster {
        Roster {
            people: vec![
                Person::new("ana", 4, [1]),
                Person::new("bo", 4, [2]),
            ],
            horizon: 10,
            daily_rest_quota: vec![1; 10],
            consecutive_work_limit: 4,
            exception: None,
            time_budget: Duration::from_secs(5),
        }
    }

    #[test]
    fn valid_roster_passes() {
        assert!(base_roster().validate().is_ok());
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let mut roster = base_roster();
        roster.horizon = 0;
        roster.daily_rest_quota.clear();
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn quota_length_must_match_horizon() {
        let mut roster = base_roster();
        roster.daily_rest_quota.pop();
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn quota_cannot_exceed_people() {
        let mut roster = base_roster();
        roster.daily_rest_quota[3] = 3;
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn mandatory_off_outside_horizon_is_rejected() {
        let mut roster = base_roster();
        roster.people[0].mandatory_off.insert(11);
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn mandatory_off_overflowing_rest_target_is_rejected() {
        let mut roster = base_roster();
        roster.people[0].rest_target = 1;
        roster.people[0].mandatory_off = [1, 2].into_iter().collect();
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut roster = base_roster();
        roster.people[1].name = "ana".to_string();
        assert!(matches!(roster.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn roster_round_trips_through_json() {
        let roster = base_roster();
        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back.people, roster.people);
        assert_eq!(back.daily_rest_quota, roster.daily_rest_quota);
    }
}
