use serde::{Deserialize, Serialize};

use crate::{Answers, FollowUps, Questionnaire, trucker};

/// The record posted to the collection endpoint.
///
/// Answer fields are `None` only if the question was somehow skipped; they are
/// left out of the JSON in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops_per_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_duration: Option<String>,
    pub has_missed_services: bool,
    pub missed_services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanliness_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_quality_rating: Option<String>,
    pub service_preferences: Vec<ServicePreference>,
}

/// How important one service is to the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePreference {
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
}

impl SurveyPayload {
    /// Assemble the payload from the collected answers.
    ///
    /// `missedServices` is filled only while the missed-services answer
    /// triggers its follow-up; `servicePreferences` has one entry per service
    /// question, in questionnaire order.
    pub fn assemble(questionnaire: &Questionnaire, answers: &Answers, follow_ups: &FollowUps) -> Self {
        let answer = |id| answers.get(id).map(str::to_string);

        let has_missed_services = questionnaire
            .question(trucker::MISSED_SERVICES)
            .is_some_and(|q| q.follow_up_active(answers));
        let missed_services = if has_missed_services {
            follow_ups
                .get(trucker::MISSED_SERVICES)
                .map(<[String]>::to_vec)
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let service_preferences = questionnaire
            .service_questions()
            .map(|(question, service)| ServicePreference {
                service: service.service.clone(),
                importance: answer(question.id()),
            })
            .collect();

        Self {
            age: answer(trucker::AGE),
            gender: answer(trucker::GENDER),
            experience: answer(trucker::EXPERIENCE),
            truck_type: answer(trucker::TRUCK_TYPE),
            frequency: answer(trucker::FREQUENCY),
            stops_per_day: answer(trucker::STOPS_PER_DAY),
            stop_duration: answer(trucker::STOP_DURATION),
            has_missed_services,
            missed_services,
            safety_rating: answer(trucker::SAFETY),
            cleanliness_rating: answer(trucker::CLEANLINESS),
            food_quality_rating: answer(trucker::FOOD_QUALITY),
            service_preferences,
        }
    }
}
