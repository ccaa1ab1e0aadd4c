//! Core types for the waystation crate.
//!
//! This crate provides the foundational types for the rest-stop questionnaire:
//! - `Questionnaire` - The ordered list of steps plus the screen copy
//! - `Question` and `QuestionKind` - Individual steps and their validation rules
//! - `Answers` and `FollowUps` - Collected single-choice and multi-choice data
//! - `SurveyPayload` - The record sent to the collection endpoint
//! - `trucker` - The concrete BR-251 truck driver survey

mod question_id;
pub use question_id::QuestionId;

mod question;
pub use question::{CoreQuestion, FollowUp, Question, QuestionKind, ServiceQuestion};

mod questionnaire;
pub use questionnaire::{Questionnaire, ScreenCopy};

mod answers;
pub use answers::{Answers, FollowUps};

mod error;
pub use error::ValidationError;

mod payload;
pub use payload::{ServicePreference, SurveyPayload};

pub mod trucker;
