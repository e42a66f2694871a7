//! Wire types for the trainings routes.

use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::training::{
    Goal, MediaUrl, NewTraining, Training, TrainingPatch, TrainingType, MAX_DIFFICULTY,
};
use crate::ports::{Page, TrainingFilter};

/// A goal as it appears on the wire, in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&Goal> for GoalBody {
    fn from(goal: &Goal) -> Self {
        Self {
            name: goal.name().to_string(),
            description: goal.description().to_string(),
        }
    }
}

/// Request body for `POST /trainings`.
#[derive(Debug, Deserialize)]
pub struct CreateTrainingRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    pub difficulty: i64,
    #[serde(default)]
    pub multimedia: Vec<String>,
    #[serde(default)]
    pub goals: Vec<GoalBody>,
}

impl CreateTrainingRequest {
    pub fn into_draft(self) -> Result<NewTraining, ValidationError> {
        NewTraining::new(
            self.title,
            self.description,
            self.kind,
            self.difficulty,
            parse_multimedia(self.multimedia)?,
            parse_goals(self.goals)?,
        )
    }
}

/// Request body for `PATCH /trainings/{id}`.
///
/// Absent fields are left untouched; present fields are applied as given,
/// including empty collections.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTrainingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TrainingType>,
    pub difficulty: Option<i64>,
    pub multimedia: Option<Vec<String>>,
    pub goals: Option<Vec<GoalBody>>,
}

impl UpdateTrainingRequest {
    pub fn into_patch(self) -> Result<TrainingPatch, ValidationError> {
        TrainingPatch::new(
            self.title,
            self.description,
            self.kind,
            self.difficulty,
            self.multimedia.map(parse_multimedia).transpose()?,
            self.goals.map(parse_goals).transpose()?,
        )
    }
}

fn parse_multimedia(urls: Vec<String>) -> Result<Vec<MediaUrl>, ValidationError> {
    urls.into_iter().map(MediaUrl::new).collect()
}

fn parse_goals(goals: Vec<GoalBody>) -> Result<Vec<Goal>, ValidationError> {
    goals
        .into_iter()
        .map(|g| Goal::new(g.name, g.description))
        .collect()
}

/// Request body for `PATCH /trainings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct BlockStatusRequest {
    pub blocked: bool,
}

/// Score payload, used for both submission and read-back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBody {
    pub score: f64,
}

/// A training as returned to clients.
#[derive(Debug, Serialize)]
pub struct TrainingResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    pub difficulty: u8,
    pub multimedia: Vec<String>,
    pub goals: Vec<GoalBody>,
    pub author: i64,
    pub blocked: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    pub score: f64,
    pub score_amount: u32,
}

impl From<&Training> for TrainingResponse {
    fn from(training: &Training) -> Self {
        Self {
            id: training.id().as_i64(),
            title: training.title().to_string(),
            description: training.description().to_string(),
            kind: training.kind(),
            difficulty: training.difficulty(),
            multimedia: training
                .multimedia()
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            goals: training.goals().iter().map(GoalBody::from).collect(),
            author: training.author().as_i64(),
            blocked: training.is_blocked(),
            created_at: training.created_at(),
            score: training.score(),
            score_amount: training.score_amount(),
        }
    }
}

/// Response body for `GET /trainings/count`.
#[derive(Debug, Serialize)]
pub struct TrainingCountResponse {
    pub count: u64,
}

/// Query parameters for `GET /trainings` and `GET /trainings/count`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTrainingsQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// `"me"` or a user id.
    pub author: Option<String>,
    /// `"WALK"`, `"RUNNING"`, or `"all"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mindiff: Option<i64>,
    pub maxdiff: Option<i64>,
    /// `"true"`, `"false"`, or `"all"`. Defaults to `"false"` so blocked
    /// trainings stay hidden unless explicitly requested.
    pub blocked: Option<String>,
}

impl ListTrainingsQuery {
    pub fn page(&self) -> Page {
        Page::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(Page::MAX_LIMIT),
        )
    }

    /// Resolves the query parameters into a repository filter.
    ///
    /// `caller` anchors the `author=me` shorthand.
    pub fn filter(&self, caller: UserId) -> Result<TrainingFilter, ApiError> {
        let author = match self.author.as_deref() {
            None => None,
            Some("me") => Some(caller),
            Some(raw) => Some(raw.parse::<i64>().map(UserId::new).map_err(|_| {
                ApiError::bad_request(format!("author must be \"me\" or a user id, got \"{raw}\""))
            })?),
        };

        let kind = match self.kind.as_deref() {
            None | Some("all") => None,
            Some(raw) => Some(raw.parse::<TrainingType>().map_err(|_| {
                ApiError::bad_request(format!(
                    "type must be \"WALK\", \"RUNNING\" or \"all\", got \"{raw}\""
                ))
            })?),
        };

        let blocked = match self.blocked.as_deref() {
            None | Some("false") => Some(false),
            Some("true") => Some(true),
            Some("all") => None,
            Some(raw) => {
                return Err(ApiError::bad_request(format!(
                    "blocked must be \"true\", \"false\" or \"all\", got \"{raw}\""
                )))
            }
        };

        let min_difficulty = parse_difficulty_bound("mindiff", self.mindiff, 0)?;
        let max_difficulty =
            parse_difficulty_bound("maxdiff", self.maxdiff, MAX_DIFFICULTY + 1)?;

        Ok(TrainingFilter {
            author,
            kind,
            min_difficulty,
            max_difficulty,
            blocked,
        })
    }
}

fn parse_difficulty_bound(
    name: &str,
    value: Option<i64>,
    default: u8,
) -> Result<u8, ApiError> {
    match value {
        None => Ok(default),
        Some(v) if (0..=i64::from(MAX_DIFFICULTY) + 1).contains(&v) => Ok(v as u8),
        Some(v) => Err(ApiError::bad_request(format!(
            "{name} must be between 0 and {}, got {v}",
            MAX_DIFFICULTY + 1
        ))),
    }
}
