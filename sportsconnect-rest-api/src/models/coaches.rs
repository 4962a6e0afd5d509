//! Coach account request/response models

use serde::{Deserialize, Serialize};
use sportsconnect_api_types::{ApiId, Coach};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterCoachRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCoachRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachAuthResponse {
    #[serde(rename = "_id")]
    pub id: ApiId,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub experience: String,
    pub token: String,
}

impl CoachAuthResponse {
    pub fn new(coach: &Coach, token: String) -> Self {
        Self {
            id: coach.id.clone(),
            name: coach.name.clone(),
            email: coach.email.clone(),
            specialization: coach.specialization.clone(),
            experience: coach.experience.clone(),
            token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachProfileResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience: String,
}

impl From<Coach> for CoachProfileResponse {
    fn from(coach: Coach) -> Self {
        Self {
            name: coach.name,
            email: coach.email,
            phone: coach.phone,
            specialization: coach.specialization,
            experience: coach.experience,
        }
    }
}
