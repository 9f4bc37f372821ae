use crate::modules::location::dto::LocationDto;
use entity::{course, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    pub operator_id: Uuid,

    #[validate(length(min = 1))]
    pub location_ids: Vec<Uuid>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    pub operator_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub location_ids: Option<Vec<Uuid>>,
}

/// A delivery route with its operator and stops loaded
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[serde(flatten)]
    pub course: course::Model,

    pub operator: Option<user::Model>,

    pub locations: Vec<LocationDto>,
}
