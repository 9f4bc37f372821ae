use entity::enums::NotificationKind;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub message: String,

    pub kind: NotificationKind,

    /// id or code of the entity the notification is about
    #[validate(length(min = 1, max = 255))]
    pub subject_id: String,
}
