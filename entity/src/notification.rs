use crate::enums::{NotificationKind, NotificationStatus, RecordState};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::notification::Model)]
#[sea_orm(table_name = "notification")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,
    pub status: NotificationStatus,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,

    pub kind: NotificationKind,

    /// id of the entity the notification is about, kept as text since
    /// CARGUE notifications reference a branch office code rather than
    /// a uuid
    pub subject_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
