use crate::enums::RecordState;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = entity::city::Model)]
#[sea_orm(table_name = "city")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub state: RecordState,
    pub name: String,

    pub department_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Department,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::branch_office::Entity> for Entity {
    fn to() -> RelationDef {
        super::branch_office_city::Relation::BranchOffice.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::branch_office_city::Relation::City.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
