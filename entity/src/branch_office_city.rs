use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "branch_office_city")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub branch_office_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub city_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branch_office::Entity",
        from = "Column::BranchOfficeId",
        to = "super::branch_office::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    BranchOffice,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    City,
}

impl ActiveModelBehavior for ActiveModel {}
