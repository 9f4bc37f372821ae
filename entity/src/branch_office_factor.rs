use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "branch_office_factor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub branch_office_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub factor_id: Uuid,
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
        belongs_to = "super::factor::Entity",
        from = "Column::FactorId",
        to = "super::factor::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Factor,
}

impl ActiveModelBehavior for ActiveModel {}
