use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub year: i32,
    #[sea_orm(unique)]
    pub description: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,
    /// Derived on every listing; never written back.
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
