//! Account history entity: one row per reported incident or body-map point.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_acc_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub event_time: DateTimeWithTimeZone,

    pub location_id: i32,

    pub emotion_id: i32,

    #[sea_orm(indexed)]
    pub user_acc_id: i32,

    pub frequency_index_id: i32,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Set only for rows derived from a body-map point.
    #[sea_orm(nullable)]
    pub body_part_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_acc::Entity",
        from = "Column::UserAccId",
        to = "super::user_acc::Column::Id",
        on_delete = "Cascade"
    )]
    UserAcc,
}

impl Related<super::user_acc::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAcc.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
