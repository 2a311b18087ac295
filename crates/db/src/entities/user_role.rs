//! User role entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role type marker of the student role.
pub const STUDENT_ROLE_TYPE: &str = "STU";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub role_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_acc::Entity")]
    UserAcc,
}

impl Related<super::user_acc::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAcc.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
