//! Report entity, used by the database-backed report store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Triage status of a report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Submitted, not yet looked at.
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Seen by staff.
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    /// Closed.
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

impl ReportStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub student_id: String,

    pub student_name: String,

    /// Server-side creation time.
    #[sea_orm(nullable, indexed)]
    pub timestamp: Option<DateTimeWithTimeZone>,

    /// Selected symbols, `[{id, label, category}]`.
    pub symbols: Json,

    /// Body-map points, `[{x, y, bodyPart}]`.
    #[sea_orm(nullable)]
    pub body_map: Option<Json>,

    pub emotion: Json,

    pub location: Json,

    pub frequency: Json,

    pub safety: Json,

    pub status: ReportStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub teacher_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
