use sea_orm::entity::prelude::*;

use crate::embedded::{MovieEntries, ReviewEntries};

/// User account together with its embedded collections.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Stored normalized (trimmed, lower-case).
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub watchlist: MovieEntries,
    #[sea_orm(column_type = "JsonBinary")]
    pub favorites: MovieEntries,
    #[sea_orm(column_type = "JsonBinary")]
    pub reviews: ReviewEntries,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    PublishedReviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PublishedReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
