//! Series entity: one row per on-disk series folder.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "series")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub url: String, // stored as text, parsed back into a Url on read
    pub file_last_modified: DateTime,
    #[sea_orm(indexed)]
    pub library_id: String,
    #[sea_orm(default_value = 0)]
    pub book_count: i32,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_date: DateTimeUtc,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub last_modified_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::series_metadata::Entity")]
    Metadata,
    #[sea_orm(has_many = "super::collection_series::Entity")]
    CollectionSeries,
}

impl Related<super::series_metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metadata.def()
    }
}

impl Related<super::collection_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionSeries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
