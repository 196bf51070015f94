use sea_orm::entity::prelude::*;

use crate::domain::model::City;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::temperature::Entity")]
    Temperature,
    #[sea_orm(has_many = "super::webhook::Entity")]
    Webhook,
}

impl Related<super::temperature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Temperature.def()
    }
}

impl Related<super::webhook::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Webhook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for City {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            latitude: m.latitude,
            longitude: m.longitude,
            created_at: m.created_at,
        }
    }
}
