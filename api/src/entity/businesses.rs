use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub timezone: String,
    pub phone: Option<String>,
    pub postal_address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(has_many = "super::business_user::Entity")]
    BusinessUser,
    #[sea_orm(has_many = "super::humanresources::Entity")]
    Humanresources,
    #[sea_orm(has_many = "super::appointments::Entity")]
    Appointments,
    #[sea_orm(has_many = "super::service_types::Entity")]
    ServiceTypes,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::business_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUser.def()
    }
}

impl Related<super::humanresources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Humanresources.def()
    }
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl Related<super::service_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceTypes.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::business_user::Relation::Users.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::business_user::Relation::Businesses.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
