//! User entity: an account that can own authentication tokens, schedule
//! shows and book seats.
//!
//! # Database Schema
//!
//! | Column           | Type        | Constraints |
//! |------------------|-------------|-------------|
//! | id               | UUID        | Primary key |
//! | first_name       | VARCHAR     | NOT NULL    |
//! | last_name        | VARCHAR     | NOT NULL    |
//! | email            | VARCHAR     | NOT NULL, UNIQUE |
//! | password         | VARCHAR     | NOT NULL    |
//! | date_of_birth    | TIMESTAMPTZ | NOT NULL    |
//! | is_administrator | BOOLEAN     | NOT NULL    |
//! | created_at       | TIMESTAMPTZ | NOT NULL    |
//! | updated_at       | TIMESTAMPTZ | NOT NULL    |

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub date_of_birth: DateTimeWithTimeZone,
    pub is_administrator: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::authentication_token::Entity")]
    AuthenticationToken,
}

impl Related<super::authentication_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthenticationToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(super::now()),
            updated_at: Set(super::now()),
            ..ActiveModelTrait::default()
        }
    }
}
