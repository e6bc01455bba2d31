//! Authentication token entity: a short-lived credential owned by exactly
//! one user.
//!
//! Tokens expire one day after they are minted or refreshed; the expiry is
//! always stored as an absolute timestamp computed by [`next_expiry`]. The
//! store never deduplicates tokens, so a user may hold several at once.

use chrono::{Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub expires: DateTimeWithTimeZone,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(super::now()),
            updated_at: Set(super::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(super::now());
        }
        Ok(self)
    }
}

/// Absolute expiry for a token minted or refreshed at this moment: one
/// calendar day ahead.
pub fn next_expiry() -> DateTimeWithTimeZone {
    (Utc::now() + Duration::days(1)).fixed_offset()
}
