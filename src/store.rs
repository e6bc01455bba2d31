//! Query and mutation surface over the booking schema.
//!
//! [`CinemaStore`] owns the shared [`DatabaseConnection`] and is the only way
//! request handlers touch the database. Entities stay plain data; everything
//! behavioral (token lifecycle, show listing, bookings) lives here and takes
//! the connection through the store handle.

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, LoaderTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::entity::authentication_token::{self, Entity as AuthenticationToken};
use crate::entity::{booking, movie, seat, show, user};

/// A show row together with the rows it references, as returned by
/// `GET /shows`. The related records are optional because the listing does
/// not run inside a transaction; a reference can disappear between the two
/// queries.
#[derive(Debug, Serialize)]
pub struct ShowListing {
    #[serde(flatten)]
    pub show: show::Model,
    pub movie: Option<movie::Model>,
    pub user: Option<user::Model>,
    pub seat: Option<seat::Model>,
}

/// Payload for creating a show.
#[derive(Debug, Clone, Deserialize)]
pub struct NewShow {
    pub date: DateTimeWithTimeZone,
    pub movie_id: Uuid,
    pub seat_id: Uuid,
    pub user_id: Uuid,
}

/// Store handle for the cinema booking schema.
///
/// Holds the Sea-ORM [`DatabaseConnection`] opened by the process entry
/// point; clones share the underlying pool, so handlers receive a cheap copy
/// through the application state.
#[derive(Debug, Clone)]
pub struct CinemaStore {
    conn: DatabaseConnection,
}

impl CinemaStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Deletes every authentication token belonging to `user_id` and returns
    /// how many rows went away.
    pub async fn purge_auth_tokens(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = AuthenticationToken::delete_many()
            .filter(authentication_token::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Mints a new token for `user_id`, expiring one day from now. Creation
    /// failures are logged and returned to the caller.
    pub async fn assign_auth_token(
        &self,
        user_id: Uuid,
    ) -> Result<authentication_token::Model, DbErr> {
        let token = authentication_token::ActiveModel {
            expires: Set(authentication_token::next_expiry()),
            user_id: Set(user_id),
            ..authentication_token::ActiveModel::new()
        };
        token
            .insert(&self.conn)
            .await
            .inspect_err(|e| error!("error creating new auth token: {e}"))
    }

    /// The user's current token, or `None` when there is none. Multiple rows
    /// are neither ordered nor deduplicated; whichever the store returns
    /// first wins.
    pub async fn auth_token(
        &self,
        user_id: Uuid,
    ) -> Result<Option<authentication_token::Model>, DbErr> {
        AuthenticationToken::find()
            .filter(authentication_token::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
    }

    /// Pushes the token's expiry another day out from this moment. The new
    /// expiry is strictly later than the old one.
    pub async fn refresh_auth_token(
        &self,
        token: authentication_token::Model,
    ) -> Result<authentication_token::Model, DbErr> {
        let mut active = token.into_active_model();
        active.expires = Set(authentication_token::next_expiry());
        active.update(&self.conn).await
    }

    /// Every show, each with its movie, user and seat eagerly loaded. Rows
    /// come back in store order; there is no pagination.
    pub async fn list_shows(&self) -> Result<Vec<ShowListing>, DbErr> {
        let shows = show::Entity::find().all(&self.conn).await?;
        let movies = shows.load_one(movie::Entity, &self.conn).await?;
        let users = shows.load_one(user::Entity, &self.conn).await?;
        let seats = shows.load_one(seat::Entity, &self.conn).await?;

        Ok(shows
            .into_iter()
            .zip(movies)
            .zip(users)
            .zip(seats)
            .map(|(((show, movie), user), seat)| ShowListing {
                show,
                movie,
                user,
                seat,
            })
            .collect())
    }

    /// Inserts a show from the request payload. Failures (typically a
    /// dangling foreign key) are logged and returned.
    pub async fn create_show(&self, new_show: NewShow) -> Result<show::Model, DbErr> {
        let show = show::ActiveModel {
            date: Set(new_show.date),
            movie_id: Set(new_show.movie_id),
            seat_id: Set(new_show.seat_id),
            user_id: Set(new_show.user_id),
            ..show::ActiveModel::new()
        };
        show.insert(&self.conn)
            .await
            .inspect_err(|e| error!("error creating show: {e}"))
    }

    /// Books a seat of a show for a user. No double-booking guard exists;
    /// two concurrent bookings of the same seat and show can both succeed.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        seat_id: Uuid,
        show_id: Uuid,
    ) -> Result<booking::Model, DbErr> {
        let booking = booking::ActiveModel {
            user_id: Set(user_id),
            seat_id: Set(seat_id),
            show_id: Set(show_id),
            ..booking::ActiveModel::new()
        };
        booking
            .insert(&self.conn)
            .await
            .inspect_err(|e| error!("error creating booking: {e}"))
    }

    /// All bookings made by `user_id`, in store order.
    pub async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<booking::Model>, DbErr> {
        booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
    }
}
