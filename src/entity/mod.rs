//! Database entity models for the cinema booking backend.
//!
//! Each submodule defines one Sea-ORM entity: its persisted fields, primary
//! key and the relations it declares towards the rest of the graph. Primary
//! keys are random UUIDs minted by [`sea_orm::ActiveModelBehavior::new`], and
//! every table carries `created_at`/`updated_at` timestamps maintained here
//! rather than by database defaults.
//!
//! The relation graph mirrors the booking domain: a [`show`] plays a [`movie`]
//! on a [`seat`] inside a [`hall`], a [`booking`] ties a [`user`] to a seat of
//! a show, and [`movie`] and [`genre`] are linked many-to-many through the
//! [`movie_genre`] join whose foreign keys are the only cascade-deleting ones.

use sea_orm::entity::prelude::DateTimeWithTimeZone;

pub mod authentication_token;
pub mod booking;
pub mod director;
pub mod genre;
pub mod hall;
pub mod movie;
pub mod movie_genre;
pub mod seat;
pub mod show;
pub mod user;

/// Current wall-clock time in the fixed-offset representation stored in the
/// `created_at`/`updated_at` columns.
pub(crate) fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().fixed_offset()
}
