#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use cinema_booking::entity::{director, genre, hall, movie, movie_genre, seat, user};
use cinema_booking::synchronize;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr,
    Set,
};
use uuid::Uuid;

/// One pooled connection only: every `sqlite::memory:` connection is its own
/// database, so a larger pool would scatter the tables.
pub async fn connect() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    Database::connect(opt).await.expect("sqlite connection")
}

pub async fn setup() -> DatabaseConnection {
    let db = connect().await;
    synchronize(&db, false).await.expect("schema sync");
    db
}

pub async fn try_insert_user(db: &DatabaseConnection, email: &str) -> Result<user::Model, DbErr> {
    user::ActiveModel {
        first_name: Set("Ada".to_owned()),
        last_name: Set("Lovelace".to_owned()),
        email: Set(email.to_owned()),
        password: Set("hunter2".to_owned()),
        date_of_birth: Set(Utc::now().fixed_offset() - chrono::Duration::days(30 * 365)),
        is_administrator: Set(false),
        ..user::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn insert_user(db: &DatabaseConnection, email: &str) -> user::Model {
    try_insert_user(db, email).await.expect("insert user")
}

pub async fn insert_director(db: &DatabaseConnection) -> director::Model {
    director::ActiveModel {
        first_name: Set("Ridley".to_owned()),
        last_name: Set("Scott".to_owned()),
        date_of_birth: Set(NaiveDate::from_ymd_opt(1937, 11, 30).expect("valid date")),
        thumbnail: Set("ridley.png".to_owned()),
        ..director::ActiveModel::new()
    }
    .insert(db)
    .await
    .expect("insert director")
}

pub async fn insert_movie(
    db: &DatabaseConnection,
    title: &str,
    director_id: Uuid,
) -> movie::Model {
    movie::ActiveModel {
        title: Set(title.to_owned()),
        description: Set("A film".to_owned()),
        release_date: Set(Utc::now().fixed_offset()),
        minimum_age: Set(12),
        thumbnail: Set("poster.png".to_owned()),
        director_id: Set(director_id),
        ..movie::ActiveModel::new()
    }
    .insert(db)
    .await
    .expect("insert movie")
}

pub async fn try_insert_genre(db: &DatabaseConnection, name: &str) -> Result<genre::Model, DbErr> {
    genre::ActiveModel {
        name: Set(name.to_owned()),
        ..genre::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn insert_genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    try_insert_genre(db, name).await.expect("insert genre")
}

pub async fn try_insert_hall(db: &DatabaseConnection, name: &str) -> Result<hall::Model, DbErr> {
    hall::ActiveModel {
        name: Set(name.to_owned()),
        ..hall::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn insert_hall(db: &DatabaseConnection, name: &str) -> hall::Model {
    try_insert_hall(db, name).await.expect("insert hall")
}

pub async fn insert_seat(db: &DatabaseConnection, hall_id: Uuid, number: i32) -> seat::Model {
    seat::ActiveModel {
        number: Set(number),
        hall_id: Set(hall_id),
        ..seat::ActiveModel::new()
    }
    .insert(db)
    .await
    .expect("insert seat")
}

pub async fn link_movie_genre(
    db: &DatabaseConnection,
    movie_id: Uuid,
    genre_id: Uuid,
) -> movie_genre::Model {
    movie_genre::ActiveModel {
        movie_id: Set(movie_id),
        genre_id: Set(genre_id),
        ..movie_genre::ActiveModel::new()
    }
    .insert(db)
    .await
    .expect("link movie and genre")
}
