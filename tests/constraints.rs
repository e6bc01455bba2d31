mod common;

use cinema_booking::entity::{director, genre, movie, movie_genre};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn duplicate_user_email_is_rejected() {
    let db = common::setup().await;
    common::insert_user(&db, "ada@example.com").await;
    assert!(common::try_insert_user(&db, "ada@example.com")
        .await
        .is_err());
}

#[tokio::test]
async fn duplicate_genre_name_is_rejected() {
    let db = common::setup().await;
    common::insert_genre(&db, "Horror").await;
    assert!(common::try_insert_genre(&db, "Horror").await.is_err());
}

#[tokio::test]
async fn duplicate_hall_name_is_rejected() {
    let db = common::setup().await;
    common::insert_hall(&db, "Grand Hall").await;
    assert!(common::try_insert_hall(&db, "Grand Hall").await.is_err());
}

#[tokio::test]
async fn deleting_a_movie_cascades_only_its_join_rows() {
    let db = common::setup().await;
    let ridley = common::insert_director(&db).await;
    let alien = common::insert_movie(&db, "Alien", ridley.id).await;
    let blade_runner = common::insert_movie(&db, "Blade Runner", ridley.id).await;
    let horror = common::insert_genre(&db, "Horror").await;
    let scifi = common::insert_genre(&db, "Science Fiction").await;

    common::link_movie_genre(&db, alien.id, horror.id).await;
    common::link_movie_genre(&db, alien.id, scifi.id).await;
    common::link_movie_genre(&db, blade_runner.id, scifi.id).await;

    movie::Entity::delete_by_id(alien.id)
        .exec(&db)
        .await
        .expect("delete movie");

    assert_eq!(movie_genre::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(movie::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_a_genre_cascades_only_its_join_rows() {
    let db = common::setup().await;
    let ridley = common::insert_director(&db).await;
    let alien = common::insert_movie(&db, "Alien", ridley.id).await;
    let horror = common::insert_genre(&db, "Horror").await;
    let scifi = common::insert_genre(&db, "Science Fiction").await;

    common::link_movie_genre(&db, alien.id, horror.id).await;
    common::link_movie_genre(&db, alien.id, scifi.id).await;

    genre::Entity::delete_by_id(horror.id)
        .exec(&db)
        .await
        .expect("delete genre");

    assert_eq!(movie_genre::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(movie::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_a_referenced_director_fails_instead_of_cascading() {
    let db = common::setup().await;
    let ridley = common::insert_director(&db).await;
    common::insert_movie(&db, "Alien", ridley.id).await;

    assert!(director::Entity::delete_by_id(ridley.id)
        .exec(&db)
        .await
        .is_err());
    assert_eq!(movie::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(director::Entity::find().count(&db).await.unwrap(), 1);
}
