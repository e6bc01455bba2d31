mod common;

use cinema_booking::entity::genre;
use cinema_booking::synchronize;
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn synchronize_twice_without_force_keeps_data() {
    let db = common::connect().await;
    synchronize(&db, false).await.expect("first sync");

    common::insert_genre(&db, "Horror").await;

    synchronize(&db, false).await.expect("second sync");
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn synchronize_with_force_resets_schema() {
    let db = common::connect().await;
    synchronize(&db, false).await.expect("first sync");

    common::insert_genre(&db, "Horror").await;
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), 1);

    synchronize(&db, true).await.expect("forced sync");
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn forced_synchronize_works_on_an_empty_database() {
    let db = common::connect().await;
    synchronize(&db, true).await.expect("forced sync on empty db");
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), 0);
}
