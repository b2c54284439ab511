//! 区域隔离仓储集成测试

mod common;

use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Set};

use migration::entities::{ad, ebook, lead, news, supplier};
use regionportal::errors::PortalError;
use regionportal::region::Region;
use regionportal::storage::{ListQuery, RegionScoped, SeaOrmStorage};

/// `id` 属于 `owner`：在 `owner` 中可见，在 `other` 中列表、计数、读取都看不到
async fn assert_isolated<E: RegionScoped>(
    storage: &SeaOrmStorage,
    owner: Region,
    other: Region,
    id: i32,
) {
    let own = storage.scoped(owner);
    assert_eq!(own.count::<E>().await.unwrap(), 1, "{} in {}", E::KIND, owner);
    assert_eq!(own.list::<E>(ListQuery::default()).await.unwrap().len(), 1);
    assert!(own.get::<E>(id).await.unwrap().is_some());

    let foreign = storage.scoped(other);
    assert_eq!(foreign.count::<E>().await.unwrap(), 1, "{} in {}", E::KIND, other);
    assert_eq!(foreign.list::<E>(ListQuery::default()).await.unwrap().len(), 1);
    assert!(
        foreign.get::<E>(id).await.unwrap().is_none(),
        "{} {} leaked into {}",
        E::KIND,
        id,
        other
    );
    assert!(matches!(
        foreign.require::<E>(id).await,
        Err(PortalError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_only_returns_current_region() {
    let env = common::setup().await;
    env.insert_news("br", "Fundição em alta").await;
    env.insert_news("br", "Novo forno").await;
    env.insert_news("mx", "Fundición en México").await;

    let br = env
        .storage
        .scoped(Region::Br)
        .list::<news::Entity>(ListQuery::default())
        .await
        .unwrap();
    assert_eq!(br.len(), 2);
    assert!(br.iter().all(|n| n.region == "br"));

    let fr = env
        .storage
        .scoped(Region::Fr)
        .list::<news::Entity>(ListQuery::default())
        .await
        .unwrap();
    assert!(fr.is_empty());

    assert_eq!(
        env.storage.scoped(Region::Mx).count::<news::Entity>().await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_cross_region_get_is_none() {
    let env = common::setup().await;
    let item = env.insert_news("mx", "Solo México").await;

    let mx = env.storage.scoped(Region::Mx);
    assert!(mx.get::<news::Entity>(item.id).await.unwrap().is_some());

    let br = env.storage.scoped(Region::Br);
    assert!(br.get::<news::Entity>(item.id).await.unwrap().is_none());
    assert!(matches!(
        br.require::<news::Entity>(item.id).await,
        Err(PortalError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_stamps_current_region() {
    let env = common::setup().await;

    // 调用方传入的区域被覆盖
    let created = env
        .storage
        .scoped(Region::Fr)
        .create(lead::ActiveModel {
            email: Set("acheteur@example.fr".to_string()),
            region: Set("br".to_string()),
            source: Set("newsletter".to_string()),
            asset_name: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.region, "fr");
}

#[tokio::test]
async fn test_update_keeps_region() {
    let env = common::setup().await;
    let item = env.insert_news("br", "Título antigo").await;

    let updated = env
        .storage
        .scoped(Region::Br)
        .update(
            item.id,
            news::ActiveModel {
                id: NotSet,
                title: Set("Título novo".to_string()),
                region: Set("mx".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Título novo");
    assert_eq!(updated.region, "br");
}

#[tokio::test]
async fn test_cross_region_update_and_delete_are_not_found() {
    let env = common::setup().await;
    let item = env.insert_news("br", "Intocável").await;

    let mx = env.storage.scoped(Region::Mx);
    let update = mx
        .update(
            item.id,
            news::ActiveModel {
                title: Set("hackeado".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(PortalError::NotFound(_))));
    assert!(matches!(
        mx.delete::<news::Entity>(item.id).await,
        Err(PortalError::NotFound(_))
    ));

    let still_there = env
        .storage
        .scoped(Region::Br)
        .require::<news::Entity>(item.id)
        .await
        .unwrap();
    assert_eq!(still_there.title, "Intocável");
}

#[tokio::test]
async fn test_reassign_region_moves_record() {
    let env = common::setup().await;
    let item = env.insert_news("br", "Migrando").await;

    env.storage
        .scoped(Region::Br)
        .reassign_region::<news::Entity>(item.id, Region::Mx)
        .await
        .unwrap();

    assert!(
        env.storage
            .scoped(Region::Br)
            .get::<news::Entity>(item.id)
            .await
            .unwrap()
            .is_none()
    );
    let moved = env
        .storage
        .scoped(Region::Mx)
        .require::<news::Entity>(item.id)
        .await
        .unwrap();
    assert_eq!(moved.region, "mx");
}

#[tokio::test]
async fn test_search_is_region_scoped() {
    let env = common::setup().await;
    env.insert_news("br", "Areia de fundição").await;
    env.insert_news("fr", "Sable de fonderie").await;

    let hits = env
        .storage
        .scoped(Region::Br)
        .search::<news::Entity>("fund", 10)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);

    let none = env
        .storage
        .scoped(Region::Br)
        .search::<news::Entity>("fonderie", 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_isolation_covers_every_content_kind() {
    let env = common::setup().await;

    let br_ebook = env.insert_ebook("br", "Manual de Fundição").await;
    env.insert_ebook("mx", "Manual de Fundición").await;
    assert_isolated::<ebook::Entity>(&env.storage, Region::Br, Region::Mx, br_ebook.id).await;

    let fr_supplier = env.insert_supplier("fr", "Fonderie Lyon").await;
    env.insert_supplier("br", "Fundição Paulista").await;
    assert_isolated::<supplier::Entity>(&env.storage, Region::Fr, Region::Br, fr_supplier.id)
        .await;

    let mx_ad = env.insert_ad("mx", "sidebar", true).await;
    env.insert_ad("fr", "sidebar", true).await;
    assert_isolated::<ad::Entity>(&env.storage, Region::Mx, Region::Fr, mx_ad.id).await;

    let mut lead_ids = Vec::new();
    for (region, email) in [
        (Region::Br, "compras@fundicao.com.br"),
        (Region::Mx, "ventas@fundicion.mx"),
    ] {
        let created = env
            .storage
            .scoped(region)
            .create(lead::ActiveModel {
                email: Set(email.to_string()),
                source: Set("ebook".to_string()),
                asset_name: Set(None),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await
            .unwrap();
        lead_ids.push(created.id);
    }
    assert_isolated::<lead::Entity>(&env.storage, Region::Br, Region::Mx, lead_ids[0]).await;
    assert_isolated::<lead::Entity>(&env.storage, Region::Mx, Region::Br, lead_ids[1]).await;
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let env = common::setup().await;
    env.insert_news("br", "Areia de fundição").await;
    env.insert_news("br", "Forno_elétrico").await;
    env.insert_news("br", "Alta de 50% na produção").await;

    let br = env.storage.scoped(Region::Br);
    assert_eq!(br.search::<news::Entity>("%", 10).await.unwrap().len(), 1);
    assert_eq!(br.search::<news::Entity>("_", 10).await.unwrap().len(), 1);
    assert_eq!(br.search::<news::Entity>("50%", 10).await.unwrap().len(), 1);
    assert!(br.search::<news::Entity>("de_f", 10).await.unwrap().is_empty());
}
