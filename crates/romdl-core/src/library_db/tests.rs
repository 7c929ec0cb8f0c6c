//! Tests for library_db (in-memory database).

use std::path::PathBuf;

use crate::library_db::db::open_memory;
use crate::library_db::{FindQuery, NewDownload, DEFAULT_PAGE_SIZE};
use crate::platform::PlatformType;

fn download(title: &str) -> NewDownload {
    NewDownload {
        title: title.to_string(),
        platform: PlatformType::GameCube,
        source_url: "https://myrient.erista.me/files/gc/".to_string(),
        file_name: format!("{}.rvz", title.replace(' ', "_")),
        file_path: PathBuf::from(format!("/srv/games/gamecube/{}.rvz", title.replace(' ', "_"))),
    }
}

#[tokio::test]
async fn create_get_roundtrip() {
    let db = open_memory().await.unwrap();
    let id = db.create(&download("Metroid Prime (USA)")).await.unwrap();
    let rec = db.get(id).await.unwrap().unwrap();
    assert_eq!(rec.id, id);
    assert_eq!(rec.title, "Metroid Prime (USA)");
    assert_eq!(rec.platform, PlatformType::GameCube);
    assert_eq!(rec.file_path, PathBuf::from("/srv/games/gamecube/Metroid_Prime_(USA).rvz"));
    assert_eq!(rec.created_at, rec.updated_at);
}

#[tokio::test]
async fn missing_record() {
    let db = open_memory().await.unwrap();
    assert!(db.get(42).await.unwrap().is_none());
    assert!(db.get_required(42).await.is_err());
    assert!(!db.delete(42).await.unwrap());
    assert!(db.update(42, &download("x")).await.is_err());
}

#[tokio::test]
async fn update_replaces_fields() {
    let db = open_memory().await.unwrap();
    let id = db.create(&download("Old")).await.unwrap();
    let mut changed = download("New");
    changed.platform = PlatformType::PlayStation3;
    db.update(id, &changed).await.unwrap();
    let rec = db.get_required(id).await.unwrap();
    assert_eq!(rec.title, "New");
    assert_eq!(rec.platform, PlatformType::PlayStation3);
}

#[tokio::test]
async fn find_by_path_matches_saved_file_only() {
    let db = open_memory().await.unwrap();
    let first = db.create(&download("Pikmin")).await.unwrap();
    db.create(&download("Metroid")).await.unwrap();

    let rec = db
        .find_by_path(&PathBuf::from("/srv/games/gamecube/Pikmin.rvz"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rec.id, first);
    assert!(db
        .find_by_path(&PathBuf::from("/srv/games/gamecube/Zelda.rvz"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn delete_removes_record() {
    let db = open_memory().await.unwrap();
    let id = db.create(&download("Gone")).await.unwrap();
    assert!(db.delete(id).await.unwrap());
    assert!(db.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_newest_first_and_paged() {
    let db = open_memory().await.unwrap();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(db.create(&download(&format!("Game {}", i))).await.unwrap());
    }

    let all = db.list(&FindQuery::default()).await.unwrap();
    let got: Vec<_> = all.iter().map(|r| r.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(got, expected);

    let page1 = db.list(&FindQuery::new(1, 2, "").unwrap()).await.unwrap();
    assert_eq!(page1.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);

    let past_end = db.list(&FindQuery::new(5, 2, "").unwrap()).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn list_filters_by_title() {
    let db = open_memory().await.unwrap();
    db.create(&download("Super Mario Sunshine")).await.unwrap();
    db.create(&download("Metroid Prime")).await.unwrap();
    db.create(&download("Mario Kart Double Dash")).await.unwrap();

    let q = FindQuery::new(0, DEFAULT_PAGE_SIZE, "mario").unwrap();
    let titles: Vec<_> = db.list(&q).await.unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Mario Kart Double Dash", "Super Mario Sunshine"]);

    let q = FindQuery::new(0, DEFAULT_PAGE_SIZE, "100%").unwrap();
    assert!(db.list(&q).await.unwrap().is_empty());
}

#[test]
fn find_query_validation_and_paging() {
    assert!(FindQuery::new(-1, 10, "").is_err());
    assert!(FindQuery::new(0, -5, "").is_err());
    let q = FindQuery::new(3, 20, "zelda").unwrap();
    assert_eq!(q.skip(), 60);
    assert_eq!(q.limit(), 20);
    let d = FindQuery::default();
    assert_eq!((d.page_index, d.page_size, d.skip()), (0, 10, 0));
}

#[tokio::test]
async fn open_at_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested dir").join("library.db");
    let db = crate::library_db::LibraryDb::open_at(&path).await.unwrap();
    db.create(&download("Persisted")).await.unwrap();
    assert!(path.exists());
}
