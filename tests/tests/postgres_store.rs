//! PostgreSQL backend tests.
//!
//! Skipped unless `CONTACT_TEST_DATABASE_URL` points at a disposable database.
//! Each test tags its records with a unique marker so runs do not interfere.

use contact_core::{ContactFilter, ContactId, ContactUs, Requester};
use contact_store::{ContactStore, PgStore, StoreConfig};

async fn store() -> Option<PgStore> {
    let url = std::env::var("CONTACT_TEST_DATABASE_URL").ok()?;
    let store = PgStore::connect(&StoreConfig::postgres(url))
        .await
        .expect("Failed to connect to test database");
    store.init_schema().await.expect("Failed to initialize schema");
    Some(store)
}

fn contact(talk_about: &str) -> ContactUs {
    ContactUs {
        talk_about: talk_about.into(),
        time_frame: "Q3".into(),
        project_type: "web".into(),
        budget: "small".into(),
        description: "details".into(),
        requester: Requester {
            name: "Linus".into(),
            company_name: None,
            email: "l@k.org".into(),
            phone_number: None,
        },
    }
}

fn marker() -> String {
    format!("pg-test-{}", ContactId::generate())
}

#[tokio::test]
async fn test_insert_find_replace_delete() {
    let Some(store) = store().await else { return };
    let tag = marker();

    let record = store.insert(contact(&tag)).await.unwrap();
    let found = store.find_by_id(&record.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&record));

    let mut changed = record.clone();
    changed.contact.budget = "large".into();
    assert!(store.replace(&changed).await.unwrap());
    let found = store.find_by_id(&record.id).await.unwrap().unwrap();
    assert_eq!(found.contact.budget, "large");

    assert!(store.delete(&record.id).await.unwrap());
    assert!(!store.delete(&record.id).await.unwrap());
    assert!(store.find_by_id(&record.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_text_search_is_literal_and_case_insensitive() {
    let Some(store) = store().await else { return };
    let tag = marker();

    let plain = store.insert(contact(&format!("{} Website", tag))).await.unwrap();
    let wild = store.insert(contact(&format!("{} 100%_off", tag))).await.unwrap();

    let filter = ContactFilter {
        id: None,
        text: Some(tag.to_uppercase()),
    };
    assert_eq!(store.find(&filter).await.unwrap().len(), 2);

    let filter = ContactFilter {
        id: None,
        text: Some(format!("{} 100%_", tag)),
    };
    let matched = store.find(&filter).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, wild.id);

    let removed = store.delete_many(&[plain.id, wild.id]).await.unwrap();
    assert_eq!(removed, 2);
}

#[tokio::test]
async fn test_page_preserves_insertion_order() {
    let Some(store) = store().await else { return };
    let tag = marker();

    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(store.insert(contact(&format!("{} {}", tag, i))).await.unwrap().id);
    }

    let filter = ContactFilter {
        id: None,
        text: Some(tag.clone()),
    };
    let listed: Vec<ContactId> = store
        .find(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, ids);

    assert!(store.count().await.unwrap() >= 3);
    store.ping().await.unwrap();
    store.delete_many(&ids).await.unwrap();
}
