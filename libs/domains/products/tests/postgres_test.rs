//! Integration tests for the Products domain
//!
//! These run against a real PostgreSQL container to check:
//! - unique constraints surface as conflicts with the store's detail
//! - the `UPPER(title) OR slug` lookup
//! - image replacement is atomic and cascades on delete

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn input(builder: &TestDataBuilder, label: &str, images: &[&str]) -> CreateProduct {
    CreateProduct {
        title: builder.title(label),
        price: Some(19.5),
        description: None,
        slug: Some(builder.slug(label)),
        stock: Some(2),
        sizes: vec!["M".to_string(), "L".to_string()],
        gender: Gender::Women,
        tags: vec!["test".to_string()],
        images: images.iter().map(|url| url.to_string()).collect(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_lookup_by_term() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_lookup");

    let created = service
        .create_product(input(&builder, "mug", &["1.jpg", "2.jpg"]))
        .await
        .unwrap();

    let by_title = service
        .find_one_plain(&builder.title("mug").to_uppercase())
        .await
        .unwrap();
    let by_slug = service.find_one_plain(&builder.slug("mug")).await.unwrap();

    assert_eq!(by_title.id, created.id);
    assert_eq!(by_slug.id, created.id);
    assert_eq!(by_slug.images, vec!["1.jpg", "2.jpg"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_slug_is_conflict() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_duplicate");

    service
        .create_product(input(&builder, "mug", &[]))
        .await
        .unwrap();

    let mut clash = input(&builder, "cup", &[]);
    clash.slug = Some(builder.slug("mug"));
    let err = service.create_product(clash).await.unwrap_err();

    let ProductError::Conflict(detail) = err else {
        panic!("expected a conflict, got {err:?}");
    };
    assert_eq!(
        detail,
        format!("Key (slug)=({}) already exists.", builder.slug("mug"))
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_image_replacement_is_transactional() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_images");

    let mug = service
        .create_product(input(&builder, "mug", &["1.jpg", "2.jpg"]))
        .await
        .unwrap();
    service
        .create_product(input(&builder, "cup", &[]))
        .await
        .unwrap();

    let kept = service
        .update_product(
            mug.id,
            UpdateProduct {
                stock: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.images, vec!["1.jpg", "2.jpg"]);

    // Slug clash makes the save fail after the images were deleted.
    let err = service
        .update_product(
            mug.id,
            UpdateProduct {
                slug: Some(builder.slug("cup")),
                images: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)));

    let unchanged = service.find_one_plain(&mug.id.to_string()).await.unwrap();
    assert_eq!(unchanged.images, vec!["1.jpg", "2.jpg"]);

    let cleared = service
        .update_product(
            mug.id,
            UpdateProduct {
                images: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.images.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_cascades_to_images() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_remove");

    let created = service
        .create_product(input(&builder, "mug", &["1.jpg"]))
        .await
        .unwrap();

    service.remove_product(created.id).await.unwrap();

    let err = service
        .find_one(&created.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_slug_match_wins_over_title_match() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_slug_wins");
    let term = builder.slug("term");

    let mut by_title = input(&builder, "title", &[]);
    by_title.title = term.clone();
    service.create_product(by_title).await.unwrap();

    let mut by_slug = input(&builder, "slug", &[]);
    by_slug.slug = Some(term.clone());
    let expected = service.create_product(by_slug).await.unwrap();

    let found = service.find_one(&term).await.unwrap();
    assert_eq!(found.id, expected.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_title_lookup_case_maps_in_the_store() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_case_map");

    let mut street = input(&builder, "street", &[]);
    street.title = format!("Straße {}", builder.title("street"));
    let created = service.create_product(street.clone()).await.unwrap();

    let found = service.find_one(&street.title.to_lowercase()).await.unwrap();
    assert_eq!(found.id, created.id);
}
