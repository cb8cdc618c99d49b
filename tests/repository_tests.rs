use oshop_backoffice::{
    models::{CategoryInput, FooterEntryInput, ProductInput, UserInput},
    repository::{MemoryRepository, Repository},
};

// --- Helpers ---

fn category(name: &str, home_order: i32) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        subtitle: format!("{name} subtitle"),
        picture: format!("{name}.png"),
        home_order,
    }
}

fn product(name: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: "A product".to_string(),
        picture: "product.png".to_string(),
        price: 10.0,
        rate: 3,
        status: 1,
        brand_id: 1,
        category_id: 1,
        type_id: 1,
    }
}

fn user(email: &str) -> UserInput {
    UserInput {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        firstname: "Grace".to_string(),
        lastname: "Hopper".to_string(),
        role: "admin".to_string(),
        status: 1,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_category_crud() {
    let repo = MemoryRepository::new();

    let id = repo.insert_category(&category("Shoes", 0)).await.expect("inserted");
    let stored = repo.find_category(id).await.expect("found");
    assert_eq!(stored.name, "Shoes");
    assert!(stored.updated_at.is_none());

    assert!(repo.update_category(id, &category("Boots", 2)).await);
    let updated = repo.find_category(id).await.expect("found");
    assert_eq!(updated.name, "Boots");
    assert_eq!(updated.home_order, 2);
    assert!(updated.updated_at.is_some());

    assert!(repo.delete_category(id).await);
    assert!(repo.find_category(id).await.is_none());
    assert!(!repo.delete_category(id).await);
    assert!(!repo.update_category(id, &category("Ghost", 0)).await);
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let repo = MemoryRepository::new();
    let first = repo.insert_brand(&FooterEntryInput { name: "A".into(), footer_order: 1 }).await;
    assert!(repo.delete_brand(first.expect("inserted")).await);
    let second = repo.insert_brand(&FooterEntryInput { name: "B".into(), footer_order: 2 }).await;

    assert_ne!(first, second);
    assert_eq!(repo.list_brands().await.len(), 1);
}

#[tokio::test]
async fn test_home_categories_are_ordered_and_limited() {
    let repo = MemoryRepository::new();
    for (name, order) in [("c", 3), ("hidden", 0), ("a", 1), ("b", 2), ("d", 4), ("e", 5), ("f", 6)] {
        repo.insert_category(&category(name, order)).await;
    }

    let names: Vec<String> = repo
        .home_categories(5)
        .await
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_home_order_reset_and_assignment() {
    let repo = MemoryRepository::new();
    let first = repo.insert_category(&category("first", 1)).await.expect("inserted");
    let second = repo.insert_category(&category("second", 2)).await.expect("inserted");

    assert!(repo.reset_home_order().await);
    assert!(repo.home_categories(5).await.is_empty());

    assert!(repo.set_home_order(second, 1).await);
    assert!(!repo.set_home_order(999, 2).await);

    let home = repo.home_categories(5).await;
    assert_eq!(home.len(), 1);
    assert_eq!(home[0].id, second);
    assert_eq!(repo.find_category(first).await.map(|c| c.home_order), Some(0));
}

#[tokio::test]
async fn test_latest_products_newest_first() {
    let repo = MemoryRepository::new();
    for name in ["one", "two", "three", "four", "five", "six"] {
        repo.insert_product(&product(name)).await;
    }

    let names: Vec<String> = repo
        .latest_products(5)
        .await
        .into_iter()
        .map(|product| product.name)
        .collect();
    assert_eq!(names, vec!["six", "five", "four", "three", "two"]);
}

#[tokio::test]
async fn test_product_and_type_updates() {
    let repo = MemoryRepository::new();
    let product_id = repo.insert_product(&product("Derby")).await.expect("inserted");
    let mut changed = product("Oxford");
    changed.price = 99.5;
    assert!(repo.update_product(product_id, &changed).await);
    let stored = repo.find_product(product_id).await.expect("found");
    assert_eq!(stored.name, "Oxford");
    assert_eq!(stored.price, 99.5);

    let type_id = repo
        .insert_type(&FooterEntryInput { name: "Sneakers".into(), footer_order: 0 })
        .await
        .expect("inserted");
    assert!(repo
        .update_type(type_id, &FooterEntryInput { name: "Sandals".into(), footer_order: 4 })
        .await);
    let stored = repo.find_type(type_id).await.expect("found");
    assert_eq!((stored.name.as_str(), stored.footer_order), ("Sandals", 4));
    assert!(repo.delete_type(type_id).await);
    assert!(repo.list_types().await.is_empty());
}

#[tokio::test]
async fn test_user_emails_are_unique() {
    let repo = MemoryRepository::new();
    let grace = repo.insert_user(&user("grace@oshop.local")).await.expect("inserted");
    let alan = repo.insert_user(&user("alan@oshop.local")).await.expect("inserted");

    assert!(repo.insert_user(&user("grace@oshop.local")).await.is_none());
    // Taking someone else's email fails, keeping your own succeeds.
    assert!(!repo.update_user(alan, &user("grace@oshop.local")).await);
    assert!(repo.update_user(grace, &user("grace@oshop.local")).await);

    let found = repo.find_user_by_email("alan@oshop.local").await.expect("found");
    assert_eq!(found.id, alan);
    assert!(repo.find_user_by_email("nobody@oshop.local").await.is_none());
    assert_eq!(repo.list_users().await.len(), 2);
}
