use crate::database::sqlite::SqliteRepository;
use crate::database::{
    ArticleRepository, NavigationLinkRepository, PageRepository, SubforemRepository,
    UserRepository,
};
use crate::domain::{DisplayTo, NavigationLink, NavigationSection, Page, PageTemplate};
use crate::error::StoreError;
use crate::tests::{ArticleFixture, insert_article, insert_subforem, insert_user, setup_test_pool};

async fn setup_test_db() -> (SqliteRepository, sqlx::SqlitePool) {
    let pool = setup_test_pool().await;
    (SqliteRepository::new(pool.clone()), pool)
}

fn create_mock_page(slug: &str) -> Page {
    let mut page = Page::new(slug, "Test");
    page.set_markdown("# Hello");
    page
}

fn create_mock_link(url: &str, name: &str) -> NavigationLink {
    NavigationLink {
        id: None,
        url: url.to_string(),
        name: name.to_string(),
        icon: "<svg></svg>".to_string(),
        section: NavigationSection::Default,
        position: Some(1),
        display_to: DisplayTo::All,
    }
}

// test the database's ability to save and retrieve pages
#[tokio::test]
async fn test_sqlite_save_and_retrieve() {
    let (repo, _) = setup_test_db().await;

    let saved = repo.save_page(&create_mock_page("slug-1")).await.expect("Should save page");
    assert!(saved.id.is_some());
    // html is derived from markdown on save
    assert!(saved.processed_html().contains("<h1>Hello</h1>"));
    assert!(saved.created_at.is_some());

    let retrieved = repo
        .find_page("slug-1", None)
        .await
        .expect("Should query")
        .expect("Page should exist");
    assert_eq!(retrieved, saved);
}

// saving a page with an id updates it in place
#[tokio::test]
async fn test_sqlite_update_page() {
    let (repo, _) = setup_test_db().await;

    let mut page = repo.save_page(&create_mock_page("slug-1")).await.unwrap();
    page.title = "Updated".to_string();
    page.set_markdown("# Changed");
    let updated = repo.save_page(&page).await.unwrap();

    assert_eq!(updated.id, page.id);
    assert_eq!(updated.title, "Updated");
    assert!(updated.processed_html().contains("<h1>Changed</h1>"));
    assert_eq!(repo.get_all_pages().await.unwrap().len(), 1);
}

// slugs are unique per scope, and the global scope is a scope of its own
#[tokio::test]
async fn test_sqlite_slug_unique_per_scope() {
    let (repo, pool) = setup_test_db().await;
    let subforem = insert_subforem(&pool, "other.com").await;

    repo.save_page(&create_mock_page("about")).await.unwrap();

    let duplicate = repo.save_page(&create_mock_page("about")).await;
    assert!(matches!(duplicate, Err(StoreError::Validation(_))));

    let mut scoped = create_mock_page("about");
    scoped.subforem_id = Some(subforem);
    repo.save_page(&scoped).await.expect("same slug in another scope is allowed");

    assert_eq!(repo.get_all_pages().await.unwrap().len(), 2);
}

// lookups prefer the requesting tenant, then global pages, then anyone else's
#[tokio::test]
async fn test_sqlite_lookup_preference() {
    let (repo, pool) = setup_test_db().await;
    let first = insert_subforem(&pool, "first.com").await;
    let second = insert_subforem(&pool, "second.com").await;

    let mut owned = create_mock_page("shared");
    owned.subforem_id = Some(first);
    owned.title = "First".into();
    repo.save_page(&owned).await.unwrap();

    let mut global = create_mock_page("shared");
    global.title = "Global".into();
    repo.save_page(&global).await.unwrap();

    let mut elsewhere = create_mock_page("only-second");
    elsewhere.subforem_id = Some(second);
    repo.save_page(&elsewhere).await.unwrap();

    let hit = repo.lookup_page("shared", Some(first), false).await.unwrap().unwrap();
    assert_eq!(hit.title, "First");

    let hit = repo.lookup_page("shared", Some(second), false).await.unwrap().unwrap();
    assert_eq!(hit.title, "Global");

    let hit = repo.lookup_page("only-second", Some(first), false).await.unwrap().unwrap();
    assert_eq!(hit.subforem_id, Some(second));

    assert!(repo.lookup_page("missing", None, false).await.unwrap().is_none());

    // restricted to top-level pages, the tenant's own page no longer wins
    let mut top_level_global = create_mock_page("faq");
    top_level_global.is_top_level_path = true;
    top_level_global.title = "Global FAQ".into();
    repo.save_page(&top_level_global).await.unwrap();
    let mut tenant_faq = create_mock_page("faq");
    tenant_faq.subforem_id = Some(first);
    repo.save_page(&tenant_faq).await.unwrap();

    let hit = repo.lookup_page("faq", Some(first), true).await.unwrap().unwrap();
    assert_eq!(hit.title, "Global FAQ");
    let hit = repo.lookup_page("faq", Some(first), false).await.unwrap().unwrap();
    assert_eq!(hit.subforem_id, Some(first));
    assert!(repo.lookup_page("only-second", Some(first), true).await.unwrap().is_none());
}

// invalid pages never reach the database
#[tokio::test]
async fn test_sqlite_rejects_invalid_pages() {
    let (repo, _) = setup_test_db().await;

    let too_deep = create_mock_page("a/b/c/d/e/f/g");
    assert!(matches!(repo.save_page(&too_deep).await, Err(StoreError::Validation(_))));

    let mut broken_json = Page::new("feed", "Feed");
    broken_json.template = PageTemplate::Json;
    broken_json.body_json = Some("{not json".into());
    assert!(matches!(repo.save_page(&broken_json).await, Err(StoreError::Validation(_))));

    let mut untitled = create_mock_page("untitled");
    untitled.title = "  ".into();
    assert!(matches!(repo.save_page(&untitled).await, Err(StoreError::Validation(_))));

    // updating a row that is gone is not silently turned into an insert
    let mut ghost = create_mock_page("ghost");
    ghost.id = Some(999);
    assert!(matches!(repo.save_page(&ghost).await, Err(StoreError::Validation(_))));

    assert!(repo.get_all_pages().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sqlite_landing_page() {
    let (repo, pool) = setup_test_db().await;
    let subforem = insert_subforem(&pool, "other.com").await;

    assert!(repo.find_landing_page(None).await.unwrap().is_none());

    let mut landing = create_mock_page("home");
    landing.landing_page = true;
    repo.save_page(&landing).await.unwrap();

    // the global landing page also serves tenants without their own
    let found = repo.find_landing_page(Some(subforem)).await.unwrap().unwrap();
    assert_eq!(found.slug, "home");

    let mut tenant_landing = create_mock_page("tenant-home");
    tenant_landing.landing_page = true;
    tenant_landing.subforem_id = Some(subforem);
    repo.save_page(&tenant_landing).await.unwrap();

    let found = repo.find_landing_page(Some(subforem)).await.unwrap().unwrap();
    assert_eq!(found.slug, "tenant-home");
    let found = repo.find_landing_page(None).await.unwrap().unwrap();
    assert_eq!(found.slug, "home");
}

// upserting the same (url, name) twice updates the one row
#[tokio::test]
async fn test_sqlite_navigation_upsert_is_idempotent() {
    let (repo, _) = setup_test_db().await;

    let first = repo.upsert_by_identity(&create_mock_link("/about", "About")).await.unwrap();

    let mut moved = create_mock_link("/about", "About");
    moved.position = Some(7);
    moved.section = NavigationSection::Other;
    let second = repo.upsert_by_identity(&moved).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.position, Some(7));
    assert_eq!(second.section, NavigationSection::Other);

    let links = repo.all_links().await.unwrap();
    assert_eq!(links.len(), 1);

    let mut no_icon = create_mock_link("/x", "X");
    no_icon.icon = "x.png".into();
    assert!(matches!(repo.upsert_by_identity(&no_icon).await, Err(StoreError::Validation(_))));
}

// links come back grouped by section, each ordered by position
#[tokio::test]
async fn test_sqlite_navigation_ordering() {
    let (repo, _) = setup_test_db().await;

    let mut late = create_mock_link("/late", "Late");
    late.position = Some(20);
    let mut early = create_mock_link("/early", "Early");
    early.position = Some(1);
    let mut footer = create_mock_link("/footer", "Footer");
    footer.section = NavigationSection::Other;

    for link in [&late, &footer, &early] {
        repo.upsert_by_identity(link).await.unwrap();
    }

    let names: Vec<String> = repo.all_links().await.unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Early", "Late", "Footer"]);
}

// article queries only ever see published rows
#[tokio::test]
async fn test_sqlite_article_queries() {
    let (repo, pool) = setup_test_db().await;
    let staff = insert_user(&pool, "codenewbiestaff").await;
    let member = insert_user(&pool, "member").await;

    insert_article(&pool, ArticleFixture {
        user_id: member,
        title: "Old welcome",
        path: "/member/old-welcome",
        tags: &["welcome"],
        published: true,
        published_at: "2024-01-01 10:00:00",
    })
    .await;
    insert_article(&pool, ArticleFixture {
        user_id: member,
        title: "New welcome",
        path: "/member/new-welcome",
        tags: &["welcome", "showcase"],
        published: true,
        published_at: "2024-02-01 10:00:00",
    })
    .await;
    insert_article(&pool, ArticleFixture {
        user_id: staff,
        title: "Draft welcome",
        path: "/staff/draft",
        tags: &["welcome"],
        published: false,
        published_at: "2024-03-01 10:00:00",
    })
    .await;
    insert_article(&pool, ArticleFixture {
        user_id: staff,
        title: "Weekly checkin",
        path: "/staff/checkin",
        tags: &["discuss"],
        published: true,
        published_at: "2024-01-15 10:00:00",
    })
    .await;

    let welcome = repo.latest_published_tagged("welcome").await.unwrap().unwrap();
    assert_eq!(welcome.title, "New welcome");
    assert!(welcome.has_tag("showcase"));

    let checkin = repo.latest_published_by("codenewbiestaff").await.unwrap().unwrap();
    assert_eq!(checkin.title, "Weekly checkin");

    assert!(repo.latest_published_tagged("challenge").await.unwrap().is_none());
    assert!(repo.latest_published_by("nobody").await.unwrap().is_none());

    let recent = repo.recent_published(2).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["New welcome", "Weekly checkin"]);

    assert_eq!(repo.count_published().await.unwrap(), 3);
    assert_eq!(repo.count_published_tagged("showcase").await.unwrap(), 1);
    assert_eq!(repo.count_registered().await.unwrap(), 2);
}

#[tokio::test]
async fn test_sqlite_subforem_lookup() {
    let (repo, pool) = setup_test_db().await;
    let id = insert_subforem(&pool, "other.com").await;

    assert_eq!(repo.find_subforem(id).await.unwrap().unwrap().domain, "other.com");
    assert_eq!(repo.find_subforem_by_domain("other.com").await.unwrap().unwrap().id, id);
    assert!(repo.find_subforem_by_domain("unknown.com").await.unwrap().is_none());
}
