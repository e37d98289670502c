use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use newsroom::{get_random_free_port, init_db, make_router, run_app};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub db_url: String,
}

static NEXT_DB_ID: AtomicU32 = AtomicU32::new(0);

/// Spawns the real server on a random free port against a throwaway SQLite
/// database, freshly migrated and seeded. Every test gets its own database,
/// so tests never observe each other's writes.
pub async fn spawn_app() -> TestApp {
    let db_url = throwaway_db_url();
    let pool = init_db(&db_url)
        .await
        .expect("test database should initialize");
    seed(&pool).await;

    let (port, addr) = get_random_free_port();
    let router = make_router();
    tokio::spawn(async move {
        run_app(router, addr, pool)
            .await
            .expect("server should keep running");
    });

    let address = format!("http://localhost:{port}");
    wait_until_alive(&address).await;

    TestApp { address, db_url }
}

fn throwaway_db_url() -> String {
    let id = NEXT_DB_ID.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "newsroom_test_{}_{}.sqlite",
        std::process::id(),
        id
    ));
    // A leftover file from an earlier run would already be seeded.
    let _ = std::fs::remove_file(&path);
    format!("sqlite://{}", path.display())
}

async fn wait_until_alive(address: &str) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if let Ok(response) = client.get(format!("{address}/check_health")).send().await {
            if response.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server never became healthy at {address}");
}

const TOPIC_SEED: &str = "
INSERT INTO topics (slug, description) VALUES
    ('coding', 'Code is love, code is life'),
    ('football', 'FOOTIE!'),
    ('cooking', 'Hey good looking, what you got cooking?'),
    ('gardening', 'Growing things quietly');
";

const USER_SEED: &str = "
INSERT INTO users (username, first_name, surname, email, password) VALUES
    ('butter_bridge', 'Jonny', 'Bridge', 'jonny@example.com', '$argon2id$v=19$m=19456,t=2,p=1$c2VlZHNhbHRzZWVk$x4NcN6QIbrYDyGPL7khaWw'),
    ('icellusedkars', 'Sam', 'Kars', 'sam@example.com', '$argon2id$v=19$m=19456,t=2,p=1$c2VlZHNhbHRzZWVk$x4NcN6QIbrYDyGPL7khaWw'),
    ('rogersop', 'Paul', 'Rogers', 'paul@example.com', '$argon2id$v=19$m=19456,t=2,p=1$c2VlZHNhbHRzZWVk$x4NcN6QIbrYDyGPL7khaWw');
";

const ARTICLE_SEED: &str = "
INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url) VALUES
    (1, 'Living in the shadow of a great man', 'coding', 'butter_bridge', 'I find this existence challenging', '2024-01-07 14:00:00', 100, 'https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700'),
    (2, 'The Rise Of Thinking Machines', 'coding', 'icellusedkars', 'They are among us already', '2024-05-14 10:00:00', 0, ''),
    (3, 'Football Is Life', 'football', 'rogersop', 'The beautiful game explained', '2024-03-02 09:30:00', 50, ''),
    (4, 'Stone Soup', 'cooking', 'butter_bridge', 'A recipe with one ingredient too few', '2024-07-21 20:15:00', 10, ''),
    (5, 'Twenty-Two Shots', 'football', 'icellusedkars', 'None of them on target', '2023-11-30 11:45:00', 5, '');
";

const COMMENT_SEED: &str = "
INSERT INTO comments (comment_id, article_id, author, body, votes, created_at) VALUES
    (1, 1, 'icellusedkars', 'Top tier writeup', 16, '2024-01-10 09:00:00'),
    (2, 1, 'rogersop', 'I read half of it', 3, '2024-02-01 12:30:00'),
    (3, 1, 'butter_bridge', 'Replying to my own article again', -2, '2024-03-15 18:45:00'),
    (4, 3, 'butter_bridge', 'One hundred and eighty!', 7, '2024-04-01 08:00:00'),
    (5, 5, 'rogersop', 'git push origin master', 0, '2023-12-05 11:00:00'),
    (6, 5, 'icellusedkars', 'Fruit pastilles', 1, '2023-12-05 11:00:00');
";

async fn seed(pool: &SqlitePool) {
    for statement in [TOPIC_SEED, USER_SEED, ARTICLE_SEED, COMMENT_SEED] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .expect("seed statement should run");
    }
}
