mod common;

use common::{setup, test_config, ScriptedSource};
use cineboard::application::friends::FriendBook;
use cineboard::domain::entities::session::Session;
use cineboard::domain::ports::friend_repository::FriendRepository;
use cineboard::infrastructure::sqlite::friend_repo::SqliteFriendRepo;
use cineboard::infrastructure::sqlite::migrations::run_migrations;
use cineboard::CineBoard;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn board_at(path: &std::path::Path) -> CineBoard {
    CineBoard::with_config(path.to_str().unwrap(), ScriptedSource::new(), test_config()).unwrap()
}

#[tokio::test]
async fn an_empty_store_falls_back_to_the_sample_roster() {
    let board = setup(ScriptedSource::new());
    let names: Vec<String> = board.friends().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["Ana", "Carlos", "Lucia"]);
}

#[tokio::test]
async fn the_seeded_roster_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cineboard.db");

    let first = board_at(&path);
    let mut ids: Vec<String> = first.friends().into_iter().map(|f| f.id).collect();
    drop(first);

    let second = board_at(&path);
    let mut again: Vec<String> = second.friends().into_iter().map(|f| f.id).collect();
    ids.sort();
    again.sort();
    assert_eq!(ids, again);
}

#[tokio::test]
async fn added_and_removed_friends_are_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cineboard.db");

    let board = board_at(&path);
    let maya = board
        .add_friend("Maya".into(), "maya.jpg".into(), vec![2, 15])
        .unwrap();
    drop(board);

    let board = board_at(&path);
    let stored = board.friend(&maya.id).expect("Maya survived the restart");
    assert_eq!(stored.liked, vec![2, 15]);

    board.remove_friend(&maya.id).unwrap();
    drop(board);

    let board = board_at(&path);
    assert!(board.friend(&maya.id).is_none());
    assert!(board.remove_friend(&maya.id).is_err());
}

#[tokio::test]
async fn a_corrupt_liked_column_decodes_as_no_likes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cineboard.db");
    let conn = Connection::open(&path).unwrap();
    run_migrations(&conn).unwrap();
    conn.execute(
        "INSERT INTO friends (id, name, photo, liked, created_at)
         VALUES ('f1', 'Glitch', '', 'not-json', '2024-01-01T00:00:00Z')",
        [],
    )
    .unwrap();
    drop(conn);

    let board = board_at(&path);
    let glitch = board.friend("f1").unwrap();
    assert!(glitch.liked.is_empty());
}

#[tokio::test(start_paused = true)]
async fn chat_gets_a_simulated_reply_after_the_typing_pause() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cineboard.db");

    let board = board_at(&path);
    let ana = board.friends().remove(0);
    let (sent, reply) = board.chat(&ana.id, "Movie night?".into()).await.unwrap();
    assert!(sent.from_me);
    let reply = reply.expect("nobody logged out, the reply lands");
    assert!(!reply.from_me);

    let history = board.friend(&ana.id).unwrap().messages;
    assert_eq!(history.len(), 2);
    drop(board);

    // Both sides of the conversation are persisted.
    let board = board_at(&path);
    assert_eq!(board.friend(&ana.id).unwrap().messages.len(), 2);
}

#[tokio::test]
async fn logout_cancels_a_reply_in_flight() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    let repo: Arc<dyn FriendRepository> = Arc::new(SqliteFriendRepo::new(conn));
    let session = Arc::new(Mutex::new(Session::default()));
    let book = Arc::new(FriendBook::with_typing_delay(
        repo,
        session.clone(),
        Duration::from_millis(300),
    ));

    let maya = book.add("Maya".into(), "maya.jpg".into(), vec![]).unwrap();
    book.send_message(&maya.id, "hey!".into()).unwrap();

    let pending = {
        let book = book.clone();
        let id = maya.id.clone();
        tokio::spawn(async move { book.simulate_reply(&id).await.unwrap() })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.lock().unwrap().reset();

    assert!(pending.await.unwrap().is_none());
    assert_eq!(book.get(&maya.id).unwrap().messages.len(), 1);
}
