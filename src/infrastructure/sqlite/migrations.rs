use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS friends (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            photo TEXT NOT NULL DEFAULT '',
            liked TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id TEXT PRIMARY KEY,
            friend_id TEXT NOT NULL REFERENCES friends(id),
            from_me INTEGER NOT NULL,
            body TEXT NOT NULL,
            sent_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_friend ON messages(friend_id, sent_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
