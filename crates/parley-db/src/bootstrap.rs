use rusqlite::Connection;
use tracing::info;

/// Create the tables and seed the default channel on first run.
///
/// `INSERT OR IGNORE` against fixed primary keys keeps the seed idempotent
/// across restarts.
pub(crate) fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS channels (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            content     TEXT NOT NULL,
            -- channel_id is declarative only: the foreign_keys pragma stays
            -- off, so inserts never re-check the parent row
            channel_id  INTEGER NOT NULL REFERENCES channels(id),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_channel
            ON messages(channel_id, created_at);

        -- Seed the default general channel and its welcome message
        INSERT OR IGNORE INTO channels (id, name, description, created_at)
            VALUES (1, 'general', 'The default chat channel', '2024-01-01T00:00:00.000Z');
        INSERT OR IGNORE INTO messages (id, title, content, channel_id, created_at)
            VALUES (1, 'Welcome', 'Welcome to the chat!', 1, '2024-01-01T00:01:00.000Z');
        ",
    )?;

    info!("Store bootstrap complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let channels: i64 = conn
            .query_row("SELECT COUNT(*) FROM channels", [], |row| row.get(0))
            .unwrap();
        let messages: i64 = conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(channels, 1);
        assert_eq!(messages, 1);
    }
}
