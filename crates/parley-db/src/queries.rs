use rusqlite::{Connection, OptionalExtension, Row};

use crate::Store;
use crate::error::StoreError;
use crate::models::{ChannelRow, MessageRow};

impl Store {
    // -- Channels --

    /// All channels, newest first.
    pub fn list_channels(&self) -> Result<Vec<ChannelRow>, StoreError> {
        self.with_conn("list_channels", query_channels)
    }

    pub fn channel(&self, id: i64) -> Result<Option<ChannelRow>, StoreError> {
        self.with_conn("get_channel", |conn| query_channel(conn, id))
    }

    /// Insert a channel and read the stored row back by its new id.
    pub fn insert_channel(
        &self,
        name: &str,
        description: &str,
        created_at: &str,
    ) -> Result<ChannelRow, StoreError> {
        self.with_conn("create_channel", |conn| {
            conn.execute(
                "INSERT INTO channels (name, description, created_at) VALUES (?1, ?2, ?3)",
                (name, description, created_at),
            )?;
            query_channel(conn, conn.last_insert_rowid())?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Delete the channel row only. Cascading to its messages is the
    /// caller's responsibility via [`Store::delete_channel_messages`].
    pub fn delete_channel(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn("delete_channel", |conn| {
            conn.execute("DELETE FROM channels WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    // -- Messages --

    /// Messages belonging to one channel, newest first.
    pub fn messages_in_channel(&self, channel_id: i64) -> Result<Vec<MessageRow>, StoreError> {
        self.with_conn("list_messages", |conn| query_messages(conn, channel_id))
    }

    pub fn message(&self, id: i64) -> Result<Option<MessageRow>, StoreError> {
        self.with_conn("get_message", |conn| query_message(conn, id))
    }

    /// Insert a message and read the stored row back by its new id.
    ///
    /// The parent channel is deliberately not checked: a dangling
    /// `channel_id` is accepted.
    pub fn insert_message(
        &self,
        title: &str,
        content: &str,
        channel_id: i64,
        created_at: &str,
    ) -> Result<MessageRow, StoreError> {
        self.with_conn("create_message", |conn| {
            conn.execute(
                "INSERT INTO messages (title, content, channel_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![title, content, channel_id, created_at],
            )?;
            query_message(conn, conn.last_insert_rowid())?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn delete_channel_messages(&self, channel_id: i64) -> Result<(), StoreError> {
        self.with_conn("delete_channel_messages", |conn| {
            conn.execute("DELETE FROM messages WHERE channel_id = ?1", [channel_id])?;
            Ok(())
        })
    }

    pub fn delete_message(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn("delete_message", |conn| {
            conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn query_channels(conn: &Connection) -> rusqlite::Result<Vec<ChannelRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at FROM channels ORDER BY created_at DESC",
    )?;
    let rows = stmt
        .query_map([], channel_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn query_channel(conn: &Connection, id: i64) -> rusqlite::Result<Option<ChannelRow>> {
    conn.query_row(
        "SELECT id, name, description, created_at FROM channels WHERE id = ?1",
        [id],
        channel_from_row,
    )
    .optional()
}

fn query_messages(conn: &Connection, channel_id: i64) -> rusqlite::Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, channel_id, created_at
         FROM messages
         WHERE channel_id = ?1
         ORDER BY created_at DESC",
    )?;
    let rows = stmt
        .query_map([channel_id], message_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn query_message(conn: &Connection, id: i64) -> rusqlite::Result<Option<MessageRow>> {
    conn.query_row(
        "SELECT id, title, content, channel_id, created_at FROM messages WHERE id = ?1",
        [id],
        message_from_row,
    )
    .optional()
}

fn channel_from_row(row: &Row<'_>) -> rusqlite::Result<ChannelRow> {
    Ok(ChannelRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        channel_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Store;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn seed_is_present_on_a_fresh_store() {
        let store = store();

        let channels = store.list_channels().unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "general");

        let messages = store.messages_in_channel(channels[0].id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Welcome to the chat!");
    }

    #[test]
    fn insert_reads_back_the_stored_row() {
        let store = store();

        let row = store
            .insert_channel("rust", "systems talk", "2024-06-01T10:00:00.000Z")
            .unwrap();
        assert_eq!(row.name, "rust");
        assert_eq!(row.description, "systems talk");
        assert_eq!(row.created_at, "2024-06-01T10:00:00.000Z");
        assert!(store.channel(row.id).unwrap().is_some());
    }

    #[test]
    fn ids_are_assigned_monotonically() {
        let store = store();

        let a = store
            .insert_channel("a", "", "2024-06-01T10:00:00.000Z")
            .unwrap();
        let b = store
            .insert_channel("b", "", "2024-06-01T10:00:01.000Z")
            .unwrap();
        let c = store
            .insert_channel("c", "", "2024-06-01T10:00:02.000Z")
            .unwrap();
        assert!(a.id < b.id);
        assert!(b.id < c.id);

        let m1 = store
            .insert_message("one", "x", a.id, "2024-06-01T10:00:03.000Z")
            .unwrap();
        let m2 = store
            .insert_message("two", "y", a.id, "2024-06-01T10:00:04.000Z")
            .unwrap();
        assert!(m1.id < m2.id);
    }

    #[test]
    fn messages_list_newest_first() {
        let store = store();
        let channel = store
            .insert_channel("times", "", "2024-06-01T00:00:00.000Z")
            .unwrap();

        // Inserted out of chronological order on purpose
        store
            .insert_message("first", "1", channel.id, "2024-06-01T08:00:00.000Z")
            .unwrap();
        store
            .insert_message("third", "3", channel.id, "2024-06-01T10:00:00.000Z")
            .unwrap();
        store
            .insert_message("second", "2", channel.id, "2024-06-01T09:00:00.000Z")
            .unwrap();

        let titles: Vec<_> = store
            .messages_in_channel(channel.id)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[test]
    fn lookups_on_absent_ids_return_none() {
        let store = store();
        assert!(store.channel(4242).unwrap().is_none());
        assert!(store.message(4242).unwrap().is_none());
    }

    #[test]
    fn deletes_are_noops_on_absent_rows() {
        let store = store();
        store.delete_message(4242).unwrap();
        store.delete_message(4242).unwrap();
        store.delete_channel(4242).unwrap();
        store.delete_channel_messages(4242).unwrap();
    }

    #[test]
    fn dangling_channel_id_is_accepted() {
        let store = store();
        let row = store
            .insert_message("stray", "no parent", 9999, "2024-06-01T10:00:00.000Z")
            .unwrap();
        assert_eq!(row.channel_id, 9999);
        assert!(store.channel(9999).unwrap().is_none());
    }
}
