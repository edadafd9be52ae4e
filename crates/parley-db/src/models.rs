//! Row types mapped straight from SQLite. Distinct from the GraphQL output
//! types in parley-api to keep the storage layer independent.

#[derive(Debug, Clone)]
pub struct ChannelRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub channel_id: i64,
    pub created_at: String,
}
