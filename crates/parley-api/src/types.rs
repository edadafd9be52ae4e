use std::sync::Arc;

use async_graphql::{Context, ID, InputObject, Object, Result};
use tokio::task::spawn_blocking;

use parley_db::{ChannelRow, MessageRow, Store};

/// Numeric ids travel as GraphQL `ID` strings. A non-numeric value can never
/// match a stored row, so lookups treat it as absent rather than failing.
pub(crate) fn parse_id(id: &ID) -> Option<i64> {
    id.parse().ok()
}

/// A named container owning zero or more messages.
pub struct Channel(pub(crate) ChannelRow);

#[Object]
impl Channel {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    /// Messages in this channel, newest first.
    async fn messages(&self, ctx: &Context<'_>) -> Result<Vec<Message>> {
        let store = ctx.data::<Arc<Store>>()?.clone();
        let channel_id = self.0.id;
        let rows = spawn_blocking(move || store.messages_in_channel(channel_id)).await??;
        Ok(rows.into_iter().map(Message).collect())
    }
}

/// A content entry belonging to exactly one channel.
pub struct Message(pub(crate) MessageRow);

#[Object]
impl Message {
    async fn id(&self) -> ID {
        ID::from(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn channel_id(&self) -> ID {
        ID::from(self.0.channel_id.to_string())
    }

    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    /// The owning channel. Message creation never validates the parent, so
    /// a dangling reference resolves to an empty placeholder channel that
    /// keeps the non-null field populated.
    async fn channel(&self, ctx: &Context<'_>) -> Result<Channel> {
        let store = ctx.data::<Arc<Store>>()?.clone();
        let channel_id = self.0.channel_id;
        let row = spawn_blocking(move || store.channel(channel_id)).await??;
        Ok(Channel(row.unwrap_or_else(|| ChannelRow {
            id: channel_id,
            name: String::new(),
            description: String::new(),
            created_at: String::new(),
        })))
    }
}

#[derive(InputObject)]
pub struct CreateChannelInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(InputObject)]
pub struct CreateMessageInput {
    pub title: String,
    pub content: String,
    pub channel_id: ID,
}
