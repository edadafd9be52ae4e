use std::sync::Arc;

use async_graphql::{Context, Error, ID, Object, Result};
use chrono::{SecondsFormat, Utc};
use tokio::task::spawn_blocking;

use parley_db::Store;

use crate::types::{Channel, CreateChannelInput, CreateMessageInput, Message, parse_id};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a channel. The store assigns the id; the creation timestamp
    /// is taken here and immutable afterwards.
    async fn create_channel(
        &self,
        ctx: &Context<'_>,
        input: CreateChannelInput,
    ) -> Result<Channel> {
        if input.name.is_empty() {
            return Err(Error::new("channel name must not be empty"));
        }

        let created_at = now_timestamp();
        let store = ctx.data::<Arc<Store>>()?.clone();
        let row = spawn_blocking(move || {
            store.insert_channel(
                &input.name,
                input.description.as_deref().unwrap_or(""),
                &created_at,
            )
        })
        .await??;
        Ok(Channel(row))
    }

    /// Create a message in a channel. The referenced channel is not
    /// validated; a dangling id is stored as-is.
    async fn create_message(
        &self,
        ctx: &Context<'_>,
        input: CreateMessageInput,
    ) -> Result<Message> {
        if input.title.is_empty() {
            return Err(Error::new("message title must not be empty"));
        }
        if input.content.is_empty() {
            return Err(Error::new("message content must not be empty"));
        }
        let channel_id =
            parse_id(&input.channel_id).ok_or_else(|| Error::new("channelId must be numeric"))?;

        let created_at = now_timestamp();
        let store = ctx.data::<Arc<Store>>()?.clone();
        let row = spawn_blocking(move || {
            store.insert_message(&input.title, &input.content, channel_id, &created_at)
        })
        .await??;
        Ok(Message(row))
    }

    /// Delete a channel and everything in it: the messages go first, then
    /// the channel row. The two statements are not transactional, so a
    /// concurrent reader may briefly observe the half-deleted state. Both
    /// run even when the channel does not exist, and the result is `true`
    /// either way.
    async fn delete_channel(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(true);
        };
        let store = ctx.data::<Arc<Store>>()?.clone();
        let children = store.clone();
        spawn_blocking(move || children.delete_channel_messages(id)).await??;
        spawn_blocking(move || store.delete_channel(id)).await??;
        Ok(true)
    }

    /// Delete a message. Deleting an absent id is a successful no-op.
    async fn delete_message(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(true);
        };
        let store = ctx.data::<Arc<Store>>()?.clone();
        spawn_blocking(move || store.delete_message(id)).await??;
        Ok(true)
    }
}

/// Creation timestamps use the RFC 3339 millisecond form,
/// e.g. `2024-01-01T00:00:00.000Z`.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
