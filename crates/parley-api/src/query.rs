use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};
use tokio::task::spawn_blocking;

use parley_db::Store;

use crate::types::{Channel, Message, parse_id};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All channels, newest first.
    async fn channels(&self, ctx: &Context<'_>) -> Result<Vec<Channel>> {
        let store = ctx.data::<Arc<Store>>()?.clone();
        let rows = spawn_blocking(move || store.list_channels()).await??;
        Ok(rows.into_iter().map(Channel).collect())
    }

    async fn channel(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Channel>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Arc<Store>>()?.clone();
        let row = spawn_blocking(move || store.channel(id)).await??;
        Ok(row.map(Channel))
    }

    /// Messages in one channel, newest first.
    async fn messages(&self, ctx: &Context<'_>, channel_id: ID) -> Result<Vec<Message>> {
        let Some(channel_id) = parse_id(&channel_id) else {
            return Ok(Vec::new());
        };
        let store = ctx.data::<Arc<Store>>()?.clone();
        let rows = spawn_blocking(move || store.messages_in_channel(channel_id)).await??;
        Ok(rows.into_iter().map(Message).collect())
    }

    async fn message(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Message>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let store = ctx.data::<Arc<Store>>()?.clone();
        let row = spawn_blocking(move || store.message(id)).await??;
        Ok(row.map(Message))
    }
}
