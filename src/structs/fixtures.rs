//! Serenity objects for handler tests, built without a gateway connection

use std::sync::Arc;

use crate::serenity_prelude as serenity;

/// Context whose shard messenger and HTTP client are never used
pub(crate) fn discord() -> serenity::Context {
    let (shard_tx, _) = futures::channel::mpsc::unbounded();
    serenity::Context {
        data: Arc::new(::serenity::prelude::RwLock::new(
            ::serenity::prelude::TypeMap::new(),
        )),
        shard: ::serenity::client::bridge::gateway::ShardMessenger::new(shard_tx),
        shard_id: 0,
        http: Arc::new(::serenity::http::Http::new("")),
        #[cfg(feature = "cache")]
        cache: Arc::new(::serenity::cache::Cache::new()),
    }
}

/// User object as Discord sends it
pub(crate) fn user_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "username": name,
        "discriminator": "0001",
        "avatar": null
    })
}

/// Message object as Discord sends it in an interaction's resolved data
pub(crate) fn message_json(id: u64, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "channel_id": "3",
        "author": user_json(10, "ferris"),
        "content": content,
        "timestamp": "2022-09-01T12:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "embeds": [],
        "pinned": false,
        "type": 0
    })
}

/// Interaction envelope around the given `data`, sent by a user with the `fr` locale
fn interaction_json(kind: u8, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "application_id": "2",
        "type": kind,
        "data": data,
        "channel_id": "3",
        "user": user_json(4, "invoker"),
        "token": "token",
        "version": 1,
        "locale": "fr"
    })
}

/// Application command interaction with the given `data` payload
pub(crate) fn command_interaction(
    data: serde_json::Value,
) -> serenity::ApplicationCommandInteraction {
    serde_json::from_value(interaction_json(2, data)).unwrap()
}

/// Autocomplete interaction with the given `data` payload
pub(crate) fn autocomplete_interaction(
    data: serde_json::Value,
) -> serenity::AutocompleteInteraction {
    serde_json::from_value(interaction_json(4, data)).unwrap()
}
