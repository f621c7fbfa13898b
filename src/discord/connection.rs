// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::route_command;
use super::events::channels::handle_channel_delete;
use super::interactions::route_interaction;
use super::state::tickets::TicketRegistry;
use super::utils::users::display_tag;
use crate::config::BotConfig;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{Config, EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;
use twilight_model::gateway::payload::outgoing::update_presence::UpdatePresencePayload;
use twilight_model::gateway::presence::{ActivityType, MinimalActivity, Status};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

pub fn set_up_client(config: &BotConfig) -> Arc<Client> {
	Arc::new(Client::new(config.discord_token.clone()))
}

fn bot_presence() -> miette::Result<UpdatePresencePayload> {
	let activity = MinimalActivity {
		kind: ActivityType::Watching,
		name: String::from("🎫 Tickets da Loja | !ajuda"),
		url: None,
	};
	UpdatePresencePayload::new(vec![activity.into()], false, None, Status::Online).into_diagnostic()
}

pub async fn run_bot(config: Arc<BotConfig>, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MEMBERS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

	let shard_config = Config::builder(config.discord_token.clone(), intents)
		.presence(bot_presence()?)
		.build();
	let mut shard = Shard::with_config(ShardId::ONE, shard_config);

	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(
				ResourceType::CHANNEL
					| ResourceType::GUILD
					| ResourceType::MEMBER
					| ResourceType::ROLE
					| ResourceType::USER
					| ResourceType::USER_CURRENT,
			)
			.build(),
	);

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	let registry = Arc::new(TicketRegistry::new());

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		cache.update(&event);

		tokio::spawn(handle_event(
			event,
			Arc::clone(&http_client),
			application_id,
			Arc::clone(&cache),
			Arc::clone(&config),
			Arc::clone(&registry),
		));
	}

	Ok(())
}

async fn handle_event(
	event: Event,
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: Arc<DefaultInMemoryCache>,
	config: Arc<BotConfig>,
	registry: Arc<TicketRegistry>,
) {
	let event_result = handle_event_route(event, &http_client, application_id, &cache, &config, &registry).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(
	event: Event,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	registry: &Arc<TicketRegistry>,
) -> miette::Result<()> {
	tracing::debug!("Incoming gateway message: {:?}", event);
	match event {
		Event::MessageCreate(message) => {
			route_command(&message, http_client, cache, config, registry).await?;
		}
		Event::InteractionCreate(interaction) => {
			if let Some(InteractionData::MessageComponent(interaction_data)) = &interaction.data {
				route_interaction(
					&interaction,
					interaction_data,
					http_client,
					application_id,
					cache,
					config,
					registry,
				)
				.await?;
			}
		}
		Event::ChannelDelete(channel_delete) => handle_channel_delete(&channel_delete, registry).await?,
		Event::Ready(ready) => {
			let bot_tag = display_tag(&ready.user.name, ready.user.discriminator);
			tracing::info!("Connected to the Discord gateway as {}", bot_tag);
		}
		_ => (),
	}
	Ok(())
}
