// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::BotConfig;
use crate::discord::state::tickets::TicketRegistry;
use crate::discord::utils::categories::TicketCategory;
use crate::discord::utils::cdn::guild_icon_url;
use crate::discord::utils::permissions::{category_overwrites, ticket_channel_overwrites};
use crate::discord::utils::responses::{TICKET_CREATE_FAILED, already_has_ticket_message, ticket_created_message};
use crate::discord::utils::staff::{StaffTarget, resolve_staff_target};
use crate::discord::utils::tickets::{opening_notice, ticket_channel_name, ticket_channel_topic};
use crate::discord::utils::timestamp::{datetime_from_id, timestamp_from_id};
use crate::discord::utils::users::display_tag;
use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, bail};
use rand::Rng;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, GuildMarker};
use twilight_model::user::User;
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::embed::ImageSource;

/// Handles a panel button press: claims the requester's registry slot,
/// creates the ticket channel under the configured category, and posts the
/// opening notice there.
pub async fn handle_interaction(
	interaction: &InteractionCreate,
	category: TicketCategory,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	registry: &Arc<TicketRegistry>,
) -> miette::Result<()> {
	let Some(guild_id) = interaction.guild_id else {
		bail!("Ticket button used outside of a guild");
	};
	let Some(interaction_member) = &interaction.member else {
		bail!("Interaction isn't from a user");
	};
	let Some(interaction_user) = &interaction_member.user else {
		bail!("Interaction member is not a user");
	};
	let Some(opened_at) = datetime_from_id(interaction.id) else {
		bail!("Invalid timestamp in interaction ID {}", interaction.id);
	};

	let interaction_client = http_client.interaction(application_id);

	if let Err(existing) = registry.begin_create(interaction_user.id).await {
		// The mention is dropped when the channel no longer resolves; the
		// entry itself still blocks creation.
		let existing_channel = existing
			.channel
			.filter(|channel_id| cache.channel(*channel_id).is_some());
		let response = InteractionResponseDataBuilder::new()
			.content(already_has_ticket_message(existing_channel))
			.flags(MessageFlags::EPHEMERAL)
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	// The requester holds the pending slot from here on. Until the channel
	// exists, every failure path must release it again.
	let defer = InteractionResponse {
		kind: InteractionResponseType::DeferredChannelMessageWithSource,
		data: Some(InteractionResponseDataBuilder::new().flags(MessageFlags::EPHEMERAL).build()),
	};
	let defer_result = interaction_client
		.create_response(interaction.id, &interaction.token, &defer)
		.await;
	if let Err(error) = defer_result {
		registry.abort_create(interaction_user.id).await;
		return Err(error).into_diagnostic();
	}

	let prepared = match prepare_ticket_channel(
		category,
		guild_id,
		interaction_user,
		opened_at,
		http_client,
		cache,
		config,
	)
	.await
	{
		Ok(prepared) => prepared,
		Err(error) => {
			registry.abort_create(interaction_user.id).await;
			let report = interaction_client
				.update_response(&interaction.token)
				.content(Some(TICKET_CREATE_FAILED))
				.await;
			if let Err(report_error) = report {
				tracing::error!(source = ?report_error, "Failed to report a failed ticket creation");
			}
			return Err(error);
		}
	};

	registry.complete_create(interaction_user.id, prepared.channel_id).await;

	let requester_tag = display_tag(&interaction_user.name, interaction_user.discriminator);
	let announcement = announce_ticket(
		interaction,
		category,
		&prepared,
		guild_id,
		interaction_user,
		&requester_tag,
		http_client,
		application_id,
		cache,
	)
	.await;
	if let Err(error) = announcement {
		// The channel exists, so the registry entry stays; the requester can
		// still reach their ticket even though the notice didn't make it.
		let report = interaction_client
			.update_response(&interaction.token)
			.content(Some(TICKET_CREATE_FAILED))
			.await;
		if let Err(report_error) = report {
			tracing::error!(source = ?report_error, "Failed to report a failed ticket announcement");
		}
		return Err(error);
	}

	tracing::info!(
		"Created a {} ticket for {} ({})",
		category.name(),
		requester_tag,
		interaction_user.id
	);
	Ok(())
}

struct PreparedTicket {
	staff: StaffTarget,
	channel_id: Id<ChannelMarker>,
	ticket_number: u16,
}

async fn prepare_ticket_channel(
	category: TicketCategory,
	guild_id: Id<GuildMarker>,
	requester: &User,
	opened_at: DateTime<Utc>,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
) -> miette::Result<PreparedTicket> {
	let staff = resolve_staff_target(cache, http_client, guild_id, &config.staff_role).await?;
	let category_channel_id = ensure_ticket_category(guild_id, http_client, cache, config, &staff).await?;

	let ticket_number: u16 = rand::rng().random_range(1..=1000);
	let requester_tag = display_tag(&requester.name, requester.discriminator);
	let channel_name = ticket_channel_name(category, &requester.name, ticket_number);
	let topic = ticket_channel_topic(category, &requester_tag, opened_at);
	let overwrites = ticket_channel_overwrites(guild_id, requester.id, &staff);

	let channel_response = http_client
		.create_guild_channel(guild_id, &channel_name)
		.kind(ChannelType::GuildText)
		.parent_id(category_channel_id)
		.topic(&topic)
		.permission_overwrites(&overwrites)
		.await
		.into_diagnostic()?;
	let channel = channel_response.model().await.into_diagnostic()?;

	Ok(PreparedTicket {
		staff,
		channel_id: channel.id,
		ticket_number,
	})
}

/// Finds the guild's ticket category by name, creating it when the guild
/// doesn't have one yet.
async fn ensure_ticket_category(
	guild_id: Id<GuildMarker>,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	staff: &StaffTarget,
) -> miette::Result<Id<ChannelMarker>> {
	if let Some(channel_ids) = cache.guild_channels(guild_id) {
		for channel_id in channel_ids.iter() {
			let Some(channel) = cache.channel(*channel_id) else {
				continue;
			};
			if channel.kind == ChannelType::GuildCategory
				&& channel.name.as_deref() == Some(config.ticket_category.as_str())
			{
				return Ok(*channel_id);
			}
		}
	}

	let overwrites = category_overwrites(guild_id, staff);
	let category_response = http_client
		.create_guild_channel(guild_id, &config.ticket_category)
		.kind(ChannelType::GuildCategory)
		.permission_overwrites(&overwrites)
		.await
		.into_diagnostic()?;
	let category_channel = category_response.model().await.into_diagnostic()?;
	Ok(category_channel.id)
}

async fn announce_ticket(
	interaction: &InteractionCreate,
	category: TicketCategory,
	prepared: &PreparedTicket,
	guild_id: Id<GuildMarker>,
	requester: &User,
	requester_tag: &str,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: &DefaultInMemoryCache,
) -> miette::Result<()> {
	let created_timestamp = timestamp_from_id(interaction.id).into_diagnostic()?;
	let footer_icon_url = cache
		.guild(guild_id)
		.and_then(|guild| guild_icon_url(guild_id, guild.icon()));
	let footer_icon = match footer_icon_url {
		Some(url) => Some(ImageSource::url(url).into_diagnostic()?),
		None => None,
	};

	let notice = opening_notice(
		category,
		requester.id,
		&requester.name,
		requester_tag,
		&prepared.staff,
		prepared.ticket_number,
		created_timestamp,
		footer_icon,
	)
	.into_diagnostic()?;
	let create_message = http_client.create_message(prepared.channel_id);
	notice.set_create_message_data(create_message).await.into_diagnostic()?;

	let confirmation = ticket_created_message(prepared.channel_id);
	let interaction_client = http_client.interaction(application_id);
	interaction_client
		.update_response(&interaction.token)
		.content(Some(&confirmation))
		.await
		.into_diagnostic()?;

	Ok(())
}
