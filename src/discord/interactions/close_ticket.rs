// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::tickets::TicketRegistry;
use crate::discord::utils::responses::NOT_A_TICKET_CHANNEL;
use crate::discord::utils::tickets::{closing_notice, is_ticket_channel};
use crate::discord::utils::timestamp::timestamp_from_id;
use crate::discord::utils::users::display_tag;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use twilight_http::client::Client;
use twilight_http::request::AuditLogReason;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker};
use twilight_util::builder::InteractionResponseDataBuilder;

/// How long the closing notice stays visible before the channel is deleted.
const CHANNEL_DELETE_DELAY: Duration = Duration::from_secs(5);

/// Handles the close button inside a ticket channel: removes the ticket from
/// the registry, announces the closure, and schedules the channel deletion.
pub async fn handle_interaction(
	interaction: &InteractionCreate,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	registry: &Arc<TicketRegistry>,
) -> miette::Result<()> {
	let Some(channel) = &interaction.channel else {
		bail!("Close button used outside of a channel");
	};
	let Some(interaction_member) = &interaction.member else {
		bail!("Interaction isn't from a user");
	};
	let Some(interaction_user) = &interaction_member.user else {
		bail!("Interaction member is not a user");
	};

	let interaction_client = http_client.interaction(application_id);

	let channel_name = channel.name.clone().unwrap_or_default();
	if !is_ticket_channel(&channel_name) {
		let response = InteractionResponseDataBuilder::new()
			.content(NOT_A_TICKET_CHANNEL)
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

	// The registry entry goes away before the deletion timer starts, so the
	// requester can open a new ticket right away.
	let requester = registry.close_by_channel(channel.id).await;

	let closed_timestamp = timestamp_from_id(interaction.id).into_diagnostic()?;
	let notice = closing_notice(interaction_user.id, requester, closed_timestamp).into_diagnostic()?;
	let response = InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(notice.into()),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	let delete_task = tokio::spawn(delete_ticket_channel(
		Arc::clone(http_client),
		Arc::clone(registry),
		channel.id,
	));
	registry
		.track_scheduled_deletion(channel.id, delete_task.abort_handle())
		.await;

	let closer_tag = display_tag(&interaction_user.name, interaction_user.discriminator);
	tracing::info!("Closing ticket {} for {}", channel_name, closer_tag);
	Ok(())
}

async fn delete_ticket_channel(http_client: Arc<Client>, registry: Arc<TicketRegistry>, channel_id: Id<ChannelMarker>) {
	sleep(CHANNEL_DELETE_DELAY).await;

	let delete_result = http_client
		.delete_channel(channel_id)
		.reason("Ticket fechado pelo usuário")
		.await;
	if let Err(error) = delete_result {
		tracing::error!(source = ?error, "Failed to delete a closed ticket channel");
	}
	registry.scheduled_deletion_finished(channel_id).await;
}
