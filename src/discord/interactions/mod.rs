// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::state::tickets::TicketRegistry;
use super::utils::categories::TicketCategory;
use super::utils::components::CLOSE_TICKET_ID;
use crate::config::BotConfig;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

mod close_ticket;
mod create_ticket;

/// Dispatches button interactions by custom ID. Buttons the bot doesn't own
/// are ignored.
pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	registry: &Arc<TicketRegistry>,
) -> miette::Result<()> {
	if let Some(category) = TicketCategory::from_custom_id(&interaction_data.custom_id) {
		return create_ticket::handle_interaction(
			interaction,
			category,
			http_client,
			application_id,
			cache,
			config,
			registry,
		)
		.await;
	}

	match interaction_data.custom_id.as_str() {
		CLOSE_TICKET_ID => close_ticket::handle_interaction(interaction, http_client, application_id, registry).await,
		_ => Ok(()),
	}
}
