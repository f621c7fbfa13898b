// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::state::tickets::TicketRegistry;
use crate::config::BotConfig;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

mod help;
mod setup_tickets;
mod tickets;

/// Dispatches the text commands the bot understands. Messages from bots and
/// messages that aren't commands are ignored.
pub async fn route_command(
	message: &Message,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	registry: &TicketRegistry,
) -> miette::Result<()> {
	if message.author.bot {
		return Ok(());
	}

	match message.content.as_str() {
		"!setup-tickets" => setup_tickets::handle_command(message, http_client, cache).await,
		"!ajuda" | "!help" => help::handle_command(message, http_client).await,
		"!tickets" => tickets::handle_command(message, http_client, cache, config, registry).await,
		_ => Ok(()),
	}
}
