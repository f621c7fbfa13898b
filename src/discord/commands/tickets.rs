// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::BotConfig;
use crate::discord::state::tickets::TicketRegistry;
use crate::discord::utils::responses::NO_ACTIVE_TICKETS;
use crate::discord::utils::staff::is_staff_member;
use crate::discord::utils::users::display_tag;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::Message;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

const LIST_TITLE: &str = "📋 TICKETS ATIVOS";
const LIST_COLOR: u32 = 0x9b59b6;

/// Lists the open tickets for staff. Requests from non-staff members are
/// silently ignored.
pub async fn handle_command(
	message: &Message,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &BotConfig,
	registry: &TicketRegistry,
) -> miette::Result<()> {
	let Some(guild_id) = message.guild_id else {
		return Ok(());
	};
	let Some(member) = &message.member else {
		return Ok(());
	};

	if !is_staff_member(cache, guild_id, message.author.id, &member.roles, &config.staff_role) {
		return Ok(());
	}

	let open_tickets = registry.open_tickets().await;
	if open_tickets.is_empty() {
		http_client
			.create_message(message.channel_id)
			.reply(message.id)
			.content(NO_ACTIVE_TICKETS)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	let ticket_lines: Vec<String> = open_tickets
		.iter()
		.map(|(user_id, channel_id)| {
			let channel_label = if cache.channel(*channel_id).is_some() {
				format!("{}", channel_id.mention())
			} else {
				String::from("Canal não encontrado")
			};
			let user_label = cache
				.user(*user_id)
				.map(|user| display_tag(&user.name, user.discriminator))
				.unwrap_or_else(|| String::from("Usuário não encontrado"));
			format!("• {} - {}", channel_label, user_label)
		})
		.collect();

	let footer_text = format!("Total: {} tickets abertos", open_tickets.len());
	let embed = EmbedBuilder::new()
		.title(LIST_TITLE)
		.description(ticket_lines.join("\n"))
		.color(LIST_COLOR)
		.footer(EmbedFooterBuilder::new(footer_text))
		.validate()
		.into_diagnostic()?
		.build();

	http_client
		.create_message(message.channel_id)
		.embeds(&[embed])
		.await
		.into_diagnostic()?;

	Ok(())
}
