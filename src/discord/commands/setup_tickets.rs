// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::cdn::{guild_icon_url, user_avatar_url};
use crate::discord::utils::components::ticket_panel_components;
use crate::discord::utils::permissions::member_permissions;
use crate::discord::utils::timestamp::timestamp_from_id;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;
use twilight_model::guild::Permissions;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder, ImageSource};

const PANEL_TITLE: &str = "🎫 SISTEMA DE SUPORTE - NOSSA LOJA";
const PANEL_DESCRIPTION: &str = "**Selecione abaixo o tipo de atendimento desejado:**\n\n• 🛒 **Compras**: Dúvidas sobre produtos, pedidos e compras\n• ❓ **Dúvidas**: Tire suas dúvidas gerais sobre nossa loja\n• 🤝 **Parcerias**: Propostas de parceria e colaboração";
const PANEL_FOOTER: &str = "💎 Nossa Loja - Atendimento Rápido e Qualificado";
const PANEL_COLOR: u32 = 0x0099ff;

/// Posts the support panel with the category buttons. Only administrators may
/// use this, and only inside a guild; the invoking message is removed so the
/// panel stands alone.
pub async fn handle_command(
	message: &Message,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
) -> miette::Result<()> {
	let Some(guild_id) = message.guild_id else {
		return Ok(());
	};
	let Some(member) = &message.member else {
		return Ok(());
	};

	let author_permissions = member_permissions(cache, guild_id, message.author.id, &member.roles);
	if !author_permissions.contains(Permissions::ADMINISTRATOR) {
		return Ok(());
	}

	let mut embed_builder = EmbedBuilder::new()
		.title(PANEL_TITLE)
		.description(PANEL_DESCRIPTION)
		.color(PANEL_COLOR)
		.timestamp(timestamp_from_id(message.id).into_diagnostic()?);
	if let Some(bot_user) = cache.current_user() {
		let avatar_url = user_avatar_url(bot_user.id, bot_user.avatar);
		embed_builder = embed_builder.thumbnail(ImageSource::url(avatar_url).into_diagnostic()?);
	}

	let guild_icon = cache
		.guild(guild_id)
		.and_then(|guild| guild_icon_url(guild_id, guild.icon()));
	let mut footer = EmbedFooterBuilder::new(PANEL_FOOTER);
	if let Some(icon_url) = guild_icon {
		footer = footer.icon_url(ImageSource::url(icon_url).into_diagnostic()?);
	}
	let embed = embed_builder.footer(footer).validate().into_diagnostic()?.build();

	let components = ticket_panel_components();
	http_client
		.create_message(message.channel_id)
		.embeds(&[embed])
		.components(&components)
		.await
		.into_diagnostic()?;

	http_client
		.delete_message(message.channel_id, message.id)
		.await
		.into_diagnostic()?;

	tracing::info!("Posted the ticket panel in channel {}", message.channel_id);
	Ok(())
}
