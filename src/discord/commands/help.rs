// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

const HELP_TITLE: &str = "🆘 AJUDA - SISTEMA DE TICKETS";
const HELP_DESCRIPTION: &str = "**Como usar nosso sistema de tickets:**\n\n1. **Clique em um dos botões** no painel de tickets\n2. **Um canal privado será criado** apenas para você e nossa equipe\n3. **Descreva seu problema** ou dúvida detalhadamente\n4. **Nossa equipe responderá** em breve!";
const HELP_FOOTER: &str = "Equipe de Suporte - Nossa Loja";
const HELP_COLOR: u32 = 0xffa500;

/// Explains the ticket system in the channel the command was sent to.
pub async fn handle_command(message: &Message, http_client: &Arc<Client>) -> miette::Result<()> {
	let embed = EmbedBuilder::new()
		.title(HELP_TITLE)
		.description(HELP_DESCRIPTION)
		.color(HELP_COLOR)
		.field(EmbedFieldBuilder::new("🛒 Compras", "Problemas com pedidos, produtos, pagamentos").inline())
		.field(EmbedFieldBuilder::new("❓ Dúvidas", "Perguntas gerais sobre a loja").inline())
		.field(EmbedFieldBuilder::new("🤝 Parcerias", "Propostas comerciais").inline())
		.footer(EmbedFooterBuilder::new(HELP_FOOTER))
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
