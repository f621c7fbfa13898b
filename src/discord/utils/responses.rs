// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_mention::fmt::Mention;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

pub const TICKET_CREATE_FAILED: &str =
	"❌ **Erro ao criar o ticket!**\nPor favor, tente novamente ou contate um administrador.";

pub const NOT_A_TICKET_CHANNEL: &str = "❌ Este comando só pode ser usado em canais de ticket.";

pub const NO_ACTIVE_TICKETS: &str = "📭 Não há tickets ativos no momento.";

/// The rejection sent to a requester who already has a ticket. The channel
/// mention is left off while the earlier ticket is still being created.
pub fn already_has_ticket_message(existing_channel: Option<Id<ChannelMarker>>) -> String {
	let channel_mention = existing_channel
		.map(|channel| format!("{}", channel.mention()))
		.unwrap_or_default();
	format!("❌ Você já tem um ticket aberto! {}", channel_mention)
}

/// The confirmation sent to a requester once their ticket channel exists.
pub fn ticket_created_message(channel: Id<ChannelMarker>) -> String {
	format!(
		"✅ **Ticket criado com sucesso!**\n🔗 Acesse: {}\n\nNossa equipe te responderá em breve!",
		channel.mention()
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_rejections_point_at_the_open_channel() {
		let message = already_has_ticket_message(Some(Id::new(10)));
		assert_eq!(message, "❌ Você já tem um ticket aberto! <#10>");
	}

	#[test]
	fn duplicate_rejections_omit_channels_still_being_created() {
		let message = already_has_ticket_message(None);
		assert_eq!(message, "❌ Você já tem um ticket aberto! ");
	}

	#[test]
	fn creation_confirmations_link_the_channel() {
		let message = ticket_created_message(Id::new(10));
		assert!(message.contains("<#10>"));
	}
}
