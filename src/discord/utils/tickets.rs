// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::categories::TicketCategory;
use super::components::close_ticket_components;
use super::staff::StaffTarget;
use super::timestamp::long_date_time_tag;
use chrono::{DateTime, Utc};
use twilight_http::request::channel::message::create_message::CreateMessage;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;
use twilight_model::http::interaction::InteractionResponseData;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use twilight_model::util::datetime::Timestamp;
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource};
use twilight_validate::embed::EmbedValidationError;

pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";

/// Builds the name of a new ticket channel. The platform requires channel
/// names to be lowercase.
pub fn ticket_channel_name(category: TicketCategory, requester_username: &str, ticket_number: u16) -> String {
	format!(
		"{}{}-{}-{}",
		TICKET_CHANNEL_PREFIX,
		category.emoji(),
		requester_username,
		ticket_number
	)
	.to_lowercase()
}

/// Whether a channel name belongs to the ticket namespace.
pub fn is_ticket_channel(channel_name: &str) -> bool {
	channel_name.starts_with(TICKET_CHANNEL_PREFIX)
}

/// Builds the topic line describing a ticket channel.
pub fn ticket_channel_topic(category: TicketCategory, requester_tag: &str, created: DateTime<Utc>) -> String {
	format!(
		"Ticket de {} - {} | {}",
		category.name(),
		requester_tag,
		created.format("%d/%m/%Y")
	)
}

/// Contains data necessary to post a ticket notice
pub struct TicketNotice {
	pub content: Option<String>,
	pub embeds: Vec<Embed>,
	pub components: Vec<Component>,
	pub allowed_mentions: AllowedMentions,
}

impl TicketNotice {
	/// Adds all of the ticket notice data to a [CreateMessage] builder
	pub fn set_create_message_data<'a>(&'a self, mut create_message: CreateMessage<'a>) -> CreateMessage<'a> {
		if let Some(content) = &self.content {
			create_message = create_message.content(content);
		}
		create_message
			.embeds(&self.embeds)
			.components(&self.components)
			.allowed_mentions(Some(&self.allowed_mentions))
	}
}

impl From<TicketNotice> for InteractionResponseData {
	fn from(notice: TicketNotice) -> Self {
		let mut response = InteractionResponseDataBuilder::new();
		if let Some(content) = &notice.content {
			response = response.content(content)
		}
		response
			.embeds(notice.embeds)
			.components(notice.components)
			.allowed_mentions(notice.allowed_mentions)
			.build()
	}
}

/// Generates the notice opening a freshly created ticket channel. It greets
/// the requester, pings staff, and carries the close button.
pub fn opening_notice(
	category: TicketCategory,
	requester: Id<UserMarker>,
	requester_username: &str,
	requester_tag: &str,
	staff: &StaffTarget,
	ticket_number: u16,
	created: Timestamp,
	footer_icon: Option<ImageSource>,
) -> Result<TicketNotice, EmbedValidationError> {
	let description = format!(
		"**Olá {}!**\n\nNossa equipe de suporte foi notificada e responderá em breve.\n\n📝 **Por favor, descreva detalhadamente:**\n• Sua dúvida/problema\n• Pedido (se aplicável)\n• Qualquer informação relevante",
		requester_username
	);
	let mut footer = EmbedFooterBuilder::new("💎 Nossa Loja - Atendimento de Qualidade");
	if let Some(icon) = footer_icon {
		footer = footer.icon_url(icon);
	}
	let embed = EmbedBuilder::new()
		.title(format!("{} TICKET - {}", category.emoji(), category.name().to_uppercase()))
		.description(description)
		.field(
			EmbedFieldBuilder::new("👤 Cliente", format!("{} (`{}`)", requester.mention(), requester_tag)).inline(),
		)
		.field(EmbedFieldBuilder::new("📅 Data", long_date_time_tag(created)).inline())
		.field(EmbedFieldBuilder::new("🔢 Ticket ID", format!("#{}", ticket_number)).inline())
		.field(EmbedFieldBuilder::new("💼 Responsável", staff.mention()).inline())
		.color(category.color())
		.footer(footer)
		.timestamp(created)
		.validate()?
		.build();

	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.users.push(requester);
	staff.push_allowed_mention(&mut allowed_mentions);

	Ok(TicketNotice {
		content: Some(format!(
			"{} {}\n📬 **Novo ticket criado!**",
			requester.mention(),
			staff.mention()
		)),
		embeds: vec![embed],
		components: close_ticket_components(),
		allowed_mentions,
	})
}

/// Generates the notice announcing that a ticket is closing. The requester is
/// reported as unidentified when the channel wasn't in the registry.
pub fn closing_notice(
	closed_by: Id<UserMarker>,
	requester: Option<Id<UserMarker>>,
	closed: Timestamp,
) -> Result<TicketNotice, EmbedValidationError> {
	let requester_line = match requester {
		Some(user_id) => format!("{}", user_id.mention()),
		None => String::from("Não identificado"),
	};
	let embed = EmbedBuilder::new()
		.title("🔒 TICKET FECHADO")
		.description(format!("Este ticket foi fechado por {}", closed_by.mention()))
		.field(EmbedFieldBuilder::new("⏰ Duração", "Criado há algum tempo"))
		.field(EmbedFieldBuilder::new("👤 Cliente", requester_line))
		.field(EmbedFieldBuilder::new("🔧 Fechado por", format!("{}", closed_by.mention())).inline())
		.color(0xe74c3c)
		.timestamp(closed)
		.validate()?
		.build();

	Ok(TicketNotice {
		content: Some(String::from("🔒 **Fechando ticket em 5 segundos...**")),
		embeds: vec![embed],
		components: Vec::new(),
		allowed_mentions: AllowedMentions::default(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn channel_names_are_lowercased() {
		let name = ticket_channel_name(TicketCategory::Purchases, "Cliente", 42);
		assert_eq!(name, "ticket-🛒-cliente-42");
		assert!(is_ticket_channel(&name));
	}

	#[test]
	fn unrelated_channels_are_not_tickets() {
		assert!(!is_ticket_channel("geral"));
		assert!(!is_ticket_channel("suporte-ticket-1"));
	}

	#[test]
	fn topics_carry_category_tag_and_date() {
		let created = DateTime::from_timestamp(1462015105, 0).unwrap();
		let topic = ticket_channel_topic(TicketCategory::Questions, "cliente#0001", created);
		assert_eq!(topic, "Ticket de ❓ Dúvidas - cliente#0001 | 30/04/2016");
	}

	#[test]
	fn opening_notice_pings_requester_and_staff() {
		let staff = StaffTarget::Role(Id::new(5));
		let created = Timestamp::from_secs(1462015105).unwrap();
		let notice = opening_notice(
			TicketCategory::Purchases,
			Id::new(7),
			"cliente",
			"cliente#0001",
			&staff,
			42,
			created,
			None,
		)
		.unwrap();

		let content = notice.content.unwrap();
		assert!(content.starts_with("<@7> <@&5>"));
		assert_eq!(notice.allowed_mentions.users, vec![Id::new(7)]);
		assert_eq!(notice.allowed_mentions.roles, vec![Id::new(5)]);
	}

	#[test]
	fn opening_notice_titles_shout_the_category() {
		let staff = StaffTarget::Owner(Id::new(9));
		let created = Timestamp::from_secs(1462015105).unwrap();
		let notice = opening_notice(
			TicketCategory::Partnerships,
			Id::new(7),
			"cliente",
			"cliente",
			&staff,
			1,
			created,
			None,
		)
		.unwrap();

		let embed = &notice.embeds[0];
		assert_eq!(embed.title.as_deref(), Some("🤝 TICKET - 🤝 PARCERIAS"));
		assert_eq!(embed.color, Some(TicketCategory::Partnerships.color()));
		assert!(!notice.components.is_empty());
	}

	#[test]
	fn closing_notice_handles_unregistered_channels() {
		let closed = Timestamp::from_secs(1462015105).unwrap();
		let notice = closing_notice(Id::new(9), None, closed).unwrap();

		let embed = &notice.embeds[0];
		let requester_field = embed
			.fields
			.iter()
			.find(|field| field.name == "👤 Cliente")
			.unwrap();
		assert_eq!(requester_field.value, "Não identificado");
	}

	#[test]
	fn closing_notice_mentions_the_known_requester() {
		let closed = Timestamp::from_secs(1462015105).unwrap();
		let notice = closing_notice(Id::new(9), Some(Id::new(7)), closed).unwrap();

		let embed = &notice.embeds[0];
		let requester_field = embed
			.fields
			.iter()
			.find(|field| field.name == "👤 Cliente")
			.unwrap();
		assert_eq!(requester_field.value, "<@7>");
	}
}
