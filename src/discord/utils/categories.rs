// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::channel::message::EmojiReactionType;
use twilight_model::channel::message::component::ButtonStyle;

/// The support categories a requester can open a ticket under.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketCategory {
	Purchases,
	Questions,
	Partnerships,
}

impl TicketCategory {
	pub fn from_custom_id(custom_id: &str) -> Option<Self> {
		match custom_id {
			"compras_ticket" => Some(Self::Purchases),
			"duvidas_ticket" => Some(Self::Questions),
			"parcerias_ticket" => Some(Self::Partnerships),
			_ => None,
		}
	}

	/// The custom ID this category's panel button reports interactions under.
	pub fn custom_id(&self) -> &'static str {
		match self {
			Self::Purchases => "compras_ticket",
			Self::Questions => "duvidas_ticket",
			Self::Partnerships => "parcerias_ticket",
		}
	}

	pub fn all_categories() -> Vec<Self> {
		vec![Self::Purchases, Self::Questions, Self::Partnerships]
	}

	/// The category name as shown to users, emoji included.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Purchases => "🛒 Compras",
			Self::Questions => "❓ Dúvidas",
			Self::Partnerships => "🤝 Parcerias",
		}
	}

	/// The emoji standing in for this category in channel names.
	pub fn emoji(&self) -> &'static str {
		match self {
			Self::Purchases => "🛒",
			Self::Questions => "❓",
			Self::Partnerships => "🤝",
		}
	}

	/// The accent color of this category's ticket embeds.
	pub fn color(&self) -> u32 {
		match self {
			Self::Purchases => 0x3498db,
			Self::Questions => 0xf1c40f,
			Self::Partnerships => 0x2ecc71,
		}
	}

	pub fn button_style(&self) -> ButtonStyle {
		match self {
			Self::Purchases => ButtonStyle::Primary,
			Self::Questions => ButtonStyle::Secondary,
			Self::Partnerships => ButtonStyle::Success,
		}
	}

	pub fn button_emoji(&self) -> EmojiReactionType {
		EmojiReactionType::Unicode {
			name: String::from(self.emoji()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn custom_ids_round_trip() {
		for category in TicketCategory::all_categories() {
			assert_eq!(TicketCategory::from_custom_id(category.custom_id()), Some(category));
		}
	}

	#[test]
	fn unrelated_custom_ids_are_rejected() {
		assert_eq!(TicketCategory::from_custom_id("close_ticket"), None);
		assert_eq!(TicketCategory::from_custom_id(""), None);
	}

	#[test]
	fn names_lead_with_the_category_emoji() {
		for category in TicketCategory::all_categories() {
			assert!(category.name().starts_with(category.emoji()));
		}
	}
}
