// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::categories::TicketCategory;
use twilight_model::channel::message::EmojiReactionType;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

/// The ID under which the close button on ticket notices reports interactions.
pub const CLOSE_TICKET_ID: &str = "close_ticket";

/// The row of category buttons attached to the support panel.
pub fn ticket_panel_components() -> Vec<Component> {
	let category_buttons = TicketCategory::all_categories()
		.into_iter()
		.map(|category| {
			Component::Button(Button {
				custom_id: Some(String::from(category.custom_id())),
				disabled: false,
				emoji: Some(category.button_emoji()),
				label: Some(String::from(category.name())),
				style: category.button_style(),
				url: None,
				sku_id: None,
			})
		})
		.collect();
	vec![Component::ActionRow(ActionRow {
		components: category_buttons,
	})]
}

/// The close button row attached to each ticket's opening notice.
pub fn close_ticket_components() -> Vec<Component> {
	let close_button = Button {
		custom_id: Some(String::from(CLOSE_TICKET_ID)),
		disabled: false,
		emoji: Some(EmojiReactionType::Unicode {
			name: String::from("🔒"),
		}),
		label: Some(String::from("🔒 Fechar Ticket")),
		style: ButtonStyle::Danger,
		url: None,
		sku_id: None,
	};
	vec![Component::ActionRow(ActionRow {
		components: vec![Component::Button(close_button)],
	})]
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row_buttons(components: &[Component]) -> Vec<&Button> {
		let Some(Component::ActionRow(row)) = components.first() else {
			panic!("expected an action row");
		};
		row.components
			.iter()
			.map(|component| {
				let Component::Button(button) = component else {
					panic!("expected a button");
				};
				button
			})
			.collect()
	}

	#[test]
	fn panel_has_one_button_per_category() {
		let components = ticket_panel_components();
		let buttons = row_buttons(&components);
		let custom_ids: Vec<&str> = buttons
			.iter()
			.filter_map(|button| button.custom_id.as_deref())
			.collect();
		assert_eq!(custom_ids, vec!["compras_ticket", "duvidas_ticket", "parcerias_ticket"]);
	}

	#[test]
	fn panel_buttons_carry_their_category_style() {
		let components = ticket_panel_components();
		let buttons = row_buttons(&components);
		let styles: Vec<ButtonStyle> = buttons.iter().map(|button| button.style).collect();
		assert_eq!(
			styles,
			vec![ButtonStyle::Primary, ButtonStyle::Secondary, ButtonStyle::Success]
		);
	}

	#[test]
	fn close_button_uses_the_close_id() {
		let components = close_ticket_components();
		let buttons = row_buttons(&components);
		assert_eq!(buttons.len(), 1);
		assert_eq!(buttons[0].custom_id.as_deref(), Some(CLOSE_TICKET_ID));
		assert_eq!(buttons[0].style, ButtonStyle::Danger);
	}
}
