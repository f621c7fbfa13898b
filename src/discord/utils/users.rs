// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Formats the classic `name#1234` tag for a user. Accounts migrated to
/// unique usernames carry a zero discriminator and are shown by name alone.
pub fn display_tag(name: &str, discriminator: u16) -> String {
	if discriminator == 0 {
		name.to_string()
	} else {
		format!("{}#{:04}", name, discriminator)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn legacy_discriminators_are_zero_padded() {
		assert_eq!(display_tag("cliente", 7), "cliente#0007");
		assert_eq!(display_tag("cliente", 1234), "cliente#1234");
	}

	#[test]
	fn migrated_users_are_shown_by_name_alone() {
		assert_eq!(display_tag("cliente", 0), "cliente");
	}
}
