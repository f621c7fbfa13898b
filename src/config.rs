// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::{Result, bail};
use std::env;

/// Minimum plausible length of a bot token. Shorter values are almost always
/// a truncated copy/paste, so startup is refused rather than letting the
/// gateway reject the login later.
const MIN_TOKEN_LENGTH: usize = 50;

const DEFAULT_TICKET_CATEGORY: &str = "🎫 TICKETS";
const DEFAULT_STAFF_ROLE: &str = "Staff";

#[derive(Debug)]
pub struct BotConfig {
	pub discord_token: String,
	/// Name of the channel category under which ticket channels are created.
	pub ticket_category: String,
	/// Name of the role granted access to all ticket channels.
	pub staff_role: String,
}

/// Reads the bot configuration from the environment. `DISCORD_TOKEN` is
/// required; `TICKET_CATEGORY` and `STAFF_ROLE` override the default names of
/// the ticket category and the staff role.
pub fn load_config() -> Result<BotConfig> {
	config_from_values(
		env::var("DISCORD_TOKEN").ok(),
		env::var("TICKET_CATEGORY").ok(),
		env::var("STAFF_ROLE").ok(),
	)
}

fn config_from_values(
	discord_token: Option<String>,
	ticket_category: Option<String>,
	staff_role: Option<String>,
) -> Result<BotConfig> {
	let Some(discord_token) = discord_token else {
		bail!("DISCORD_TOKEN is not set in the environment");
	};
	if discord_token.len() < MIN_TOKEN_LENGTH {
		bail!(
			"DISCORD_TOKEN looks incomplete or invalid (expected at least {} characters)",
			MIN_TOKEN_LENGTH
		);
	}

	Ok(BotConfig {
		discord_token,
		ticket_category: ticket_category.unwrap_or_else(|| String::from(DEFAULT_TICKET_CATEGORY)),
		staff_role: staff_role.unwrap_or_else(|| String::from(DEFAULT_STAFF_ROLE)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn plausible_token() -> String {
		"x".repeat(MIN_TOKEN_LENGTH)
	}

	#[test]
	fn missing_token_is_rejected() {
		assert!(config_from_values(None, None, None).is_err());
	}

	#[test]
	fn short_token_is_rejected() {
		let result = config_from_values(Some(String::from("abc123")), None, None);
		assert!(result.is_err());
	}

	#[test]
	fn defaults_apply_when_overrides_are_absent() {
		let config = config_from_values(Some(plausible_token()), None, None).unwrap();
		assert_eq!(config.ticket_category, DEFAULT_TICKET_CATEGORY);
		assert_eq!(config.staff_role, DEFAULT_STAFF_ROLE);
	}

	#[test]
	fn overrides_replace_the_default_names() {
		let config = config_from_values(
			Some(plausible_token()),
			Some(String::from("Atendimento")),
			Some(String::from("Equipe")),
		)
		.unwrap();
		assert_eq!(config.ticket_category, "Atendimento");
		assert_eq!(config.staff_role, "Equipe");
	}
}
