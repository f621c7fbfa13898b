// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, UserMarker};
use twilight_model::util::ImageHash;

/// Builds the CDN URL for a guild's icon, if the guild has one.
pub fn guild_icon_url(guild_id: Id<GuildMarker>, icon: Option<ImageHash>) -> Option<String> {
	icon.map(|icon_hash| format!("https://cdn.discordapp.com/icons/{}/{}.png", guild_id, icon_hash))
}

/// Builds the CDN URL for a user's avatar, falling back to the index-based
/// default avatar for users without a custom one.
pub fn user_avatar_url(user_id: Id<UserMarker>, avatar: Option<ImageHash>) -> String {
	match avatar {
		Some(avatar_hash) => format!("https://cdn.discordapp.com/avatars/{}/{}.png", user_id, avatar_hash),
		None => {
			let default_index = (user_id.get() >> 22) % 6;
			format!("https://cdn.discordapp.com/embed/avatars/{}.png", default_index)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn guilds_without_an_icon_have_no_url() {
		assert_eq!(guild_icon_url(Id::new(1), None), None);
	}

	#[test]
	fn users_without_an_avatar_get_a_default() {
		let url = user_avatar_url(Id::new(175928847299117063), None);
		assert!(url.starts_with("https://cdn.discordapp.com/embed/avatars/"));
		assert!(url.ends_with(".png"));
	}

	#[test]
	fn custom_avatars_use_the_avatar_route() {
		let hash: ImageHash = "1acefe340fafb4ecefae407f3abdb323".parse().unwrap();
		let url = user_avatar_url(Id::new(2), Some(hash));
		assert_eq!(
			url,
			"https://cdn.discordapp.com/avatars/2/1acefe340fafb4ecefae407f3abdb323.png"
		);
	}
}
