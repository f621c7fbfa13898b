// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::permissions::member_permissions;
use miette::IntoDiagnostic;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};

/// Where staff-facing ticket traffic is directed: the configured staff role
/// when the guild has one, the guild owner otherwise.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StaffTarget {
	Role(Id<RoleMarker>),
	Owner(Id<UserMarker>),
}

impl StaffTarget {
	/// The mention to ping with ticket notifications.
	pub fn mention(&self) -> String {
		match self {
			Self::Role(role_id) => format!("{}", role_id.mention()),
			Self::Owner(user_id) => format!("{}", user_id.mention()),
		}
	}

	/// A permission overwrite granting this target the passed permissions.
	pub fn overwrite(&self, allow: Permissions) -> PermissionOverwrite {
		match self {
			Self::Role(role_id) => PermissionOverwrite {
				allow: Some(allow),
				deny: None,
				id: role_id.cast(),
				kind: PermissionOverwriteType::Role,
			},
			Self::Owner(user_id) => PermissionOverwrite {
				allow: Some(allow),
				deny: None,
				id: user_id.cast(),
				kind: PermissionOverwriteType::Member,
			},
		}
	}

	/// Marks this target as pingable in a message's allowed mentions.
	pub fn push_allowed_mention(&self, allowed_mentions: &mut AllowedMentions) {
		match self {
			Self::Role(role_id) => allowed_mentions.roles.push(*role_id),
			Self::Owner(user_id) => allowed_mentions.users.push(*user_id),
		}
	}
}

/// Whether a member counts as staff: they either hold the staff role or have
/// administrator permissions.
pub fn is_staff_member(
	cache: &DefaultInMemoryCache,
	guild_id: Id<GuildMarker>,
	user_id: Id<UserMarker>,
	member_role_ids: &[Id<RoleMarker>],
	staff_role_name: &str,
) -> bool {
	let has_staff_role = member_role_ids.iter().any(|role_id| {
		cache
			.role(*role_id)
			.map(|role| role.name == staff_role_name)
			.unwrap_or(false)
	});
	if has_staff_role {
		return true;
	}
	member_permissions(cache, guild_id, user_id, member_role_ids).contains(Permissions::ADMINISTRATOR)
}

/// Finds the guild's staff role by name. Guilds without a role of that name
/// fall back to the guild owner, fetched over HTTP if the guild hasn't been
/// cached yet.
pub async fn resolve_staff_target(
	cache: &DefaultInMemoryCache,
	http_client: &Client,
	guild_id: Id<GuildMarker>,
	staff_role_name: &str,
) -> miette::Result<StaffTarget> {
	if let Some(role_ids) = cache.guild_roles(guild_id) {
		for role_id in role_ids.iter() {
			if let Some(role) = cache.role(*role_id) {
				if role.name == staff_role_name {
					return Ok(StaffTarget::Role(*role_id));
				}
			}
		}
	}

	if let Some(guild) = cache.guild(guild_id) {
		return Ok(StaffTarget::Owner(guild.owner_id()));
	}
	let guild_response = http_client.guild(guild_id).await.into_diagnostic()?;
	let guild = guild_response.model().await.into_diagnostic()?;
	Ok(StaffTarget::Owner(guild.owner_id))
}
