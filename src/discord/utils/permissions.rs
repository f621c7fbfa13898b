// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::staff::StaffTarget;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_model::http::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};
use twilight_util::permission_calculator::PermissionCalculator;

/// Permissions granted to the requester inside their ticket channel.
pub fn requester_permissions() -> Permissions {
	Permissions::VIEW_CHANNEL
		| Permissions::SEND_MESSAGES
		| Permissions::READ_MESSAGE_HISTORY
		| Permissions::ATTACH_FILES
}

/// Permissions granted to the staff side of a ticket channel. Staff also
/// moderate the conversation.
pub fn staff_permissions() -> Permissions {
	requester_permissions() | Permissions::MANAGE_MESSAGES
}

/// Overwrites hiding the tickets category from everyone except staff.
pub fn category_overwrites(guild_id: Id<GuildMarker>, staff: &StaffTarget) -> Vec<PermissionOverwrite> {
	vec![
		everyone_overwrite(guild_id),
		staff.overwrite(Permissions::VIEW_CHANNEL),
	]
}

/// Overwrites restricting a ticket channel to its requester and staff.
pub fn ticket_channel_overwrites(
	guild_id: Id<GuildMarker>,
	requester: Id<UserMarker>,
	staff: &StaffTarget,
) -> Vec<PermissionOverwrite> {
	let requester_overwrite = PermissionOverwrite {
		allow: Some(requester_permissions()),
		deny: None,
		id: requester.cast(),
		kind: PermissionOverwriteType::Member,
	};
	vec![
		everyone_overwrite(guild_id),
		requester_overwrite,
		staff.overwrite(staff_permissions()),
	]
}

fn everyone_overwrite(guild_id: Id<GuildMarker>) -> PermissionOverwrite {
	// The everyone role shares the guild's ID.
	let everyone_role_id: Id<RoleMarker> = guild_id.cast();
	PermissionOverwrite {
		allow: None,
		deny: Some(Permissions::VIEW_CHANNEL),
		id: everyone_role_id.cast(),
		kind: PermissionOverwriteType::Role,
	}
}

/// Computes a member's guild-level permissions from cached role data.
pub fn member_permissions(
	cache: &DefaultInMemoryCache,
	guild_id: Id<GuildMarker>,
	user_id: Id<UserMarker>,
	member_role_ids: &[Id<RoleMarker>],
) -> Permissions {
	let everyone_role_id: Id<RoleMarker> = guild_id.cast();
	let everyone_permissions = cache
		.role(everyone_role_id)
		.map(|role| role.permissions)
		.unwrap_or_else(Permissions::empty);
	let member_roles: Vec<(Id<RoleMarker>, Permissions)> = member_role_ids
		.iter()
		.map(|role_id| {
			(
				*role_id,
				cache
					.role(*role_id)
					.map(|role| role.permissions)
					.unwrap_or_else(Permissions::empty),
			)
		})
		.collect();

	let mut calculator = PermissionCalculator::new(guild_id, user_id, everyone_permissions, &member_roles);
	if let Some(guild) = cache.guild(guild_id) {
		calculator = calculator.owner_id(guild.owner_id());
	}
	calculator.root()
}

#[cfg(test)]
mod tests {
	use super::*;
	use twilight_model::gateway::event::Event;
	use twilight_model::gateway::payload::incoming::RoleCreate;
	use twilight_model::guild::{Role, RoleFlags};

	fn role(id: u64, permissions: Permissions) -> Role {
		Role {
			color: 0,
			flags: RoleFlags::empty(),
			hoist: false,
			icon: None,
			id: Id::new(id),
			managed: false,
			mentionable: false,
			name: format!("role-{}", id),
			permissions,
			position: 0,
			tags: None,
			unicode_emoji: None,
		}
	}

	fn cache_with_roles(guild_id: Id<GuildMarker>, roles: Vec<Role>) -> DefaultInMemoryCache {
		let cache = DefaultInMemoryCache::builder().build();
		for role in roles {
			cache.update(&Event::RoleCreate(RoleCreate { guild_id, role }));
		}
		cache
	}

	#[test]
	fn everyone_is_denied_channel_view() {
		let guild_id: Id<GuildMarker> = Id::new(100);
		let staff = StaffTarget::Role(Id::new(5));
		let overwrites = ticket_channel_overwrites(guild_id, Id::new(7), &staff);

		let everyone = &overwrites[0];
		assert_eq!(everyone.id, guild_id.cast());
		assert_eq!(everyone.kind, PermissionOverwriteType::Role);
		assert_eq!(everyone.deny, Some(Permissions::VIEW_CHANNEL));
		assert_eq!(everyone.allow, None);
	}

	#[test]
	fn requester_can_use_their_own_channel() {
		let staff = StaffTarget::Role(Id::new(5));
		let overwrites = ticket_channel_overwrites(Id::new(100), Id::new(7), &staff);

		let requester = &overwrites[1];
		assert_eq!(requester.kind, PermissionOverwriteType::Member);
		let allowed = requester.allow.unwrap();
		assert!(allowed.contains(Permissions::VIEW_CHANNEL));
		assert!(allowed.contains(Permissions::SEND_MESSAGES));
		assert!(allowed.contains(Permissions::READ_MESSAGE_HISTORY));
		assert!(allowed.contains(Permissions::ATTACH_FILES));
		assert!(!allowed.contains(Permissions::MANAGE_MESSAGES));
	}

	#[test]
	fn staff_can_additionally_moderate() {
		let staff = StaffTarget::Role(Id::new(5));
		let overwrites = ticket_channel_overwrites(Id::new(100), Id::new(7), &staff);

		let staff_overwrite = &overwrites[2];
		assert_eq!(staff_overwrite.kind, PermissionOverwriteType::Role);
		assert!(staff_overwrite.allow.unwrap().contains(Permissions::MANAGE_MESSAGES));
	}

	#[test]
	fn category_overwrites_admit_only_staff() {
		let staff = StaffTarget::Owner(Id::new(9));
		let overwrites = category_overwrites(Id::new(100), &staff);

		assert_eq!(overwrites.len(), 2);
		assert_eq!(overwrites[0].deny, Some(Permissions::VIEW_CHANNEL));
		assert_eq!(overwrites[1].kind, PermissionOverwriteType::Member);
		assert_eq!(overwrites[1].allow, Some(Permissions::VIEW_CHANNEL));
	}

	#[test]
	fn administrator_role_grants_all_permissions() {
		let guild_id: Id<GuildMarker> = Id::new(100);
		let admin_role_id: Id<RoleMarker> = Id::new(200);
		let cache = cache_with_roles(
			guild_id,
			vec![
				role(guild_id.get(), Permissions::empty()),
				role(admin_role_id.get(), Permissions::ADMINISTRATOR),
			],
		);

		let permissions = member_permissions(&cache, guild_id, Id::new(7), &[admin_role_id]);
		assert!(permissions.contains(Permissions::ADMINISTRATOR));
	}

	#[test]
	fn plain_members_keep_only_their_role_permissions() {
		let guild_id: Id<GuildMarker> = Id::new(100);
		let member_role_id: Id<RoleMarker> = Id::new(201);
		let cache = cache_with_roles(
			guild_id,
			vec![
				role(guild_id.get(), Permissions::VIEW_CHANNEL),
				role(member_role_id.get(), Permissions::SEND_MESSAGES),
			],
		);

		let permissions = member_permissions(&cache, guild_id, Id::new(7), &[member_role_id]);
		assert!(permissions.contains(Permissions::SEND_MESSAGES));
		assert!(!permissions.contains(Permissions::ADMINISTRATOR));
	}
}
