// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::tickets::TicketRegistry;
use twilight_model::gateway::payload::incoming::ChannelDelete;

/// Reconciles the registry with a deleted channel. Deletions the bot
/// scheduled itself were already unmapped when the ticket was closed; this
/// catches channels removed by moderators directly, cancelling the pending
/// deletion timer and freeing the requester's slot.
pub async fn handle_channel_delete(channel_delete: &ChannelDelete, registry: &TicketRegistry) -> miette::Result<()> {
	if let Some(requester) = registry.forget_channel(channel_delete.id).await {
		tracing::info!(
			"Dropped the ticket for {} after its channel {} was deleted externally",
			requester,
			channel_delete.id
		);
	}
	Ok(())
}
