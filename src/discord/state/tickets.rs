// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

/// A requester's slot in the registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketSlot {
	/// Channel creation is in flight. The slot already blocks duplicate
	/// requests while the platform call is pending.
	Pending,
	/// The ticket channel exists.
	Open(Id<ChannelMarker>),
}

impl TicketSlot {
	/// The channel this slot points at, once one exists.
	pub fn channel(&self) -> Option<Id<ChannelMarker>> {
		match self {
			Self::Open(channel) => Some(*channel),
			Self::Pending => None,
		}
	}
}

/// Returned by [`TicketRegistry::begin_create`] when the requester already
/// holds a slot. `channel` carries the open channel when one exists; it is
/// `None` while an earlier creation request is still in flight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExistingTicket {
	pub channel: Option<Id<ChannelMarker>>,
}

#[derive(Debug, Default)]
struct RegistryState {
	tickets: HashMap<Id<UserMarker>, TicketSlot>,
	scheduled_deletions: HashMap<Id<ChannelMarker>, AbortHandle>,
}

/// In-memory mapping of requesters to their open ticket channels, plus the
/// abort handles of channels whose deletion has been scheduled.
///
/// The registry is the sole owner of this state. Handlers receive it by
/// reference, and every mutation goes through the internal lock, so the
/// duplicate check and the slot insertion can never interleave between two
/// requests from the same requester even though handlers run on separate
/// tasks.
#[derive(Debug, Default)]
pub struct TicketRegistry {
	state: RwLock<RegistryState>,
}

impl TicketRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the requester's slot ahead of the asynchronous channel
	/// creation. Fails when the requester already has an open ticket or one
	/// being created; the claim must later be resolved with
	/// [`complete_create`](Self::complete_create) or released with
	/// [`abort_create`](Self::abort_create).
	pub async fn begin_create(&self, requester: Id<UserMarker>) -> Result<(), ExistingTicket> {
		let mut state = self.state.write().await;
		match state.tickets.entry(requester) {
			Entry::Occupied(entry) => Err(ExistingTicket {
				channel: entry.get().channel(),
			}),
			Entry::Vacant(entry) => {
				entry.insert(TicketSlot::Pending);
				Ok(())
			}
		}
	}

	/// Records the channel of a successfully created ticket, promoting the
	/// requester's claimed slot.
	pub async fn complete_create(&self, requester: Id<UserMarker>, channel: Id<ChannelMarker>) {
		let mut state = self.state.write().await;
		state.tickets.insert(requester, TicketSlot::Open(channel));
	}

	/// Releases a claimed slot after a failed channel creation. Only the
	/// handler that claimed the slot may call this, and only before
	/// completing it.
	pub async fn abort_create(&self, requester: Id<UserMarker>) {
		let mut state = self.state.write().await;
		state.tickets.remove(&requester);
	}

	/// Removes the entry whose channel matches, returning the requester that
	/// owned it. Linear scan; ticket counts stay far too small for that to
	/// matter.
	pub async fn close_by_channel(&self, channel: Id<ChannelMarker>) -> Option<Id<UserMarker>> {
		let mut state = self.state.write().await;
		let requester = state
			.tickets
			.iter()
			.find_map(|(user, slot)| (slot.channel() == Some(channel)).then_some(*user))?;
		state.tickets.remove(&requester);
		Some(requester)
	}

	/// Snapshot of all open tickets. Creations still in flight are excluded.
	pub async fn open_tickets(&self) -> Vec<(Id<UserMarker>, Id<ChannelMarker>)> {
		let state = self.state.read().await;
		state
			.tickets
			.iter()
			.filter_map(|(user, slot)| slot.channel().map(|channel| (*user, channel)))
			.collect()
	}

	/// Registers the abort handle of a scheduled channel deletion so the
	/// deletion can be cancelled if the channel disappears on its own first.
	pub async fn track_scheduled_deletion(&self, channel: Id<ChannelMarker>, handle: AbortHandle) {
		let mut state = self.state.write().await;
		state.scheduled_deletions.insert(channel, handle);
	}

	/// Drops the bookkeeping for a deletion task that has run to completion.
	pub async fn scheduled_deletion_finished(&self, channel: Id<ChannelMarker>) {
		let mut state = self.state.write().await;
		state.scheduled_deletions.remove(&channel);
	}

	/// Reconciles the registry with a channel that no longer exists: cancels
	/// any deletion still scheduled for it and evicts the mapping entry that
	/// pointed at it. Returns the requester whose ticket was evicted;
	/// channels removed through the close flow were already unmapped and
	/// yield `None`.
	pub async fn forget_channel(&self, channel: Id<ChannelMarker>) -> Option<Id<UserMarker>> {
		let mut state = self.state.write().await;
		if let Some(handle) = state.scheduled_deletions.remove(&channel) {
			handle.abort();
		}
		let requester = state
			.tickets
			.iter()
			.find_map(|(user, slot)| (slot.channel() == Some(channel)).then_some(*user))?;
		state.tickets.remove(&requester);
		Some(requester)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};
	use tokio::time::{Duration, sleep};

	fn user(id: u64) -> Id<UserMarker> {
		Id::new(id)
	}

	fn channel(id: u64) -> Id<ChannelMarker> {
		Id::new(id)
	}

	#[tokio::test]
	async fn begin_create_claims_a_slot_once() {
		let registry = TicketRegistry::new();
		assert!(registry.begin_create(user(1)).await.is_ok());
		let second = registry.begin_create(user(1)).await;
		assert_eq!(second, Err(ExistingTicket { channel: None }));
	}

	#[tokio::test]
	async fn duplicate_rejection_reports_the_open_channel() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.complete_create(user(1), channel(10)).await;
		let second = registry.begin_create(user(1)).await;
		assert_eq!(
			second,
			Err(ExistingTicket {
				channel: Some(channel(10))
			})
		);
	}

	#[tokio::test]
	async fn aborted_creation_frees_the_slot() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.abort_create(user(1)).await;
		assert!(registry.begin_create(user(1)).await.is_ok());
		assert!(registry.open_tickets().await.is_empty());
	}

	#[tokio::test]
	async fn distinct_requesters_get_their_own_slots() {
		let registry = TicketRegistry::new();
		assert!(registry.begin_create(user(1)).await.is_ok());
		assert!(registry.begin_create(user(2)).await.is_ok());
	}

	#[tokio::test]
	async fn simultaneous_requests_from_one_requester_admit_only_one() {
		let registry = Arc::new(TicketRegistry::new());
		let (first, second) = tokio::join!(registry.begin_create(user(1)), registry.begin_create(user(1)));
		assert!(first.is_ok() != second.is_ok());
	}

	#[tokio::test]
	async fn close_by_channel_removes_the_matching_entry() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.complete_create(user(1), channel(10)).await;
		assert_eq!(registry.close_by_channel(channel(10)).await, Some(user(1)));
		assert!(registry.open_tickets().await.is_empty());
		assert!(registry.begin_create(user(1)).await.is_ok());
	}

	#[tokio::test]
	async fn close_by_channel_without_a_match_changes_nothing() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.complete_create(user(1), channel(10)).await;
		assert_eq!(registry.close_by_channel(channel(99)).await, None);
		assert_eq!(registry.open_tickets().await, vec![(user(1), channel(10))]);
	}

	#[tokio::test]
	async fn open_tickets_excludes_creations_in_flight() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.begin_create(user(2)).await.unwrap();
		registry.complete_create(user(2), channel(20)).await;
		assert_eq!(registry.open_tickets().await, vec![(user(2), channel(20))]);
	}

	#[tokio::test]
	async fn forget_channel_evicts_the_mapping() {
		let registry = TicketRegistry::new();
		registry.begin_create(user(1)).await.unwrap();
		registry.complete_create(user(1), channel(10)).await;
		assert_eq!(registry.forget_channel(channel(10)).await, Some(user(1)));
		assert!(registry.begin_create(user(1)).await.is_ok());
	}

	#[tokio::test]
	async fn forget_channel_ignores_unknown_channels() {
		let registry = TicketRegistry::new();
		assert_eq!(registry.forget_channel(channel(10)).await, None);
	}

	#[tokio::test]
	async fn forget_channel_cancels_a_scheduled_deletion() {
		let registry = TicketRegistry::new();
		let task = tokio::spawn(async {
			sleep(Duration::from_secs(60)).await;
		});
		registry.track_scheduled_deletion(channel(10), task.abort_handle()).await;

		registry.forget_channel(channel(10)).await;

		assert!(task.await.unwrap_err().is_cancelled());
	}

	#[tokio::test]
	async fn scheduled_deletion_runs_when_nothing_cancels_it() {
		let registry = TicketRegistry::new();
		let fired = Arc::new(AtomicBool::new(false));
		let fired_in_task = Arc::clone(&fired);
		let task = tokio::spawn(async move {
			fired_in_task.store(true, Ordering::SeqCst);
		});
		registry.track_scheduled_deletion(channel(10), task.abort_handle()).await;

		task.await.unwrap();
		registry.scheduled_deletion_finished(channel(10)).await;

		assert!(fired.load(Ordering::SeqCst));
		assert_eq!(registry.forget_channel(channel(10)).await, None);
	}
}
