//! Card reconciler
//!
//! Keeps a capacity-bounded, insertion-ordered card list consistent with
//! server-reported state, despite duplicate or out-of-order event delivery.
//! The stream gives no ordering guarantee, so an update for an unknown id is
//! only accepted as a new document when the id is above the high-water mark
//! and has never been seen; anything else is a late or duplicate delivery
//! and gets dropped.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::document::{CardUpdate, DashboardStats, DocumentCard};

/// What [`CardReconciler::apply_update`] did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The event created a new card at the top of the list
    Inserted,
    /// The event patched an existing card in place
    Updated,
    /// Duplicate or out-of-order delivery; nothing changed
    Dropped,
}

/// Bounded, newest-first card list with duplicate suppression
#[derive(Debug)]
pub struct CardReconciler {
    capacity: usize,
    /// Front is the newest card
    cards: VecDeque<DocumentCard>,
    /// Every id ever inserted and not yet evicted. Grows for the life of
    /// the dashboard and only shrinks on capacity eviction.
    seen: HashSet<i64>,
    high_water: i64,
    stats: DashboardStats,
}

impl CardReconciler {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            cards: VecDeque::new(),
            seen: HashSet::new(),
            high_water: 0,
            stats: DashboardStats::default(),
        }
    }

    /// Seeds the list from the initial snapshot
    ///
    /// The snapshot arrives oldest-first; inserting each card at the front
    /// leaves the newest on top, and when the snapshot exceeds capacity the
    /// retained cards are the snapshot's tail.
    pub fn initialize(&mut self, snapshot: Vec<DocumentCard>) {
        for card in snapshot {
            self.insert_card(card);
        }
    }

    /// Inserts a card at the top, evicting the oldest at capacity
    pub fn insert_card(&mut self, card: DocumentCard) {
        if self.cards.len() >= self.capacity {
            if let Some(evicted) = self.cards.pop_back() {
                self.seen.remove(&evicted.id);
                debug!("Evicted oldest card {} at capacity", evicted.id);
            }
        }
        self.seen.insert(card.id);
        self.high_water = self.high_water.max(card.id);
        self.cards.push_front(card);
    }

    /// Reconciles one pushed update against the list
    pub fn apply_update(&mut self, update: &CardUpdate) -> UpdateOutcome {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == update.id) {
            card.apply(update);
            if let Some(stats) = &update.dashboard_data {
                self.stats = stats.clone();
            }
            return UpdateOutcome::Updated;
        }

        if self.seen.contains(&update.id) {
            debug!("Dropping duplicate update for card {}", update.id);
            return UpdateOutcome::Dropped;
        }

        if update.id <= self.high_water {
            debug!(
                "Dropping out-of-order update for card {} (high-water mark {})",
                update.id, self.high_water
            );
            return UpdateOutcome::Dropped;
        }

        let mut card = DocumentCard::new(update.id);
        card.apply(update);
        self.insert_card(card);
        if let Some(stats) = &update.dashboard_data {
            self.stats = stats.clone();
        }
        UpdateOutcome::Inserted
    }

    /// Cards, newest first
    pub fn cards(&self) -> impl Iterator<Item = &DocumentCard> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn high_water(&self) -> i64 {
        self.high_water
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, name: &str) -> DocumentCard {
        let mut card = DocumentCard::new(id);
        card.file_name = Some(name.to_string());
        card
    }

    fn update(id: i64) -> CardUpdate {
        CardUpdate {
            id,
            ..CardUpdate::default()
        }
    }

    fn ids(reconciler: &CardReconciler) -> Vec<i64> {
        reconciler.cards().map(|card| card.id).collect()
    }

    #[test]
    fn snapshot_renders_newest_first() {
        let mut reconciler = CardReconciler::new(8);
        reconciler.initialize(vec![card(1, "a"), card(2, "b"), card(3, "c")]);
        assert_eq!(ids(&reconciler), [3, 2, 1]);
    }

    #[test]
    fn snapshot_beyond_capacity_keeps_the_tail() {
        let mut reconciler = CardReconciler::new(3);
        reconciler.initialize((1..=5).map(|id| card(id, "doc")).collect());
        assert_eq!(reconciler.len(), 3);
        assert_eq!(ids(&reconciler), [5, 4, 3]);
    }

    #[test]
    fn update_for_known_card_patches_in_place() {
        let mut reconciler = CardReconciler::new(8);
        reconciler.initialize(vec![card(1, "a"), card(2, "b")]);

        let mut event = update(1);
        event.file_name = Some("renamed.pdf".into());
        assert_eq!(reconciler.apply_update(&event), UpdateOutcome::Updated);

        let renamed = reconciler.cards().find(|card| card.id == 1).unwrap();
        assert_eq!(renamed.file_name.as_deref(), Some("renamed.pdf"));
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn unknown_low_id_is_dropped() {
        let mut reconciler = CardReconciler::new(2);
        reconciler.initialize((1..=4).map(|id| card(id, "doc")).collect());
        // Cards 1 and 2 were evicted; an update for 1 races the snapshot.
        assert_eq!(reconciler.apply_update(&update(1)), UpdateOutcome::Dropped);
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn unknown_high_id_becomes_a_new_card() {
        let mut reconciler = CardReconciler::new(8);
        reconciler.initialize(vec![card(1, "a"), card(2, "b")]);

        let mut event = update(7);
        event.file_name = Some("fresh.pdf".into());
        assert_eq!(reconciler.apply_update(&event), UpdateOutcome::Inserted);
        assert_eq!(ids(&reconciler), [7, 2, 1]);
        assert_eq!(reconciler.high_water(), 7);
    }

    #[test]
    fn duplicate_delivery_of_a_new_card_is_a_noop() {
        let mut reconciler = CardReconciler::new(8);
        reconciler.initialize(vec![card(1, "a")]);

        let mut event = update(5);
        event.file_name = Some("fresh.pdf".into());
        assert_eq!(reconciler.apply_update(&event), UpdateOutcome::Inserted);
        // Same event again patches the existing card instead of duplicating it.
        assert_eq!(reconciler.apply_update(&event), UpdateOutcome::Updated);
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn eviction_frees_the_id_but_high_water_still_blocks_it() {
        let mut reconciler = CardReconciler::new(2);
        reconciler.initialize((1..=3).map(|id| card(id, "doc")).collect());
        assert_eq!(ids(&reconciler), [3, 2]);
        // Card 1 was evicted and left the seen set, but its id is below the
        // high-water mark, so a late update still cannot resurrect it.
        assert_eq!(reconciler.apply_update(&update(1)), UpdateOutcome::Dropped);
    }

    #[test]
    fn dashboard_data_updates_aggregates() {
        let mut reconciler = CardReconciler::new(8);
        reconciler.initialize(vec![card(1, "a")]);

        let mut event = update(1);
        event.dashboard_data = Some(DashboardStats {
            processing_pdfs: 2,
            processed_pdfs: 40,
            latest_processing_timestamp: Some("Updated 1 minute ago".into()),
            latest_completed_timestamp: Some("Updated 5 minutes ago".into()),
        });
        reconciler.apply_update(&event);

        assert_eq!(reconciler.stats().processing_pdfs, 2);
        assert_eq!(reconciler.stats().processed_pdfs, 40);
    }

    #[test]
    fn capacity_of_zero_still_holds_one_card() {
        let mut reconciler = CardReconciler::new(0);
        reconciler.insert_card(card(1, "a"));
        assert_eq!(reconciler.len(), 1);
    }
}
