//! Card repository trait and in-memory implementation

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use bankcards::card::Card;
use bankcards::{Error, Result};

/// Card repository trait for data access
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persist a new card
    async fn insert(&self, card: Card) -> Result<Card>;

    /// Look a card up by id
    async fn find_by_id(&self, card_id: Uuid) -> Result<Option<Card>>;

    /// One page of a user's cards plus the total count, in storage order
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Card>, u64)>;

    /// One page of all cards plus the total count, in storage order
    async fn list_all(&self, limit: usize, offset: usize) -> Result<(Vec<Card>, u64)>;

    /// Overwrite an existing card; NotFound when absent
    async fn update(&self, card: Card) -> Result<Card>;

    /// Move `amount` between two cards as one storage transaction.
    /// Lookups, the status and balance guards, and both writes all run
    /// inside it, so concurrent transfers serialize and no update is
    /// ever lost.
    async fn transfer(&self, from_id: Uuid, to_id: Uuid, amount: Decimal) -> Result<()>;

    /// Remove a card permanently; NotFound when absent
    async fn delete(&self, card_id: Uuid) -> Result<()>;
}

#[derive(Default)]
struct CardStore {
    cards: HashMap<Uuid, Card>,
    /// Insertion order, so paginated listings stay stable
    order: Vec<Uuid>,
}

/// In-memory card repository implementation
#[derive(Default)]
pub struct InMemoryCardRepository {
    store: RwLock<CardStore>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn insert(&self, card: Card) -> Result<Card> {
        let mut store = self.store.write().await;
        store.order.push(card.id);
        store.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn find_by_id(&self, card_id: Uuid) -> Result<Option<Card>> {
        let store = self.store.read().await;
        Ok(store.cards.get(&card_id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Card>, u64)> {
        let store = self.store.read().await;
        let owned: Vec<&Card> = store
            .order
            .iter()
            .filter_map(|id| store.cards.get(id))
            .filter(|card| card.owner_id == owner_id)
            .collect();

        let total = owned.len() as u64;
        let page = owned.into_iter().skip(offset).take(limit).cloned().collect();
        Ok((page, total))
    }

    async fn list_all(&self, limit: usize, offset: usize) -> Result<(Vec<Card>, u64)> {
        let store = self.store.read().await;
        let total = store.order.len() as u64;
        let page = store
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| store.cards.get(id))
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update(&self, card: Card) -> Result<Card> {
        let mut store = self.store.write().await;
        if !store.cards.contains_key(&card.id) {
            return Err(Error::NotFound(format!("card {} not found", card.id)));
        }
        store.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn transfer(&self, from_id: Uuid, to_id: Uuid, amount: Decimal) -> Result<()> {
        // One writer lock across the whole read-check-write: a concurrent
        // transfer cannot observe stale balances or overwrite a committed
        // one, and no reader sees a half-applied pair.
        let mut store = self.store.write().await;
        let mut from = store
            .cards
            .get(&from_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("source card {from_id} not found")))?;
        let mut to = store
            .cards
            .get(&to_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("destination card {to_id} not found")))?;

        from.transfer_to(&mut to, amount)?;

        store.cards.insert(from_id, from);
        store.cards.insert(to_id, to);
        Ok(())
    }

    async fn delete(&self, card_id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        if store.cards.remove(&card_id).is_none() {
            return Err(Error::NotFound(format!("card {card_id} not found")));
        }
        store.order.retain(|id| *id != card_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card_for(owner_id: Uuid) -> Card {
        Card::new(
            owner_id,
            "ciphertext".to_string(),
            NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let repo = InMemoryCardRepository::new();
        let owner = Uuid::new_v4();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(repo.insert(card_for(owner)).await.unwrap().id);
        }

        let (page, total) = repo.list_by_owner(owner, 10, 0).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), ids);

        let (page, _) = repo.list_by_owner(owner, 2, 2).await.unwrap();
        assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), &ids[2..4]);
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_card() {
        let repo = InMemoryCardRepository::new();
        let missing = card_for(Uuid::new_v4());
        assert!(matches!(
            repo.update(missing.clone()).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(missing.id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn transfer_applies_both_sides_or_neither() {
        let repo = InMemoryCardRepository::new();
        let owner = Uuid::new_v4();
        let mut from = card_for(owner);
        from.balance = Decimal::new(10000, 2);
        let from = repo.insert(from).await.unwrap();
        let to = repo.insert(card_for(owner)).await.unwrap();

        repo.transfer(from.id, to.id, Decimal::new(2500, 2))
            .await
            .unwrap();
        let from_after = repo.find_by_id(from.id).await.unwrap().unwrap();
        let to_after = repo.find_by_id(to.id).await.unwrap().unwrap();
        assert_eq!(from_after.balance, Decimal::new(7500, 2));
        assert_eq!(to_after.balance, Decimal::new(2500, 2));

        // A refused transfer (insufficient balance) leaves both untouched
        let result = repo.transfer(from.id, to.id, Decimal::new(10000, 2)).await;
        assert!(matches!(result, Err(Error::StateConflict(_))));
        let from_after = repo.find_by_id(from.id).await.unwrap().unwrap();
        let to_after = repo.find_by_id(to.id).await.unwrap().unwrap();
        assert_eq!(from_after.balance, Decimal::new(7500, 2));
        assert_eq!(to_after.balance, Decimal::new(2500, 2));
    }

    #[tokio::test]
    async fn transfer_refuses_when_either_card_is_missing() {
        let repo = InMemoryCardRepository::new();
        let mut present = card_for(Uuid::new_v4());
        present.balance = Decimal::new(10000, 2);
        let present = repo.insert(present).await.unwrap();

        let result = repo.transfer(present.id, Uuid::new_v4(), Decimal::ONE).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        let result = repo.transfer(Uuid::new_v4(), present.id, Decimal::ONE).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        // The present card must be untouched by the refused transfer
        let reloaded = repo.find_by_id(present.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance, present.balance);
    }
}
