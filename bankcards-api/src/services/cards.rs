//! Card service implementation
//!
//! Owner resolution and ownership checks against the requesting
//! principal live here; the status state machine and balance rules live
//! on the card entity itself. Handlers validate input shape before
//! calling in, and the transfer's guarded read-modify-write runs inside
//! the repository's single storage transaction.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use bankcards::card::Card;
use bankcards::crypto::CardCipher;
use bankcards::mask::mask_card_number;
use bankcards::{Error, Result};

use crate::models::dto::{BalanceDto, CardDto};
use crate::models::page::Page;
use crate::repository::{CardRepository, UserRepository};

/// Card service
pub struct CardService {
    cards: Arc<dyn CardRepository>,
    users: Arc<dyn UserRepository>,
    cipher: Arc<CardCipher>,
}

impl CardService {
    pub fn new(
        cards: Arc<dyn CardRepository>,
        users: Arc<dyn UserRepository>,
        cipher: Arc<CardCipher>,
    ) -> Self {
        Self {
            cards,
            users,
            cipher,
        }
    }

    /// Issue a new card for a user (administrator operation)
    ///
    /// The card number is encrypted before it is persisted; the initial
    /// balance is exactly zero and the initial status ACTIVE.
    pub async fn create_card(
        &self,
        owner_id: Uuid,
        card_number: &str,
        expiry_date: NaiveDate,
    ) -> Result<CardDto> {
        let owner = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {owner_id} not found")))?;

        let encrypted = self.cipher.encrypt(card_number)?;
        let card = self.cards.insert(Card::new(owner.id, encrypted, expiry_date)).await?;

        info!(card_id = %card.id, owner = %owner.username, "card created");
        self.to_dto(&card)
    }

    /// One page of the named user's cards, masked for display
    pub async fn list_cards_for_user(
        &self,
        username: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<CardDto>> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {username} not found")))?;

        let offset = page as usize * size as usize;
        let (cards, total) = self.cards.list_by_owner(user.id, size as usize, offset).await?;
        self.to_page(cards, page, size, total)
    }

    /// One page of every card in the system (administrator operation)
    pub async fn list_all_cards(&self, page: u32, size: u32) -> Result<Page<CardDto>> {
        let offset = page as usize * size as usize;
        let (cards, total) = self.cards.list_all(size as usize, offset).await?;
        self.to_page(cards, page, size, total)
    }

    /// Owner-initiated block request: ACTIVE -> PENDING_BLOCK
    pub async fn request_block(&self, card_id: Uuid, username: &str) -> Result<CardDto> {
        let mut card = self.fetch(card_id).await?;
        self.ensure_owner(&card, username, "manage").await?;

        card.request_block()?;
        let card = self.cards.update(card).await?;

        info!(card_id = %card.id, "block requested, card pending block");
        self.to_dto(&card)
    }

    /// Transfer funds between two cards of the requesting user
    ///
    /// Ownership is resolved against a snapshot (owners never change);
    /// the status and balance guards and both writes run inside the
    /// repository's single transfer transaction, so concurrent transfers
    /// against the same card serialize instead of losing updates.
    pub async fn transfer(
        &self,
        from_card_id: Uuid,
        to_card_id: Uuid,
        amount: Decimal,
        username: &str,
    ) -> Result<()> {
        if from_card_id == to_card_id {
            return Err(Error::Validation(
                "cannot transfer to the same card".into(),
            ));
        }

        let from_card = self
            .cards
            .find_by_id(from_card_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("source card {from_card_id} not found")))?;
        let to_card = self
            .cards
            .find_by_id(to_card_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("destination card {to_card_id} not found")))?;

        let principal = self.users.find_by_username(username).await?;
        let owns_both = principal
            .map(|user| user.id == from_card.owner_id && user.id == to_card.owner_id)
            .unwrap_or(false);
        if !owns_both {
            return Err(Error::AccessDenied(
                "you can only transfer between your own cards".into(),
            ));
        }

        self.cards.transfer(from_card_id, to_card_id, amount).await?;

        info!(%from_card_id, %to_card_id, %amount, "transfer applied");
        Ok(())
    }

    /// Administrator block: refused only when already BLOCKED
    pub async fn block_by_admin(&self, card_id: Uuid) -> Result<CardDto> {
        let mut card = self.fetch(card_id).await?;
        card.block_by_admin()?;
        let card = self.cards.update(card).await?;

        info!(card_id = %card.id, "card blocked by administrator");
        self.to_dto(&card)
    }

    /// Administrator activation: BLOCKED -> ACTIVE only
    pub async fn activate_by_admin(&self, card_id: Uuid) -> Result<CardDto> {
        let mut card = self.fetch(card_id).await?;
        card.activate_by_admin()?;
        let card = self.cards.update(card).await?;

        info!(card_id = %card.id, "card activated by administrator");
        self.to_dto(&card)
    }

    /// Administrator hard delete
    pub async fn delete_by_admin(&self, card_id: Uuid) -> Result<()> {
        self.cards.delete(card_id).await?;
        info!(%card_id, "card deleted by administrator");
        Ok(())
    }

    /// Current balance of one of the requesting user's cards
    pub async fn get_balance(&self, card_id: Uuid, username: &str) -> Result<BalanceDto> {
        let card = self.fetch(card_id).await?;
        self.ensure_owner(&card, username, "view the balance of").await?;
        Ok(BalanceDto {
            balance: card.balance,
        })
    }

    async fn fetch(&self, card_id: Uuid) -> Result<Card> {
        self.cards
            .find_by_id(card_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("card {card_id} not found")))
    }

    /// Ownership check against the requesting principal, independent of role
    async fn ensure_owner(&self, card: &Card, username: &str, action: &str) -> Result<()> {
        let principal = self.users.find_by_username(username).await?;
        match principal {
            Some(user) if user.id == card.owner_id => Ok(()),
            _ => Err(Error::AccessDenied(format!(
                "you can only {action} your own cards"
            ))),
        }
    }

    /// Decrypt-then-mask at read time; raw numbers never leave the service
    fn to_dto(&self, card: &Card) -> Result<CardDto> {
        let card_number = self.cipher.decrypt(&card.encrypted_number)?;
        Ok(CardDto {
            id: card.id,
            masked_card_number: mask_card_number(&card_number),
            expiry_date: card.expiry_date,
            status: card.status.name().to_string(),
            balance: card.balance,
        })
    }

    fn to_page(&self, cards: Vec<Card>, page: u32, size: u32, total: u64) -> Result<Page<CardDto>> {
        let content = cards
            .iter()
            .map(|card| self.to_dto(card))
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::new(content, page, size, total))
    }
}
