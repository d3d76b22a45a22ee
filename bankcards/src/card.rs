//! Card entity and status state machine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Card status enumeration
///
/// Expiry is derived by comparing the expiry date to the current date by
/// an external process; no operation here transitions a card into
/// `Expired`, the machine only guards against operating on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Blocked,
    PendingBlock,
    Expired,
}

impl CardStatus {
    /// Status name as exposed in card views (`"ACTIVE"`, `"PENDING_BLOCK"`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            CardStatus::Active => "ACTIVE",
            CardStatus::Blocked => "BLOCKED",
            CardStatus::PendingBlock => "PENDING_BLOCK",
            CardStatus::Expired => "EXPIRED",
        }
    }
}

/// Bank card entity
///
/// The primary account number is only ever stored encrypted; the
/// plaintext exists transiently while producing the masked display form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Base64-encoded ciphertext of the card number
    pub encrypted_number: String,
    pub expiry_date: NaiveDate,
    pub status: CardStatus,
    /// Invariant: never negative
    pub balance: Decimal,
}

impl Card {
    /// Create a new card: status ACTIVE, balance exactly zero
    pub fn new(owner_id: Uuid, encrypted_number: String, expiry_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            encrypted_number,
            expiry_date,
            status: CardStatus::Active,
            balance: Decimal::ZERO,
        }
    }

    /// Owner-initiated block request: ACTIVE -> PENDING_BLOCK
    pub fn request_block(&mut self) -> Result<()> {
        match self.status {
            CardStatus::Active => {
                self.status = CardStatus::PendingBlock;
                Ok(())
            }
            CardStatus::Blocked => Err(Error::StateConflict("card is already blocked".into())),
            CardStatus::PendingBlock => {
                Err(Error::StateConflict("card is already pending block".into()))
            }
            CardStatus::Expired => Err(Error::StateConflict("cannot block an expired card".into())),
        }
    }

    /// Administrator block: any status except BLOCKED -> BLOCKED
    pub fn block_by_admin(&mut self) -> Result<()> {
        match self.status {
            CardStatus::Blocked => Err(Error::StateConflict("card is already blocked".into())),
            CardStatus::Active | CardStatus::PendingBlock | CardStatus::Expired => {
                self.status = CardStatus::Blocked;
                Ok(())
            }
        }
    }

    /// Administrator activation: BLOCKED -> ACTIVE
    pub fn activate_by_admin(&mut self) -> Result<()> {
        match self.status {
            CardStatus::Blocked => {
                self.status = CardStatus::Active;
                Ok(())
            }
            CardStatus::Active => Err(Error::StateConflict("card is already active".into())),
            CardStatus::PendingBlock | CardStatus::Expired => Err(Error::StateConflict(
                "only a blocked card can be activated".into(),
            )),
        }
    }

    /// Debit the balance for a transfer
    ///
    /// The source balance must remain strictly positive afterwards: a
    /// transfer draining the card to exactly zero is refused.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation("amount must be positive".into()));
        }
        if self.balance <= amount {
            return Err(Error::StateConflict(
                "insufficient funds on the source card".into(),
            ));
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credit the balance by a positive amount
    pub fn credit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation("amount must be positive".into()));
        }
        self.balance += amount;
        Ok(())
    }

    /// Move `amount` from this card to `other`
    ///
    /// Both cards must be ACTIVE and the source balance must stay
    /// strictly positive. A refusal leaves both cards untouched; callers
    /// apply the result inside a single storage transaction.
    pub fn transfer_to(&mut self, other: &mut Card, amount: Decimal) -> Result<()> {
        if self.status != CardStatus::Active {
            return Err(Error::StateConflict(
                "source card is not active, transfer refused".into(),
            ));
        }
        if other.status != CardStatus::Active {
            return Err(Error::StateConflict(
                "destination card is not active, transfer refused".into(),
            ));
        }
        self.debit(amount)?;
        other.credit(amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_status(status: CardStatus) -> Card {
        let mut card = Card::new(
            Uuid::new_v4(),
            "ciphertext".to_string(),
            NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
        );
        card.status = status;
        card
    }

    #[test]
    fn new_card_is_active_with_zero_balance() {
        let card = card_with_status(CardStatus::Active);
        assert_eq!(card.status, CardStatus::Active);
        assert_eq!(card.balance, Decimal::ZERO);
    }

    #[test]
    fn request_block_only_from_active() {
        let mut card = card_with_status(CardStatus::Active);
        card.request_block().unwrap();
        assert_eq!(card.status, CardStatus::PendingBlock);

        for status in [
            CardStatus::Blocked,
            CardStatus::PendingBlock,
            CardStatus::Expired,
        ] {
            let mut card = card_with_status(status);
            assert!(matches!(
                card.request_block(),
                Err(Error::StateConflict(_))
            ));
            assert_eq!(card.status, status, "refused request must not mutate");
        }
    }

    #[test]
    fn admin_block_refused_only_when_already_blocked() {
        for status in [
            CardStatus::Active,
            CardStatus::PendingBlock,
            CardStatus::Expired,
        ] {
            let mut card = card_with_status(status);
            card.block_by_admin().unwrap();
            assert_eq!(card.status, CardStatus::Blocked);
        }

        let mut card = card_with_status(CardStatus::Blocked);
        assert!(matches!(card.block_by_admin(), Err(Error::StateConflict(_))));
    }

    #[test]
    fn admin_activate_only_from_blocked() {
        let mut card = card_with_status(CardStatus::Blocked);
        card.activate_by_admin().unwrap();
        assert_eq!(card.status, CardStatus::Active);

        for status in [
            CardStatus::Active,
            CardStatus::PendingBlock,
            CardStatus::Expired,
        ] {
            let mut card = card_with_status(status);
            assert!(matches!(
                card.activate_by_admin(),
                Err(Error::StateConflict(_))
            ));
            assert_eq!(card.status, status);
        }
    }

    #[test]
    fn debit_requires_strictly_more_than_amount() {
        let mut card = card_with_status(CardStatus::Active);
        card.balance = Decimal::new(10000, 2); // 100.00

        // Draining to exactly zero is refused
        let result = card.debit(Decimal::new(10000, 2));
        assert!(matches!(result, Err(Error::StateConflict(_))));
        assert_eq!(card.balance, Decimal::new(10000, 2));

        card.debit(Decimal::new(2550, 2)).unwrap();
        assert_eq!(card.balance, Decimal::new(7450, 2));
    }

    #[test]
    fn debit_and_credit_reject_non_positive_amounts() {
        let mut card = card_with_status(CardStatus::Active);
        card.balance = Decimal::new(500, 2);

        assert!(matches!(
            card.debit(Decimal::ZERO),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            card.credit(Decimal::new(-1, 0)),
            Err(Error::Validation(_))
        ));
        assert_eq!(card.balance, Decimal::new(500, 2));
    }

    #[test]
    fn transfer_to_moves_the_amount_between_active_cards() {
        let mut from = card_with_status(CardStatus::Active);
        let mut to = card_with_status(CardStatus::Active);
        from.balance = Decimal::new(10000, 2);
        to.balance = Decimal::new(1000, 2);

        from.transfer_to(&mut to, Decimal::new(2550, 2)).unwrap();
        assert_eq!(from.balance, Decimal::new(7450, 2));
        assert_eq!(to.balance, Decimal::new(3550, 2));
    }

    #[test]
    fn transfer_to_requires_both_cards_active() {
        for status in [
            CardStatus::Blocked,
            CardStatus::PendingBlock,
            CardStatus::Expired,
        ] {
            let mut from = card_with_status(status);
            let mut to = card_with_status(CardStatus::Active);
            from.balance = Decimal::new(10000, 2);
            assert!(matches!(
                from.transfer_to(&mut to, Decimal::ONE),
                Err(Error::StateConflict(_))
            ));

            let mut from = card_with_status(CardStatus::Active);
            let mut to = card_with_status(status);
            from.balance = Decimal::new(10000, 2);
            assert!(matches!(
                from.transfer_to(&mut to, Decimal::ONE),
                Err(Error::StateConflict(_))
            ));
            assert_eq!(from.balance, Decimal::new(10000, 2));
            assert_eq!(to.balance, Decimal::ZERO);
        }
    }

    #[test]
    fn status_names_match_wire_format() {
        assert_eq!(CardStatus::Active.name(), "ACTIVE");
        assert_eq!(CardStatus::PendingBlock.name(), "PENDING_BLOCK");
        assert_eq!(
            serde_json::to_string(&CardStatus::PendingBlock).unwrap(),
            "\"PENDING_BLOCK\""
        );
    }
}
