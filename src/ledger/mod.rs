//! Asset ledger capability consumed by the pool.
//!
//! The pool never holds balances itself.  Asset A, asset B, and the
//! pool's own claim token each live in a ledger that the pool talks to
//! through [`AssetLedger`] (and [`ClaimLedger`] for the claim token,
//! which adds mint and burn).  Concrete ledgers are injected into
//! [`PoolService`](crate::pool::PoolService); [`InMemoryLedger`] is the
//! reference implementation used by tests and demos.
//!
//! # Authority model
//!
//! `transfer(from, ..)` is issued by the pool only with `from` set to the
//! pool account.  Funds are pulled from callers exclusively through
//! `transfer_from`, which consumes an allowance the caller granted to the
//! pool account beforehand.
//!
//! The one exception is compensation: when a later leg of an operation
//! fails, the pool reverses an already-completed payout with the inverse
//! `transfer` out of the recipient.  The service holds the ledger
//! exclusively for the whole operation, so those funds cannot have moved
//! in between.  A reversed pull is refunded with `transfer` and the
//! allowance it consumed is re-granted with `increase_allowance`.

mod memory;

pub use memory::InMemoryLedger;

use thiserror::Error;

use crate::domain::{AccountId, Amount};

/// Failures reported by a ledger.  The pool propagates them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The source account cannot cover the transfer.
    #[error("transfer failed: {account} holds {balance}, needs {requested}")]
    TransferFailed {
        /// Account being debited.
        account: AccountId,
        /// Its current balance.
        balance: Amount,
        /// Amount requested.
        requested: Amount,
    },

    /// The spender was not approved for enough of the owner's balance.
    #[error("insufficient allowance: {spender} may move {allowance} of {owner}'s funds, needs {requested}")]
    InsufficientAllowance {
        /// Account whose funds are moved.
        owner: AccountId,
        /// Account moving them.
        spender: AccountId,
        /// Remaining allowance.
        allowance: Amount,
        /// Amount requested.
        requested: Amount,
    },

    /// A balance or the supply would overflow.
    #[error("ledger arithmetic overflow")]
    Overflow,
}

/// Balance-holding capability for one fungible asset.
pub trait AssetLedger {
    /// Short ticker naming the asset in log output.
    fn symbol(&self) -> &str;

    /// Returns the balance held by `account`.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Returns how much of `owner`'s balance `spender` may move.
    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::TransferFailed`] if `from` cannot cover `amount`.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if `spender` is not
    ///   approved for `amount`.
    /// - [`LedgerError::TransferFailed`] if `from` cannot cover `amount`.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Raises the amount `spender` may move out of `owner`'s balance by
    /// `amount`.  Restores allowance consumed by a reversed pull.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if the allowance would overflow.
    fn increase_allowance(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Checks, without side effects, that `transfer_from` would succeed.
    ///
    /// # Errors
    ///
    /// The error `transfer_from` would return.
    fn check_pull(
        &self,
        spender: &AccountId,
        from: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                allowance,
                requested: amount,
            });
        }
        self.check_push(from, amount)
    }

    /// Checks, without side effects, that `from` can cover `amount`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::TransferFailed`] if the balance is short.
    fn check_push(&self, from: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::TransferFailed {
                account: *from,
                balance,
                requested: amount,
            });
        }
        Ok(())
    }
}

/// Ledger for the pool's claim token: an [`AssetLedger`] the pool may
/// mint into and burn from.
pub trait ClaimLedger: AssetLedger {
    /// Creates `amount` new units in `to`'s balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if the balance or supply overflows.
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Destroys `amount` units from `from`'s balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::TransferFailed`] if `from` holds less than `amount`.
    fn burn(&mut self, from: &AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Total units in existence.
    fn total_supply(&self) -> Amount;
}
