//! In-memory ledger for tests, demos, and simulation.
//!
//! Balances and allowances live in `HashMap`s.  All data is lost when the
//! value is dropped.

use std::collections::HashMap;

use super::{AssetLedger, ClaimLedger, LedgerError};
use crate::domain::{AccountId, Amount};

/// A complete fungible ledger held in memory.
///
/// Implements both [`AssetLedger`] and [`ClaimLedger`], so one type can
/// back asset A, asset B, and the claim token.
///
/// # Examples
///
/// ```
/// use pair_pool::domain::{AccountId, Amount};
/// use pair_pool::ledger::{AssetLedger, InMemoryLedger};
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let pool = AccountId::from_bytes([9u8; 32]);
///
/// let mut usdc = InMemoryLedger::new("USDC");
/// usdc.credit(&alice, Amount::new(1_000)).expect("fund");
/// usdc.approve(&alice, &pool, Amount::new(500));
///
/// usdc.transfer_from(&pool, &alice, &pool, Amount::new(200)).expect("pull");
/// assert_eq!(usdc.balance_of(&pool), Amount::new(200));
/// assert_eq!(usdc.allowance(&alice, &pool), Amount::new(300));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    symbol: String,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    supply: Amount,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Issues `amount` new units to `account`, growing the supply.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if the balance or supply overflows.
    pub fn credit(&mut self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let supply = self
            .supply
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(account)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*account, balance);
        self.supply = supply;
        Ok(())
    }

    /// Sets the amount `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    fn debit(&mut self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(account);
        let remaining = balance
            .checked_sub(&amount)
            .ok_or(LedgerError::TransferFailed {
                account: *account,
                balance,
                requested: amount,
            })?;
        self.balances.insert(*account, remaining);
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.check_push(from, amount)?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        self.debit(from, amount)?;
        self.balances.insert(*to, credited);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.check_pull(spender, from, amount)?;
        self.transfer(from, to, amount)?;
        let allowance = self.allowance(from, spender);
        // check_pull guarantees allowance >= amount
        let remaining = allowance.checked_sub(&amount).unwrap_or_default();
        self.allowances.insert((*from, *spender), remaining);
        Ok(())
    }

    fn increase_allowance(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let raised = self
            .allowance(owner, spender)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        self.allowances.insert((*owner, *spender), raised);
        Ok(())
    }
}

impl ClaimLedger for InMemoryLedger {
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.credit(to, amount)
    }

    fn burn(&mut self, from: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let supply = self
            .supply
            .checked_sub(&amount)
            .ok_or(LedgerError::Overflow)?;
        self.debit(from, amount)?;
        self.supply = supply;
        Ok(())
    }

    fn total_supply(&self) -> Amount {
        self.supply
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::from_bytes([1u8; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([2u8; 32])
    }

    fn funded(amount: u128) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new("TKN");
        let Ok(()) = ledger.credit(&alice(), Amount::new(amount)) else {
            panic!("credit");
        };
        ledger
    }

    #[test]
    fn transfer_moves_balance() {
        let mut l = funded(100);
        let Ok(()) = l.transfer(&alice(), &bob(), Amount::new(40)) else {
            panic!("expected Ok");
        };
        assert_eq!(l.balance_of(&alice()), Amount::new(60));
        assert_eq!(l.balance_of(&bob()), Amount::new(40));
        assert_eq!(l.total_supply(), Amount::new(100));
    }

    #[test]
    fn transfer_insufficient_balance() {
        let mut l = funded(10);
        let r = l.transfer(&alice(), &bob(), Amount::new(11));
        assert!(matches!(r, Err(LedgerError::TransferFailed { .. })));
        assert_eq!(l.balance_of(&alice()), Amount::new(10));
    }

    #[test]
    fn transfer_from_requires_allowance() {
        let mut l = funded(100);
        let r = l.transfer_from(&bob(), &alice(), &bob(), Amount::new(1));
        assert!(matches!(r, Err(LedgerError::InsufficientAllowance { .. })));

        l.approve(&alice(), &bob(), Amount::new(30));
        let Ok(()) = l.transfer_from(&bob(), &alice(), &bob(), Amount::new(30)) else {
            panic!("expected Ok");
        };
        assert_eq!(l.allowance(&alice(), &bob()), Amount::ZERO);
        assert_eq!(l.balance_of(&bob()), Amount::new(30));
    }

    #[test]
    fn transfer_from_allowance_but_no_balance() {
        let mut l = funded(5);
        l.approve(&alice(), &bob(), Amount::new(50));
        let r = l.transfer_from(&bob(), &alice(), &bob(), Amount::new(6));
        assert!(matches!(r, Err(LedgerError::TransferFailed { .. })));
        assert_eq!(l.allowance(&alice(), &bob()), Amount::new(50));
    }

    #[test]
    fn self_transfer_is_noop() {
        let mut l = funded(5);
        let Ok(()) = l.transfer(&alice(), &alice(), Amount::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(l.balance_of(&alice()), Amount::new(5));
    }

    #[test]
    fn mint_and_burn_track_supply() {
        let mut l = InMemoryLedger::new("CLAIM");
        let Ok(()) = l.mint(&alice(), Amount::new(200)) else {
            panic!("mint");
        };
        let Ok(()) = l.burn(&alice(), Amount::new(50)) else {
            panic!("burn");
        };
        assert_eq!(l.total_supply(), Amount::new(150));
        assert!(matches!(
            l.burn(&bob(), Amount::new(1)),
            Err(LedgerError::TransferFailed { .. })
        ));
    }

    #[test]
    fn increase_allowance_restores_spent_allowance() {
        let mut l = funded(100);
        l.approve(&alice(), &bob(), Amount::new(30));
        let Ok(()) = l.transfer_from(&bob(), &alice(), &bob(), Amount::new(30)) else {
            panic!("expected Ok");
        };
        assert_eq!(l.allowance(&alice(), &bob()), Amount::ZERO);

        let Ok(()) = l.increase_allowance(&alice(), &bob(), Amount::new(30)) else {
            panic!("expected Ok");
        };
        assert_eq!(l.allowance(&alice(), &bob()), Amount::new(30));
        assert_eq!(
            l.increase_allowance(&alice(), &bob(), Amount::MAX),
            Err(LedgerError::Overflow)
        );
        assert_eq!(l.symbol(), "TKN");
    }

    #[test]
    fn credit_overflow() {
        let mut l = funded(u128::MAX);
        assert_eq!(
            l.credit(&bob(), Amount::new(1)),
            Err(LedgerError::Overflow)
        );
    }
}
