//! Per-user gil ledger gating paid commands.
//!
//! Balances live in process memory only and start over on restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

/// Outcome of [`GilBank::withdraw`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Withdrawal {
    /// Balance after the withdrawal
    pub balance: u32,
    /// Amount actually taken, possibly less than requested
    pub withdrawn: u32,
}

impl Withdrawal {
    pub fn covers(&self, requested: u32) -> bool {
        self.withdrawn >= requested
    }
}

#[derive(Debug, Default)]
pub struct GilBank {
    starting_balance: u32,
    accounts: Mutex<HashMap<String, Arc<Mutex<u32>>>>,
}

impl GilBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts created on first reference start at `balance`
    pub fn with_starting_balance(balance: u32) -> Self {
        Self {
            starting_balance: balance,
            ..Self::default()
        }
    }

    fn account(&self, user: &str) -> Arc<Mutex<u32>> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts
            .entry(user.to_lowercase())
            .or_insert_with(|| Arc::new(Mutex::new(self.starting_balance)))
            .clone()
    }

    pub fn balance(&self, user: &str) -> u32 {
        *self.account(user).lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Take `amount` from `user`.
    ///
    /// A short balance is emptied when `allow_partial` is set and left alone
    /// otherwise; compare [`Withdrawal::withdrawn`] to decide whether to go on.
    pub fn withdraw(&self, user: &str, amount: u32, allow_partial: bool) -> Withdrawal {
        let account = self.account(user);
        let mut balance = account.lock().unwrap_or_else(|e| e.into_inner());

        let withdrawn = if *balance >= amount {
            amount
        } else if allow_partial {
            *balance
        } else {
            0
        };
        *balance -= withdrawn;

        debug!("{} withdrew {} of {} gil", user, withdrawn, amount);
        Withdrawal {
            balance: *balance,
            withdrawn,
        }
    }

    /// Add `amount` to `user`; returns the new balance
    pub fn deposit(&self, user: &str, amount: u32) -> u32 {
        let account = self.account(user);
        let mut balance = account.lock().unwrap_or_else(|e| e.into_inner());
        *balance = balance.saturating_add(amount);
        debug!("{} deposited {} gil", user, amount);
        *balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_withdraw_without_partial_takes_nothing() {
        let bank = GilBank::new();
        bank.deposit("viewer", 50);
        let result = bank.withdraw("viewer", 100, false);
        assert_eq!(
            result,
            Withdrawal {
                balance: 50,
                withdrawn: 0
            }
        );
        assert!(!result.covers(100));
    }

    #[test]
    fn test_withdraw_with_partial_empties_balance() {
        let bank = GilBank::new();
        bank.deposit("viewer", 50);
        let result = bank.withdraw("viewer", 100, true);
        assert_eq!(
            result,
            Withdrawal {
                balance: 0,
                withdrawn: 50
            }
        );
    }

    #[test]
    fn test_deposit_after_noop_restores_balance() {
        let bank = GilBank::new();
        bank.deposit("viewer", 250);
        let result = bank.withdraw("viewer", 100, true);
        assert!(result.covers(100));
        assert_eq!(bank.deposit("viewer", result.withdrawn), 250);
    }

    #[test]
    fn test_accounts_are_lazy_and_case_insensitive() {
        let bank = GilBank::with_starting_balance(10);
        assert_eq!(bank.balance("Viewer"), 10);
        bank.deposit("VIEWER", 5);
        assert_eq!(bank.balance("viewer"), 15);
        assert_eq!(bank.balance("someone"), 10);
    }

    #[test]
    fn test_deposit_saturates() {
        let bank = GilBank::with_starting_balance(u32::MAX - 1);
        assert_eq!(bank.deposit("viewer", 10), u32::MAX);
    }

    #[test]
    fn test_concurrent_withdrawals_never_double_spend() {
        let bank = Arc::new(GilBank::new());
        bank.deposit("viewer", 100);

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let bank = Arc::clone(&bank);
                thread::spawn(move || bank.withdraw("viewer", 30, false).withdrawn)
            })
            .collect();
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total, 90);
        assert_eq!(bank.balance("viewer"), 10);
    }
}
