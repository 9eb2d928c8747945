use log::{debug, warn};
use std::collections::BTreeMap;

use super::PositionState;
use crate::transactions::{Transaction, TransactionSide};

/// Replays one instrument's transactions into a [`PositionState`].
///
/// Transactions are ordered by date; same-day transactions keep their input
/// order (the sort is stable). The caller groups by instrument first; a
/// transaction for another instrument is logged and still applied. A
/// transaction that would push the position past the decimal range is logged,
/// left out and counted in `skipped_count`.
pub fn fold(transactions: &[Transaction]) -> PositionState {
    let instrument_key = transactions
        .first()
        .map(|t| t.instrument_key.clone())
        .unwrap_or_default();
    let mut state = PositionState::new(instrument_key);

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.date);

    for transaction in ordered {
        if transaction.instrument_key != state.instrument_key {
            warn!(
                "Transaction for {} folded into position {}. Transactions should be grouped by instrument first.",
                transaction.instrument_key, state.instrument_key
            );
        }
        let applied = match transaction.side {
            TransactionSide::Buy => state.apply_buy(transaction),
            TransactionSide::Sell => state.apply_sell(transaction),
        };
        if let Err(e) = applied {
            warn!(
                "Skipping {} of {} on {}: {}",
                transaction.side.as_str(),
                state.instrument_key,
                transaction.date,
                e
            );
            state.skipped_count += 1;
        }
    }

    debug!(
        "Folded {} transactions for {}: quantity {} at average cost {}",
        transactions.len(),
        state.instrument_key,
        state.quantity_held,
        state.average_cost
    );
    state
}

/// Groups transactions by instrument key, keeping each group in input order.
pub fn group_by_instrument(transactions: Vec<Transaction>) -> BTreeMap<String, Vec<Transaction>> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        groups
            .entry(transaction.instrument_key.clone())
            .or_default()
            .push(transaction);
    }
    groups
}
