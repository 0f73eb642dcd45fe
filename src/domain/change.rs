use crate::domain::money::{DenomId, Denomination, PaymentTally};
use crate::error::{Result, VendingError};

/// Computes the exact change for `amount_owed` out of `pool`, where `pool`
/// is the ledger's denomination set ordered descending by face value.
///
/// The money in `just_received` is folded into a working copy of the pool
/// first: coins the customer just inserted are immediately available to
/// hand back as their own change, exactly as in a physical machine. The
/// authoritative pool is never touched; callers commit the returned list
/// separately once the whole checkout succeeds.
///
/// Selection is first-fit greedy: at each step the highest-valued
/// denomination with `value <= remaining` and stock left is taken, one
/// unit at a time, with no backtracking. A decomposition reachable only
/// through a different pick is reported as `InsufficientChange`.
///
/// The returned list is ordered as the recursion emits it: last-chosen
/// unit first, first-chosen (highest value) last.
///
/// Callers guarantee `amount_owed >= 0`.
pub fn make_change(
    amount_owed: i64,
    pool: &[Denomination],
    just_received: &PaymentTally,
) -> Result<Vec<DenomId>> {
    let mut working: Vec<Denomination> = pool.to_vec();
    for denom in working.iter_mut() {
        denom.stock += just_received.count(&denom.id());
    }

    if amount_owed == 0 {
        return Ok(Vec::new());
    }

    next_unit(amount_owed, working)
}

fn next_unit(amount_owed: i64, mut working: Vec<Denomination>) -> Result<Vec<DenomId>> {
    let Some(pick) = working
        .iter_mut()
        .find(|d| d.value <= amount_owed && d.stock > 0)
    else {
        return Err(VendingError::InsufficientChange);
    };

    pick.stock -= 1;
    let chosen = pick.id();
    let remaining = amount_owed - chosen.value;

    if remaining != 0 {
        let mut list = next_unit(remaining, working)?;
        list.push(chosen);
        Ok(list)
    } else {
        Ok(vec![chosen])
    }
}
