use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BatchError, Result};
use crate::models::{unquote, GroupKey, Payment};

/// Group identity-resolved payments by GroupKey and reduce each group to
/// one aggregate payment carrying the summed amount.
///
/// Groups appear in first-appearance order and members keep their input
/// order, so output is deterministic given deterministic grouping inputs.
/// All non-amount fields of an aggregate are copied from the group's first
/// member. A singleton group still yields an aggregate.
pub fn aggregate(payments: Vec<Payment>) -> Result<Vec<Payment>> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<GroupKey, Vec<Payment>> = HashMap::new();
    for payment in payments {
        let key = GroupKey::of(&payment);
        let members = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        members.push(payment);
    }

    let mut aggregates = Vec::with_capacity(order.len());
    for key in order {
        let members = groups
            .remove(&key)
            .expect("every ordered key has a group");
        aggregates.push(reduce(&members)?);
    }
    Ok(aggregates)
}

/// Sum a non-empty group into one payment
fn reduce(members: &[Payment]) -> Result<Payment> {
    let mut total = Decimal::ZERO;
    for member in members {
        total += parse_amount(&member.amount)?;
    }
    let mut total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(2);

    let mut aggregate = members[0].clone();
    aggregate.amount = format!("\"{}\"", total);
    Ok(aggregate)
}

/// Strip the on-disk quoting and parse an amount as an exact decimal
fn parse_amount(amount: &str) -> Result<Decimal> {
    let bare = unquote(amount);
    Decimal::from_str(bare)
        .map_err(|e| BatchError::MalformedInput(format!("unparseable amount '{}': {}", bare, e)))
}
