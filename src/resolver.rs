use crate::error::{BatchError, Result};
use crate::identity_store::IdentityStore;
use crate::models::{quote, unquote, Payment};

/// The single capability the aggregation pipeline needs: derive the stable
/// grouping identity for one payment's routing fields.
///
/// Two interchangeable implementations exist; which one runs is chosen at
/// configuration time so the aggregator stays ignorant of how identities
/// are produced.
pub trait IdentityResolver {
    fn resolve(&mut self, payment: &Payment) -> Result<String>;
}

/// Compute the mod-10 (Luhn) check digit for a digit string.
///
/// Hyphens are stripped first. Every digit at an odd zero-based index is
/// doubled, two-digit products contribute both their digits, and the check
/// digit is the sum's complement mod 10.
pub fn luhn_check_digit(digits: &str) -> Result<u8> {
    let mut sum = 0u32;
    let mut count = 0usize;
    for c in digits.chars().filter(|c| *c != '-') {
        let d = c.to_digit(10).ok_or_else(|| {
            BatchError::InvalidRoutingData(format!("non-digit '{}' in '{}'", c, digits))
        })?;
        let d = if count % 2 == 1 { d * 2 } else { d };
        sum += d / 10 + d % 10;
        count += 1;
    }
    if count == 0 {
        return Err(BatchError::InvalidRoutingData(
            "empty digit string".to_string(),
        ));
    }
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Verify a number carrying a Luhn check digit in its last position.
///
/// Reads the digits right to left, re-applies the doubling rule, and
/// checks the digit sum is 0 mod 10.
pub fn luhn_verify(number: &str) -> Result<bool> {
    let mut sum = 0u32;
    for (i, c) in number.chars().rev().enumerate() {
        let d = c.to_digit(10).ok_or_else(|| {
            BatchError::InvalidRoutingData(format!("non-digit '{}' in '{}'", c, number))
        })?;
        let d = if i % 2 == 1 { d * 2 } else { d };
        sum += d / 10 + d % 10;
    }
    Ok(sum % 10 == 0)
}

/// Map a two-digit account-number prefix onto a letter, mod 26.
/// 0 and 26 both land on 'A', 27 on 'B'.
pub fn prefix_letter(prefix: &str) -> Result<char> {
    let n: u32 = prefix.parse().map_err(|_| {
        BatchError::InvalidRoutingData(format!("non-numeric account prefix '{}'", prefix))
    })?;
    Ok(char::from(b'A' + (n % 26) as u8))
}

/// Pure identity derivation from the routing fields alone.
///
/// Identity = prefix letter + remaining six account digits + sort-code
/// check digit. Deterministic and side-effect-free, so identical routing
/// fields group together without any shared state.
#[derive(Debug, Default)]
pub struct ChecksumResolver;

impl ChecksumResolver {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityResolver for ChecksumResolver {
    fn resolve(&mut self, payment: &Payment) -> Result<String> {
        let sort_code: String = unquote(&payment.bank_sort_code)
            .chars()
            .filter(|c| *c != '-')
            .collect();
        if sort_code.len() != 6 || !sort_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(BatchError::InvalidRoutingData(format!(
                "sort code '{}' is not six digits",
                unquote(&payment.bank_sort_code)
            )));
        }

        let account_num = unquote(&payment.bank_account_num);
        let prefix: String = account_num.chars().take(2).collect();
        if prefix.len() < 2 || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return Err(BatchError::InvalidRoutingData(format!(
                "account number '{}' lacks two leading digits",
                account_num
            )));
        }

        let letter = prefix_letter(&prefix)?;
        let check = luhn_check_digit(&sort_code)?;
        Ok(format!("{}{}{}", letter, &account_num[2..], check))
    }
}

/// Identity resolution against the external keyed store.
///
/// One synchronous round-trip per payment; the store owns identity
/// assignment and guarantees insert-if-absent semantics, so re-resolving
/// the same tuple is idempotent.
pub struct StoreBackedResolver<S: IdentityStore> {
    store: S,
}

impl<S: IdentityStore> StoreBackedResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: IdentityStore> IdentityResolver for StoreBackedResolver<S> {
    fn resolve(&mut self, payment: &Payment) -> Result<String> {
        self.store.resolve(
            unquote(&payment.bank_account_num),
            unquote(&payment.bank_sort_code),
            unquote(&payment.payee_name),
            unquote(&payment.building_society_num),
        )
    }
}

/// Resolve and assign grouping identities across a whole batch.
///
/// Sets `account_ref` and mirrors it into `claim_ref` for every ordinary
/// payment. Building-society payments keep the references the file
/// supplied, since routing-derived identities are not meaningful for that
/// channel. Any resolution failure aborts the batch; a payment without an
/// identity cannot be grouped correctly.
pub fn apply_identities(
    payments: &mut [Payment],
    resolver: &mut dyn IdentityResolver,
) -> Result<()> {
    for payment in payments.iter_mut() {
        if payment.is_building_society() {
            continue;
        }
        let identity = resolver.resolve(payment)?;
        payment.account_ref = quote(&identity);
        payment.claim_ref = quote(&identity);
    }
    Ok(())
}
