use chrono::NaiveDate;

use crate::models::Payment;
use crate::parser::{offsets, RawRecord};

/// Builds Payment entities from raw record blocks.
///
/// The posting stamp is computed once per run, not per record, so a run is
/// reproducible given a fixed run date.
pub struct PaymentFactory {
    run_stamp: String,
}

impl PaymentFactory {
    pub fn new(run_date: NaiveDate) -> Self {
        // BPY331 date convention, e.g. 30-AUG-2026
        let run_stamp = run_date.format("%d-%b-%Y").to_string().to_uppercase();
        Self { run_stamp }
    }

    pub fn run_stamp(&self) -> &str {
        &self.run_stamp
    }

    /// Copy the positional fields verbatim (quoting preserved) over the
    /// defaults template. No validation beyond what the parser guarantees.
    pub fn from_record(&self, record: &RawRecord) -> Payment {
        let mut payment = Payment::template(&self.run_stamp);
        payment.batch_run_id = record.field(offsets::BATCH_RUN_ID).to_string();
        payment.posting_ref = record.field(offsets::POSTING_REF).to_string();
        payment.account_ref = record.field(offsets::ACCOUNT_REF).to_string();
        payment.payee_name = record.field(offsets::PAYEE_NAME).to_string();
        payment.payee_address = record.field(offsets::PAYEE_ADDRESS).to_string();
        payment.claim_ref = record.field(offsets::CLAIM_REF).to_string();
        payment.amount = record.field(offsets::AMOUNT).to_string();
        payment.bank_sort_code = record.field(offsets::BANK_SORT_CODE).to_string();
        payment.bank_account_num = record.field(offsets::BANK_ACCOUNT_NUM).to_string();
        payment.bank_account_name = record.field(offsets::BANK_ACCOUNT_NAME).to_string();
        payment.building_society_num = record.field(offsets::BUILDING_SOCIETY_NUM).to_string();
        payment
    }
}
