/// One BPY331 payment instruction
///
/// Field values keep their on-disk double quoting (including any trailing
/// whitespace inside the quotes) until a consumer asks for the bare value
/// via [`unquote`]. Fields not supplied at construction carry the format's
/// default template; the placeholder defaults for numeric-looking fields
/// must never be arithmetically interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub interface_source: String,
    pub batch_run_id: String,
    pub posting_ref: String,
    pub account_ref: String,
    pub payee_type: String,
    pub payee_name: String,
    pub payee_address: String,
    pub claim_ref: String,
    pub claimant_name: String,
    pub claimant_address: String,
    pub amount: String,
    pub posting_start_date: String,
    pub posting_end_date: String,
    pub payment_method: String,
    pub creditor_account_ref: String,
    pub bank_sort_code: String,
    pub bank_account_num: String,
    pub bank_account_name: String,
    pub building_society_num: String,
    pub post_office_name: String,
    pub post_office_address: String,
    pub collection_flag: String,
    pub document_num: String,
    pub document_type: String,
    pub replacement_flag: String,
    pub effective_date: String,
    pub blank_one: String,
    pub blank_two: String,
    pub document_date: String,
}

/// Number of lines one serialized payment occupies
pub const FIELD_COUNT: usize = 29;

impl Payment {
    /// Default template: every boilerplate field set to its format-mandated
    /// value, the three posting-date fields stamped with the quoted run
    /// stamp, and placeholder values for the fields a record must supply.
    pub fn template(run_stamp: &str) -> Self {
        let stamped = format!("\"{}\"", run_stamp);
        Self {
            interface_source: "\"BEN\"".to_string(),
            batch_run_id: "\"batch_run_id\"".to_string(),
            posting_ref: "\"posting_ref\"".to_string(),
            account_ref: "\"account_ref\"".to_string(),
            payee_type: "\"CL\"".to_string(),
            payee_name: "\"payee_name\"".to_string(),
            payee_address: "\"Aggregated DHC UC Payment\"".to_string(),
            claim_ref: "\"Aggregated DHC UC Payment\"".to_string(),
            claimant_name: "\"Aggregated DHC UC Payment\"".to_string(),
            claimant_address: "\"Aggregated DHC UC Payment\"".to_string(),
            amount: "\"amount\"".to_string(),
            posting_start_date: stamped.clone(),
            posting_end_date: stamped.clone(),
            payment_method: "\"BACS\"".to_string(),
            creditor_account_ref: "\"\"".to_string(),
            bank_sort_code: "\"bank_sort_code\"".to_string(),
            bank_account_num: "\"bank_account_num\"".to_string(),
            bank_account_name: "\"bank_account_name\"".to_string(),
            building_society_num: "\"0\"".to_string(),
            post_office_name: "\"\"".to_string(),
            post_office_address: "\"\"".to_string(),
            collection_flag: "\"N\"".to_string(),
            document_num: "\"\"".to_string(),
            document_type: "\"\"".to_string(),
            replacement_flag: "\"N\"".to_string(),
            effective_date: stamped,
            blank_one: "\"\"".to_string(),
            blank_two: "\"\"".to_string(),
            document_date: "\"\"".to_string(),
        }
    }

    /// All fields in the exact order the file format writes them
    pub fn write_order(&self) -> [&str; FIELD_COUNT] {
        [
            &self.interface_source,
            &self.batch_run_id,
            &self.posting_ref,
            &self.account_ref,
            &self.payee_type,
            &self.payee_name,
            &self.payee_address,
            &self.claim_ref,
            &self.claimant_name,
            &self.claimant_address,
            &self.amount,
            &self.posting_start_date,
            &self.posting_end_date,
            &self.payment_method,
            &self.creditor_account_ref,
            &self.bank_sort_code,
            &self.bank_account_num,
            &self.bank_account_name,
            &self.building_society_num,
            &self.post_office_name,
            &self.post_office_address,
            &self.collection_flag,
            &self.document_num,
            &self.document_type,
            &self.replacement_flag,
            &self.effective_date,
            &self.blank_one,
            &self.blank_two,
            &self.document_date,
        ]
    }

    /// True for payments routed through the building-society channel,
    /// which keep their file-supplied account and claim references
    pub fn is_building_society(&self) -> bool {
        unquote(&self.building_society_num) != "0"
    }
}

/// Strip the surrounding double quotes and any whitespace around the value
///
/// Quoted values in the file may carry trailing whitespace before the
/// closing quote; the bare value never does.
pub fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"').trim()
}

/// Quote a bare value back into the file's convention
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Aggregation key: resolved account identity plus the building-society
/// number, both normalized. Two payments aggregate together iff both parts
/// match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn of(payment: &Payment) -> Self {
        GroupKey(format!(
            "{}/{}",
            unquote(&payment.account_ref),
            unquote(&payment.building_society_num)
        ))
    }
}
