use bpy331_aggregator::aggregator::aggregate;
use bpy331_aggregator::models::Payment;

// Helper to build an identity-resolved group member
fn group_member(account_ref: &str, amount: &str) -> Payment {
    let mut p = Payment::template("27-AUG-2026");
    p.bank_sort_code = "\"40-35-03\"".to_string();
    p.bank_account_num = "\"27123456\"".to_string();
    p.account_ref = format!("\"{}\"", account_ref);
    p.claim_ref = p.account_ref.clone();
    p.amount = format!("\"{}\"", amount);
    p
}

#[test]
fn test_first_payment_aggregation() {
    // payments to MRS RV O'DRISCROLL
    let amounts = ["535.71", "232.57", "465.01", "143.08", "4095.00"];
    let payments: Vec<_> = amounts
        .iter()
        .map(|a| group_member("A9876546", a))
        .collect();

    let aggregates = aggregate(payments).unwrap();
    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].amount, "\"5471.37\"");
}

#[test]
fn test_second_payment_aggregation() {
    // payments to BROADACRES HOUSING ASSOCIATION; many small amounts must
    // sum without cent-level drift
    let amounts = [
        "1503.33", "891.00", "422.13", "42.15", "166.59", "73.98", "95.12", "1922.78", "38.79",
        "140.38", "786.33", "41.76", "81.53", "33.75", "43.39", "212.97", "415.80", "142.14",
        "87.99", "531.25", "528.90",
    ];
    let payments: Vec<_> = amounts
        .iter()
        .map(|a| group_member("B1234566", a))
        .collect();

    let aggregates = aggregate(payments).unwrap();
    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].amount, "\"8202.06\"");
}

#[test]
fn test_third_payment_aggregation() {
    // a singleton group still produces an aggregate
    let aggregates = aggregate(vec![group_member("C0000001", "3025.00")]).unwrap();
    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].amount, "\"3025.00\"");
}

#[test]
fn test_member_order_does_not_change_the_sum() {
    let forward: Vec<_> = ["535.71", "232.57", "465.01", "143.08", "4095.00"]
        .iter()
        .map(|a| group_member("A9876546", a))
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = aggregate(forward).unwrap();
    let b = aggregate(reversed).unwrap();
    assert_eq!(a[0].amount, b[0].amount);
}

#[test]
fn test_distinct_keys_stay_separate() {
    let payments = vec![
        group_member("A9876546", "10.00"),
        group_member("B1234566", "20.00"),
        group_member("A9876546", "30.00"),
    ];
    let aggregates = aggregate(payments).unwrap();
    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].amount, "\"40.00\"");
    assert_eq!(aggregates[1].amount, "\"20.00\"");
}

#[test]
fn test_building_society_number_splits_groups() {
    let mut ordinary = group_member("NFI0000042", "10.00");
    ordinary.building_society_num = "\"0\"".to_string();
    let mut society = group_member("NFI0000042", "20.00");
    society.building_society_num = "\"7\"".to_string();

    let aggregates = aggregate(vec![ordinary, society]).unwrap();
    assert_eq!(aggregates.len(), 2);
}

#[test]
fn test_aggregate_copies_boilerplate_from_first_member() {
    let mut first = group_member("A9876546", "1.50");
    first.batch_run_id = "\"4196\"".to_string();
    first.payee_name = "\"MRS RV O'DRISCROLL\"".to_string();
    let second = group_member("A9876546", "2.50");

    let aggregates = aggregate(vec![first, second]).unwrap();
    assert_eq!(aggregates[0].batch_run_id, "\"4196\"");
    assert_eq!(aggregates[0].payee_name, "\"MRS RV O'DRISCROLL\"");
    assert_eq!(aggregates[0].payment_method, "\"BACS\"");
    assert_eq!(aggregates[0].amount, "\"4.00\"");
}

#[test]
fn test_quote_padded_amounts_parse() {
    let padded = group_member("A9876546", "10.05 ");
    let aggregates = aggregate(vec![padded, group_member("A9876546", "0.95")]).unwrap();
    assert_eq!(aggregates[0].amount, "\"11.00\"");
}
