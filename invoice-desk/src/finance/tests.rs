use super::*;

/// Percent with 2 decimal places: `pct(1234)` is 12.34
fn pct(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}

fn details_with_base(translation: i64) -> InvoiceDetails {
    let mut details = InvoiceDetails {
        subtotals: CostSubtotals {
            translation,
            ..Default::default()
        },
        ..Default::default()
    };
    recalculate(&mut details);
    details
}

#[test]
fn test_amount_from_percent_floors() {
    assert_eq!(amount_from_percent(500_000, pct(1000)), 50_000);
    assert_eq!(amount_from_percent(333_333, pct(1234)), 41_133);
    assert_eq!(amount_from_percent(99, pct(50)), 0);
    assert_eq!(amount_from_percent(0, pct(5000)), 0);
}

#[test]
fn test_percent_from_amount_rounds_two_places() {
    assert_eq!(percent_from_amount(500_000, 50_000), pct(1000));
    assert_eq!(percent_from_amount(3, 1), pct(3333));
    assert_eq!(percent_from_amount(3, 2), pct(6667));
    assert_eq!(percent_from_amount(0, 1_000), Decimal::ZERO);
}

#[test]
fn test_discount_and_advance_clamp_scenario() {
    let mut details = details_with_base(500_000);

    apply_change(&mut details, FinancialChange::DiscountPercent(pct(1000))).unwrap();
    assert_eq!(details.discount.amount, 50_000);
    assert_eq!(details.emergency.amount, 0);
    assert_eq!(details.payable(), 450_000);

    apply_change(&mut details, FinancialChange::AdvanceAmount(600_000)).unwrap();
    assert_eq!(details.advance.amount, 450_000);
    assert_eq!(details.advance.percent, pct(10000));
    assert_eq!(details.total_before_discount, 500_000);
    assert_eq!(details.total_after_discount, 450_000);
    assert_eq!(details.final_amount, 0);
}

#[test]
fn test_advance_clamp_is_idempotent() {
    let mut details = details_with_base(200_000);
    apply_change(&mut details, FinancialChange::AdvanceAmount(1_000_000)).unwrap();
    let first = details.clone();

    for _ in 0..3 {
        recalculate(&mut details);
        assert_eq!(details, first);
        assert!(details.advance.amount <= details.payable());
    }
    assert_eq!(details.final_amount, 0);
}

#[test]
fn test_percent_amount_round_trip() {
    let mut details = details_with_base(333_333);
    apply_change(&mut details, FinancialChange::DiscountPercent(pct(1234))).unwrap();
    let amount = details.discount.amount;

    apply_change(&mut details, FinancialChange::DiscountAmount(amount)).unwrap();
    assert_eq!(details.discount.percent, pct(1234));
    assert_eq!(details.discount.amount, amount);
}

#[test]
fn test_emergency_raises_payable_and_advance_base() {
    let mut details = details_with_base(400_000);
    apply_change(&mut details, FinancialChange::EmergencyPercent(pct(2500))).unwrap();
    apply_change(&mut details, FinancialChange::DiscountAmount(50_000)).unwrap();
    apply_change(&mut details, FinancialChange::AdvancePercent(pct(5000))).unwrap();

    assert_eq!(details.emergency.amount, 100_000);
    assert_eq!(details.discount.percent, pct(1250));
    assert_eq!(details.payable(), 450_000);
    assert_eq!(details.advance.amount, 225_000);
    assert_eq!(details.total_before_discount, 500_000);
    assert_eq!(details.total_after_discount, 450_000);
    assert_eq!(details.final_amount, 225_000);
}

#[test]
fn test_anchor_survives_base_change() {
    let mut details = details_with_base(100_000);
    apply_change(&mut details, FinancialChange::DiscountPercent(pct(1000))).unwrap();
    apply_change(&mut details, FinancialChange::EmergencyAmount(30_000)).unwrap();

    details.subtotals.translation = 200_000;
    recalculate(&mut details);

    // percent-anchored side keeps its percent
    assert_eq!(details.discount.percent, pct(1000));
    assert_eq!(details.discount.amount, 20_000);
    // amount-anchored side keeps its amount
    assert_eq!(details.emergency.amount, 30_000);
    assert_eq!(details.emergency.percent, pct(1500));
}

#[test]
fn test_discount_clamped_to_base() {
    let mut details = details_with_base(100_000);
    apply_change(&mut details, FinancialChange::DiscountAmount(250_000)).unwrap();
    assert_eq!(details.discount.amount, 100_000);
    assert_eq!(details.discount.percent, pct(10000));
    assert_eq!(details.total_after_discount, 0);
    assert_eq!(details.final_amount, 0);
}

#[test]
fn test_zero_base_gives_zero_percent() {
    let mut details = details_with_base(0);
    apply_change(&mut details, FinancialChange::EmergencyAmount(10_000)).unwrap();
    assert_eq!(details.emergency.percent, Decimal::ZERO);
    assert_eq!(details.total_before_discount, 10_000);
}

#[test]
fn test_negative_inputs_rejected_without_mutation() {
    let mut details = details_with_base(100_000);
    let before = details.clone();

    let errors = apply_change(&mut details, FinancialChange::DiscountAmount(-1)).unwrap_err();
    assert!(errors.has_field("details.discount_amount"));
    let errors =
        apply_change(&mut details, FinancialChange::AdvancePercent(pct(-500))).unwrap_err();
    assert!(errors.has_field("details.advance_percent"));
    assert_eq!(details, before);
}

#[test]
fn test_delivery_date_before_issue_rejected() {
    let mut details = details_with_base(100_000);
    let issue = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    apply_change(&mut details, FinancialChange::IssueDate(Some(issue))).unwrap();

    let errors = apply_change(
        &mut details,
        FinancialChange::DeliveryDate(NaiveDate::from_ymd_opt(2026, 3, 9)),
    )
    .unwrap_err();
    assert!(errors.has_field("details.delivery_date"));

    apply_change(
        &mut details,
        FinancialChange::DeliveryDate(NaiveDate::from_ymd_opt(2026, 3, 12)),
    )
    .unwrap();
    let errors = apply_change(
        &mut details,
        FinancialChange::IssueDate(NaiveDate::from_ymd_opt(2026, 3, 13)),
    )
    .unwrap_err();
    assert!(errors.has_field("details.issue_date"));
}

#[test]
fn test_unrelated_change_recomputes() {
    let mut details = details_with_base(100_000);
    apply_change(&mut details, FinancialChange::DiscountPercent(pct(1000))).unwrap();
    details.subtotals.translation = 300_000;

    apply_change(&mut details, FinancialChange::Remarks(Some("urgent".into()))).unwrap();
    assert_eq!(details.discount.amount, 30_000);
    assert_eq!(details.final_amount, 270_000);
}

#[test]
fn test_subtotals_and_document_count() {
    use shared::invoice::LineItemId;

    fn item(
        quantity: u32,
        translation: i64,
        extra: i64,
        judiciary: i64,
        fa: i64,
    ) -> InvoiceLineItem {
        InvoiceLineItem {
            id: LineItemId::new(),
            service_id: "svc".into(),
            service_name: "Svc".into(),
            category: "certificate".into(),
            quantity,
            copies: quantity,
            page_count: 1,
            extra_copies: 0,
            official: false,
            judiciary_seal: judiciary > 0,
            foreign_affairs_seal: fa > 0,
            dynamic_fees: vec![],
            remark: None,
            translation_price: translation,
            certified_copy_price: 1_000,
            registration_price: 2_000,
            judiciary_seal_price: judiciary,
            foreign_affairs_seal_price: fa,
            extra_copy_price: extra,
            total_price: translation + 1_000 + 2_000 + judiciary + fa + extra,
        }
    }
    let items = vec![item(3, 100_000, 20_000, 0, 0), item(2, 50_000, 0, 30_000, 40_000)];

    let subtotals = subtotals_from_items(&items);
    assert_eq!(subtotals.translation, 170_000);
    assert_eq!(subtotals.confirmation, 70_000);
    assert_eq!(subtotals.registration, 4_000);
    assert_eq!(subtotals.certified_copy, 2_000);
    assert_eq!(subtotals.base(), items.iter().map(|i| i.total_price).sum::<i64>());
    assert_eq!(document_count(&items), 5);
}

#[test]
fn test_financial_change_from_json() {
    let change: FinancialChange =
        serde_json::from_str(r#"{"field":"discount_percent","value":10}"#).unwrap();
    assert_eq!(change, FinancialChange::DiscountPercent(pct(1000)));

    let change: FinancialChange = serde_json::from_str(
        r#"{"field":"language_pair","value":{"source":"fa","target":"en"}}"#,
    )
    .unwrap();
    assert!(matches!(change, FinancialChange::LanguagePair { .. }));
}
