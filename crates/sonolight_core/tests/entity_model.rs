use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use sonolight_core::{
    AccountingEntry, Entity, EntryType, Event, Invoice, InvoiceStatus, InvoiceType, Product,
    Quote, QuoteLine, QuoteStatus, Service, Settings, ValidationError,
};
use uuid::Uuid;

#[test]
fn product_uses_stored_field_names_and_defaults() {
    let id = Uuid::new_v4();
    let product: Product =
        serde_json::from_value(json!({"id": id, "ref": "SPK-1", "label": "Enceinte"})).unwrap();

    assert_eq!(product.reference, "SPK-1");
    assert_eq!(product.price_ttc_cent, 0);
    assert_eq!(product.unit, "unité");
    assert!(product.active);

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["ref"], json!("SPK-1"));
    assert!(value.get("reference").is_none());
}

#[test]
fn service_type_field_maps_to_kind() {
    let service: Service = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "type": "animation",
        "ref": "DJ-4H",
        "label": "Soirée DJ 4h",
        "price_ttc_cent": 60000
    }))
    .unwrap();

    assert_eq!(service.kind, "animation");
    assert_eq!(service.unit, "prestation");
    assert_eq!(serde_json::to_value(&service).unwrap()["type"], json!("animation"));
}

#[test]
fn service_requires_a_price() {
    let result = serde_json::from_value::<Service>(json!({
        "id": Uuid::new_v4(),
        "ref": "DJ-4H",
        "label": "Soirée DJ 4h"
    }));
    assert!(result.is_err());
}

#[test]
fn quote_reads_legacy_naive_timestamps_and_statuses() {
    let quote: Quote = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "client_id": Uuid::new_v4(),
        "status": "VALIDATED",
        "created_at": "2024-11-03T14:05:09.123456",
        "sent_at": "2024-11-04 09:00:00",
        "decided_at": null,
        "event_date": "2025-06-14",
        "lines": [{"label": "Soirée DJ", "qty": 1, "unit_price_ttc_cent": 60000, "item_type": "service"}],
        "total_ttc_cent": 60000
    }))
    .unwrap();

    assert_eq!(quote.status, QuoteStatus::Validated);
    assert_eq!(
        quote.created_at.date_naive(),
        NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
    );
    assert_eq!(
        quote.sent_at,
        Some(Utc.with_ymd_and_hms(2024, 11, 4, 9, 0, 0).unwrap())
    );
    assert!(quote.decided_at.is_none());
    assert_eq!(quote.lines[0].remise_pct, 0.0);
    quote.validate().unwrap();

    let written = serde_json::to_value(&quote).unwrap();
    let created = written["created_at"].as_str().unwrap();
    assert!(created.ends_with('Z'), "timestamps are written as UTC: {created}");
}

#[test]
fn quote_validation_reports_the_offending_line() {
    let mut quote = Quote::new(Uuid::new_v4());
    quote.lines.push(QuoteLine::new("Enceinte", 2.0, 4500));
    let mut discounted = QuoteLine::new("Lyre", 1.0, 3000);
    discounted.remise_pct = 120.0;
    quote.lines.push(discounted);

    assert_eq!(
        quote.validate(),
        Err(ValidationError::DiscountOutOfRange {
            line: 1,
            value: 120.0
        })
    );

    quote.lines[1].remise_pct = 10.0;
    quote.lines[0].label = " ".to_string();
    assert_eq!(
        quote.validate(),
        Err(ValidationError::LineLabelMissing { line: 0 })
    );
}

#[test]
fn quote_requires_a_client() {
    let quote = Quote::new(Uuid::nil());
    assert_eq!(
        quote.validate(),
        Err(ValidationError::NilId {
            field: "client_id"
        })
    );
}

#[test]
fn invoice_type_and_status_use_uppercase_names() {
    let mut invoice = Invoice::new(InvoiceType::Solde, Uuid::new_v4(), Uuid::new_v4());
    invoice.status = InvoiceStatus::Issued;

    let value = serde_json::to_value(&invoice).unwrap();
    assert_eq!(value["type"], json!("SOLDE"));
    assert_eq!(value["status"], json!("ISSUED"));

    let back: Invoice = serde_json::from_value(value).unwrap();
    assert_eq!(back.kind, InvoiceType::Solde);
}

#[test]
fn event_end_date_must_not_precede_start() {
    let mut event = Event::new("Festival", NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());
    event.end_date = NaiveDate::from_ymd_opt(2025, 7, 13);
    event.validate().unwrap();
    assert_eq!(event.last_day(), NaiveDate::from_ymd_opt(2025, 7, 13).unwrap());

    event.end_date = NaiveDate::from_ymd_opt(2025, 7, 11);
    assert!(matches!(
        event.validate(),
        Err(ValidationError::EventEndsBeforeStart { .. })
    ));
}

#[test]
fn accounting_entry_defaults_to_sale() {
    let entry: AccountingEntry = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "date": "2025-01-15",
        "amount_cent": 18000,
        "payment_method": "CB"
    }))
    .unwrap();

    assert_eq!(entry.kind, EntryType::Vente);
    assert_eq!(
        entry.date,
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    );
}

#[test]
fn settings_fill_defaults_and_keep_unknown_sections() {
    let settings: Settings = serde_json::from_value(json!({
        "company": {"name": "Sonolight", "siret": "123 456 789 00012"},
        "numbering": {"sequence": 42, "invoice_seq_acompte": 7},
        "pdf": {"logo": "logo.png"}
    }))
    .unwrap();

    assert_eq!(settings.company.name, "Sonolight");
    assert_eq!(settings.numbering.sequence, 42);
    assert_eq!(settings.numbering.quote_prefix, "DEV-");
    assert_eq!(settings.acompte_pct, 30.0);
    assert_eq!(settings.calendar.default_calendar_id, "primary");

    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(value["pdf"], json!({"logo": "logo.png"}));
    assert_eq!(value["numbering"]["invoice_seq_acompte"], json!(7));
}

#[test]
fn default_settings_serialize_to_an_object() {
    let value = serde_json::to_value(Settings::default()).unwrap();
    assert!(matches!(value, Value::Object(_)));
    assert_eq!(value["company"]["name"], json!("Ma Société"));
}
