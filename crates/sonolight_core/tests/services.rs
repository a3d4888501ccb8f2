use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use sonolight_core::service::{
    AccountingService, ClientService, EventService, InvoiceService, OfferingService,
    ProductService, QuoteService,
};
use sonolight_core::{
    AccountingEntry, Client, Collection, EntryType, Event, Invoice, InvoiceType, JsonRepository,
    Product, Quote, RecordStore, SaveOutcome, Service, ServiceError, Settings, SettingsService,
};
use std::fs;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn client_service_require_reports_missing_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let service = ClientService::new(JsonRepository::new(&store));

    let id = service.add(&Client::new("Alice")).unwrap();
    assert_eq!(service.require(id).unwrap().name, "Alice");

    let missing = Uuid::new_v4();
    let err = service.require(missing).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { collection: Collection::Clients, id } if id == missing));
}

#[test]
fn update_of_unknown_record_surfaces_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let service = ClientService::new(JsonRepository::new(&store));

    let err = service.update(&Client::new("Ghost")).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn list_skips_invalid_rows_but_list_strict_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("clients.json"),
        json!([{"id": Uuid::new_v4(), "name": "Alice"}, {"name": "legacy"}]).to_string(),
    )
    .unwrap();
    let store = RecordStore::new(dir.path());
    let service = ClientService::new(JsonRepository::new(&store));

    assert_eq!(service.list().unwrap().len(), 1);
    assert!(matches!(service.list_strict(), Err(ServiceError::Repo(_))));
}

#[test]
fn catalog_lists_active_items_by_label_and_finds_by_reference() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let products = ProductService::new(JsonRepository::new(&store));
    let mut retired = Product::new("OLD-1", "Ancienne table", 1000);
    retired.active = false;
    products.add(&Product::new("SPK-1", "enceinte", 4500)).unwrap();
    products.add(&retired).unwrap();
    products.add(&Product::new("LGT-1", "Boule à facettes", 2000)).unwrap();

    let labels = products
        .list_active()
        .unwrap()
        .into_iter()
        .map(|product| product.label)
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["Boule à facettes", "enceinte"]);

    let found = products.find_by_reference(" spk-1 ").unwrap().unwrap();
    assert_eq!(found.reference, "SPK-1");
    assert!(products.find_by_reference("NOPE").unwrap().is_none());

    let offerings = OfferingService::new(JsonRepository::new(&store));
    offerings.add(&Service::new("DJ-4H", "Soirée DJ", 60000)).unwrap();
    assert_eq!(offerings.list_active().unwrap().len(), 1);
}

#[test]
fn quotes_and_invoices_are_looked_up_by_relation() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let quotes = QuoteService::new(JsonRepository::new(&store));
    let invoices = InvoiceService::new(JsonRepository::new(&store));
    let client_id = Uuid::new_v4();

    let mut older = Quote::new(client_id);
    older.created_at = Utc::now() - Duration::days(3);
    older.number = Some("DEV-0001".to_string());
    let newer = Quote::new(client_id);
    quotes.add(&older).unwrap();
    quotes.add(&newer).unwrap();
    quotes.add(&Quote::new(Uuid::new_v4())).unwrap();

    let listed = quotes.list_by_client(client_id).unwrap();
    assert_eq!(
        listed.iter().map(|quote| quote.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );
    assert_eq!(
        quotes.find_by_number("DEV-0001").unwrap().map(|quote| quote.id),
        Some(older.id)
    );

    invoices
        .add(&Invoice::new(InvoiceType::Acompte, older.id, client_id))
        .unwrap();
    invoices
        .add(&Invoice::new(InvoiceType::Solde, older.id, client_id))
        .unwrap();
    invoices
        .add(&Invoice::new(InvoiceType::Acompte, newer.id, client_id))
        .unwrap();

    let for_older = invoices.list_by_quote(older.id).unwrap();
    assert_eq!(
        for_older.iter().map(|invoice| invoice.kind).collect::<Vec<_>>(),
        vec![InvoiceType::Acompte, InvoiceType::Solde]
    );
    assert_eq!(invoices.list_by_client(client_id).unwrap().len(), 3);
}

#[test]
fn agenda_orders_events_and_filters_from_a_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let events = EventService::new(JsonRepository::new(&store));
    let quote_id = Uuid::new_v4();

    let mut festival = Event::new("Festival", day(2025, 7, 10));
    festival.end_date = Some(day(2025, 7, 13));
    festival.quote_id = Some(quote_id);
    events.add(&Event::new("Mariage", day(2025, 8, 2))).unwrap();
    events.add(&festival).unwrap();
    events.add(&Event::new("Anniversaire", day(2025, 6, 1))).unwrap();

    let titles = |list: Vec<Event>| list.into_iter().map(|e| e.title).collect::<Vec<_>>();
    assert_eq!(
        titles(events.list_by_date().unwrap()),
        vec!["Anniversaire", "Festival", "Mariage"]
    );
    assert_eq!(
        titles(events.list_from(day(2025, 7, 12)).unwrap()),
        vec!["Festival", "Mariage"]
    );
    assert_eq!(titles(events.list_for_quote(quote_id).unwrap()), vec!["Festival"]);
}

#[test]
fn accounting_journal_is_ordered_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let journal = AccountingService::new(JsonRepository::new(&store));
    let invoice_id = Uuid::new_v4();

    let mut late = AccountingEntry::new(EntryType::Solde, 42000);
    late.invoice_id = Some(invoice_id);
    let mut early = AccountingEntry::new(EntryType::Acompte, 18000);
    early.date = Utc::now() - Duration::days(30);
    early.invoice_id = Some(invoice_id);
    journal.add(&late).unwrap();
    journal.add(&early).unwrap();
    journal.add(&AccountingEntry::new(EntryType::Vente, 5000)).unwrap();

    let ordered = journal.list_journal().unwrap();
    assert_eq!(ordered[0].id, early.id);
    assert_eq!(journal.list_by_invoice(invoice_id).unwrap().len(), 2);
}

#[test]
fn settings_default_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());

    let settings = SettingsService::new(&store).load().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(!store.exists(Collection::Settings));
}

#[test]
fn settings_save_writes_one_record_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    let service = SettingsService::new(&store);
    let mut settings = Settings::default();
    settings.company.name = "Sonolight".to_string();
    settings.acompte_pct = 40.0;

    let first = service.save(&settings).unwrap();
    assert!(matches!(first, SaveOutcome::Written { .. }));
    assert_eq!(service.save(&settings).unwrap(), SaveOutcome::Unchanged);

    assert_eq!(store.load(Collection::Settings).unwrap().len(), 1);
    assert_eq!(service.load().unwrap(), settings);
}

#[test]
fn settings_save_keeps_extra_records_after_the_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"[{"acompte_pct": 40}, {"note": "second"}]"#,
    )
    .unwrap();
    let store = RecordStore::new(dir.path());
    let service = SettingsService::new(&store);

    let mut settings = service.load().unwrap();
    assert_eq!(settings.acompte_pct, 40.0);
    settings.company.name = "Sonolight".to_string();
    service.save(&settings).unwrap();

    let records = store.load(Collection::Settings).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["note"], json!("second"));
    assert_eq!(service.load().unwrap(), settings);
}

#[test]
fn settings_save_refuses_to_replace_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "[{").unwrap();
    let store = RecordStore::new(dir.path());

    assert!(SettingsService::new(&store)
        .save(&Settings::default())
        .is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{");
}

#[test]
fn settings_accept_legacy_bare_object_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"company": {"name": "Sonolight"}, "acompte_pct": 25}"#,
    )
    .unwrap();
    let store = RecordStore::new(dir.path());

    let settings = SettingsService::new(&store).load().unwrap();

    assert_eq!(settings.company.name, "Sonolight");
    assert_eq!(settings.acompte_pct, 25.0);
}
