//! Record browsing commands: `tabs`, `list`, `show`, `add-client`.

use super::{output, AddClientArgs};
use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use sonolight_core::model::format_cents;
use sonolight_core::service::ClientService;
use sonolight_core::store::record_id;
use sonolight_core::{Client, Collection, JsonRepository, Record, RecordId, RecordStore, Tab};

/// Keys tried in order to label a record in listings.
const SUMMARY_KEYS: [&str; 6] = ["name", "label", "title", "number", "ref", "type"];

/// Integer cent fields shown after the label, first match wins.
const AMOUNT_KEYS: [&str; 3] = ["total_ttc_cent", "price_ttc_cent", "amount_cent"];

pub fn execute_tabs(store: &RecordStore) -> Result<()> {
    output::header("Tabs", None);
    for tab in Tab::all() {
        let state = if store.exists(tab.collection) {
            tab.collection.file_name().to_string()
        } else {
            format!("{} (missing)", tab.collection.file_name())
        };
        output::field(tab.label, state);
    }
    Ok(())
}

pub fn execute_list(store: &RecordStore, collection: &str) -> Result<()> {
    let collection = parse_collection(collection)?;
    let records = store.load(collection)?;

    output::header(Tab::for_collection(collection).label, Some(records.len()));
    if records.is_empty() {
        output::raw("No records.");
        return Ok(());
    }
    for record in &records {
        output::print_record_row(record_id(record), &summarize(record));
    }
    Ok(())
}

pub fn execute_show(store: &RecordStore, collection: &str, id: &str) -> Result<()> {
    let collection = parse_collection(collection)?;
    let id = RecordId::parse_str(id.trim()).with_context(|| format!("invalid record id `{id}`"))?;

    let record = store
        .load(collection)?
        .into_iter()
        .find(|record| record_id(record) == Some(id))
        .ok_or_else(|| anyhow!("{collection} record not found: {id}"))?;

    output::raw(&serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub fn execute_add_client(store: &RecordStore, args: AddClientArgs) -> Result<()> {
    let mut client = Client::new(args.name.trim());
    client.email = args.email.filter(|value| !value.trim().is_empty());
    client.phone = args.phone.filter(|value| !value.trim().is_empty());
    client.notes = args.notes.filter(|value| !value.trim().is_empty());

    let id = ClientService::new(JsonRepository::new(store)).add(&client)?;
    output::created("Client", id);
    Ok(())
}

fn parse_collection(raw: &str) -> Result<Collection> {
    match Collection::parse(raw) {
        Some(collection) => Ok(collection),
        None => {
            let known = Collection::ALL
                .iter()
                .map(|collection| collection.name())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("unknown collection `{raw}` (expected one of: {known})")
        }
    }
}

fn summarize(record: &Record) -> String {
    let label = SUMMARY_KEYS
        .iter()
        .find_map(|key| {
            record
                .get(*key)
                .and_then(Value::as_str)
                .filter(|value| !value.trim().is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} field(s)", record.len()));

    let amount = AMOUNT_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_i64));
    match amount {
        Some(cents) => format!("{label}  {}", format_cents(cents)),
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_collection, summarize};
    use serde_json::json;

    #[test]
    fn summarize_prefers_name_then_label() {
        let record = json!({"label": "Enceinte", "name": "Alice"});
        assert_eq!(summarize(record.as_object().unwrap()), "Alice");

        let record = json!({"label": "Enceinte", "ref": "SPK-1"});
        assert_eq!(summarize(record.as_object().unwrap()), "Enceinte");
    }

    #[test]
    fn summarize_skips_blank_name() {
        let record = json!({"name": "   ", "label": "Enceinte"});
        assert_eq!(summarize(record.as_object().unwrap()), "Enceinte");

        let record = json!({"name": "", "title": "Mariage Dupont"});
        assert_eq!(summarize(record.as_object().unwrap()), "Mariage Dupont");
    }

    #[test]
    fn summarize_appends_amount_in_euros() {
        let record = json!({"ref": "SPK-1", "label": "Enceinte", "price_ttc_cent": 12_000});
        assert_eq!(summarize(record.as_object().unwrap()), "Enceinte  120.00 €");

        let record = json!({"number": "F-2026-004", "total_ttc_cent": 123_456});
        assert_eq!(summarize(record.as_object().unwrap()), "F-2026-004  1234.56 €");
    }

    #[test]
    fn summarize_falls_back_to_field_count() {
        let record = json!({"note": 100, "date": 3});
        assert_eq!(summarize(record.as_object().unwrap()), "2 field(s)");

        let record = json!({"amount_cent": -250, "date": 3});
        assert_eq!(summarize(record.as_object().unwrap()), "2 field(s)  -2.50 €");
    }

    #[test]
    fn unknown_collection_lists_known_names() {
        let err = parse_collection("gigs").unwrap_err();
        assert!(err.to_string().contains("accounting_entries"));
    }
}
