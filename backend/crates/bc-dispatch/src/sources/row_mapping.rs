use crate::sources::SheetRow;

use bc_core::Customer;

use serde_json::{Map, Value};

const NAME_HEADERS: &[&str] = &["name", "full name", "customer"];
const PHONE_HEADERS: &[&str] = &["phone", "number", "mobile", "whatsapp"];
const EMAIL_HEADERS: &[&str] = &["email", "e-mail"];

/// Turn a raw values grid into rows keyed by the first row's headers.
///
/// Blank headers become `col{n}` (1-based); cells missing at the end of a
/// short row become `null`.
pub fn rows_to_maps(values: Vec<Vec<Value>>) -> Vec<SheetRow> {
    let mut rows = values.into_iter();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let header = cell_text(cell).trim().to_string();
            if header.is_empty() {
                format!("col{}", i + 1)
            } else {
                header
            }
        })
        .collect();

    rows.map(|row| {
        let mut cells = row.into_iter();
        headers
            .iter()
            .map(|header| (header.clone(), cells.next().unwrap_or(Value::Null)))
            .collect::<Map<String, Value>>()
    })
    .collect()
}

/// Map a sheet row onto a customer; unrecognised columns (including any
/// sheet-side `id`) go to `metadata`.
pub fn row_to_customer(row: &SheetRow) -> Customer {
    let mut customer = Customer {
        id: None,
        name: None,
        phone: None,
        email: None,
        metadata: Value::Object(Map::new()),
        created_at: None,
    };
    let mut metadata = Map::new();

    for (header, value) in row {
        let key = header.trim().to_ascii_lowercase();
        let text = non_empty_text(value);

        if PHONE_HEADERS.contains(&key.as_str()) && customer.phone.is_none() {
            customer.phone = text;
        } else if NAME_HEADERS.contains(&key.as_str()) && customer.name.is_none() {
            customer.name = text;
        } else if EMAIL_HEADERS.contains(&key.as_str()) && customer.email.is_none() {
            customer.email = text;
        } else {
            metadata.insert(header.clone(), value.clone());
        }
    }

    customer.metadata = Value::Object(metadata);
    customer
}

/// Order `row`'s values by `headers`. Missing or null fields become "".
/// With no headers the row's own key order is used.
pub fn align_to_headers(headers: &[String], row: &SheetRow) -> Vec<String> {
    if headers.is_empty() {
        return row.values().map(cell_text).collect();
    }

    headers
        .iter()
        .map(|header| row.get(header).map(cell_text).unwrap_or_default())
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    let text = cell_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
