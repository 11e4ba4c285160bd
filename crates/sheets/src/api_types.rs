use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
pub(crate) struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Deserialize)]
pub(crate) struct SheetProperties {
    pub title: String,
}

/// `ValueRange` as returned by `values.get`. Trailing empty cells are omitted
/// by the API and `values` is absent entirely for an empty range.
#[derive(Deserialize)]
pub(crate) struct ValueRangeResponse {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRange {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchUpdateRequest {
    pub value_input_option: &'static str,
    pub data: Vec<ValueRange>,
}

/// Renders a cell value the way the sheet displays it.
pub(crate) fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
