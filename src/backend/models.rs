use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

// Row shape of the listing table, shared by the page, the JSON export body
// and the local workbook.
//
//  순번 | 아파트명 | 거래유형 | 층수 | 월세 | 거래가격 | 면적(m²) | 방향 | 등록일 | 동 | 중개사무소 | 특징
//  ^ row number, assigned by the browser, never sent by the backend

pub const ROW_NUMBER_COLUMN: &str = "순번";
pub const COLUMN_COUNT: usize = 12;

pub const COLUMNS: [&str; COLUMN_COUNT] = [
    ROW_NUMBER_COLUMN,
    "아파트명",
    "거래유형",
    "층수",
    "월세",
    "거래가격",
    "면적(m²)",
    "방향",
    "등록일",
    "동",
    "중개사무소",
    "특징",
];

/// An apartment complex as returned by the region search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complex {
    pub complex_no: String,
    pub complex_name: String,
}

impl Complex {
    pub fn new(complex_no: impl Into<String>, complex_name: impl Into<String>) -> Self {
        Self {
            complex_no: complex_no.into(),
            complex_name: complex_name.into(),
        }
    }

    /// Option text in the complex selector.
    pub fn label(&self) -> String {
        format!("{} ({})", self.complex_name, self.complex_no)
    }

    /// Entries without a usable `complexNo` are skipped by the caller.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        let raw = RawComplex::deserialize(value).ok()?;
        let complex_no = raw.complex_no.as_ref().map(cell_text)?;
        if complex_no.trim().is_empty() {
            return None;
        }

        let complex_name = raw.complex_name.as_ref().map(cell_text).unwrap_or_default();
        Some(Self::new(complex_no, complex_name))
    }
}

#[derive(Debug, Deserialize)]
struct RawComplex {
    // The search API sends this as a string, older builds as a number.
    #[serde(rename = "complexNo", default)]
    complex_no: Option<Value>,
    #[serde(rename = "complexName", default)]
    complex_name: Option<Value>,
}

/// Fixed descriptive fields of a listing, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    ApartmentName,
    TradeType,
    Floor,
    MonthlyRent,
    Price,
    Area,
    Direction,
    ConfirmedAt,
    Building,
    Realtor,
    Features,
}

impl ListingField {
    pub const ALL: [ListingField; COLUMN_COUNT - 1] = [
        ListingField::ApartmentName,
        ListingField::TradeType,
        ListingField::Floor,
        ListingField::MonthlyRent,
        ListingField::Price,
        ListingField::Area,
        ListingField::Direction,
        ListingField::ConfirmedAt,
        ListingField::Building,
        ListingField::Realtor,
        ListingField::Features,
    ];

    /// Key used by the backend for this field.
    pub fn key(self) -> &'static str {
        match self {
            ListingField::ApartmentName => "아파트명",
            ListingField::TradeType => "거래유형",
            ListingField::Floor => "층수",
            ListingField::MonthlyRent => "월세",
            ListingField::Price => "거래가격",
            ListingField::Area => "면적(m²)",
            ListingField::Direction => "방향",
            ListingField::ConfirmedAt => "등록일",
            ListingField::Building => "동",
            ListingField::Realtor => "중개사무소",
            ListingField::Features => "특징",
        }
    }
}

/// One listing as sent by the backend: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ListingRecord(Map<String, Value>);

impl ListingRecord {
    /// Text for a table cell. Missing keys and nulls become "".
    pub fn field(&self, field: ListingField) -> String {
        self.0.get(field.key()).map(cell_text).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for ListingRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(cell_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// A table row on its way to a spreadsheet, keyed by the column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    cells: [String; COLUMN_COUNT],
}

impl ExportRow {
    pub fn new(cells: [String; COLUMN_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }
}

impl Serialize for ExportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COLUMN_COUNT))?;
        for (name, cell) in COLUMNS.iter().zip(self.cells.iter()) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Body of the export request: `{"data": [row, ...]}`.
#[derive(Debug, Serialize)]
pub struct ExportRequest<'a> {
    pub data: &'a [ExportRow],
}
