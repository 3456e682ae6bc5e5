use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    pub event_type: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionReport {
    pub total: u64,
    pub by_date: Vec<DateCount>,
    pub by_type: Vec<TypeCount>,
}
