use crate::domain::model::Region;
use crate::utils::error::{HomeScoreError, Result};
use crate::utils::validation::{validate_region_codes, Validate};
use std::collections::BTreeMap;

const STATE_CODES: &[(&str, &str)] = &[
    ("Alabama", "01"),
    ("Alaska", "02"),
    ("Arizona", "04"),
    ("Arkansas", "05"),
    ("California", "06"),
    ("Colorado", "08"),
    ("Connecticut", "09"),
    ("Delaware", "10"),
    ("Florida", "12"),
    ("Georgia", "13"),
    ("Hawaii", "15"),
    ("Idaho", "16"),
    ("Illinois", "17"),
    ("Indiana", "18"),
    ("Iowa", "19"),
    ("Kansas", "20"),
    ("Kentucky", "21"),
    ("Louisiana", "22"),
    ("Maine", "23"),
    ("Maryland", "24"),
    ("Massachusetts", "25"),
    ("Michigan", "26"),
    ("Minnesota", "27"),
    ("Mississippi", "28"),
    ("Missouri", "29"),
    ("Montana", "30"),
    ("Nebraska", "31"),
    ("Nevada", "32"),
    ("New Hampshire", "33"),
    ("New Jersey", "34"),
    ("New Mexico", "35"),
    ("New York", "36"),
    ("North Carolina", "37"),
    ("North Dakota", "38"),
    ("Ohio", "39"),
    ("Oklahoma", "40"),
    ("Oregon", "41"),
    ("Pennsylvania", "42"),
    ("Rhode Island", "44"),
    ("South Carolina", "45"),
    ("South Dakota", "46"),
    ("Tennessee", "47"),
    ("Texas", "48"),
    ("Utah", "49"),
    ("Vermont", "50"),
    ("Virginia", "51"),
    ("Washington", "53"),
    ("West Virginia", "54"),
    ("Wisconsin", "55"),
    ("Wyoming", "56"),
];

/// Read-only mapping of region name to its census code.
///
/// Built once at startup, either from the 50 states or from the `[regions]`
/// table of the configuration file, and handed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    codes: BTreeMap<String, String>,
}

impl RegionTable {
    pub fn new(codes: BTreeMap<String, String>) -> Result<Self> {
        let table = Self { codes };
        table.validate()?;
        Ok(table)
    }

    pub fn code_for(&self, name: &str) -> Result<&str> {
        self.codes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| HomeScoreError::UnknownRegion {
                name: name.to_string(),
            })
    }

    pub fn resolve(&self, name: &str) -> Result<Region> {
        let code = self.code_for(name)?;
        Ok(Region {
            name: name.to_string(),
            code: code.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self {
            codes: STATE_CODES
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }
}

impl Validate for RegionTable {
    fn validate(&self) -> Result<()> {
        if self.codes.is_empty() {
            return Err(HomeScoreError::Config {
                field: "regions".to_string(),
                message: "region table cannot be empty".to_string(),
            });
        }
        validate_region_codes("regions", &self.codes)
    }
}
