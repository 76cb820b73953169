use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;

use crate::encoding::repair_str;

/// The label given to every company that has no explicit sector.
pub const OTHER_SECTOR: &str = "Other";

const BANKING: &str = "Banking & Finance";
const INDUSTRIAL: &str = "Manufacturing, Industrial & Energy";
const TMT: &str = "TMT";
const BUSINESS: &str = "Business Services";
const PROFESSIONAL: &str = "Professional";
const PUBLIC: &str = "Public Sector / Regulatory Body / Charity";
const HEALTH: &str = "Life Sciences & Healthcare";

const DEFAULT_SECTORS: &[(&str, &str)] = &[
    ("Barclays", BANKING),
    ("Morgan Stanley", BANKING),
    ("Societe Generale", BANKING),
    ("JP Morgan", BANKING),
    ("Citigroup", BANKING),
    ("EBRD", BANKING),
    ("HSBC", BANKING),
    ("Deutsche Bank", BANKING),
    ("Northern Trust", BANKING),
    ("Revolut", BANKING),
    ("State Street", BANKING),
    ("Mitsubishi UF J Financial Group", BANKING),
    ("Moody's", BANKING),
    ("Barclays Capital", BANKING),
    (
        "European Bank for Construction and Redevelopment (EBRD)",
        BANKING,
    ),
    ("BGC Brokers L.P.", BANKING),
    ("BP", INDUSTRIAL),
    ("TotalEnergies", INDUSTRIAL),
    ("Hexaware Technologies", TMT),
    ("Infosys Consulting", TMT),
    ("Thomson Reuters", TMT),
    ("Cision", TMT),
    ("WeWork", BUSINESS),
    ("JLL", BUSINESS),
    ("Adamson Associates (International) Ltd", BUSINESS),
    ("KPMG", PROFESSIONAL),
    ("Ernst Young (EY)", PROFESSIONAL),
    ("Herbert Smith Freehills Kramer", PROFESSIONAL),
    ("General Optical Council", PUBLIC),
    ("WaterAid", PUBLIC),
    ("UCL", PUBLIC),
    ("Transport for London", PUBLIC),
    ("MDU", HEALTH),
    ("Hvivo Plc", HEALTH),
    ("Bupa Health and Dental Centre", HEALTH),
    ("Waitrose & Partners", OTHER_SECTOR),
    ("Canary Wharf Group", OTHER_SECTOR),
    ("Westferry Circus Property Ltd", OTHER_SECTOR),
    ("Paul Smith", OTHER_SECTOR),
    ("Ocean Network Express", OTHER_SECTOR),
    ("Blacklock", OTHER_SECTOR),
    ("Third Space", OTHER_SECTOR),
];

lazy_static! {
    static ref DEFAULT_TABLE: SectorTable = SectorTable::default_table();
}

/// Company values that mean the respondent did not name a company.
const DEFAULT_UNLISTED: &[&str] = &["1. Company not listed", "Visitor", "None"];

/// Maps company names to sectors.
///
/// The lookup is total: anything unknown, including a missing company,
/// belongs to [OTHER_SECTOR].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorTable {
    sectors: HashMap<String, String>,
    unlisted: BTreeSet<String>,
}

impl SectorTable {
    /// An empty table that only knows the unlisted-company markers.
    pub fn new() -> SectorTable {
        SectorTable {
            sectors: HashMap::new(),
            unlisted: DEFAULT_UNLISTED.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn default_table() -> SectorTable {
        let mut table = SectorTable::new();
        for (company, sector) in DEFAULT_SECTORS.iter() {
            table.insert(company, sector);
        }
        table
    }

    pub fn from_pairs<'a, I>(pairs: I) -> SectorTable
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = SectorTable::new();
        table.extend(pairs);
        table
    }

    pub fn extend<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (company, sector) in pairs {
            self.insert(company, sector);
        }
    }

    pub fn insert(&mut self, company: &str, sector: &str) {
        self.sectors
            .insert(company_key(company), sector.trim().to_string());
    }

    pub fn add_unlisted(&mut self, marker: &str) {
        self.unlisted.insert(company_key(marker));
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn lookup_sector(&self, company: Option<&str>) -> String {
        match company {
            Some(c) if !self.is_unlisted(Some(c)) => match self.sectors.get(&company_key(c)) {
                Some(sector) if !sector.is_empty() => sector.clone(),
                _ => OTHER_SECTOR.to_string(),
            },
            _ => OTHER_SECTOR.to_string(),
        }
    }

    /// True for a missing company and for the markers such as `Visitor`.
    pub fn is_unlisted(&self, company: Option<&str>) -> bool {
        match company {
            None => true,
            Some(c) => {
                let key = company_key(c);
                key.is_empty() || self.unlisted.contains(&key)
            }
        }
    }
}

impl Default for SectorTable {
    fn default() -> Self {
        SectorTable::new()
    }
}

/// Looks up a company in the built-in table.
pub fn lookup_sector(company: Option<&str>) -> String {
    DEFAULT_TABLE.lookup_sector(company)
}

// Spreadsheets carry the same mis-decoded apostrophes as the responses.
fn company_key(company: &str) -> String {
    repair_str(company.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_companies() {
        let t = SectorTable::default_table();
        assert_eq!(t.lookup_sector(Some("HSBC")), "Banking & Finance");
        assert_eq!(t.lookup_sector(Some(" KPMG ")), "Professional");
        assert_eq!(t.lookup_sector(Some("Canary Wharf Group")), "Other");
    }

    #[test]
    fn unknown_and_missing_companies() {
        let t = SectorTable::default_table();
        assert_eq!(t.lookup_sector(None), OTHER_SECTOR);
        assert_eq!(t.lookup_sector(Some("Acme Widgets")), OTHER_SECTOR);
        assert_eq!(t.lookup_sector(Some("1. Company not listed")), OTHER_SECTOR);
        assert_eq!(t.lookup_sector(Some("")), OTHER_SECTOR);
        assert_eq!(SectorTable::new().lookup_sector(Some("HSBC")), OTHER_SECTOR);
        assert_eq!(lookup_sector(None), OTHER_SECTOR);
        assert_eq!(lookup_sector(Some("UCL")), PUBLIC);
    }

    #[test]
    fn mis_decoded_company_names() {
        let t = SectorTable::default_table();
        assert_eq!(
            t.lookup_sector(Some("Moody\u{e2}\u{20ac}\u{2122}s")),
            "Banking & Finance"
        );
        assert_eq!(t.lookup_sector(Some("Moody's")), "Banking & Finance");
    }

    #[test]
    fn unlisted_markers() {
        let mut t = SectorTable::from_pairs([("Acme", "Retail")]);
        assert!(t.is_unlisted(None));
        assert!(t.is_unlisted(Some("Visitor")));
        assert!(t.is_unlisted(Some("None")));
        assert!(!t.is_unlisted(Some("Acme")));
        t.add_unlisted("Acme");
        assert!(t.is_unlisted(Some("Acme")));
        assert_eq!(t.lookup_sector(Some("Acme")), OTHER_SECTOR);
    }

    #[test]
    fn configured_pairs_override_defaults() {
        let mut t = SectorTable::default_table();
        let n = t.len();
        t.extend([("HSBC", "Retail Banking"), ("Acme", "Retail")]);
        assert_eq!(t.len(), n + 1);
        assert_eq!(t.lookup_sector(Some("HSBC")), "Retail Banking");
    }
}
