// src/config/regions.rs

//! Region id → ISO3 lookup, country-level only.
//!
//! Subnational units have no entry here and are skipped by the merge.
//! Passed into the merge as a parameter so tests can substitute a table.

pub const REGION_ISO3: &[(&str, &str)] = &[
    ("us", "USA"), ("cn", "CHN"), ("de", "DEU"), ("jp", "JPN"), ("gb", "GBR"),
    ("fr", "FRA"), ("in", "IND"), ("br", "BRA"), ("kr", "KOR"), ("it", "ITA"),
    ("ca", "CAN"), ("au", "AUS"), ("es", "ESP"), ("mx", "MEX"), ("id", "IDN"),
    ("nl", "NLD"), ("sa", "SAU"), ("ch", "CHE"), ("se", "SWE"), ("pl", "POL"),
    ("th", "THA"), ("tr", "TUR"), ("ng", "NGA"), ("ar", "ARG"), ("za", "ZAF"),
    ("my", "MYS"), ("bd", "BGD"), ("vn", "VNM"), ("ph", "PHL"), ("eg", "EGY"),
    ("sg", "SGP"), ("ie", "IRL"), ("dk", "DNK"), ("fi", "FIN"), ("no", "NOR"),
    ("nz", "NZL"), ("il", "ISR"), ("hk", "HKG"), ("tw", "TWN"), ("pt", "PRT"),
    ("cz", "CZE"), ("ro", "ROU"), ("hu", "HUN"), ("at", "AUT"), ("be", "BEL"),
    ("cl", "CHL"), ("co", "COL"), ("pe", "PER"), ("ec", "ECU"), ("uy", "URY"),
    ("pa", "PAN"), ("cr", "CRI"),
    ("pk", "PAK"), ("et", "ETH"), ("ke", "KEN"), ("gh", "GHA"), ("tz", "TZA"),
    ("ru", "RUS"),
    ("ae", "ARE"), ("qa", "QAT"), ("kw", "KWT"), ("jo", "JOR"),
    ("bg", "BGR"), ("hr", "HRV"), ("rs", "SRB"), ("lt", "LTU"), ("lv", "LVA"), ("ee", "EST"),
    ("ma", "MAR"), ("tn", "TUN"), ("rw", "RWA"), ("sn", "SEN"), ("ci", "CIV"),
    ("lk", "LKA"), ("mm", "MMR"), ("kh", "KHM"), ("np", "NPL"),
    ("gr", "GRC"), ("ua", "UKR"),
];

/// Resolve a region id against a lookup table.
pub fn iso3_for<'a>(table: &'a [(&str, &str)], id: &str) -> Option<&'a str> {
    table.iter().find(|(rid, _)| *rid == id).map(|(_, iso)| *iso)
}
