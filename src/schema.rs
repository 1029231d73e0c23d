// src/schema.rs

//! Named field schema for the region table.
//!
//! The serialized table identifies fields by position only; this list is the
//! single source of truth for what each position means and for row arity.
//! Any arity change must touch this list and every row in the same commit.

/// Field order of one serialized region row.
pub const FIELDS: [&str; 35] = [
    "id",       //  0 region id, unique, stable
    "name",     //  1 display name
    "type",     //  2 "country" | subnational kind
    "parent",   //  3 parent region id ("" for none)
    "flag",     //  4 flag asset key
    "pop(M)",   //  5 population, millions
    "gdp(B$)",  //  6 GDP, billions USD
    "gdpPC",    //  7 GDP per capita, USD
    "area(k)",  //  8 area, thousands of km²
    "urban%",   //  9 urbanization %
    "gini",     // 10 Gini coefficient
    "hdi",      // 11 Human Development Index
    "net%",     // 12 internet penetration %
    "lifeExp",  // 13 life expectancy, years
    "co2PC",    // 14 CO2 per capita, tonnes
    "unis",     // 15 university count
    "lit%",     // 16 literacy %
    "pisa",     // 17 PISA score
    "docs",     // 18 doctors per 1000
    "beds",     // 19 hospital beds per 1000
    "health%",  // 20 health expenditure % GDP
    "mfg%",     // 21 manufacturing % GDP
    "exp(B)",   // 22 exports, billions USD
    "fdi(B)",   // 23 FDI inflow, billions USD
    "forest%",  // 24 forest coverage %
    "pm25",     // 25 PM2.5 µg/m³
    "renew%",   // 26 renewable energy %
    "unemp%",   // 27 unemployment %
    "inflate%", // 28 inflation %
    "rd%",      // 29 R&D expenditure % GDP
    "mil%",     // 30 military spending % GDP
    "popDens",  // 31 population density /km²
    "medAge",   // 32 median age, years
    "birthR",   // 33 birth rate per 1000
    "deathR",   // 34 death rate per 1000
];

/// Expected field count for every data row.
pub const ARITY: usize = FIELDS.len();

pub const IDX_ID: usize = 0;
pub const IDX_NAME: usize = 1;
pub const IDX_TYPE: usize = 2;
pub const IDX_PARENT: usize = 3;

/// Region kind value that marks a row as a country (vs subnational unit).
pub const KIND_COUNTRY: &str = "country";
