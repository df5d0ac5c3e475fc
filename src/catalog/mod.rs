//! Static catalog of indicators and geographic codes.
//!
//! The catalog is an immutable configuration value built once at startup and
//! injected into the components that need it (pickers, legends, reports).
//! The indicator set is fixed and known ahead of time; there is no dynamic
//! discovery against the API.

use crate::domain::Indicator;

/// Indicator codes and display labels, in picker order.
const INDICATORS: &[(&str, &str)] = &[
    ("NY.GDP.MKTP.CD", "GDP (current US$)"),
    ("NY.GDP.PCAP.CD", "GDP per capita (current US$)"),
    ("SP.POP.TOTL", "Population"),
    ("SP.DYN.LE00.IN", "Life Expectancy at Birth"),
    ("SL.UEM.TOTL.ZS", "Unemployment Rate (%)"),
    ("SE.PRM.TENR", "Primary Enrollment Rate (%)"),
    ("SE.SEC.ENRR", "Secondary Enrollment Rate (%)"),
    ("SE.TER.ENRR", "Tertiary Enrollment Rate (%)"),
    ("SH.XPD.CHEX.GD.ZS", "Health Expenditure (% of GDP)"),
    ("EN.ATM.CO2E.KT", "CO2 Emissions (kt)"),
    ("SP.URB.TOTL.IN.ZS", "Urban Population (% of Total)"),
    ("SP.RUR.TOTL.ZS", "Rural Population (% of Total)"),
    ("BX.KLT.DINV.CD.WD", "Net FDI (current US$)"),
    ("FP.CPI.TOTL.ZG", "Inflation, consumer prices (annual %)"),
    ("IT.CEL.SETS.P2", "Mobile Cellular Subscriptions (per 100 ppl)"),
    ("EG.ELC.ACCS.ZS", "Access to Electricity (% of population)"),
    ("SE.XPD.TOTL.GD.ZS", "R&D Expenditure (% of GDP)"),
    ("SP.DYN.IMRT.IN", "Infant Mortality Rate (per 1,000 live births)"),
];

/// World Bank region aggregates standing in for continents.
const CONTINENTS: &[(&str, &str)] = &[
    ("EAS", "East Asia & Pacific"),
    ("ECS", "Europe & Central Asia"),
    ("LCN", "Latin America & Caribbean"),
    ("MEA", "Middle East & North Africa"),
    ("NAC", "North America"),
    ("SAS", "South Asia"),
    ("SSF", "Sub-Saharan Africa"),
];

/// ISO-3 country codes offered by the country picker.
const COUNTRIES: &[(&str, &str)] = &[
    ("ARG", "Argentina"),
    ("AUS", "Australia"),
    ("BRA", "Brazil"),
    ("CAN", "Canada"),
    ("CHE", "Switzerland"),
    ("CHN", "China"),
    ("DEU", "Germany"),
    ("EGY", "Egypt"),
    ("ESP", "Spain"),
    ("FRA", "France"),
    ("GBR", "United Kingdom"),
    ("IDN", "Indonesia"),
    ("IND", "India"),
    ("ITA", "Italy"),
    ("JPN", "Japan"),
    ("KOR", "Korea, Rep."),
    ("MEX", "Mexico"),
    ("NGA", "Nigeria"),
    ("NLD", "Netherlands"),
    ("RUS", "Russian Federation"),
    ("SAU", "Saudi Arabia"),
    ("TUR", "Turkiye"),
    ("USA", "United States"),
    ("ZAF", "South Africa"),
];

/// A selectable geographic code with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoEntry {
    pub code: String,
    pub label: String,
}

/// Ordered, immutable lookup tables for pickers and chart legends.
#[derive(Debug, Clone)]
pub struct Catalog {
    indicators: Vec<Indicator>,
    continents: Vec<GeoEntry>,
    countries: Vec<GeoEntry>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            indicators: INDICATORS
                .iter()
                .map(|&(code, label)| Indicator {
                    code: code.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            continents: geo_entries(CONTINENTS),
            countries: geo_entries(COUNTRIES),
        }
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn continents(&self) -> &[GeoEntry] {
        &self.continents
    }

    pub fn countries(&self) -> &[GeoEntry] {
        &self.countries
    }

    /// Human label for an indicator code.
    ///
    /// Unmapped codes fall back to the raw code string so a series is never
    /// left unlabeled.
    pub fn label_for(&self, code: &str) -> String {
        self.indicators
            .iter()
            .find(|ind| ind.code == code)
            .map(|ind| ind.label.clone())
            .unwrap_or_else(|| code.to_string())
    }
}

fn geo_entries(table: &[(&str, &str)]) -> Vec<GeoEntry> {
    table
        .iter()
        .map(|&(code, label)| GeoEntry {
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_tables_are_non_empty() {
        let catalog = Catalog::builtin();
        assert!(!catalog.indicators().is_empty());
        assert!(!catalog.continents().is_empty());
        assert!(!catalog.countries().is_empty());
    }

    #[test]
    fn label_for_known_code() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.label_for("SP.POP.TOTL"), "Population");
    }

    #[test]
    fn label_for_unmapped_code_falls_back_to_the_code() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.label_for("XX.UNKNOWN"), "XX.UNKNOWN");
    }

    #[test]
    fn indicator_order_is_stable() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.indicators()[0].code, "NY.GDP.MKTP.CD");
        assert_eq!(catalog.indicators()[2].code, "SP.POP.TOTL");
    }
}
