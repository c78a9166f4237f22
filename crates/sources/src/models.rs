//! Wire models for the upstream payloads.
//!
//! Every field is optional: upstream entries are frequently incomplete and
//! the refresh cycle decides which gaps are fatal for a single record.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// One entry of the country directory (restcountries v3 shape).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<CountryName>,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
    /// Currency codes in payload order. Only the keys of the upstream
    /// `currencies` object are kept.
    #[serde(default, deserialize_with = "currency_codes")]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub flags: Option<FlagImages>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CountryName {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FlagImages {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
}

impl RawCountry {
    pub fn common_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(|n| n.common.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn country_code(&self) -> Option<&str> {
        self.cca2
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|caps| caps.first())
            .map(String::as_str)
    }

    pub fn first_currency(&self) -> Option<&str> {
        self.currencies.first().map(String::as_str)
    }

    pub fn flag_png(&self) -> Option<&str> {
        self.flags.as_ref().and_then(|f| f.png.as_deref())
    }
}

/// USD-based exchange-rate table (open.er-api shape).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExchangeRateTable {
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn rate(&self, currency_code: &str) -> Option<f64> {
        self.rates.get(currency_code).copied()
    }
}

/// Collects the keys of a JSON object in document order. `null` yields an
/// empty list.
fn currency_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map keyed by currency code")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_map(KeysVisitor)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut keys = Vec::with_capacity(map.size_hint().unwrap_or(1));
            while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_option(KeysVisitor)
}
