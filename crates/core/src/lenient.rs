//! Lenient number decoding.
//!
//! The system-of-record serialises decimal columns and insert ids as
//! strings, so numeric fields on its responses accept `12`, `12.5`,
//! `"12"` and `"12.50"` alike.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

impl<T: FromStr> NumberOrString<T> {
    fn parse<E: serde::de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a number, got {s:?}"))),
        }
    }
}

pub(crate) fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    NumberOrString::<T>::deserialize(deserializer)?.parse()
}

pub(crate) fn optional_number_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    Option::<NumberOrString<T>>::deserialize(deserializer)?
        .map(NumberOrString::parse)
        .transpose()
}
