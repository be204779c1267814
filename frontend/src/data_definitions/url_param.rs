//! Route segments that carry a whole serialized value.
//!
//! The shop filters live in the URL so a filtered view can be bookmarked and
//! shared. The value is CBOR-encoded, then base64 (URL safe).

use std::{fmt::Display, str::FromStr};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl<T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

impl<T> UrlParam<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Display must round-trip through FromStr for the router.
impl<T: Serialize> Display for UrlParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut serialized = Vec::new();
        if ciborium::into_writer(&self.0, &mut serialized).is_ok() {
            write!(f, "{}", URL_SAFE.encode(serialized))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum UrlParamError {
    Base64(base64::DecodeError),
    Cbor(ciborium::de::Error<std::io::Error>),
}

impl std::fmt::Display for UrlParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "bad url segment: {}", err),
            Self::Cbor(err) => write!(f, "bad url state: {}", err),
        }
    }
}

impl<T: for<'de> Deserialize<'de> + Default> FromStr for UrlParam<T> {
    type Err = UrlParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(UrlParam(T::default()));
        }
        let bytes = URL_SAFE.decode(s.as_bytes()).map_err(UrlParamError::Base64)?;
        let parsed = ciborium::from_reader(std::io::Cursor::new(bytes)).map_err(UrlParamError::Cbor)?;
        Ok(UrlParam(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::filter_state::FilterState;
    use pretty_assertions::assert_eq;

    #[test]
    fn shop_filters_survive_the_url() {
        let state = FilterState::new()
            .with_category("Brake System")
            .with_brand("denso")
            .with_price_range(50.0, 10.0)
            .with_search_query("pad ");
        let segment = UrlParam(state.clone()).to_string();

        assert!(segment.chars().all(|c| c.is_ascii_alphanumeric() || "-_=".contains(c)));
        assert_eq!(segment.parse::<UrlParam<FilterState>>().unwrap().into_inner(), state);
    }

    #[test]
    fn empty_segment_means_no_filters() {
        let parsed: UrlParam<FilterState> = "".parse().unwrap();
        assert!(parsed.0.is_empty());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!("%%%".parse::<UrlParam<FilterState>>(), Err(UrlParamError::Base64(_))));
        let not_cbor = URL_SAFE.encode([0xff, 0x00]);
        assert!(matches!(not_cbor.parse::<UrlParam<FilterState>>(), Err(UrlParamError::Cbor(_))));
    }
}
