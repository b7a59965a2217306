//! Response envelope decoding
//!
//! The backend answers list endpoints with a bare array, an object wrapping
//! the array in `data`, or `null`. All three decode to a `Vec`. An object
//! without a `data` key is an error, not an empty team.
//!
//! Trees nest one JSON level per generation, so decoding runs without
//! serde_json's recursion limit and grows the stack on demand instead.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// `{"data": [...]}` with sibling keys ignored; `data` itself is required
#[derive(Deserialize)]
#[serde(bound = "T: Deserialize<'de>")]
struct Wrapped<T> {
    #[serde(deserialize_with = "Option::deserialize")]
    data: Option<Vec<T>>,
}

/// Decode a list payload; an empty body is an empty list
///
/// # Errors
///
/// Returns the JSON error when the body matches no accepted shape.
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    let Some(first) = body.iter().find(|b| !b.is_ascii_whitespace()) else {
        return Ok(Vec::new());
    };

    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let items = if *first == b'{' {
        Wrapped::<T>::deserialize(serde_stacker::Deserializer::new(&mut de))?.data
    } else {
        Option::<Vec<T>>::deserialize(serde_stacker::Deserializer::new(&mut de))?
    };
    de.end()?;
    Ok(items.unwrap_or_default())
}
