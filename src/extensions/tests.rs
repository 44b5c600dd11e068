use super::{enums::valid_csv, string::ToMatchKey};
use crate::paging::decode::PageShape;

#[test]
fn valid_csv_lists_enum_variants_as_strings() {
    let csv = valid_csv::<PageShape>();
    assert_eq!(csv, "next, next-page-token");
}

#[test]
fn to_match_key_lowercases_and_collapses_punctuation() {
    assert_eq!("  Chill  Vibes!! ".to_match_key(), "chill vibes");
    assert_eq!("Rock'n'Roll".to_match_key(), "rock n roll");

    let owned = "WORKOUT-Mix".to_string();
    assert_eq!(owned.to_match_key(), "workout mix");
}

#[test]
fn to_match_key_of_symbols_only_is_empty() {
    assert_eq!("!!! ---".to_match_key(), "");
}

#[test]
fn to_match_key_keeps_non_ascii_letters() {
    assert_eq!("Café Del Mar".to_match_key(), "café del mar");
}
