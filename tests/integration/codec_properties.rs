use proptest::prelude::*;
use saved_search_codec::codec::{decode, decode_date, encode, Tag};
use saved_search_codec::FieldValue;

fn tag() -> impl Strategy<Value = Tag> {
  prop_oneof![Just(Tag::StartsWith), Just(Tag::IsEqual), Just(Tag::IsIn)]
}

// Values the wire syntax can carry: no delimiter, no '=' confusion, not blank.
fn wire_value() -> impl Strategy<Value = String> {
  "[A-Za-z0-9][A-Za-z0-9 .,&'-]{0,20}"
}

proptest! {
  #[test]
  fn lists_round_trip(tag in tag(), values in prop::collection::vec(wire_value(), 2..6)) {
    let decoded = decode(&encode(tag, &values), tag);
    prop_assert_eq!(decoded, FieldValue::List(values));
  }

  #[test]
  fn single_values_collapse_to_text(tag in tag(), value in wire_value()) {
    prop_assert_eq!(decode(&encode(tag, &[value.as_str()]), tag), FieldValue::Text(value));
  }

  #[test]
  fn other_tags_are_invisible(value in wire_value()) {
    let encoded = format!("{}{}", encode(Tag::IsEqual, &["17"]), encode(Tag::StartsWith, &[value.as_str()]));
    prop_assert_eq!(decode(&encoded, Tag::IsEqual), FieldValue::Text("17".to_string()));
    prop_assert_eq!(decode(&encoded, Tag::StartsWith), FieldValue::Text(value));
  }

  #[test]
  fn us_dates_become_iso(y in 1990i32..2100, m in 1u32..=12, d in 1u32..=28) {
    let us = format!("{}/{}/{}", m, d, y);
    prop_assert_eq!(decode_date(&us), format!("{:04}-{:02}-{:02}", y, m, d));
  }

  #[test]
  fn iso_dates_are_fixed_points(y in 1990i32..2100, m in 1u32..=12, d in 1u32..=28) {
    let iso = format!("{:04}-{:02}-{:02}", y, m, d);
    prop_assert_eq!(decode_date(&iso), iso.clone());
  }
}
