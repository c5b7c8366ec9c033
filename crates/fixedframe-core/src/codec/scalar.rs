//! Conversion of scalar field values to and from their fixed-width byte form.
//!
//! # Format
//!
//! Each scalar value is first rendered to its canonical bytes:
//!
//! - `Text`: the text in the field's charset
//! - `Integer`, `Float`, `Double`: decimal text (`Display`), charset-independent
//! - `Boolean`: `1` or `0`
//! - `Temporal`: the formatter's output in the field's charset
//!
//! and then fitted to the field length. Longer representations are cut to the
//! first `length` bytes; shorter ones are padded. Numbers are padded on the left,
//! everything else on the right. A negative number padded with `'0'` keeps its
//! sign in front of the zero fill (`-0042`).

use std::fmt::Write as _;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, ParseResult};
use tracing::debug;

use crate::error::{DescriptorError, FrameError, FrameResult};
use crate::schema::{FieldDescriptor, PadSide, ValueType};
use crate::types::{Charset, FieldValue};

/// A scalar field whose descriptor has been validated for its value type.
pub(crate) struct ScalarField<'a> {
    record: &'a str,
    name: &'a str,
    descriptor: &'a FieldDescriptor,
    value_type: ValueType,
    charset: Charset,
}

impl<'a> ScalarField<'a> {
    /// Validates the descriptor lazily, on first use of the field.
    pub(crate) fn resolve(
        record: &'a str,
        name: &'a str,
        descriptor: &'a FieldDescriptor,
        value_type: ValueType,
    ) -> FrameResult<Self> {
        let charset = descriptor
            .validate(value_type)
            .map_err(|source| FrameError::schema(record, name, descriptor, source))?;
        Ok(Self { record, name, descriptor, value_type, charset })
    }

    #[inline]
    pub(crate) const fn length(&self) -> usize {
        self.descriptor.length()
    }

    #[inline]
    pub(crate) const fn descriptor(&self) -> &FieldDescriptor {
        self.descriptor
    }

    // Validated in `resolve`.
    fn formatter(&self) -> &str {
        self.descriptor.formatter().unwrap_or_default()
    }

    /// Appends exactly `length` bytes representing `value` to `buf`.
    pub(crate) fn encode_to(&self, value: &FieldValue, buf: &mut Vec<u8>) -> FrameResult<()> {
        let repr = self.canonical_bytes(value)?;
        self.fit(&repr, buf);
        Ok(())
    }

    fn canonical_bytes(&self, value: &FieldValue) -> FrameResult<Vec<u8>> {
        if value.value_type() != self.value_type {
            return Err(FrameError::unsupported_type(
                self.record,
                self.name,
                self.value_type,
                value.value_type(),
            ));
        }
        let bytes = match value {
            FieldValue::Text(s) => self.charset.encode(s),
            FieldValue::Integer(i) => i.to_string().into_bytes(),
            FieldValue::Float(f) => f.to_string().into_bytes(),
            FieldValue::Double(f) => f.to_string().into_bytes(),
            FieldValue::Boolean(b) => vec![if *b { b'1' } else { b'0' }],
            FieldValue::Temporal(t) => {
                let mut text = String::new();
                write!(text, "{}", t.format_with_items(StrftimeItems::new(self.formatter())))
                    .map_err(|_| {
                        FrameError::schema(
                            self.record,
                            self.name,
                            self.descriptor,
                            DescriptorError::InvalidFormatter(self.formatter().to_owned()),
                        )
                    })?;
                self.charset.encode(&text)
            }
        };
        Ok(bytes)
    }

    fn fit(&self, repr: &[u8], buf: &mut Vec<u8>) {
        let length = self.length();
        if repr.len() >= length {
            if repr.len() > length {
                debug!(
                    record = self.record,
                    field = self.name,
                    length,
                    actual = repr.len(),
                    "value truncated to field length"
                );
            }
            buf.extend_from_slice(&repr[..length]);
            return;
        }

        let padding = self.descriptor.effective_padding(self.value_type);
        let fill = length - repr.len();
        match self.value_type.pad_side() {
            PadSide::Leading => {
                if padding == b'0' && repr.first() == Some(&b'-') {
                    buf.push(b'-');
                    buf.resize(buf.len() + fill, padding);
                    buf.extend_from_slice(&repr[1..]);
                } else {
                    buf.resize(buf.len() + fill, padding);
                    buf.extend_from_slice(repr);
                }
            }
            PadSide::Trailing => {
                buf.extend_from_slice(repr);
                buf.resize(buf.len() + fill, padding);
            }
        }
    }

    /// Parses exactly `length` bytes into a value.
    pub(crate) fn decode(&self, bytes: &[u8]) -> FrameResult<FieldValue> {
        let text = self.charset.decode(bytes);
        let parse_err = |reason: &dyn std::fmt::Display| {
            FrameError::field_parse(
                self.record,
                self.name,
                self.descriptor,
                self.value_type,
                &text,
                reason,
            )
        };

        let value = match self.value_type {
            ValueType::Text => FieldValue::Text(text.clone()),
            ValueType::Integer => {
                FieldValue::Integer(text.trim().parse().map_err(|e| parse_err(&e))?)
            }
            ValueType::Float => FieldValue::Float(text.trim().parse().map_err(|e| parse_err(&e))?),
            ValueType::Double => {
                FieldValue::Double(text.trim().parse().map_err(|e| parse_err(&e))?)
            }
            ValueType::Boolean => {
                let flag: i64 = text.trim().parse().map_err(|e| parse_err(&e))?;
                FieldValue::Boolean(flag != 0)
            }
            ValueType::Temporal => {
                let parsed = parse_temporal(text.trim(), self.formatter());
                FieldValue::Temporal(parsed.map_err(|e| parse_err(&e))?)
            }
        };
        Ok(value)
    }
}

/// Parses `text` with a strftime pattern.
///
/// Fields the pattern does not carry are taken from 1970-01-01T00:00:00, so
/// `%Y-%m` yields the first of the month at midnight and `%H` an hour on the
/// epoch date.
fn parse_temporal(text: &str, pattern: &str) -> ParseResult<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(pattern))?;
    if parsed.timestamp().is_none() {
        fill_from_epoch(&mut parsed)?;
    }
    parsed.to_naive_datetime_with_offset(0)
}

fn fill_from_epoch(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(1970)?;
    }

    // An ordinal or a week number already pins the day within the year.
    let has_day_of_year = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !has_day_of_year {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        (None, Some(_)) => parsed.set_ampm(false)?,
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn encode(value_type: ValueType, descriptor: &FieldDescriptor, value: FieldValue) -> Vec<u8> {
        let field = ScalarField::resolve("R", "f", descriptor, value_type).unwrap();
        let mut buf = Vec::new();
        field.encode_to(&value, &mut buf).unwrap();
        buf
    }

    fn decode(
        value_type: ValueType,
        descriptor: &FieldDescriptor,
        bytes: &[u8],
    ) -> FrameResult<FieldValue> {
        ScalarField::resolve("R", "f", descriptor, value_type)?.decode(bytes)
    }

    #[test]
    fn integer_zero_padded_left() {
        assert_eq!(encode(ValueType::Integer, &5.into(), 42i64.into()), b"00042");
    }

    #[test]
    fn text_space_padded_right() {
        assert_eq!(encode(ValueType::Text, &5.into(), "ab".into()), b"ab   ");
    }

    #[test]
    fn text_truncated_silently() {
        assert_eq!(encode(ValueType::Text, &3.into(), "abcdef".into()), b"abc");
    }

    #[test]
    fn numbers_truncated_keep_leading_digits() {
        assert_eq!(encode(ValueType::Integer, &2.into(), 12345i64.into()), b"12");
    }

    #[test]
    fn exact_length_unchanged() {
        assert_eq!(encode(ValueType::Integer, &3.into(), 123i64.into()), b"123");
    }

    #[test]
    fn negative_integer_sign_before_zero_fill() {
        assert_eq!(encode(ValueType::Integer, &5.into(), (-42i64).into()), b"-0042");
        let value = decode(ValueType::Integer, &5.into(), b"-0042").unwrap();
        assert_eq!(value, FieldValue::Integer(-42));
    }

    #[test]
    fn negative_integer_custom_padding() {
        let desc = FieldDescriptor::new(5).with_padding(b' ');
        assert_eq!(encode(ValueType::Integer, &desc, (-42i64).into()), b"  -42");
        assert_eq!(decode(ValueType::Integer, &desc, b"  -42").unwrap(), FieldValue::Integer(-42));
    }

    #[test]
    fn float_and_double_decimal_text() {
        assert_eq!(encode(ValueType::Float, &6.into(), 1.5f32.into()), b"0001.5");
        assert_eq!(encode(ValueType::Double, &6.into(), 0.25f64.into()), b"000.25");
        assert_eq!(decode(ValueType::Float, &6.into(), b"0001.5").unwrap(), FieldValue::Float(1.5));
        assert_eq!(
            decode(ValueType::Double, &6.into(), b"000.25").unwrap(),
            FieldValue::Double(0.25)
        );
    }

    #[test]
    fn boolean_single_byte_then_space_padding() {
        assert_eq!(encode(ValueType::Boolean, &1.into(), true.into()), b"1");
        assert_eq!(encode(ValueType::Boolean, &3.into(), false.into()), b"0  ");
    }

    #[test]
    fn boolean_decodes_any_nonzero_integer() {
        assert_eq!(
            decode(ValueType::Boolean, &3.into(), b"0  ").unwrap(),
            FieldValue::Boolean(false)
        );
        assert_eq!(
            decode(ValueType::Boolean, &2.into(), b"07").unwrap(),
            FieldValue::Boolean(true)
        );
        assert!(matches!(
            decode(ValueType::Boolean, &1.into(), b"Y"),
            Err(FrameError::FieldParse { .. })
        ));
    }

    #[test]
    fn text_decode_keeps_padding() {
        let value = decode(ValueType::Text, &5.into(), b"ab   ").unwrap();
        assert_eq!(value, FieldValue::from("ab   "));
    }

    #[test]
    fn explicit_padding_character() {
        let desc = FieldDescriptor::new(5).with_padding(b'*');
        assert_eq!(encode(ValueType::Text, &desc, "ab".into()), b"ab***");
        assert_eq!(encode(ValueType::Integer, &desc, 7i64.into()), b"****7");
    }

    #[test]
    fn charset_applies_to_text_only() {
        let desc = FieldDescriptor::new(3).with_charset("ISO-8859-1");
        assert_eq!(encode(ValueType::Text, &desc, "é".into()), vec![0xE9, b' ', b' ']);
        let value = decode(ValueType::Text, &desc, &[0xE9, b' ', b' ']).unwrap();
        assert_eq!(value, FieldValue::from("é  "));
    }

    #[test]
    fn temporal_with_date_pattern() {
        let desc = FieldDescriptor::new(10).with_formatter("%Y%m%d");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(encode(ValueType::Temporal, &desc, date.into()), b"20240309  ");
        let value = decode(ValueType::Temporal, &desc, b"20240309  ").unwrap();
        assert_eq!(value, FieldValue::from(date));
    }

    #[test]
    fn temporal_with_datetime_pattern() {
        let desc = FieldDescriptor::new(14).with_formatter("%Y%m%d%H%M%S");
        let ts = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(23, 59, 1).unwrap();
        assert_eq!(encode(ValueType::Temporal, &desc, ts.into()), b"20231231235901");
        let value = decode(ValueType::Temporal, &desc, b"20231231235901").unwrap();
        assert_eq!(value, FieldValue::Temporal(ts));
    }

    #[test]
    fn temporal_date_and_hour_keeps_hour() {
        let desc = FieldDescriptor::new(10).with_formatter("%Y%m%d%H");
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(encode(ValueType::Temporal, &desc, ts.into()), b"2024030910");
        let value = decode(ValueType::Temporal, &desc, b"2024030910").unwrap();
        assert_eq!(value, FieldValue::Temporal(ts));
    }

    #[test]
    fn temporal_year_month_defaults_to_first_day() {
        let desc = FieldDescriptor::new(7).with_formatter("%Y-%m");
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(10, 15, 0).unwrap();
        assert_eq!(encode(ValueType::Temporal, &desc, ts.into()), b"2024-03");
        let value = decode(ValueType::Temporal, &desc, b"2024-03").unwrap();
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(value, FieldValue::from(first));
    }

    #[test]
    fn temporal_hour_only_uses_epoch() {
        let desc = FieldDescriptor::new(2).with_formatter("%H");
        let value = decode(ValueType::Temporal, &desc, b"10").unwrap();
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(value, FieldValue::Temporal(expected));
    }

    #[test]
    fn temporal_twelve_hour_clock() {
        let desc = FieldDescriptor::new(4).with_formatter("%I%p");
        let value = decode(ValueType::Temporal, &desc, b"03PM").unwrap();
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();
        assert_eq!(value, FieldValue::Temporal(expected));

        let desc = FieldDescriptor::new(2).with_formatter("%I");
        let value = decode(ValueType::Temporal, &desc, b"03").unwrap();
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(3, 0, 0).unwrap();
        assert_eq!(value, FieldValue::Temporal(expected));
    }

    #[test]
    fn temporal_ordinal_date() {
        let desc = FieldDescriptor::new(7).with_formatter("%Y%j");
        let value = decode(ValueType::Temporal, &desc, b"2024069").unwrap();
        assert_eq!(value, FieldValue::from(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
    }

    #[test]
    fn temporal_epoch_seconds() {
        let desc = FieldDescriptor::new(10).with_formatter("%s");
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(10, 15, 0).unwrap();
        let encoded = encode(ValueType::Temporal, &desc, ts.into());
        assert_eq!(encoded, b"1709979300");
        assert_eq!(decode(ValueType::Temporal, &desc, &encoded).unwrap(), FieldValue::Temporal(ts));
    }

    #[test]
    fn temporal_time_only_pattern_uses_epoch_date() {
        let desc = FieldDescriptor::new(6).with_formatter("%H%M%S");
        let value = decode(ValueType::Temporal, &desc, b"101500").unwrap();
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(10, 15, 0).unwrap();
        assert_eq!(value, FieldValue::Temporal(expected));
    }

    #[test]
    fn temporal_mismatch_is_parse_error() {
        let desc = FieldDescriptor::new(8).with_formatter("%Y%m%d");
        let err = decode(ValueType::Temporal, &desc, b"2024-3-9").unwrap_err();
        assert!(matches!(err, FrameError::FieldParse { value_type: ValueType::Temporal, .. }));
    }

    #[test]
    fn temporal_without_formatter_fails_on_use() {
        let desc = FieldDescriptor::new(8);
        let err = ScalarField::resolve("R", "when", &desc, ValueType::Temporal).err().unwrap();
        assert!(matches!(
            err,
            FrameError::Schema { source: DescriptorError::MissingFormatter, ref field, .. }
                if field == "when"
        ));
    }

    #[test]
    fn temporal_timezone_formatter_fails_on_use() {
        let desc = FieldDescriptor::new(13).with_formatter("%Y%m%d%z");
        let err = ScalarField::resolve("R", "when", &desc, ValueType::Temporal).err().unwrap();
        assert!(matches!(
            err,
            FrameError::Schema { source: DescriptorError::InvalidFormatter(ref f), .. }
                if f == "%Y%m%d%z"
        ));
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let err = decode(ValueType::Integer, &3.into(), b"1x3").unwrap_err();
        match err {
            FrameError::FieldParse { text, value_type, .. } => {
                assert_eq!(text, "1x3");
                assert_eq!(value_type, ValueType::Integer);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mismatched_value_type_is_unsupported() {
        let desc = FieldDescriptor::new(3);
        let field = ScalarField::resolve("R", "f", &desc, ValueType::Integer).unwrap();
        let err = field.encode_to(&"12".into(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedType { .. }));
    }
}
