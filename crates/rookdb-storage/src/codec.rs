//! Fixed-width value coding
//!
//! One record of a column page and one key of an index node share the same
//! wire form: raw native-endian scalar bytes, except strings, which occupy a
//! fixed 256-byte slot. A stored string is truncated to 255 bytes so the
//! slot always ends in at least one NUL; on read the logical value is the
//! prefix up to the first NUL. Bytes past that NUL are normalized to zero on
//! write so two equal strings have identical slots.

use rookdb_common::types::STRING_WIDTH;
use rookdb_common::{DataType, Error, Result, Value};

/// Encode `value` into `buf`, which must be exactly
/// `ty.record_size()` bytes. Returns `TypeMismatch` when the value's variant
/// does not match the declared type.
pub fn encode_value(buf: &mut [u8], value: &Value, ty: DataType) -> Result<()> {
    debug_assert_eq!(buf.len(), ty.record_size());
    match (ty, value) {
        (DataType::Int32, Value::Int32(v)) => buf.copy_from_slice(&v.to_ne_bytes()),
        (DataType::Int64, Value::Int64(v)) => buf.copy_from_slice(&v.to_ne_bytes()),
        (DataType::Float, Value::Float(v)) => buf.copy_from_slice(&v.to_ne_bytes()),
        (DataType::Double, Value::Double(v)) => buf.copy_from_slice(&v.to_ne_bytes()),
        (DataType::Varchar, Value::Varchar(v)) => {
            let bytes = v.as_bytes();
            let len = bytes.len().min(STRING_WIDTH - 1);
            buf[..len].copy_from_slice(&bytes[..len]);
            buf[len..].fill(0);
        }
        (DataType::Boolean, Value::Boolean(v)) => buf[0] = *v as u8,
        _ => {
            return Err(Error::TypeMismatch {
                expected: ty,
                got: value.data_type(),
            })
        }
    }
    Ok(())
}

/// Decode one value of declared type `ty` from `buf`, which must be exactly
/// `ty.record_size()` bytes.
pub fn decode_value(buf: &[u8], ty: DataType) -> Value {
    debug_assert_eq!(buf.len(), ty.record_size());
    match ty {
        DataType::Int32 => Value::Int32(i32::from_ne_bytes(buf.try_into().unwrap())),
        DataType::Int64 => Value::Int64(i64::from_ne_bytes(buf.try_into().unwrap())),
        DataType::Float => Value::Float(f32::from_ne_bytes(buf.try_into().unwrap())),
        DataType::Double => Value::Double(f64::from_ne_bytes(buf.try_into().unwrap())),
        DataType::Varchar => {
            let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            Value::Varchar(String::from_utf8_lossy(&buf[..end]).into_owned())
        }
        DataType::Boolean => Value::Boolean(buf[0] != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: Value) -> Value {
        let ty = value.data_type();
        let mut buf = vec![0u8; ty.record_size()];
        encode_value(&mut buf, &value, ty).unwrap();
        decode_value(&buf, ty)
    }

    #[test]
    fn test_scalar_round_trips() {
        assert_eq!(round_trip(Value::Int32(-7)), Value::Int32(-7));
        assert_eq!(round_trip(Value::Int64(1 << 40)), Value::Int64(1 << 40));
        assert_eq!(round_trip(Value::Float(2.5)), Value::Float(2.5));
        assert_eq!(round_trip(Value::Double(-0.125)), Value::Double(-0.125));
        assert_eq!(round_trip(Value::Boolean(true)), Value::Boolean(true));
    }

    #[test]
    fn test_string_round_trip() {
        assert_eq!(
            round_trip(Value::Varchar("John Smith".into())),
            Value::Varchar("John Smith".into())
        );
        assert_eq!(round_trip(Value::Varchar(String::new())), Value::Varchar(String::new()));
    }

    #[test]
    fn test_long_string_truncated_to_255_bytes() {
        let long = "x".repeat(400);
        let decoded = round_trip(Value::Varchar(long));
        assert_eq!(decoded, Value::Varchar("x".repeat(255)));
    }

    #[test]
    fn test_string_slot_padding_is_normalized() {
        let mut buf = vec![0xFFu8; DataType::Varchar.record_size()];
        encode_value(&mut buf, &Value::Varchar("ab".into()), DataType::Varchar).unwrap();
        assert_eq!(&buf[..2], b"ab");
        assert!(buf[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut buf = vec![0u8; DataType::Int32.record_size()];
        let err = encode_value(&mut buf, &Value::Double(1.0), DataType::Int32).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
