//! Base64 XDR `ScVal` decoding.
//!
//! Soroban RPC returns event topics and data as base64 XDR. Values are turned
//! into the same JSON shapes the rest of the decoder reads:
//!
//! | `ScVal`                         | JSON                                 |
//! |---------------------------------|--------------------------------------|
//! | `Symbol`, `String`              | string                               |
//! | `Address`                       | strkey string (`G…` / `C…`)          |
//! | `U32`, `I32`, `U64`, `I64`      | number                               |
//! | `U128`, `I128`                  | decimal string                       |
//! | `Map` with symbol keys (struct) | object                               |
//! | `Vec` of one symbol (unit enum) | string                               |
//! | other `Vec`                     | array                                |

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};
use stellar_xdr::curr::{Limits, PublicKey, ReadXdr, ScAddress, ScVal};

/// Decode a base64 XDR `ScVal`. Returns `None` when `raw` is not one.
pub fn decode_scval(raw: &str) -> Option<Value> {
    let bytes = STANDARD.decode(raw).ok()?;
    let val = ScVal::from_xdr(bytes, Limits::none()).ok()?;
    Some(to_json(&val))
}

fn to_json(val: &ScVal) -> Value {
    match val {
        ScVal::Bool(b) => Value::Bool(*b),
        ScVal::U32(n) => Value::from(*n),
        ScVal::I32(n) => Value::from(*n),
        ScVal::U64(n) => Value::from(*n),
        ScVal::I64(n) => Value::from(*n),
        ScVal::U128(parts) => {
            let n = (u128::from(parts.hi) << 64) | u128::from(parts.lo);
            Value::String(n.to_string())
        }
        ScVal::I128(parts) => {
            let n = (i128::from(parts.hi) << 64) | i128::from(parts.lo);
            Value::String(n.to_string())
        }
        ScVal::Symbol(sym) => Value::String(sym.0.to_utf8_string_lossy()),
        ScVal::String(s) => Value::String(s.0.to_utf8_string_lossy()),
        ScVal::Address(address) => Value::String(strkey(address)),
        ScVal::Vec(Some(items)) => match items.as_slice() {
            [ScVal::Symbol(variant)] => Value::String(variant.0.to_utf8_string_lossy()),
            items => Value::Array(items.iter().map(to_json).collect()),
        },
        ScVal::Map(Some(entries)) => {
            let mut object = Map::new();
            for entry in entries.iter() {
                if let ScVal::Symbol(key) = &entry.key {
                    object.insert(key.0.to_utf8_string_lossy(), to_json(&entry.val));
                }
            }
            Value::Object(object)
        }
        _ => Value::Null,
    }
}

fn strkey(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(account) => {
            let PublicKey::PublicKeyTypeEd25519(key) = &account.0;
            stellar_strkey::ed25519::PublicKey(key.0).to_string()
        }
        ScAddress::Contract(hash) => stellar_strkey::Contract(hash.0).to_string(),
    }
}
