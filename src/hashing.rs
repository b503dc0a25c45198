use serde::Serialize;
use sha2::Digest;

/// lowercase 64-hex SHA-256 of raw bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

/// seed commitment: the hex digest of the UTF-8 seed, published before a
/// match so the seed can be revealed afterwards without having been alterable
pub fn commit(seed: &str) -> String {
    sha256_hex(seed.as_bytes())
}

/// constant-time check that a revealed seed matches its commitment
pub fn verify(seed: &str, commitment: &str) -> bool {
    constant_time_eq(commit(seed).as_bytes(), commitment.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Canonical JSON form: recursively key-sorted objects, no insignificant
/// whitespace. Numbers are emitted as serde_json renders them (integers
/// without a decimal point, floats in shortest round-trip form); `null`
/// survives, absent fields are absent. Two values are equal for the replay
/// verifier iff their canonical forms are byte-equal.
pub fn canonical<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    write_canonical(&value, &mut out)?;
    Ok(out)
}

/// SHA-256 over the canonical form; the definition of observation equality
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical(value)?.as_bytes()))
}

fn write_canonical(value: &serde_json::Value, out: &mut String) -> Result<(), serde_json::Error> {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys = map.keys().collect::<Vec<&String>>();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(map.get(*key).expect("key from map"), out)?;
            }
            out.push('}');
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        leaf => out.push_str(&serde_json::to_string(leaf)?),
    }
    Ok(())
}
