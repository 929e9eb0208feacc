//! Cache key construction
//!
//! Keys are `endpoint:field:field...`. Free text is escaped so a `:` inside a
//! question can never shift a field boundary, absent optionals render as
//! `all`, and lists are sorted so their order never matters. A key that
//! would exceed `MAX_KEY_LENGTH` collapses to `endpoint:#<sha256>` of its
//! full form, so long questions stay cacheable.

use sha2::{Digest, Sha256};

use crate::cache::MAX_KEY_LENGTH;

/// Marker used for an absent optional field.
pub const ABSENT: &str = "all";

/// Builder for deterministic cache keys.
#[derive(Debug, Clone)]
pub struct CacheKey {
    buf: String,
    endpoint_len: usize,
}

impl CacheKey {
    /// Starts a key for the given endpoint name.
    pub fn new(endpoint: &str) -> Self {
        Self {
            buf: endpoint.to_string(),
            endpoint_len: endpoint.len(),
        }
    }

    /// Appends a free-text field.
    pub fn text(mut self, value: &str) -> Self {
        self.buf.push(':');
        push_escaped(&mut self.buf, value);
        self
    }

    /// Appends an optional field, `all` when absent.
    pub fn optional(self, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(v),
            None => self.text(ABSENT),
        }
    }

    /// Appends a list field in sorted order as `[a,b,c]`; `all` when absent.
    pub fn list(mut self, values: Option<&[String]>) -> Self {
        let Some(values) = values else {
            return self.text(ABSENT);
        };
        let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        self.buf.push_str(":[");
        for (i, v) in sorted.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            push_escaped(&mut self.buf, v);
        }
        self.buf.push(']');
        self
    }

    /// Appends any value with a canonical `Display` form (numbers, flags).
    pub fn value(self, value: impl std::fmt::Display) -> Self {
        self.text(&value.to_string())
    }

    pub fn build(self) -> String {
        if self.buf.len() <= MAX_KEY_LENGTH {
            return self.buf;
        }
        let digest = hex::encode(Sha256::digest(self.buf.as_bytes()));
        format!("{}:#{}", &self.buf[..self.endpoint_len], digest)
    }
}

fn push_escaped(buf: &mut String, value: &str) {
    for c in value.chars() {
        if matches!(c, '\\' | ':' | ',' | '[' | ']') {
            buf.push('\\');
        }
        buf.push(c);
    }
}
