// Deterministic key derivation and the per-file accumulator built on it

use uuid::Uuid;

use crate::lang::Tables;

/// Hex digits in the digest part of a key
pub const DIGEST_LEN: usize = 32;

/// Derive the key for `text` under `namespace`.
///
/// The digest is the name-based (v5) UUID of the text's UTF-8 bytes in the DNS
/// namespace, rendered as 32 lowercase hex digits. It is a pure function of the
/// text, so the same string maps to the same key in every file and every run.
/// Two distinct texts sharing a digest is not detected here.
pub fn derive_key(namespace: &str, text: &str) -> String {
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_DNS, text.as_bytes());
    format!("{}.{}", namespace, digest.simple())
}

/// Wrap a key in the brace delimiters used inside quest files
pub fn reference_token(key: &str) -> String {
    format!("{{{key}}}")
}

/// Generates reference tokens and remembers which text each key stands for
#[derive(Debug)]
pub struct KeyGenerator {
    namespace: String,
    tables: Tables,
}

impl KeyGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tables: Tables::new(),
        }
    }

    /// Derive the key for `text`, record it, and return its reference token
    pub fn generate(&mut self, text: &str) -> String {
        let key = derive_key(&self.namespace, text);
        let token = reference_token(&key);
        self.tables.insert(key, text);
        token
    }

    /// Whether `text` is exactly a reference token of this generator's namespace
    pub fn is_reference_token(&self, text: &str) -> bool {
        let Some(inner) = text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) else {
            return false;
        };
        let Some(digest) = inner
            .strip_prefix(self.namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            return false;
        };
        digest.len() == DIGEST_LEN
            && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn into_tables(self) -> Tables {
        self.tables
    }
}
