use std::fmt;

/// The server-side shared secret callers must present.
///
/// Compared by exact string match. There is no identity, expiry or rotation.
#[derive(Clone)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// `None` for an empty secret: an empty value disables the check.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        (!secret.is_empty()).then_some(Self(secret))
    }

    pub fn verify(&self, supplied: Option<&str>) -> bool {
        supplied == Some(self.0.as_str())
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
