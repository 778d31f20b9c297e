use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps an identity (usually an email) so log lines never carry it in full.
///
/// `Display` and `Debug` keep the first character of the local part and the
/// domain: `user1@example.com` renders as `u****@example.com`. Serialization
/// passes the real value through, since API responses need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn write_masked(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.as_ref();
        match value.split_once('@') {
            Some((local, domain)) => {
                let head: String = local.chars().take(1).collect();
                write!(f, "{}****@{}", head, domain)
            }
            None => write!(f, "********"),
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
