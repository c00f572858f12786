//! Derivation paths

use crate::{ChildNumber, Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Prefix for all derivation paths.
const PREFIX: &str = "m";

/// Hardened root alias. Treated as the bare root, the marker is ignored.
const HARDENED_PREFIX: &str = "m'";

/// Derivation paths within a hierarchical keyspace.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DerivationPath {
    path: Vec<ChildNumber>,
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<DerivationPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DerivationPathVisitor;
        impl de::Visitor<'_> for DerivationPathVisitor {
            type Value = DerivationPath;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a derivation path such as \"m/44'/0'/0'/0/0\"")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                DerivationPath::from_str(value).map_err(|err| de::Error::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(DerivationPathVisitor)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl DerivationPath {
    /// Iterate over the [`ChildNumber`] values in this derivation path.
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.path.iter().cloned()
    }

    /// Is this derivation path empty? (i.e. the root)
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Get the count of [`ChildNumber`] values in this derivation path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Get the parent [`DerivationPath`] for the current one.
    ///
    /// Returns `None` if this is already the root path.
    pub fn parent(&self) -> Option<Self> {
        self.path.len().checked_sub(1).map(|n| {
            let mut parent = self.clone();
            parent.path.truncate(n);
            parent
        })
    }

    /// Push a [`ChildNumber`] onto an existing derivation path.
    pub fn push(&mut self, child_number: ChildNumber) {
        self.path.push(child_number)
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.path
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;

        for child_number in self.iter() {
            write!(f, "/{}", child_number)?;
        }

        Ok(())
    }
}

impl Extend<ChildNumber> for DerivationPath {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        self.path.extend(iter);
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// The first component only has to start with `m` or `M`; a path that is
    /// exactly `m` or `m'` (any case) is the root.
    fn from_str(path: &str) -> Result<DerivationPath> {
        if path.eq_ignore_ascii_case(PREFIX) || path.eq_ignore_ascii_case(HARDENED_PREFIX) {
            return Ok(DerivationPath::default());
        }

        let mut path = path.split('/');

        match path.next() {
            Some(root) if root.starts_with(['m', 'M']) => {}
            _ => return Err(Error::InvalidPath),
        }

        Ok(DerivationPath { path: path.map(str::parse).collect::<Result<_>>()? })
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> std::vec::IntoIter<ChildNumber> {
        self.path.into_iter()
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(path: Vec<ChildNumber>) -> Self {
        DerivationPath { path }
    }
}

#[cfg(test)]
mod tests {
    use super::DerivationPath;
    use crate::{ChildNumber, Error, HARDENED_OFFSET};

    #[test]
    fn round_trip() {
        let path_m = "m";
        assert_eq!(path_m.parse::<DerivationPath>().unwrap().to_string(), path_m);

        let path_m_0 = "m/0";
        assert_eq!(path_m_0.parse::<DerivationPath>().unwrap().to_string(), path_m_0);

        let path_m_0_2147483647h = "m/0/2147483647'";
        assert_eq!(path_m_0_2147483647h.parse::<DerivationPath>().unwrap().to_string(), path_m_0_2147483647h);

        let path_m_0_2147483647h_1_2147483646h_2 = "m/0/2147483647'/1/2147483646'/2";
        assert_eq!(
            path_m_0_2147483647h_1_2147483646h_2.parse::<DerivationPath>().unwrap().to_string(),
            path_m_0_2147483647h_1_2147483646h_2
        );
    }

    #[test]
    fn root_aliases() {
        for root in ["m", "M", "m'", "M'"] {
            assert!(root.parse::<DerivationPath>().unwrap().is_empty(), "{root}");
        }

        // only the first component has to start with `m`
        let path = "M/1'".parse::<DerivationPath>().unwrap();
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![ChildNumber(1 + HARDENED_OFFSET)]);
        assert_eq!("m'/5".parse::<DerivationPath>().unwrap().len(), 1);
    }

    #[test]
    fn rejects_bad_roots_and_indices() {
        assert!(matches!("123".parse::<DerivationPath>(), Err(Error::InvalidPath)));
        assert!(matches!("".parse::<DerivationPath>(), Err(Error::InvalidPath)));
        assert!(matches!("/0".parse::<DerivationPath>(), Err(Error::InvalidPath)));
        assert!(matches!("m/2147483648".parse::<DerivationPath>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("m/0/".parse::<DerivationPath>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("m/abc".parse::<DerivationPath>(), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn parent() {
        let path_m_0_2147483647h = "m/0/2147483647'".parse::<DerivationPath>().unwrap();
        let path_m_0 = path_m_0_2147483647h.parent().unwrap();
        assert_eq!("m/0", path_m_0.to_string());

        let path_m = path_m_0.parent().unwrap();
        assert_eq!("m", path_m.to_string());
        assert_eq!(path_m.parent(), None);
    }

    #[test]
    fn serde_as_string() {
        let path: DerivationPath = serde_json::from_str("\"m/44'/0'/0'/0/7\"").unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"m/44'/0'/0'/0/7\"");
        assert!(serde_json::from_str::<DerivationPath>("\"x/0\"").is_err());
    }
}
