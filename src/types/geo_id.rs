use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::geo_type::GeoType;
use crate::error::LookupError;

/// Fifteen-character census block identifier: state(2) county(3) tract(6) block(4).
/// Keeps the original text (with leading zeros) behind a shared pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockId(Arc<str>); // e.g. "160010101001000"

/// Sub-fields of a block identifier, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockParts<'a> {
    pub state: &'a str,
    pub county: &'a str,
    pub tract: &'a str,
    pub block: &'a str,
}

impl BlockId {
    pub const LEN: usize = 15;

    /// Validate and wrap an identifier. Anything but exactly 15 ASCII digits is rejected.
    pub fn parse(id: &str) -> Result<Self, LookupError> {
        if id.len() != Self::LEN || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LookupError::Parse(format!("malformed block identifier {id:?}")));
        }
        Ok(Self(Arc::from(id)))
    }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    /// Returns the prefix naming the enclosing entity at level `parent_ty`.
    pub fn to_parent(&self, parent_ty: GeoType) -> &str {
        &self.0[..parent_ty.id_len()]
    }

    /// Split into state/county/tract/block at the fixed offsets.
    pub fn parts(&self) -> BlockParts<'_> {
        let [state, county, tract, block] = GeoType::order().map(|ty| {
            let start = match ty {
                GeoType::State  => 0,
                GeoType::County => GeoType::State.id_len(),
                GeoType::Tract  => GeoType::County.id_len(),
                GeoType::Block  => GeoType::Tract.id_len(),
            };
            &self.0[start..ty.id_len()]
        });
        BlockParts { state, county, tract, block }
    }
}

impl BlockParts<'_> {
    pub fn get(&self, ty: GeoType) -> &str {
        match ty {
            GeoType::State => self.state,
            GeoType::County => self.county,
            GeoType::Tract => self.tract,
            GeoType::Block => self.block,
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl TryFrom<String> for BlockId {
    type Error = LookupError;
    fn try_from(id: String) -> Result<Self, Self::Error> { Self::parse(&id) }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self { id.0.to_string() }
}
