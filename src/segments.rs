use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Roster groups keyed by segment name ("hit", "sp", "rp").
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Segments {
    groups: BTreeMap<String, Vec<u32>>,
}

impl Segments {
    pub fn new(groups: BTreeMap<String, Vec<u32>>) -> Self {
        Self { groups }
    }

    pub fn builtin() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert("hit".to_string(), HIT_IDS.to_vec());
        groups.insert("sp".to_string(), SP_IDS.to_vec());
        groups.insert("rp".to_string(), RP_IDS.to_vec());
        Self { groups }
    }

    /// Reads `{ "hit": [..], "sp": [..], "rp": [..] }`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read segments file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse segments file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str::<Self>(raw).context("segments must map names to integer id lists")
    }

    pub fn resolve(&self, key: &str) -> Result<&[u32]> {
        self.groups
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("unknown segment {key:?}"))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

const HIT_IDS: &[u32] = &[
    26546, 27915, 19455, 23802, 16925, 15654, 30028, 21496, 16398, 33280, 29646, 35108, 30038,
    21587, 31912, 21547, 25629, 21535, 19458, 25183, 25705, 23395, 23695, 31363, 24878, 23372,
    25477, 29830, 31661, 26202, 31370, 28253, 27690, 23968, 27501, 26374, 26244, 29844, 27963,
    24605, 10655, 18054, 27789, 22766, 19960, 29571, 19877, 30063, 26148, 26143, 10200, 29949,
    31396, 25999, 31583, 19562,
];

const SP_IDS: &[u32] = &[
    31764, 13050, 26056, 20370, 31815, 19736, 30113, 31312, 26171, 27932, 31623, 23301, 19666,
    26482, 19222, 14120, 31475, 23735, 17732, 15094, 26440, 13580, 16358, 20629,
];

const RP_IDS: &[u32] = &[
    31764, 25327, 29633, 26203, 13050, 26136, 21345, 33568, 27695, 19804, 31815, 19736, 13607,
    30161, 9174, 30113, 30206, 27662, 15256, 27481, 22113, 31312, 25873, 33248, 27974, 26260,
    22176, 27626, 19586, 23324, 27583, 21863, 19835, 20546, 26259, 27932, 21212, 18674, 23301,
    19666, 26482, 16631, 19205, 30016, 24591, 16128, 24590, 13190, 27984, 25957, 27271, 21924,
    15514, 29615, 20515, 19222, 14120, 31884, 23811, 25839, 24710, 26353, 22288, 29770, 20827,
    17732, 19281, 29564, 33821, 15094, 24094, 26440, 13580, 26344, 26285, 20629, 20379,
];
