use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Domain entity - one point mutation, drawn as a needle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub pos: f64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Background needles are drawn faded
    #[serde(default)]
    pub background: bool,
    /// Assigned when the plot is created
    #[serde(default, skip_deserializing)]
    pub id: usize,
    /// Host-defined properties, handed through to tooltips
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Mutation {
    pub fn new(pos: f64, value: f64) -> Self {
        Self {
            pos,
            value,
            category: None,
            reference: None,
            alt: None,
            background: false,
            id: 0,
            extra: Map::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn head_key(&self) -> HeadKey {
        HeadKey::new(self.pos, self.value)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(single)) => vec![single],
        Some(OneOrMany::Many(many)) => many,
        None => Vec::new(),
    })
}

/// Domain entity - a sequence region (domain, PTM or binding site)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "type", default, deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Site {
    pub fn new(start: f64, end: f64, site_type: &str) -> Self {
        Self { start, end, types: vec![site_type.to_string()], extra: Map::new() }
    }

    /// Style class: the single type, or `multi_ptm` for sites of several types.
    pub fn css_class(&self) -> String {
        match self.types.as_slice() {
            [single] => format!("site {}", single).replace(['(', ')'], ""),
            _ => "site multi_ptm".to_string(),
        }
    }
}

/// Plot input: mutations and sites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotData {
    pub mutations: Vec<Mutation>,
    pub sites: Vec<Site>,
}

impl PlotData {
    /// Sort mutations by decreasing value and number them in that order,
    /// so taller needles are drawn first. A host `id` is replaced.
    pub fn assign_ids(&mut self) {
        self.mutations.sort_by(|a, b| b.value.total_cmp(&a.value));
        for (id, mutation) in self.mutations.iter_mut().enumerate() {
            mutation.extra.remove("id");
            mutation.id = id;
        }
    }
}

/// Identity of a head location: exact `(pos, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadKey {
    pos_bits: u64,
    value_bits: u64,
}

impl HeadKey {
    pub fn new(pos: f64, value: f64) -> Self {
        // +0.0 folds -0.0 into 0.0
        Self { pos_bits: (pos + 0.0).to_bits(), value_bits: (value + 0.0).to_bits() }
    }

    pub fn pos(&self) -> f64 {
        f64::from_bits(self.pos_bits)
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.value_bits)
    }
}

/// Needle heads sharing one location.
#[derive(Debug, Clone, Default)]
pub struct HeadGroups {
    groups: HashMap<HeadKey, Vec<usize>>,
}

impl HeadGroups {
    pub fn from_mutations(mutations: &[Mutation]) -> Self {
        let mut groups: HashMap<HeadKey, Vec<usize>> = HashMap::new();
        for mutation in mutations {
            groups.entry(mutation.head_key()).or_default().push(mutation.id);
        }
        Self { groups }
    }

    /// Ids of the heads at `key`, in id order.
    pub fn members(&self, key: &HeadKey) -> &[usize] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn overlap_count(&self, key: &HeadKey) -> usize {
        self.members(key).len()
    }

    pub fn is_overlapping(&self, key: &HeadKey) -> bool {
        self.overlap_count(key) > 1
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
