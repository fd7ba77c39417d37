use serde::{de, Deserialize, Deserializer, Serialize};

/// One allowed value of a flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagValue {
    #[serde(default, deserialize_with = "loose_record_id")]
    pub id: u64,
    #[serde(default)]
    pub value: String,
    /// Empty means any group may set this value
    #[serde(default, deserialize_with = "loose_id")]
    pub setter_group_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl FlagValue {
    /// A fresh, not yet persisted value
    pub fn new() -> Self {
        Self {
            id: 0,
            value: String::new(),
            setter_group_id: String::new(),
            is_active: true,
        }
    }

    pub fn has_setter(&self) -> bool {
        !self.setter_group_id.is_empty()
    }
}

impl Default for FlagValue {
    fn default() -> Self {
        Self::new()
    }
}

/// Product/component scope of a flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagVisibility {
    #[serde(default, deserialize_with = "loose_record_id")]
    pub id: u64,
    pub product: String,
    /// Empty means any component of the product
    #[serde(default)]
    pub component: String,
}

impl FlagVisibility {
    pub fn new(product: &str, component: &str) -> Self {
        Self {
            id: 0,
            product: product.to_string(),
            component: component.to_string(),
        }
    }

    pub fn is_any_component(&self) -> bool {
        self.component.is_empty()
    }

    pub fn same_scope(&self, other: &FlagVisibility) -> bool {
        self.product == other.product && self.component == other.component
    }
}

/// Permission group that can be chosen as a value setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(deserialize_with = "loose_id")]
    pub id: String,
    pub name: String,
}

impl Group {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub components: Vec<String>,
}

/// Products and their components, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    /// Components of `product`, empty for an unknown product
    pub fn components_of(&self, product: &str) -> Vec<String> {
        self.products
            .iter()
            .find(|p| p.name == product)
            .map(|p| p.components.clone())
            .unwrap_or_default()
    }
}

/// Free-standing fields of the flag being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "loose_id")]
    pub sortkey: String,
}

/// Initial state handed to the editor before it takes over
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub properties: FlagProperties,
    #[serde(default)]
    pub values: Vec<FlagValue>,
    #[serde(default)]
    pub visibility: Vec<FlagVisibility>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub catalog: Catalog,
}

fn default_active() -> bool {
    true
}

/// Accepts a number, a string or null and keeps it as text
fn loose_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Int(i64),
        Text(String),
    }

    Ok(match Option::<LooseId>::deserialize(deserializer)? {
        Some(LooseId::Int(n)) => n.to_string(),
        Some(LooseId::Text(s)) => s,
        None => String::new(),
    })
}

/// Record id given as a number, a numeric string or null. Null and the
/// empty string mean a record that has not been stored yet.
fn loose_record_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RecordId {
        Int(u64),
        Text(String),
    }

    match Option::<RecordId>::deserialize(deserializer)? {
        Some(RecordId::Int(n)) => Ok(n),
        Some(RecordId::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(RecordId::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid record id '{}'", s))),
        None => Ok(0),
    }
}
