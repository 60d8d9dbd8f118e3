use core::str::FromStr;

use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{DomainError, DomainResult, Entity};

/// Category identifier: a lowercase slug such as `cakes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Derive a slug from a display name ("Savory Snacks" becomes `savory-snacks`).
    pub fn slugify(name: &str) -> DomainResult<Self> {
        let slug = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        slug.parse()
    }

    pub(crate) fn from_static(slug: &'static str) -> Self {
        Self(slug.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("CategoryId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product category with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Derived from `name` when omitted.
    #[serde(default)]
    pub id: Option<CategoryId>,
    pub name: String,
}

impl ProductCategory {
    /// New categories always start empty.
    pub fn create(new: NewCategory) -> DomainResult<Self> {
        require_text("name", &new.name)?;
        let id = match new.id {
            Some(id) => id,
            None => CategoryId::slugify(&new.name)?,
        };
        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            count: 0,
        })
    }
}

impl Entity for ProductCategory {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Shift the cached count of `id` by `delta`, clamping at zero.
///
/// Unknown categories are left alone.
pub fn adjust_count(categories: &mut [ProductCategory], id: &CategoryId, delta: i64) {
    if let Some(category) = categories.iter_mut().find(|c| &c.id == id) {
        let next = (i64::from(category.count) + delta).clamp(0, i64::from(u32::MAX));
        category.count = u32::try_from(next).unwrap_or(u32::MAX);
    }
}
