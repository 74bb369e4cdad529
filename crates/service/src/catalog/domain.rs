use serde::{Deserialize, Serialize};

/// An uploaded file part as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Create-product input. Required fields are still `Option` so the service can
/// report what is missing.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub image_main: Option<Upload>,
    pub images_secondary: Vec<Upload>,
    /// Raw comma-separated ids, e.g. `"1,2"`.
    pub category_ids: Option<String>,
}

/// Update-product input: every present field overwrites, absent fields stay untouched.
/// `category_ids` is the exception: absent clears all associations.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub image_main: Option<Upload>,
    pub images_secondary: Vec<Upload>,
    pub category_ids: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_main: Option<String>,
    pub images_secondary: Vec<String>,
    pub active: bool,
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_ids: Vec<i32>,
}
