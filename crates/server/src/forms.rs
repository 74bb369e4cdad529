//! multipart/form-data parsing for the catalog write endpoints.
use std::collections::HashMap;

use axum::extract::Multipart;
use service::catalog::domain::{CategoryPatch, NewCategory, NewProduct, ProductPatch, Upload};

use crate::errors::ApiError;

/// Text fields and file parts of one multipart body, keyed by field name.
/// File parts with no content count as not sent.
#[derive(Debug, Default)]
pub struct FormParts {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<Upload>>,
}

impl FormParts {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut parts = FormParts::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content = field.bytes().await.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    if content.is_empty() {
                        continue;
                    }
                    parts.files.entry(name).or_default().push(Upload { filename, content: content.to_vec() });
                }
                None => {
                    let text = field.text().await.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    parts.fields.insert(name, text);
                }
            }
        }
        Ok(parts)
    }

    pub fn text(&mut self, name: &str) -> Option<String> { self.fields.remove(name) }

    pub fn file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name).and_then(|v| v.into_iter().next())
    }

    pub fn files(&mut self, name: &str) -> Vec<Upload> { self.files.remove(name).unwrap_or_default() }

    pub fn flag(&mut self, name: &str) -> Result<Option<bool>, ApiError> {
        self.text(name).map(|raw| parse_bool(name, &raw)).transpose()
    }

    pub fn into_new_product(mut self) -> Result<NewProduct, ApiError> {
        Ok(NewProduct {
            name: self.text("name"),
            description: self.text("description"),
            active: self.flag("active")?,
            image_main: self.file("image_main"),
            images_secondary: self.files("images_secondary"),
            category_ids: self.text("category_ids"),
        })
    }

    pub fn into_product_patch(mut self) -> Result<ProductPatch, ApiError> {
        Ok(ProductPatch {
            name: self.text("name"),
            description: self.text("description"),
            active: self.flag("active")?,
            image_main: self.file("image_main"),
            images_secondary: self.files("images_secondary"),
            category_ids: self.text("category_ids"),
        })
    }

    pub fn into_new_category(mut self) -> NewCategory {
        NewCategory { name: self.text("name"), description: self.text("description"), image: self.file("image") }
    }

    pub fn into_category_patch(mut self) -> CategoryPatch {
        CategoryPatch { name: self.text("name"), description: self.text("description"), image: self.file("image") }
    }
}

/// Form booleans as browsers and HTTP clients send them.
fn parse_bool(field: &str, raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        _ => Err(ApiError::bad_request(format!("{field} must be a boolean"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_booleans() {
        assert!(parse_bool("active", "True").unwrap());
        assert!(parse_bool("active", " on ").unwrap());
        assert!(!parse_bool("active", "0").unwrap());
        assert!(parse_bool("active", "maybe").is_err());
    }

    #[test]
    fn product_patch_takes_only_sent_fields() {
        let mut parts = FormParts::default();
        parts.fields.insert("name".into(), "Boots".into());
        parts.files.insert(
            "images_secondary".into(),
            vec![
                Upload { filename: "a.png".into(), content: vec![1] },
                Upload { filename: "b.png".into(), content: vec![2] },
            ],
        );
        let patch = parts.into_product_patch().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Boots"));
        assert!(patch.active.is_none());
        assert!(patch.image_main.is_none());
        assert!(patch.category_ids.is_none());
        assert_eq!(patch.images_secondary.len(), 2);
    }
}
