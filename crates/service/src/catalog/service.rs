use chrono::Utc;
use models::{category, category_product, product};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument, warn};

use super::category_ids::parse_category_ids;
use super::domain::{CategoryPatch, CategoryView, NewCategory, NewProduct, ProductPatch, ProductView, Upload};
use super::store;
use crate::auth::domain::Identity;
use crate::errors::ServiceError;
use crate::media::MediaStore;

/// Product/category orchestration.
///
/// Writes follow one ordering: validate and parse everything first, store new
/// files, commit rows and associations in one transaction, then remove the
/// files that were replaced. Removal after commit is best-effort.
#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseConnection,
    media: MediaStore,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::InvalidInput(format!("{field} is required")))
}

fn non_blank(name: String) -> Result<String, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("name must not be empty".into()));
    }
    Ok(name)
}

impl CatalogService {
    pub fn new(db: DatabaseConnection, media: MediaStore) -> Self { Self { db, media } }

    pub fn media(&self) -> &MediaStore { &self.media }

    async fn store_uploads(&self, uploads: &[Upload]) -> Result<Vec<String>, ServiceError> {
        let mut stored = Vec::with_capacity(uploads.len());
        for up in uploads {
            match self.media.store(&up.content, &up.filename).await {
                Ok(path) => stored.push(path),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e.into());
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal; failures are logged and otherwise ignored.
    async fn discard(&self, paths: &[String]) {
        for (path, e) in self.media.remove_many(paths).await {
            warn!(%path, error = %e, "failed to remove media file");
        }
    }

    pub async fn get_product(&self, id: i32) -> Result<ProductView, ServiceError> {
        let model = store::find_product(&self.db, id).await?;
        store::product_view(&self.db, model).await
    }

    #[instrument(skip(self, actor, input), fields(actor = %actor.username))]
    pub async fn create_product(&self, actor: &Identity, input: NewProduct) -> Result<ProductView, ServiceError> {
        let name = non_blank(required(input.name, "name")?)?;
        let active = required(input.active, "active")?;
        let image_main = required(input.image_main, "image_main")?;
        if input.images_secondary.is_empty() {
            return Err(ServiceError::InvalidInput("images_secondary is required".into()));
        }
        let requested = parse_category_ids(input.category_ids.as_deref())?;
        let description = input.description;

        let main_path = self.store_uploads(std::slice::from_ref(&image_main)).await?;
        let secondary = match self.store_uploads(&input.images_secondary).await {
            Ok(paths) => paths,
            Err(e) => {
                self.discard(&main_path).await;
                return Err(e);
            }
        };

        let persisted = async {
            let txn = self.db.begin().await?;
            let created = product::create(
                &txn,
                &name,
                description.as_deref(),
                main_path.first().map(String::as_str),
                &secondary,
                active,
            )
            .await?;
            if let Some(ids) = requested.as_deref() {
                let resolved = store::resolve_categories(&txn, ids).await?;
                category_product::replace_for_product(&txn, created.id, &resolved).await?;
            }
            txn.commit().await?;
            Ok::<_, ServiceError>(created)
        }
        .await;

        let created = match persisted {
            Ok(created) => created,
            Err(e) => {
                self.discard(&main_path).await;
                self.discard(&secondary).await;
                return Err(e);
            }
        };
        info!(product_id = created.id, "product_created");
        store::product_view(&self.db, created).await
    }

    #[instrument(skip(self, actor, patch), fields(actor = %actor.username))]
    pub async fn update_product(&self, actor: &Identity, id: i32, patch: ProductPatch) -> Result<ProductView, ServiceError> {
        let requested = parse_category_ids(patch.category_ids.as_deref())?;
        let name = patch.name.map(non_blank).transpose()?;
        let existing = store::find_product(&self.db, id).await?;

        let new_main = match &patch.image_main {
            Some(up) => self.store_uploads(std::slice::from_ref(up)).await?,
            None => Vec::new(),
        };
        let new_secondary = match self.store_uploads(&patch.images_secondary).await {
            Ok(paths) => paths,
            Err(e) => {
                self.discard(&new_main).await;
                return Err(e);
            }
        };

        let mut replaced: Vec<String> = Vec::new();
        let mut am: product::ActiveModel = existing.clone().into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(description) = patch.description {
            am.description = Set(Some(description));
        }
        if let Some(active) = patch.active {
            am.active = Set(active);
        }
        if let Some(path) = new_main.first() {
            am.image_main = Set(Some(path.clone()));
            replaced.extend(existing.image_main.clone());
        }
        if !new_secondary.is_empty() {
            am.images_secondary = Set(Some(product::encode_images(&new_secondary)));
            replaced.extend(existing.secondary_images());
        }
        am.updated_at = Set(Utc::now().into());

        let persisted = async {
            let txn = self.db.begin().await?;
            let updated = am.update(&txn).await?;
            let resolved = match requested.as_deref() {
                Some(ids) => store::resolve_categories(&txn, ids).await?,
                None => Vec::new(),
            };
            category_product::replace_for_product(&txn, id, &resolved).await?;
            txn.commit().await?;
            Ok::<_, ServiceError>(updated)
        }
        .await;

        let updated = match persisted {
            Ok(updated) => updated,
            Err(e) => {
                self.discard(&new_main).await;
                self.discard(&new_secondary).await;
                return Err(e);
            }
        };
        self.discard(&replaced).await;
        info!(product_id = id, replaced_files = replaced.len(), "product_updated");
        store::product_view(&self.db, updated).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete_product(&self, actor: &Identity, id: i32) -> Result<(), ServiceError> {
        let existing = store::find_product(&self.db, id).await?;

        let txn = self.db.begin().await?;
        category_product::delete_for_product(&txn, id).await?;
        product::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        let mut files: Vec<String> = existing.image_main.iter().cloned().collect();
        files.extend(existing.secondary_images());
        self.discard(&files).await;
        info!(product_id = id, "product_deleted");
        Ok(())
    }

    pub async fn get_category(&self, id: i32) -> Result<CategoryView, ServiceError> {
        let model = store::find_category(&self.db, id).await?;
        store::category_view(&self.db, model).await
    }

    #[instrument(skip(self, actor, input), fields(actor = %actor.username))]
    pub async fn create_category(&self, actor: &Identity, input: NewCategory) -> Result<CategoryView, ServiceError> {
        let name = non_blank(required(input.name, "name")?)?;
        let image = required(input.image, "image")?;

        let stored = self.store_uploads(std::slice::from_ref(&image)).await?;
        let created = match category::create(&self.db, &name, input.description.as_deref(), stored.first().map(String::as_str)).await {
            Ok(created) => created,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e.into());
            }
        };
        info!(category_id = created.id, "category_created");
        store::category_view(&self.db, created).await
    }

    #[instrument(skip(self, actor, patch), fields(actor = %actor.username))]
    pub async fn update_category(&self, actor: &Identity, id: i32, patch: CategoryPatch) -> Result<CategoryView, ServiceError> {
        let name = patch.name.map(non_blank).transpose()?;
        let existing = store::find_category(&self.db, id).await?;

        let new_image = match &patch.image {
            Some(up) => self.store_uploads(std::slice::from_ref(up)).await?,
            None => Vec::new(),
        };

        let mut replaced: Vec<String> = Vec::new();
        let mut am: category::ActiveModel = existing.clone().into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(description) = patch.description {
            am.description = Set(Some(description));
        }
        if let Some(path) = new_image.first() {
            am.image = Set(Some(path.clone()));
            replaced.extend(existing.image.clone());
        }
        am.updated_at = Set(Utc::now().into());

        let updated = match am.update(&self.db).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard(&new_image).await;
                return Err(e.into());
            }
        };
        self.discard(&replaced).await;
        info!(category_id = id, replaced_files = replaced.len(), "category_updated");
        store::category_view(&self.db, updated).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete_category(&self, actor: &Identity, id: i32) -> Result<(), ServiceError> {
        let existing = store::find_category(&self.db, id).await?;

        let txn = self.db.begin().await?;
        let unlinked = category_product::delete_for_category(&txn, id).await?;
        category::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        let files: Vec<String> = existing.image.into_iter().collect();
        self.discard(&files).await;
        info!(category_id = id, unlinked, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::test_support::get_db;
    use sea_orm::{ActiveModelTrait, Set};
    use tempfile::TempDir;

    struct Fixture {
        _db_dir: TempDir,
        _media_dir: TempDir,
        svc: CatalogService,
        db: DatabaseConnection,
    }

    async fn fixture() -> Result<Fixture, anyhow::Error> {
        let (db_dir, db) = get_db().await?;
        let media_dir = tempfile::tempdir()?;
        let media = MediaStore::new(media_dir.path().join("uploads").to_string_lossy());
        let svc = CatalogService::new(db.clone(), media);
        Ok(Fixture { _db_dir: db_dir, _media_dir: media_dir, svc, db })
    }

    fn actor() -> Identity { Identity { user_id: 1, username: "tester".into() } }

    fn upload(name: &str, body: &[u8]) -> Upload { Upload { filename: name.into(), content: body.to_vec() } }

    fn new_category(name: &str) -> NewCategory {
        NewCategory { name: Some(name.into()), description: None, image: Some(upload("c.png", b"cat")) }
    }

    fn new_product(name: &str, category_ids: Option<&str>) -> NewProduct {
        NewProduct {
            name: Some(name.into()),
            description: Some("desc".into()),
            active: Some(true),
            image_main: Some(upload("main.jpg", b"main")),
            images_secondary: vec![upload("s1.jpg", b"s1"), upload("s2.jpg", b"s2")],
            category_ids: category_ids.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_product_attaches_existing_categories() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let a = f.svc.create_category(&actor(), new_category("A")).await?;
        let b = f.svc.create_category(&actor(), new_category("B")).await?;

        let both = f.svc.create_product(&actor(), new_product("p1", Some(&format!("{},{}", a.id, b.id)))).await?;
        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(both.category_ids, expected);
        assert_eq!(both.images_secondary.len(), 2);
        assert!(Path::new(both.image_main.as_deref().unwrap()).exists());

        let partial = f.svc.create_product(&actor(), new_product("p2", Some(&format!("{},9999", a.id)))).await?;
        assert_eq!(partial.category_ids, vec![a.id]);

        let cat = f.svc.get_category(a.id).await?;
        let mut prods = vec![both.id, partial.id];
        prods.sort();
        assert_eq!(cat.product_ids, prods);
        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_fields() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let mut input = new_product("p", None);
        input.images_secondary.clear();
        assert!(matches!(f.svc.create_product(&actor(), input).await, Err(ServiceError::InvalidInput(_))));

        let mut input = new_product("p", None);
        input.active = None;
        assert!(matches!(f.svc.create_product(&actor(), input).await, Err(ServiceError::InvalidInput(_))));

        let mut input = new_product("p", None);
        input.image_main = None;
        assert!(matches!(f.svc.create_product(&actor(), input).await, Err(ServiceError::InvalidInput(_))));

        let err = f.svc.create_product(&actor(), new_product("p", Some("1,abc"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        // nothing was written before the rejection
        assert!(!Path::new(f.svc.media().root()).exists());
        Ok(())
    }

    #[tokio::test]
    async fn update_name_only_keeps_everything_else() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let cat = f.svc.create_category(&actor(), new_category("C")).await?;
        let ids = cat.id.to_string();
        let created = f.svc.create_product(&actor(), new_product("before", Some(&ids))).await?;

        let patch = ProductPatch { name: Some("after".into()), category_ids: Some(ids), ..Default::default() };
        let updated = f.svc.update_product(&actor(), created.id, patch).await?;
        assert_eq!(updated.name, "after");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.image_main, created.image_main);
        assert_eq!(updated.images_secondary, created.images_secondary);
        assert_eq!(updated.active, created.active);
        assert_eq!(updated.category_ids, vec![cat.id]);
        for path in created.images_secondary.iter().chain(created.image_main.iter()) {
            assert!(Path::new(path).exists());
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_without_category_ids_clears_associations() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let cat = f.svc.create_category(&actor(), new_category("C")).await?;
        let created = f.svc.create_product(&actor(), new_product("p", Some(&cat.id.to_string()))).await?;
        assert_eq!(created.category_ids, vec![cat.id]);

        let updated = f.svc.update_product(&actor(), created.id, ProductPatch { active: Some(false), ..Default::default() }).await?;
        assert!(updated.category_ids.is_empty());
        assert!(!updated.active);
        assert!(f.svc.get_category(cat.id).await?.product_ids.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_images_replaces_files_after_commit() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let created = f.svc.create_product(&actor(), new_product("p", None)).await?;

        let patch = ProductPatch {
            image_main: Some(upload("new.png", b"new")),
            images_secondary: vec![upload("n1.png", b"n1")],
            ..Default::default()
        };
        let updated = f.svc.update_product(&actor(), created.id, patch).await?;
        assert_ne!(updated.image_main, created.image_main);
        assert_eq!(updated.images_secondary.len(), 1);
        assert!(Path::new(updated.image_main.as_deref().unwrap()).exists());
        assert!(!Path::new(created.image_main.as_deref().unwrap()).exists());
        for old in &created.images_secondary {
            assert!(!Path::new(old).exists());
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalid_category_ids_leave_product_untouched() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let created = f.svc.create_product(&actor(), new_product("p", None)).await?;
        let patch = ProductPatch { name: Some("changed".into()), category_ids: Some("x".into()), ..Default::default() };
        assert!(matches!(f.svc.update_product(&actor(), created.id, patch).await, Err(ServiceError::InvalidInput(_))));
        assert_eq!(f.svc.get_product(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn delete_product_tolerates_malformed_secondary_images() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let cat = f.svc.create_category(&actor(), new_category("C")).await?;
        let created = f.svc.create_product(&actor(), new_product("p", Some(&cat.id.to_string()))).await?;

        let row = store::find_product(&f.db, created.id).await?;
        let mut am: product::ActiveModel = row.into();
        am.images_secondary = Set(Some("not json".into()));
        am.update(&f.db).await?;

        f.svc.delete_product(&actor(), created.id).await?;
        assert!(matches!(f.svc.get_product(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(!Path::new(created.image_main.as_deref().unwrap()).exists());
        assert!(f.svc.get_category(cat.id).await?.product_ids.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn category_lifecycle() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let created = f.svc.create_category(&actor(), new_category("Shoes")).await?;
        assert_eq!(created.name, "Shoes");
        let first_image = created.image.clone().unwrap();
        assert!(Path::new(&first_image).exists());

        let patch = CategoryPatch { description: Some("footwear".into()), image: Some(upload("x.webp", b"x")), ..Default::default() };
        let updated = f.svc.update_category(&actor(), created.id, patch).await?;
        assert_eq!(updated.name, "Shoes");
        assert_eq!(updated.description.as_deref(), Some("footwear"));
        assert!(!Path::new(&first_image).exists());

        let product = f.svc.create_product(&actor(), new_product("p", Some(&created.id.to_string()))).await?;
        f.svc.delete_category(&actor(), created.id).await?;
        assert!(matches!(f.svc.get_category(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(!Path::new(updated.image.as_deref().unwrap()).exists());
        assert!(f.svc.get_product(product.id).await?.category_ids.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_entities_are_not_found() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        assert!(matches!(f.svc.get_product(42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.delete_category(&actor(), 42).await, Err(ServiceError::NotFound(_))));
        let patch = CategoryPatch { name: Some("n".into()), ..Default::default() };
        assert!(matches!(f.svc.update_category(&actor(), 42, patch).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.create_category(&actor(), NewCategory::default()).await, Err(ServiceError::InvalidInput(_))));
        Ok(())
    }
}
