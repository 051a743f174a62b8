//! Catalogue service.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use tracing::info;

use crate::{
    catalogue::{errors::CatalogueError, repository::ProductsRepository},
    products::{Product, ProductUpdate, parse_label},
    rows::LoadReport,
};

/// Stock level below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// In-memory product list mirrored to a [`ProductsRepository`].
///
/// Every mutation is applied to a copy, saved, and only then committed, so a failed save
/// leaves the in-memory list as it was.
pub struct Catalogue {
    repository: Box<dyn ProductsRepository>,
    products: Vec<Product>,
}

impl Debug for Catalogue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Catalogue")
            .field("products", &self.products)
            .finish_non_exhaustive()
    }
}

impl Catalogue {
    /// Open a catalogue, loading its products from `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the repository cannot be read.
    pub fn open(
        repository: impl ProductsRepository + 'static,
    ) -> Result<(Self, LoadReport), CatalogueError> {
        let mut catalogue = Self {
            repository: Box::new(repository),
            products: Vec::new(),
        };

        let report = catalogue.reload()?;

        Ok((catalogue, report))
    }

    /// Discard in-memory state and load the products again.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the repository cannot be read.
    pub fn reload(&mut self) -> Result<LoadReport, CatalogueError> {
        let loaded = self.repository.load()?;

        self.products = loaded.value;

        Ok(loaded.report)
    }

    /// Write the in-memory list back to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the repository cannot be written.
    pub fn save(&self) -> Result<(), CatalogueError> {
        self.repository.save(&self.products)?;

        Ok(())
    }

    /// All products, in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalogue has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.matches_name(name))
    }

    /// Products whose name contains `keyword`, ignoring case. An empty keyword matches
    /// everything.
    pub fn search(&self, keyword: &str) -> Vec<&Product> {
        let keyword = keyword.trim().to_lowercase();

        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&keyword))
            .collect()
    }

    /// Products with stock strictly below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.is_low_stock(threshold))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Products in `category`, ignoring case.
    pub fn in_category(&self, category: &str) -> Vec<&Product> {
        let category = category.trim().to_lowercase();

        self.products
            .iter()
            .filter(|product| product.category.to_lowercase() == category)
            .collect()
    }

    /// Add a product and save.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::InvalidInput`]: the name or category cannot be stored.
    /// - [`CatalogueError::AlreadyExists`]: a product with the same name exists.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved.
    pub fn add(&mut self, product: Product) -> Result<(), CatalogueError> {
        parse_label("name", &product.name)?;
        parse_label("category", &product.category)?;

        if self.find(&product.name).is_some() {
            return Err(CatalogueError::AlreadyExists(product.name));
        }

        let name = product.name.clone();

        self.commit(|products| {
            products.push(product);

            Ok(())
        })?;

        info!(product = %name, "added product");

        Ok(())
    }

    /// Remove the product called `name` and save.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::NotFound`]: no such product.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved.
    pub fn remove(&mut self, name: &str) -> Result<Product, CatalogueError> {
        let removed = self.commit(|products| {
            let idx = position(products, name)?;

            Ok(products.remove(idx))
        })?;

        info!(product = %removed.name, "removed product");

        Ok(removed)
    }

    /// Apply `update` to the product called `name` and save.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::NotFound`]: no such product.
    /// - [`CatalogueError::AlreadyExists`]: the new name belongs to another product.
    /// - [`CatalogueError::InvalidInput`]: a new name or category cannot be stored.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved.
    pub fn update(
        &mut self,
        name: &str,
        update: &ProductUpdate,
    ) -> Result<&Product, CatalogueError> {
        if let Some(new_name) = &update.name {
            parse_label("name", new_name)?;
        }

        if let Some(new_category) = &update.category {
            parse_label("category", new_category)?;
        }

        let idx = self.commit(|products| {
            let idx = position(products, name)?;

            if let Some(new_name) = &update.name {
                let taken = products
                    .iter()
                    .enumerate()
                    .any(|(other, product)| other != idx && product.matches_name(new_name));

                if taken {
                    return Err(CatalogueError::AlreadyExists(new_name.clone()));
                }
            }

            if let Some(product) = products.get_mut(idx) {
                update.apply_to(product);
            }

            Ok(idx)
        })?;

        let product = self
            .products
            .get(idx)
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))?;

        info!(product = %name, "updated product");

        Ok(product)
    }

    /// Remove every product and save. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the catalogue could not be saved.
    pub fn clear(&mut self) -> Result<usize, CatalogueError> {
        let removed = self.commit(|products| {
            let count = products.len();
            products.clear();

            Ok(count)
        })?;

        info!(removed, "cleared catalogue");

        Ok(removed)
    }

    /// Take `quantity` units of `name` out of stock and save. Returns the product as it
    /// was before the withdrawal.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::NotFound`]: no such product.
    /// - [`CatalogueError::InsufficientStock`]: fewer than `quantity` units are in stock.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved.
    pub fn withdraw(&mut self, name: &str, quantity: u32) -> Result<Product, CatalogueError> {
        self.commit(|products| {
            let idx = position(products, name)?;

            let product = products
                .get_mut(idx)
                .ok_or_else(|| CatalogueError::NotFound(name.to_string()))?;

            let before = product.clone();

            product.quantity = product.quantity.checked_sub(quantity).ok_or_else(|| {
                CatalogueError::InsufficientStock {
                    name: before.name.clone(),
                    requested: quantity,
                    available: before.quantity,
                }
            })?;

            Ok(before)
        })
    }

    /// Put `quantity` units of `name` back into stock and save. Returns `false` if the
    /// product no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the catalogue could not be saved.
    pub fn restock(&mut self, name: &str, quantity: u32) -> Result<bool, CatalogueError> {
        if self.find(name).is_none() {
            return Ok(false);
        }

        self.commit(|products| {
            if let Some(product) = products.iter_mut().find(|product| product.matches_name(name))
            {
                product.quantity = product.quantity.saturating_add(quantity);
            }

            Ok(())
        })?;

        Ok(true)
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<Product>) -> Result<T, CatalogueError>,
    ) -> Result<T, CatalogueError> {
        let mut next = self.products.clone();

        let output = change(&mut next)?;

        self.repository.save(&next)?;
        self.products = next;

        Ok(output)
    }
}

fn position(products: &[Product], name: &str) -> Result<usize, CatalogueError> {
    products
        .iter()
        .position(|product| product.matches_name(name))
        .ok_or_else(|| CatalogueError::NotFound(name.to_string()))
}
