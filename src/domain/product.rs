use crate::domain::money::Balance;
use crate::domain::{AccountId, ProductId};
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// A listed product, owned by the merchant that created it.
///
/// A quantity of zero keeps the product listed but unbuyable until the
/// creator restocks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Balance,
    pub quantity: u64,
    pub creator: AccountId,
}

/// The product catalog: a compacting list keyed by caller-supplied ids.
///
/// Deletion frees the id for reuse and does not preserve the order of the
/// remaining records. Lookups fail explicitly for absent ids rather than
/// returning a zero-valued record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) -> Result<()> {
        if self.find_index(product.id).is_some() {
            return Err(StoreError::DuplicateId(product.id));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProductNotFound(id))
    }

    pub fn get_mut(&mut self, id: ProductId) -> Result<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProductNotFound(id))
    }

    pub fn remove(&mut self, id: ProductId) -> Result<Product> {
        let index = self
            .find_index(id)
            .ok_or(StoreError::ProductNotFound(id))?;
        Ok(self.products.swap_remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn find_index(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: ProductId, creator: AccountId) -> Product {
        Product {
            id,
            name: format!("product-{id}"),
            price: Balance(dec!(100)),
            quantity: 5,
            creator,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut catalog = Catalog::new();
        catalog.insert(product(1, 10)).unwrap();

        let found = catalog.get(1).unwrap();
        assert_eq!(found.creator, 10);
        assert_eq!(found.quantity, 5);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert(product(1, 10)).unwrap();
        assert_eq!(
            catalog.insert(product(1, 11)),
            Err(StoreError::DuplicateId(1))
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_lookup_fails() {
        let catalog = Catalog::new();
        assert_eq!(catalog.get(69).unwrap_err(), StoreError::ProductNotFound(69));
    }

    #[test]
    fn test_remove_frees_id() {
        let mut catalog = Catalog::new();
        catalog.insert(product(1, 10)).unwrap();
        catalog.insert(product(2, 10)).unwrap();

        catalog.remove(1).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(1).is_err());

        // The id is free for reuse after deletion.
        catalog.insert(product(1, 11)).unwrap();
        assert_eq!(catalog.get(1).unwrap().creator, 11);
    }

    #[test]
    fn test_remove_missing_fails() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.remove(5).unwrap_err(), StoreError::ProductNotFound(5));
    }
}
