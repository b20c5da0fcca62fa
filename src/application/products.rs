use crate::db::DbPool;
use crate::domain::catalog::{NewProduct, Product};
use crate::domain::errors::DomainError;
use crate::infrastructure::models::NewProductRow;
use crate::infrastructure::products;

#[derive(Clone)]
pub struct ProductService {
    pool: DbPool,
}

impl ProductService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        products::list(&mut conn)
    }

    pub fn get(&self, id: i32) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;
        products::find_by_id(&mut conn, id)?.ok_or(DomainError::NotFound)
    }

    pub fn create(&self, product: NewProduct) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        products::insert(
            &mut conn,
            NewProductRow {
                name: product.name,
                description: product.description,
                image: product.image,
                price: product.price,
                quantity: product.quantity,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::ProductService;
    use crate::domain::catalog::NewProduct;
    use crate::domain::errors::DomainError;
    use crate::test_support::setup_db;

    fn sample(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "a thing".to_string(),
            image: "https://example.com/thing.png".to_string(),
            price: BigDecimal::from_str("19.99").expect("decimal"),
            quantity: 7,
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let (_container, pool) = setup_db().await;
        let service = ProductService::new(pool);

        let id = service.create(sample("lamp")).expect("create failed");
        let product = service.get(id).expect("get failed");

        assert_eq!(product.name, "lamp");
        assert_eq!(product.quantity, 7);
        assert_eq!(product.price, BigDecimal::from_str("19.99").expect("decimal"));
    }

    #[tokio::test]
    async fn get_unknown_product_is_not_found() {
        let (_container, pool) = setup_db().await;
        let service = ProductService::new(pool);

        let err = service.get(404404).expect_err("should fail");
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn list_returns_products_in_id_order() {
        let (_container, pool) = setup_db().await;
        let service = ProductService::new(pool);

        let first = service.create(sample("first")).expect("create failed");
        let second = service.create(sample("second")).expect("create failed");

        let all = service.list().expect("list failed");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first);
        assert_eq!(all[1].id, second);
    }

    #[tokio::test]
    async fn repeated_reads_return_identical_data() {
        let (_container, pool) = setup_db().await;
        let service = ProductService::new(pool);

        let id = service.create(sample("stable")).expect("create failed");
        let a = service.get(id).expect("get failed");
        let b = service.get(id).expect("get failed");

        assert_eq!(a.name, b.name);
        assert_eq!(a.price, b.price);
        assert_eq!(a.quantity, b.quantity);
    }
}
