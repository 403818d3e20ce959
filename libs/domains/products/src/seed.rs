//! Fixed demo catalog loaded by the seed endpoint.

use crate::models::{CreateProduct, Gender};

struct SeedProduct {
    title: &'static str,
    price: f64,
    description: &'static str,
    stock: i32,
    sizes: &'static [&'static str],
    gender: Gender,
    tags: &'static [&'static str],
    images: &'static [&'static str],
}

const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        title: "Men's Chill Crew Neck Sweatshirt",
        price: 75.0,
        description: "Relaxed fit crew neck in a heavyweight cotton blend.",
        stock: 7,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["sweatshirt"],
        images: &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Quilted Shirt Jacket",
        price: 200.0,
        description: "Quilted shell with a snap front and two chest pockets.",
        stock: 5,
        sizes: &["XS", "S", "M", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["jacket"],
        images: &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Cropped Puffer Jacket",
        price: 225.0,
        description: "Cropped puffer with a high collar and water-repellent finish.",
        stock: 85,
        sizes: &["XS", "S", "M"],
        gender: Gender::Women,
        tags: &["hoodie"],
        images: &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Cybertruck Long Sleeve Tee",
        price: 30.0,
        description: "Long sleeve tee printed with a pixel-art truck.",
        stock: 10,
        sizes: &["XS", "S", "M"],
        gender: Gender::Kid,
        tags: &["shirt"],
        images: &["1742694-00-A_1_2000.jpg", "1742694-00-A_3.jpg"],
    },
    SeedProduct {
        title: "Chill Pullover Hoodie",
        price: 90.0,
        description: "Brushed fleece hoodie with a kangaroo pocket.",
        stock: 10,
        sizes: &["S", "M", "L", "XL"],
        gender: Gender::Unisex,
        tags: &["hoodie"],
        images: &["1740245-00-A_0_2000.jpg", "1740245-00-A_1.jpg"],
    },
];

/// Create payloads for the demo catalog, in a stable order.
pub fn catalog() -> Vec<CreateProduct> {
    CATALOG
        .iter()
        .map(|item| CreateProduct {
            title: item.title.to_string(),
            price: Some(item.price),
            description: Some(item.description.to_string()),
            slug: None,
            stock: Some(item.stock),
            sizes: item.sizes.iter().map(|s| s.to_string()).collect(),
            gender: item.gender,
            tags: item.tags.iter().map(|s| s.to_string()).collect(),
            images: item.images.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
