//! Sample data shared by tests across the workspace.

use rust_decimal::Decimal;

use comanda_core::domain::cart::{Cart, CartItem};
use comanda_core::domain::product::Product;

pub fn sample_produtos() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            nome: "Sushi Especial".to_string(),
            preco: Decimal::new(2999, 2),
            imagem: Some("/img/sushi-especial.png".to_string()),
        },
        Product {
            id: 2,
            nome: "Temaki de Salmão".to_string(),
            preco: Decimal::new(1950, 2),
            imagem: Some("/img/temaki-salmao.png".to_string()),
        },
        Product {
            id: 3,
            nome: "Hot Roll".to_string(),
            preco: Decimal::new(1200, 2),
            imagem: None,
        },
    ]
}

pub fn sample_item(id: u64, preco: Decimal, quantidade: u32) -> CartItem {
    let nome = sample_produtos()
        .into_iter()
        .find(|produto| produto.id == id)
        .map(|produto| produto.nome)
        .unwrap_or_else(|| format!("Produto {id}"));

    CartItem {
        id,
        nome,
        imagem: None,
        preco,
        quantidade_carrinho: quantidade,
        observacoes: None,
    }
}

pub fn sample_cart() -> Cart {
    Cart {
        itens: vec![
            sample_item(1, Decimal::new(2999, 2), 1),
            sample_item(2, Decimal::new(3900, 2), 2),
        ],
    }
}
