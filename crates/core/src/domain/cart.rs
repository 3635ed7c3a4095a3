use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Fixed shipping surcharge added on top of the cart subtotal.
pub fn frete_fixo() -> Decimal {
    Decimal::new(5, 0)
}

/// One line of a session's cart.
///
/// `preco` is the accumulated total for the line, not a unit price: merging
/// the same product id again adds the incoming `preco` to the stored one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    #[serde(rename = "quantidadeCarrinho")]
    pub quantidade_carrinho: u32,
    pub observacoes: Option<String>,
}

/// Session-scoped ordered collection of line items, unique by `id`.
///
/// Serializes transparently as the plain item array, so persisted carts
/// carry items only; `valorTotal`/`valorTotalFrete` are derived on demand
/// and never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    pub itens: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.itens.is_empty()
    }

    /// Adds an item to the cart, merging with an existing line of the same
    /// `id`: quantity and `preco` accumulate additively and `observacoes`
    /// is overwritten with the incoming value. A new `id` is appended
    /// verbatim, keeping insertion order.
    pub fn merge_item(&mut self, item: CartItem) {
        match self.itens.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantidade_carrinho += item.quantidade_carrinho;
                existing.preco += item.preco;
                existing.observacoes = item.observacoes;
            }
            None => self.itens.push(item),
        }
    }

    /// Replaces quantity and `preco` of the line with the given `id`
    /// outright (not additive).
    pub fn update_item(
        &mut self,
        id: u64,
        quantidade_carrinho: u32,
        preco: Decimal,
    ) -> Result<(), ServiceError> {
        let item = self
            .itens
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(item_nao_encontrado)?;

        item.quantidade_carrinho = quantidade_carrinho;
        item.preco = preco;
        Ok(())
    }

    /// Removes the single line with the given `id`.
    pub fn remove_item(&mut self, id: u64) -> Result<(), ServiceError> {
        let position = self
            .itens
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(item_nao_encontrado)?;

        self.itens.remove(position);
        Ok(())
    }

    /// Resets the cart to empty.
    pub fn clear(&mut self) {
        self.itens.clear();
    }

    /// Sum of all line `preco` values currently in the cart.
    pub fn valor_total(&self) -> Decimal {
        self.itens.iter().map(|item| item.preco).sum()
    }

    /// Subtotal plus the fixed shipping surcharge.
    pub fn valor_total_frete(&self) -> Decimal {
        self.valor_total() + frete_fixo()
    }
}

fn item_nao_encontrado() -> ServiceError {
    ServiceError::NotFound("Item não encontrado no carrinho".to_string())
}
