use storefront_shared::{OrderLine, OrderLines, ProductId};

/// 购物车：商品 → 请求数量
///
/// 只支持递增和整体清空；添加时不校验库存，库存由后端保证。
/// 行按首次加入的顺序保存。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    lines: Vec<OrderLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product_id: ProductId) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(OrderLine {
                product_id,
                quantity: 1,
            }),
        }
    }

    pub fn lines(&self) -> Vec<OrderLine> {
        self.lines.clone()
    }

    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 转换为 `POST /orders` 的请求体
    pub fn to_order_lines(&self) -> OrderLines {
        OrderLines {
            order_lines: self.lines(),
        }
    }
}
