pub mod discount_tier;
pub mod item;
pub mod item_price;
