pub mod handlers;
pub mod speed;
pub mod state;
pub mod stats;
pub mod turn_order;

#[cfg(test)]
mod tests;
