pub mod alphabet;
pub mod stock_badge;
pub mod sub_tabs;
