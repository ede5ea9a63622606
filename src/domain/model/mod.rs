//! Menu, item and account types shared by every layer.

pub mod item;
pub mod menu;
pub mod user;

pub use item::{
    profit_margin, round_amount, MenuItem, NewMenuItem, AMOUNT_LIMIT, DEFAULT_CATEGORY,
    MARGIN_LIMIT,
};
pub use menu::{
    validate_title, Menu, MenuSummary, NewMenu, DEFAULT_MENU_STATUS, TITLE_MAX_CHARS,
    TITLE_REQUIRED, TITLE_TOO_LONG,
};
pub use user::{NewUser, UserId, DEFAULT_USER_ROLE};
